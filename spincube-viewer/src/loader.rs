//! Background decoding of face and sky images
//!
//! Decoding runs on one worker thread; results stream back over a channel
//! and the viewer drains them between frames. Faces are collected into
//! [`FaceSlots`] and handed to the renderer only once every slot is filled,
//! so the overlay appears all at once regardless of arrival order.

use crate::error::{Result, ViewerError};
use flume::Receiver;
use image::RgbaImage;
use log::{debug, warn};
use spincube_core::{FaceBindings, TextureSource};
use spincube_render::FaceImage;
use std::path::{Path, PathBuf};
use std::thread;

/// Flat color standing in for a face whose image failed to decode.
pub const FALLBACK_FACE_COLOR: [u8; 3] = [64, 64, 64];

/// One finished decode job.
pub enum LoaderEvent {
    /// A face texture, slot-indexed in face order.
    Face { slot: usize, image: FaceImage },
    /// The sky panorama.
    Sky { image: RgbaImage },
}

/// Collects face textures as they finish decoding.
///
/// A counter tracks how many slots remain empty; completion is the counter
/// reaching zero, never the index of the last event to arrive. Filling a
/// slot twice is an error.
pub struct FaceSlots {
    images: [FaceImage; 6],
    filled: [bool; 6],
    remaining: usize,
}

impl FaceSlots {
    /// Create the collector with all six slots empty
    pub fn new() -> Self {
        Self {
            images: std::array::from_fn(|_| FaceImage::Color(FALLBACK_FACE_COLOR)),
            filled: [false; 6],
            remaining: 6,
        }
    }

    /// Record a finished slot
    pub fn complete(&mut self, slot: usize, image: FaceImage) -> Result<()> {
        if slot >= self.images.len() {
            return Err(ViewerError::SlotOutOfRange(slot));
        }
        if self.filled[slot] {
            return Err(ViewerError::SlotAlreadyFilled(slot));
        }
        self.images[slot] = image;
        self.filled[slot] = true;
        self.remaining -= 1;
        debug!("face slot {} filled, {} remaining", slot, self.remaining);
        Ok(())
    }

    /// Whether every slot holds a texture
    pub fn is_complete(&self) -> bool {
        self.remaining == 0
    }

    /// Number of slots still empty
    pub fn remaining(&self) -> usize {
        self.remaining
    }

    /// Take the finished set, erroring if any slot is still empty
    pub fn into_images(self) -> Result<[FaceImage; 6]> {
        if self.remaining != 0 {
            return Err(ViewerError::SlotsIncomplete(self.remaining));
        }
        Ok(self.images)
    }
}

impl Default for FaceSlots {
    fn default() -> Self {
        Self::new()
    }
}

/// Spawn the decode thread for six face bindings and an optional sky image.
///
/// Color-only bindings skip decoding entirely. A face image that fails to
/// decode is replaced by [`FALLBACK_FACE_COLOR`] so the set still completes;
/// a failed sky decode leaves the placeholder sky in place.
pub fn spawn_loader(bindings: &FaceBindings, sky: Option<PathBuf>) -> Receiver<LoaderEvent> {
    let (tx, rx) = flume::unbounded();

    let jobs: Vec<(usize, TextureSource)> = bindings
        .iter()
        .enumerate()
        .map(|(slot, (_, binding))| (slot, binding.texture.clone()))
        .collect();

    thread::spawn(move || {
        for (slot, source) in jobs {
            let image = match source {
                TextureSource::Color(rgb) => FaceImage::Color(rgb),
                TextureSource::Path(path) => match load_rgba(&path) {
                    Ok(image) => FaceImage::Image(image),
                    Err(e) => {
                        warn!("failed to decode face texture {:?}: {}", path, e);
                        FaceImage::Color(FALLBACK_FACE_COLOR)
                    }
                },
            };
            if tx.send(LoaderEvent::Face { slot, image }).is_err() {
                return;
            }
        }

        if let Some(path) = sky {
            match load_rgba(&path) {
                Ok(image) => {
                    let _ = tx.send(LoaderEvent::Sky { image });
                }
                Err(e) => warn!("failed to decode sky panorama {:?}: {}", path, e),
            }
        }
    });

    rx
}

fn load_rgba(path: &Path) -> image::ImageResult<RgbaImage> {
    Ok(image::open(path)?.to_rgba8())
}

#[cfg(test)]
mod tests {
    use super::*;
    use spincube_core::FaceBinding;

    fn solid(rgb: [u8; 3]) -> FaceImage {
        FaceImage::Color(rgb)
    }

    #[test]
    fn test_slots_complete_in_any_order() {
        let mut slots = FaceSlots::new();
        for slot in [3, 0, 5, 1, 4, 2] {
            assert!(!slots.is_complete());
            slots.complete(slot, solid([slot as u8, 0, 0])).unwrap();
        }
        assert!(slots.is_complete());

        let images = slots.into_images().unwrap();
        for (slot, image) in images.iter().enumerate() {
            match image {
                FaceImage::Color(rgb) => assert_eq!(rgb[0], slot as u8),
                FaceImage::Image(_) => panic!("expected solid color"),
            }
        }
    }

    #[test]
    fn test_double_completion_is_rejected() {
        let mut slots = FaceSlots::new();
        slots.complete(2, solid([1, 2, 3])).unwrap();
        let err = slots.complete(2, solid([4, 5, 6])).unwrap_err();
        assert!(matches!(err, ViewerError::SlotAlreadyFilled(2)));
        // The counter is untouched by the rejected event.
        assert_eq!(slots.remaining(), 5);
    }

    #[test]
    fn test_out_of_range_slot_is_rejected() {
        let mut slots = FaceSlots::new();
        let err = slots.complete(6, solid([0, 0, 0])).unwrap_err();
        assert!(matches!(err, ViewerError::SlotOutOfRange(6)));
    }

    #[test]
    fn test_incomplete_take_is_rejected() {
        let mut slots = FaceSlots::new();
        slots.complete(0, solid([0, 0, 0])).unwrap();
        let err = slots.into_images().unwrap_err();
        assert!(matches!(err, ViewerError::SlotsIncomplete(5)));
    }

    #[test]
    fn test_loader_delivers_color_bindings_without_files() {
        let labels = ["right", "left", "top", "bottom", "front", "back"];
        let mut tint = 0;
        let bindings = FaceBindings::new(labels.map(|label| {
            tint += 40;
            FaceBinding::new(
                label,
                format!("https://example.com/{}", label),
                TextureSource::Color([tint, 0, 0]),
            )
        }));

        let rx = spawn_loader(&bindings, None);
        let mut slots = FaceSlots::new();
        // Only face events are expected; the channel closes afterwards.
        for event in rx.iter() {
            match event {
                LoaderEvent::Face { slot, image } => slots.complete(slot, image).unwrap(),
                LoaderEvent::Sky { .. } => panic!("no sky was requested"),
            }
        }
        assert!(slots.is_complete());
    }

    #[test]
    fn test_loader_substitutes_fallback_for_missing_file() {
        let labels = ["right", "left", "top", "bottom", "front", "back"];
        let bindings = FaceBindings::new(labels.map(|label| {
            FaceBinding::new(
                label,
                format!("https://example.com/{}", label),
                TextureSource::Path(PathBuf::from("/nonexistent/missing.png")),
            )
        }));

        let rx = spawn_loader(&bindings, None);
        let mut slots = FaceSlots::new();
        for event in rx.iter() {
            match event {
                LoaderEvent::Face { slot, image } => {
                    match &image {
                        FaceImage::Color(rgb) => assert_eq!(*rgb, FALLBACK_FACE_COLOR),
                        FaceImage::Image(_) => panic!("decode cannot succeed"),
                    }
                    slots.complete(slot, image).unwrap();
                }
                LoaderEvent::Sky { .. } => panic!("no sky was requested"),
            }
        }
        assert!(slots.is_complete());
    }
}
