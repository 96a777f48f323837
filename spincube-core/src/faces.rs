//! Link bindings for the six cube faces

use crate::FaceIndex;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Where a face's texture pixels come from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum TextureSource {
    /// Decode an image file from disk.
    Path(PathBuf),
    /// Fill with a flat RGB color.
    Color([u8; 3]),
}

/// A cube face bound to an external resource.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBinding {
    /// Short name used in logs.
    pub label: String,
    /// Resource opened when the face is clicked.
    pub url: String,
    pub texture: TextureSource,
}

impl FaceBinding {
    /// Create a binding from its parts
    pub fn new(
        label: impl Into<String>,
        url: impl Into<String>,
        texture: TextureSource,
    ) -> Self {
        Self {
            label: label.into(),
            url: url.into(),
            texture,
        }
    }
}

/// The immutable six-face binding set, indexed by [`FaceIndex`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceBindings {
    bindings: [FaceBinding; 6],
}

impl FaceBindings {
    /// Wrap six bindings given in render order
    pub fn new(bindings: [FaceBinding; 6]) -> Self {
        Self { bindings }
    }

    /// Binding for one face
    pub fn get(&self, face: FaceIndex) -> &FaceBinding {
        &self.bindings[usize::from(face)]
    }

    /// Iterate over faces and their bindings in render order
    pub fn iter(&self) -> impl Iterator<Item = (FaceIndex, &FaceBinding)> {
        FaceIndex::ALL.iter().copied().zip(self.bindings.iter())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make_bindings() -> FaceBindings {
        let labels = ["right", "left", "top", "bottom", "front", "back"];
        FaceBindings::new(labels.map(|label| {
            FaceBinding::new(
                label,
                format!("https://example.com/{label}"),
                TextureSource::Color([128, 128, 128]),
            )
        }))
    }

    #[test]
    fn test_get_indexes_by_face_order() {
        let bindings = make_bindings();
        assert_eq!(bindings.get(FaceIndex::PosX).label, "right");
        assert_eq!(bindings.get(FaceIndex::PosY).label, "top");
        assert_eq!(bindings.get(FaceIndex::NegZ).label, "back");
    }

    #[test]
    fn test_iter_walks_render_order() {
        let bindings = make_bindings();
        let order: Vec<FaceIndex> = bindings.iter().map(|(face, _)| face).collect();
        assert_eq!(order, FaceIndex::ALL);
    }
}
