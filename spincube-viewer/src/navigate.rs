//! Opening face links

use crate::error::{Result, ViewerError};
use log::info;

/// Destination for clicked face links.
///
/// The viewer goes through this trait so tests can observe navigation
/// without a desktop session.
pub trait Navigator {
    /// Open a URL
    fn open(&self, url: &str) -> Result<()>;
}

/// Opens links in the system default browser.
pub struct SystemNavigator;

impl Navigator for SystemNavigator {
    fn open(&self, url: &str) -> Result<()> {
        info!("opening {}", url);
        webbrowser::open(url).map_err(|e| ViewerError::Navigation {
            url: url.to_string(),
            reason: e.to_string(),
        })
    }
}


#[cfg(test)]
mod tests {
    use super::testing::RecordingNavigator;
    use super::*;

    #[test]
    fn test_recording_navigator_collects_urls() {
        let navigator = RecordingNavigator::default();
        navigator.open("https://example.com/a").unwrap();
        navigator.open("https://example.com/b").unwrap();
        assert_eq!(
            *navigator.opened.borrow(),
            vec!["https://example.com/a", "https://example.com/b"]
        );
    }
}
