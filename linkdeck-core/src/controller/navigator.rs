//! src/controller/navigator.rs
//! Hand-off of a URL to a new browsing context.

use tracing::{info, warn};

use crate::error::AppError;

pub trait Navigator {
    fn open_in_new_context(&mut self, url: &str) -> Result<(), AppError>;
}

/// Opens URLs in the system's default browser.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserNavigator;

impl Navigator for BrowserNavigator {
    fn open_in_new_context(&mut self, url: &str) -> Result<(), AppError> {
        match webbrowser::open(url) {
            Ok(()) => {
                info!(url, "Opened link in browser");
                Ok(())
            }
            Err(e) => {
                warn!(url, error = %e, "Browser launch failed");
                Err(AppError::browser(url, e.to_string()))
            }
        }
    }
}

#[cfg(test)]
pub mod testing {
    use super::*;

    /// Records every URL instead of launching anything.
    #[derive(Debug, Default, Clone)]
    pub struct RecordingNavigator {
        pub opened: Vec<String>,
    }

    impl Navigator for RecordingNavigator {
        fn open_in_new_context(&mut self, url: &str) -> Result<(), AppError> {
            self.opened.push(url.to_string());
            Ok(())
        }
    }

    /// Fails every launch.
    #[derive(Debug, Default, Clone, Copy)]
    pub struct BrokenNavigator;

    impl Navigator for BrokenNavigator {
        fn open_in_new_context(&mut self, url: &str) -> Result<(), AppError> {
            Err(AppError::browser(url, "no browser available"))
        }
    }
}
