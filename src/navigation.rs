use std::sync::Mutex;
use tracing::info;

/// Full-page navigation, the equivalent of assigning `window.location`.
pub trait Navigator: Send + Sync {
    fn navigate(&self, route: &str);
}

/// Remembers every destination instead of leaving the page.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    visited: Mutex<Vec<String>>,
}

impl RecordingNavigator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn last(&self) -> Option<String> {
        self.visited
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .last()
            .cloned()
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .clone()
    }
}

impl Navigator for RecordingNavigator {
    fn navigate(&self, route: &str) {
        info!("Navigating to {}", route);
        self.visited
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(route.to_string());
    }
}
