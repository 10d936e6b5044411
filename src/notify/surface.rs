use super::types::{Notification, NotificationId};
use std::collections::HashMap;
use std::io::Write;
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::debug;

/// Where banners are drawn. Implementations must tolerate `remove` for ids
/// that are no longer shown.
pub trait Surface: Send + Sync {
    fn has_stylesheet(&self, id: &str) -> bool;
    fn install_stylesheet(&self, id: &str, css: &str);
    fn show(&self, notification: &Notification);
    fn remove(&self, id: NotificationId);
}

/// In-memory page model: banners appended to the body, styles kept by element id.
#[derive(Debug, Default)]
pub struct MemorySurface {
    body: Mutex<Vec<Notification>>,
    head: Mutex<HashMap<String, String>>,
    installs: Mutex<usize>,
}

impl MemorySurface {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn visible(&self) -> Vec<Notification> {
        self.body.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    pub fn messages(&self) -> Vec<String> {
        self.visible().into_iter().map(|n| n.message).collect()
    }

    pub fn stylesheet(&self, id: &str) -> Option<String> {
        self.head
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .get(id)
            .cloned()
    }

    pub fn stylesheet_installs(&self) -> usize {
        *self.installs.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Markup of every banner currently in the body, in insertion order.
    pub fn body_html(&self) -> String {
        self.visible().iter().map(Notification::render_html).collect()
    }
}

impl Surface for MemorySurface {
    fn has_stylesheet(&self, id: &str) -> bool {
        self.head
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .contains_key(id)
    }

    fn install_stylesheet(&self, id: &str, css: &str) {
        self.head
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .insert(id.to_string(), css.to_string());
        *self.installs.lock().unwrap_or_else(|e| e.into_inner()) += 1;
    }

    fn show(&self, notification: &Notification) {
        self.body
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(notification.clone());
    }

    fn remove(&self, id: NotificationId) {
        let mut body = self.body.lock().unwrap_or_else(|e| e.into_inner());
        if let Some(pos) = body.iter().position(|n| n.id == id) {
            body.remove(pos);
        }
    }
}

/// Prints banners to stderr. Used by the command line host.
#[derive(Debug, Default)]
pub struct TerminalSurface {
    styled: AtomicBool,
}

impl TerminalSurface {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Surface for TerminalSurface {
    fn has_stylesheet(&self, _id: &str) -> bool {
        self.styled.load(Ordering::SeqCst)
    }

    fn install_stylesheet(&self, id: &str, _css: &str) {
        debug!("Terminal surface ignores stylesheet {}", id);
        self.styled.store(true, Ordering::SeqCst);
    }

    fn show(&self, notification: &Notification) {
        let mut stderr = std::io::stderr().lock();
        let _ = writeln!(
            stderr,
            "[{}] {}",
            notification.kind.as_str().to_uppercase(),
            notification.message
        );
    }

    fn remove(&self, id: NotificationId) {
        debug!("Banner {} expired", id);
    }
}
