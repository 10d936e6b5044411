use super::surface::Surface;
use super::types::{Notification, NotificationId, NotificationKind, STYLESHEET, STYLESHEET_ID};
use crate::config::{DisplayPolicy, NotificationConfig};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex, Weak};
use std::time::Duration;
use tracing::{debug, warn};

struct Inner {
    surface: Arc<dyn Surface>,
    ttl: Duration,
    policy: DisplayPolicy,
    active: Mutex<VecDeque<Notification>>,
}

/// Shows transient banners on a [`Surface`] and removes them after their TTL
/// or on explicit dismissal, whichever comes first.
#[derive(Clone)]
pub struct Notifier {
    inner: Arc<Inner>,
}

impl Notifier {
    pub fn new(surface: Arc<dyn Surface>, config: &NotificationConfig) -> Self {
        Self {
            inner: Arc::new(Inner {
                surface,
                ttl: config.ttl(),
                policy: config.policy,
                active: Mutex::new(VecDeque::new()),
            }),
        }
    }

    pub fn ttl(&self) -> Duration {
        self.inner.ttl
    }

    pub fn policy(&self) -> DisplayPolicy {
        self.inner.policy
    }

    pub fn notify(&self, message: impl Into<String>, kind: NotificationKind) -> NotificationId {
        let surface = &self.inner.surface;
        if !surface.has_stylesheet(STYLESHEET_ID) {
            surface.install_stylesheet(STYLESHEET_ID, STYLESHEET);
        }

        let notification = Notification::new(message, kind, self.inner.ttl);
        let id = notification.id;
        debug!("Showing {} banner {}: {}", kind, id, notification.message);

        {
            let mut active = self.lock_active();
            for evicted in self.evict_for_insert(&mut active) {
                debug!("Banner {} evicted by display policy", evicted.id);
                surface.remove(evicted.id);
            }
            surface.show(&notification);
            active.push_back(notification);
        }

        self.schedule_expiry(id);
        id
    }

    pub fn success(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, NotificationKind::Success)
    }

    pub fn error(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, NotificationKind::Error)
    }

    pub fn warning(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, NotificationKind::Warning)
    }

    pub fn info(&self, message: impl Into<String>) -> NotificationId {
        self.notify(message, NotificationKind::Info)
    }

    /// Removes the banner. Returns `false` when it was already gone.
    pub fn dismiss(&self, id: NotificationId) -> bool {
        Self::dismiss_inner(&self.inner, id)
    }

    pub fn active(&self) -> Vec<Notification> {
        self.lock_active().iter().cloned().collect()
    }

    fn dismiss_inner(inner: &Inner, id: NotificationId) -> bool {
        let mut active = inner.active.lock().unwrap_or_else(|e| e.into_inner());
        match active.iter().position(|n| n.id == id) {
            Some(pos) => {
                active.remove(pos);
                inner.surface.remove(id);
                true
            }
            None => false,
        }
    }

    fn evict_for_insert(&self, active: &mut VecDeque<Notification>) -> Vec<Notification> {
        let keep = match self.inner.policy {
            DisplayPolicy::Unbounded => return Vec::new(),
            DisplayPolicy::Bounded { max } => max.saturating_sub(1),
            DisplayPolicy::LatestWins => 0,
        };
        let excess = active.len().saturating_sub(keep);
        active.drain(..excess).collect()
    }

    // The timer outlives manual dismissal; dismissing twice is harmless.
    fn schedule_expiry(&self, id: NotificationId) {
        let Ok(handle) = tokio::runtime::Handle::try_current() else {
            warn!("No async runtime, banner {} will not expire on its own", id);
            return;
        };
        let inner: Weak<Inner> = Arc::downgrade(&self.inner);
        let ttl = self.inner.ttl;
        handle.spawn(async move {
            tokio::time::sleep(ttl).await;
            if let Some(inner) = inner.upgrade() {
                if Self::dismiss_inner(&inner, id) {
                    debug!("Banner {} expired after {:?}", id, ttl);
                }
            }
        });
    }

    fn lock_active(&self) -> std::sync::MutexGuard<'_, VecDeque<Notification>> {
        self.inner.active.lock().unwrap_or_else(|e| e.into_inner())
    }
}

impl std::fmt::Debug for Notifier {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Notifier")
            .field("ttl", &self.inner.ttl)
            .field("policy", &self.inner.policy)
            .field("active", &self.lock_active().len())
            .finish()
    }
}
