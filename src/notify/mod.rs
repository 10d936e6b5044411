mod center;
mod surface;
mod types;

pub use center::Notifier;
pub use surface::{MemorySurface, Surface, TerminalSurface};
pub use types::{
    Notification, NotificationId, NotificationKind, STYLESHEET, STYLESHEET_ID,
};
