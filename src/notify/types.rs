use chrono::{DateTime, Utc};
use std::fmt;
use std::time::Duration;
use uuid::Uuid;

/// Identifier of the shared `<style>` element holding banner styles.
pub const STYLESHEET_ID: &str = "notification-styles";

pub const STYLESHEET: &str = r#"
.notification {
    position: fixed;
    top: 20px;
    right: 20px;
    background: var(--bg-card);
    border: 1px solid var(--border);
    border-radius: 8px;
    padding: 15px 20px;
    min-width: 300px;
    max-width: 400px;
    box-shadow: 0 4px 12px var(--shadow);
    z-index: 9999;
    display: flex;
    align-items: center;
    justify-content: space-between;
    animation: notification-enter 0.3s ease;
}
@keyframes notification-enter {
    from { transform: translateY(-20px); opacity: 0; }
    to { transform: translateY(0); opacity: 1; }
}
.notification-content { display: flex; align-items: center; gap: 10px; }
.notification i { font-size: 20px; }
.notification-success i { color: var(--success); }
.notification-error i { color: var(--danger); }
.notification-warning i { color: var(--warning); }
.notification-info i { color: var(--accent); }
.notification-close { background: none; border: none; color: var(--text-secondary); cursor: pointer; padding: 5px; }
.notification-close:hover { color: var(--text-primary); }
"#;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    Success,
    Error,
    Warning,
    Info,
}

impl NotificationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Success => "success",
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Info => "info",
        }
    }

    /// Font Awesome icon name.
    pub fn icon(&self) -> &'static str {
        match self {
            Self::Success => "check-circle",
            Self::Error => "exclamation-circle",
            Self::Warning => "exclamation-triangle",
            Self::Info => "info-circle",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Self::Success => "var(--success)",
            Self::Error => "var(--danger)",
            Self::Warning => "var(--warning)",
            Self::Info => "var(--accent)",
        }
    }
}

/// Unknown kinds are shown as `Info`.
impl From<&str> for NotificationKind {
    fn from(kind: &str) -> Self {
        match kind {
            "success" => Self::Success,
            "error" => Self::Error,
            "warning" => Self::Warning,
            _ => Self::Info,
        }
    }
}

impl fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NotificationId(Uuid);

impl NotificationId {
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for NotificationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for NotificationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "notification-{}", self.0.simple())
    }
}

#[derive(Debug, Clone)]
pub struct Notification {
    pub id: NotificationId,
    pub message: String,
    pub kind: NotificationKind,
    pub ttl: Duration,
    pub created_at: DateTime<Utc>,
}

impl Notification {
    pub fn new(message: impl Into<String>, kind: NotificationKind, ttl: Duration) -> Self {
        Self {
            id: NotificationId::new(),
            message: message.into(),
            kind,
            ttl,
            created_at: Utc::now(),
        }
    }

    /// Banner markup; the message is escaped before insertion.
    pub fn render_html(&self) -> String {
        format!(
            concat!(
                r#"<div id="{id}" class="notification notification-{kind}">"#,
                r#"<div class="notification-content">"#,
                r#"<i class="fas fa-{icon}"></i>"#,
                r#"<span>{message}</span>"#,
                r#"</div>"#,
                r#"<button class="notification-close" data-dismiss="{id}">"#,
                r#"<i class="fas fa-times"></i>"#,
                r#"</button>"#,
                r#"</div>"#
            ),
            id = self.id,
            kind = self.kind,
            icon = self.kind.icon(),
            message = escape_html(&self.message),
        )
    }
}

fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
