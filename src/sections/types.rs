use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DashboardStats {
    #[serde(default)]
    pub stats: BTreeMap<String, Value>,
    #[serde(default)]
    pub daily_stats: Vec<DailyStat>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DailyStat {
    pub date: String,
    #[serde(default)]
    pub new_users: u64,
    #[serde(default)]
    pub new_subscriptions: u64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RecentActivity {
    #[serde(default)]
    pub activities: Vec<Activity>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Activity {
    #[serde(default)]
    pub user_name: Option<String>,
    pub action: String,
    #[serde(default)]
    pub time: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dashboard {
    pub stats: DashboardStats,
    pub activity: RecentActivity,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserSummary {
    pub id: i64,
    pub telegram_id: i64,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub subscription: Option<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsersPage {
    #[serde(default)]
    pub users: Vec<UserSummary>,
    #[serde(default)]
    pub total: u64,
    #[serde(default = "first_page")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserDetail {
    pub user: UserSummary,
    #[serde(default)]
    pub subscription_history: Vec<Value>,
    #[serde(default)]
    pub payments: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubscriptionsPage {
    #[serde(default)]
    pub subscriptions: Vec<Value>,
    #[serde(default)]
    pub stats: Option<Value>,
    #[serde(default = "first_page")]
    pub total_pages: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub id: i64,
    pub title: String,
    #[serde(default, alias = "content")]
    pub text_content: String,
    #[serde(default)]
    pub video_url: Option<String>,
    #[serde(default)]
    pub order_index: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InstructionList {
    #[serde(default)]
    pub instructions: Vec<Instruction>,
}

/// Body of `POST /instructions`. `video_url` is sent as `null` when absent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewInstruction {
    pub title: String,
    pub content: String,
    pub video_url: Option<String>,
    pub order_index: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(default)]
    pub bot_token: String,
    #[serde(default)]
    pub admin_ids: String,
    #[serde(default = "default_auto_renewal")]
    pub auto_renewal: String,
    #[serde(default)]
    pub notify_new_users: bool,
    #[serde(default)]
    pub notify_expiring: bool,
    #[serde(default)]
    pub notify_errors: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SettingsResponse {
    #[serde(default)]
    pub settings: Settings,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemHealth {
    #[serde(default)]
    pub database: Option<String>,
    #[serde(default)]
    pub system: Option<SystemInfo>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SystemInfo {
    #[serde(default)]
    pub platform: Option<String>,
    #[serde(default)]
    pub memory_percent: Option<f64>,
    #[serde(default)]
    pub memory_used: Option<f64>,
    #[serde(default)]
    pub memory_total: Option<f64>,
    #[serde(default)]
    pub cpu_percent: Option<f64>,
    #[serde(default)]
    pub uptime_days: Option<u64>,
    #[serde(default)]
    pub uptime_hours: Option<u64>,
    #[serde(default)]
    pub last_backup: Option<String>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            bot_token: String::new(),
            admin_ids: String::new(),
            auto_renewal: default_auto_renewal(),
            notify_new_users: false,
            notify_expiring: false,
            notify_errors: false,
        }
    }
}

impl SystemHealth {
    pub fn database_healthy(&self) -> bool {
        self.database.as_deref() == Some("healthy")
    }
}

fn first_page() -> u32 {
    1
}

fn default_auto_renewal() -> String {
    "enabled".to_string()
}
