use super::{Dashboard, DashboardStats, Loader, RecentActivity};
use crate::{
    Result,
    api::{ApiClient, Query},
};
use async_trait::async_trait;
use tracing::debug;

pub const STATS_PATH: &str = "/dashboard/stats";
pub const RECENT_ACTIVITY_PATH: &str = "/dashboard/recent-activity";

/// Loads the stat cards and the activity feed in parallel.
#[derive(Debug, Clone, Copy, Default)]
pub struct DashboardLoader;

#[async_trait]
impl Loader for DashboardLoader {
    type Output = Dashboard;

    async fn load(&self, api: &ApiClient) -> Result<Dashboard> {
        let (stats, activity) = tokio::join!(
            api.get(STATS_PATH, Query::new()),
            api.get(RECENT_ACTIVITY_PATH, Query::new())
        );

        let stats: DashboardStats = stats?.into_result()?.decode_or_notify(api)?;
        let activity: RecentActivity = activity?.into_result()?.decode_or_notify(api)?;
        debug!(
            "Dashboard loaded: {} stat cards, {} activity rows",
            stats.stats.len(),
            activity.activities.len()
        );

        Ok(Dashboard { stats, activity })
    }
}
