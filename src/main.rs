use admin_panel_client::{
    api::ApiClient,
    config,
    navigation::RecordingNavigator,
    notify::{Notifier, TerminalSurface},
    sections::{Panel, SectionKind},
    session,
};
use anyhow::Result;
use std::sync::Arc;
use tracing::info;

/// Validates that a log level string is valid
fn validate_log_level(level: &str) -> Result<()> {
    level
        .parse::<tracing_subscriber::filter::LevelFilter>()
        .map_err(|_| {
            anyhow::anyhow!(
                "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                level
            )
        })?;
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (before logging setup)
    let config = match config::load().await {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let section: SectionKind = match std::env::args().nth(1) {
        Some(name) => name.parse()?,
        None => SectionKind::Dashboard,
    };

    // Environment variable overrides config
    let log_level = std::env::var("RUST_LOG").unwrap_or_else(|_| config.logs.level.clone());
    validate_log_level(&log_level)?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .or_else(|_| tracing_subscriber::EnvFilter::try_new(&log_level))?,
        )
        .json()
        .with_writer(std::io::stderr)
        .init();

    info!("Starting admin panel client with log level: {}", log_level);

    let notifier = Notifier::new(Arc::new(TerminalSurface::new()), &config.notifications);
    let navigator = Arc::new(RecordingNavigator::new());
    let api = ApiClient::new(config.api.clone(), notifier, navigator.clone())?;

    let admin = match session::guard(&api).await {
        Ok(admin) => admin,
        Err(e) if e.is_auth_required() => {
            let route = navigator.last().unwrap_or_else(|| config.api.login_route.clone());
            eprintln!("Not signed in, open {}{}", config.api.origin, route);
            std::process::exit(2);
        }
        Err(e) => return Err(e.into()),
    };
    info!("Signed in as {} ({})", admin.name, admin.role);

    let panel = Panel::new(api);
    panel.show(section).await?;

    let state = panel.snapshot();
    let payload = match section {
        SectionKind::Dashboard => serde_json::to_value(&state.dashboard)?,
        SectionKind::Users => serde_json::to_value(&state.users.data)?,
        SectionKind::Subscriptions => serde_json::to_value(&state.subscriptions.data)?,
        SectionKind::Instructions => serde_json::to_value(&state.instructions)?,
        SectionKind::Settings => serde_json::to_value(&state.settings)?,
        SectionKind::System => serde_json::to_value(&state.system)?,
    };
    println!("{}", serde_json::to_string_pretty(&payload)?);

    Ok(())
}
