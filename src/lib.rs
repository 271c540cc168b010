pub mod config;
mod ids;
pub mod core_state;
pub mod models;
pub mod schedule; // Dose status + countdown
pub mod adherence; // Taken/total ratio
pub mod next_dose; // Next untaken dose finder
pub mod medications; // Medication page
pub mod auth; // Mock login + route guard
pub mod chat; // Scripted assistant
pub mod diet; // Meal log
pub mod exercise; // Activity summaries
pub mod dashboard; // Home page
pub mod mock_data;

use tracing_subscriber::EnvFilter;

/// Install the global `tracing` subscriber.
///
/// `RUST_LOG` wins over the built-in filter. Calling this twice is harmless.
pub fn init_tracing() {
    let result = tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config::default_log_filter())),
        )
        .try_init();

    if result.is_ok() {
        tracing::info!("{} starting v{}", config::APP_NAME, config::APP_VERSION);
    }
}
