use std::process::ExitCode;
use std::sync::Arc;

use chrono::Local;

use silvercare_lib::auth::AuthState;
use silvercare_lib::config::DashboardConfig;
use silvercare_lib::core_state::{CoreError, CoreState};

#[tokio::main]
async fn main() -> ExitCode {
    silvercare_lib::init_tracing();

    match run().await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Dashboard failed");
            ExitCode::FAILURE
        }
    }
}

async fn run() -> Result<(), CoreError> {
    let state = Arc::new(CoreState::from_mock_data(DashboardConfig::from_env())?);
    let config = state.config();
    tracing::debug!(
        step_goal = config.step_goal,
        secure_cookies = config.secure_cookies,
        chat_delay_ms = config.chat_typing_delay.as_millis() as u64,
        "Configuration loaded"
    );

    if let AuthState::Anonymous = state.restore_session()? {
        let user = state.login("demo", "demo")?;
        tracing::info!(user = %user.name, "Signed in with demo account");
    }

    let view = state.dashboard(Local::now().naive_local())?;
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}
