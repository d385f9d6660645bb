mod models;
mod services;
mod utils;

use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> ExitCode {
    // Load environment variables
    dotenv().ok();

    // Initialize logger
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let data_file = env::var("USER_DATA_FILE")
        .unwrap_or_else(|_| "data/user_progress.json".to_string());
    let data_file = PathBuf::from(data_file);

    log::info!("🚀 Starting user data migration...");
    log::info!("📁 Store: {}", data_file.display());

    match services::migration_service::migrate_user_data(&data_file) {
        Ok(report) => {
            if let Ok(summary) = serde_json::to_string(&report) {
                log::debug!("📊 Report: {}", summary);
            }
            log::info!(
                "✅ Migration finished: {} of {} users migrated",
                report.migrated,
                report.users_found
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("❌ Migration failed: {}", e);
            ExitCode::FAILURE
        }
    }
}
