//! Shared logging utilities for consistent tracing across the provisioning run

use crate::types::ProvisioningStep;
use chrono::{DateTime, Utc};
use tracing::{error, info};

/// Default level used when none is configured
pub const DEFAULT_LOG_LEVEL: &str = "info";

/// Build the filter directive for the provisioning binaries
pub fn filter_directive(log_level: Option<&str>) -> String {
    let base_level = log_level.unwrap_or(DEFAULT_LOG_LEVEL);
    format!(
        "provision_keep_tecdsa={base_level},provisioner={base_level},shared={base_level},alloy=warn,hyper=warn,reqwest=warn"
    )
}

/// Initialize tracing subscriber with an optional log level
pub fn init_tracing_with_level(log_level: Option<&str>) {
    use tracing_subscriber::{EnvFilter, fmt};

    let env_filter = filter_directive(log_level);

    fmt()
        .with_env_filter(EnvFilter::new(&env_filter))
        .with_target(false)
        .with_thread_ids(false)
        .with_file(false)
        .with_line_number(false)
        .init();
}

/// Get formatted timestamp for consistent logging
pub fn format_timestamp() -> String {
    let now: DateTime<Utc> = Utc::now();
    now.format("%H:%M:%S%.3f").to_string()
}

/// Macro for step-aware info logging
#[macro_export]
macro_rules! step_info {
    ($step:expr, $($arg:tt)*) => {
        tracing::info!(
            step = %$step,
            timestamp = shared::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for step-aware warning logging
#[macro_export]
macro_rules! step_warn {
    ($step:expr, $($arg:tt)*) => {
        tracing::warn!(
            step = %$step,
            timestamp = shared::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Macro for step-aware debug logging
#[macro_export]
macro_rules! step_debug {
    ($step:expr, $($arg:tt)*) => {
        tracing::debug!(
            step = %$step,
            timestamp = shared::logging::format_timestamp(),
            $($arg)*
        );
    };
}

/// Contextual logging helper for startup messages
pub fn log_startup(details: &str) {
    info!(
        step = %ProvisioningStep::Startup,
        timestamp = format_timestamp(),
        "🚀 Starting {}",
        details
    );
}

/// Contextual logging helper for error conditions
pub fn log_error(step: ProvisioningStep, context: &str, error: &dyn std::fmt::Display) {
    error!(
        step = %step,
        timestamp = format_timestamp(),
        error = %error,
        "❌ {} failed: {}",
        context,
        error
    );
}

/// Contextual logging helper for success conditions
pub fn log_success(step: ProvisioningStep, message: &str) {
    info!(
        step = %step,
        timestamp = format_timestamp(),
        "✅ {}",
        message
    );
}

/// Contextual logging helper for progress updates
pub fn log_progress(step: ProvisioningStep, action: &str, details: &str) {
    info!(
        step = %step,
        timestamp = format_timestamp(),
        "📋 {}: {}",
        action,
        details
    );
}
