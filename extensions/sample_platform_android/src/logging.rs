//! Log initialization
//!
//! On Android both the `log` facade (via `android_logger`) and `tracing` (via
//! `tracing-android`) write to logcat under the configured tag. Elsewhere
//! `tracing` goes to stderr so the shim can be exercised on a host.

use std::sync::Once;

use sample_platform::ShimConfig;
use tracing_subscriber::filter::LevelFilter;

static INIT: Once = Once::new();

/// Install the process-wide loggers; later calls are ignored.
///
/// Returns `true` if this call performed the installation.
pub fn init_logging(config: &ShimConfig) -> bool {
    let mut installed = false;
    INIT.call_once(|| {
        install(config);
        installed = true;
    });
    installed
}

/// `log` crate counterpart of a `tracing` level
pub fn log_level_filter(level: tracing::Level) -> log::LevelFilter {
    match level {
        tracing::Level::ERROR => log::LevelFilter::Error,
        tracing::Level::WARN => log::LevelFilter::Warn,
        tracing::Level::INFO => log::LevelFilter::Info,
        tracing::Level::DEBUG => log::LevelFilter::Debug,
        tracing::Level::TRACE => log::LevelFilter::Trace,
    }
}

#[cfg(target_os = "android")]
fn install(config: &ShimConfig) {
    use tracing_subscriber::layer::SubscriberExt;

    android_logger::init_once(
        android_logger::Config::default()
            .with_max_level(log_level_filter(config.log_level()))
            .with_tag(config.log_tag.as_str()),
    );

    let filter = LevelFilter::from_level(config.log_level());
    match tracing_android::layer(&config.log_tag) {
        Ok(layer) => {
            let subscriber = tracing_subscriber::registry().with(filter).with(layer);
            let _ = tracing::subscriber::set_global_default(subscriber);
        }
        Err(e) => log::warn!("tracing-android layer unavailable: {}", e),
    }
}

#[cfg(not(target_os = "android"))]
fn install(config: &ShimConfig) {
    use tracing_subscriber::EnvFilter;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::from_level(config.log_level()).into())
        .from_env_lossy();
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}
