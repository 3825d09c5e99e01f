pub mod sample;

pub use sample::{SampleScreen, ScriptedPull};

/// Shared entry point: runs the scripted session against the wall clock.
pub fn entry_point() {
    #[cfg(feature = "logging")]
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .try_init();

    if let Err(err) = sample::run_realtime() {
        log::error!("demo failed: {}", err);
    }
}
