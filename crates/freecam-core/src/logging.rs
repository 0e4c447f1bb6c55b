/// Installs `env_logger` as the global logger.
///
/// `RUST_LOG` wins over `default_filter`. Calling this more than once is harmless.
pub fn init(default_filter: &str) {
    let env = env_logger::Env::default().default_filter_or(default_filter);
    let _ = env_logger::Builder::from_env(env)
        .format_timestamp_millis()
        .is_test(false)
        .try_init();
}
