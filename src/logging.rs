use env_logger::Env;

/// `RUST_LOG` wins; otherwise `info`, or `debug` for this crate with `--debug`.
pub fn init(debug: bool) {
    let default_filter = if debug {
        "info,adb_app_manager=debug"
    } else {
        "info"
    };
    let _ = env_logger::Builder::from_env(Env::default().default_filter_or(default_filter))
        .format_timestamp_millis()
        .try_init();
}
