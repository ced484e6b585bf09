use log::LevelFilter;

pub const LOG_ENV: &str = "WINIMECTL_LOG";

pub fn init(level: LevelFilter) {
    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_env(LOG_ENV)
        .format_timestamp(None)
        .try_init();
}
