use std::io::Write;

/// Installs the global logger. `RUST_LOG` still overrides `level` per module.
pub fn setup_logging(level: log::LevelFilter) {
    let mut builder = env_logger::Builder::new();
    builder
        .filter_level(level)
        .format(|buf, record| {
            writeln!(
                buf,
                "[{0} {1} {2}] {3}",
                record.level(),
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                record.module_path().unwrap_or(""),
                record.args()
            )
        })
        .target(env_logger::Target::Stdout);
    if let Ok(filters) = std::env::var("RUST_LOG") {
        builder.parse_filters(&filters);
    }
    if builder.try_init().is_err() {
        log::warn!("Logger already initialised");
    }
}
