pub(crate) mod quick;

/// Routes `log` records to the test harness' captured output.
pub(crate) fn init_logging() {
    // Every test calls this; only the first registration wins.
    let _ = simplelog::TestLogger::init(log::LevelFilter::Trace, simplelog::Config::default());
}
