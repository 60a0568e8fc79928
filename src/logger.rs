/// Initializes the global logger.
///
/// Warnings and errors are always shown so per-file failures reach the user;
/// `verbose` additionally enables debug output for every scanned entry,
/// rename and write.
pub fn init_logger(verbose: bool) {
    env_logger::Builder::new()
        .filter_level(if verbose {
            log::LevelFilter::Debug
        } else {
            log::LevelFilter::Warn
        })
        .format_timestamp(None)
        .init();
}
