/// Initialize tracing/logging for the application.
///
/// Unrecognized level names fall back to `info`.
pub fn init(default_level: &str) {
    let level: tracing::Level = default_level.parse().unwrap_or(tracing::Level::INFO);

    // try_init so tests and libraries can call this multiple times without panicking
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .try_init();
}
