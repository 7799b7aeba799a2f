use tracing::Level;

/// Install the global fmt subscriber at the given maximum level
///
/// Output goes to stderr so command results on stdout stay parseable.
/// Calling this twice is harmless; the second call leaves the first
/// subscriber in place.
pub fn init(level: Level) {
    let _ = tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_init_twice_does_not_panic() {
        init(Level::DEBUG);
        init(Level::WARN);
        tracing::debug!("logging initialized");
    }
}
