//! Logging setup and display helpers

use tracing_subscriber::EnvFilter;

/// Initialize tracing output. `RUST_LOG` overrides the default level;
/// `verbose` bumps the default to debug.
pub fn init(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    // try_init so repeated calls (one per test) are harmless
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .try_init();
}

/// Truncate long text for log display
pub fn truncate_text(text: &str, max_len: usize) -> String {
    if text.chars().count() > max_len {
        text.chars().take(max_len).collect::<String>() + "..."
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_text() {
        assert_eq!(truncate_text("short", 10), "short");
        assert_eq!(truncate_text("abcdefghij", 5), "abcde...");
    }

    #[test]
    fn test_truncate_counts_chars_not_bytes() {
        // Vietnamese titles are multibyte; truncation must not split a char
        let title = "Giáo trình Mạng máy tính";
        let truncated = truncate_text(title, 10);
        assert_eq!(truncated, "Giáo trình...");
    }
}
