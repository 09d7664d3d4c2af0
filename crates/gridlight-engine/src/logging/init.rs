use std::sync::Once;

/// Crates that log heavily at `info`; lowered to `warn` unless the filter names them.
const LOUD_CRATES: [&str; 3] = ["naga", "wgpu_core", "wgpu_hal"];

/// Logger configuration.
///
/// `env_filter` follows the `env_logger` filter syntax (e.g. "info", "warn",
/// "gridlight_engine=debug,wgpu_core=info").
///
/// `write_style` controls ANSI coloring behavior.
#[derive(Debug, Clone)]
pub struct LoggingConfig {
    pub env_filter: Option<String>,
    pub write_style: env_logger::WriteStyle,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            env_filter: None,
            write_style: env_logger::WriteStyle::Auto,
        }
    }
}

static INIT: Once = Once::new();

/// Initializes the global logger once.
///
/// This function is idempotent; subsequent calls are ignored.
/// Intended usage is early in `main`.
pub fn init_logging(config: LoggingConfig) {
    INIT.call_once(|| {
        let env = std::env::var("RUST_LOG").ok();
        let filter = effective_filter(config.env_filter.as_deref(), env.as_deref());

        let mut builder = env_logger::Builder::new();
        builder.parse_filters(&filter);
        builder.write_style(config.write_style);

        // A logger may already be installed (test harnesses); keep it.
        if builder.try_init().is_ok() {
            log::debug!("logging initialized with filter `{filter}`");
        }
    });
}

/// Resolves the filter string: explicit config, then `RUST_LOG`, then `info`.
///
/// wgpu's internal crates are capped at `warn` unless the filter mentions them.
pub(crate) fn effective_filter(explicit: Option<&str>, env: Option<&str>) -> String {
    let mut filter = explicit
        .or(env)
        .filter(|f| !f.trim().is_empty())
        .unwrap_or("info")
        .to_owned();

    for loud in LOUD_CRATES {
        if !filter.contains(&format!("{loud}=")) {
            filter.push_str(&format!(",{loud}=warn"));
        }
    }
    filter
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_to_info_with_quiet_wgpu() {
        assert_eq!(
            effective_filter(None, None),
            "info,naga=warn,wgpu_core=warn,wgpu_hal=warn"
        );
    }

    #[test]
    fn explicit_filter_wins_over_env() {
        let f = effective_filter(Some("debug"), Some("trace"));
        assert!(f.starts_with("debug,"));
    }

    #[test]
    fn env_filter_is_used_when_no_explicit() {
        let f = effective_filter(None, Some("gridlight_engine=debug"));
        assert!(f.starts_with("gridlight_engine=debug,"));
    }

    #[test]
    fn named_loud_crate_is_left_alone() {
        let f = effective_filter(Some("info,wgpu_core=trace"), None);
        assert!(f.contains("wgpu_core=trace"));
        assert!(!f.contains("wgpu_core=warn"));
        assert!(f.contains("wgpu_hal=warn"));
    }

    #[test]
    fn blank_filter_falls_back() {
        assert!(effective_filter(Some("  "), None).starts_with("info,"));
    }
}
