//! Tracing setup for the `roster` binary.
//!
//! The library crates log through the `log` facade; `tracing-subscriber`
//! installs a `log` bridge on init, so their records land in the same output
//! as the CLI's own spans and events.
//!
//! With `--timing`, every `#[instrument]`ed command logs its duration when its
//! span closes:
//! ```ignore
//! #[tracing::instrument(skip_all, name = "list")]
//! async fn run_list(/* .. */) { /* .. */ }
//! ```

use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    EnvFilter,
    filter::Directive,
    fmt::{self, format::FmtSpan},
    prelude::*,
};

/// Level used when `RUST_LOG` does not say otherwise.
fn default_level(verbose: bool, timing: bool) -> LevelFilter {
    if verbose {
        LevelFilter::DEBUG
    } else if timing {
        // Span close events are emitted at INFO.
        LevelFilter::INFO
    } else {
        LevelFilter::WARN
    }
}

fn build_filter(verbose: bool, timing: bool) -> EnvFilter {
    let filter = EnvFilter::builder()
        .with_default_directive(default_level(verbose, timing).into())
        .from_env_lossy();

    if verbose {
        return filter;
    }

    // Connection pool chatter is only interesting when debugging.
    ["hyper_util=warn", "reqwest=warn"]
        .into_iter()
        .filter_map(|directive| directive.parse::<Directive>().ok())
        .fold(filter, EnvFilter::add_directive)
}

/// Initialize the global subscriber. Call once, before any command runs.
pub fn init_tracing(verbose: bool, timing: bool) {
    let span_events = if timing {
        FmtSpan::CLOSE
    } else {
        FmtSpan::NONE
    };

    tracing_subscriber::registry()
        .with(
            fmt::layer()
                .with_target(verbose)
                .with_level(true)
                .with_span_events(span_events)
                .with_writer(std::io::stderr),
        )
        .with(build_filter(verbose, timing))
        .init();
}

#[cfg(test)]
mod tests {
    use super::*;

    // The global subscriber can only be installed once per process, so only
    // the level selection is tested here.

    #[test]
    fn test_default_level_selection() {
        assert_eq!(default_level(false, false), LevelFilter::WARN);
        assert_eq!(default_level(false, true), LevelFilter::INFO);
        assert_eq!(default_level(true, false), LevelFilter::DEBUG);
        assert_eq!(default_level(true, true), LevelFilter::DEBUG);
    }
}
