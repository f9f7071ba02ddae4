//! Opt-in diagnostics on stderr.
//!
//! Each binary names the variable that switches tracing on and the filter it
//! falls back to. For the interactive tool that is `UNROLL_TRACE`:
//! `UNROLL_TRACE=1` enables the default filter (or `RUST_LOG` if set), and any
//! other non-boolean value is an `EnvFilter` expression such as
//! `UNROLL_TRACE=unroll::scenario=debug`. Stdout is never written to.

use std::sync::Once;
use tracing_subscriber::EnvFilter;

pub const TRACE_ENV: &str = "UNROLL_TRACE";
pub const DEFAULT_TRACE_FILTER: &str = "unroll::scenario=debug,unroll::plot=debug,unroll_core=info,unroll_cli=info";

static TRACE_INIT: Once = Once::new();

/// What a trace toggle variable asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TraceSetting {
    Off,
    /// Enabled with the caller's default filter, or `RUST_LOG` when set.
    Default,
    Filter(String),
}

impl TraceSetting {
    pub fn parse(raw: &str) -> Self {
        let value = raw.trim();
        let is = |word: &str| value.eq_ignore_ascii_case(word);
        if value.is_empty() || is("0") || is("false") || is("off") {
            TraceSetting::Off
        } else if is("1") || is("true") || is("on") {
            TraceSetting::Default
        } else {
            TraceSetting::Filter(value.to_string())
        }
    }

    pub fn from_var(var: &str) -> Self {
        std::env::var(var).map_or(TraceSetting::Off, |raw| Self::parse(&raw))
    }

    /// Filter to install, or `None` when tracing stays off. An expression
    /// that does not parse falls back to `default_filter`.
    pub fn env_filter(&self, default_filter: &str) -> Option<EnvFilter> {
        let expr = match self {
            TraceSetting::Off => return None,
            TraceSetting::Filter(expr) => Some(expr.clone()),
            TraceSetting::Default => std::env::var("RUST_LOG").ok(),
        };
        Some(
            expr.and_then(|expr| EnvFilter::try_new(expr).ok())
                .unwrap_or_else(|| EnvFilter::new(default_filter)),
        )
    }
}

/// Installs a stderr `fmt` subscriber when `var` enables tracing. Only the
/// first enabled call in a process takes effect.
pub fn init_from_env(var: &str, default_filter: &str) {
    let Some(filter) = TraceSetting::from_var(var).env_filter(default_filter) else {
        return;
    };

    TRACE_INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_writer(std::io::stderr)
            .with_env_filter(filter)
            .try_init();
    });
}
