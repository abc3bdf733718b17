//! Logging setup.
//!
//! Logs go to stderr so stdout only ever carries the translation.
//!
//! Filter priority:
//! 1. **`TRANSLATE_LOG`** - a bare level (`debug`) applies to this crate only;
//!    anything with `=` or `,` is used as a full filter directive.
//! 2. **`RUST_LOG`** - used as-is.
//! 3. **Default** - `warn`.

use std::env;
use tracing_subscriber::{fmt, EnvFilter};

const CRATE_TARGETS: &[&str] = &["translate_lib", "translate"];

/// Install the global subscriber. Calling it again is a no-op.
pub fn init() {
    let _ = fmt()
        .with_env_filter(EnvFilter::new(filter_directives(
            env::var("TRANSLATE_LOG").ok().as_deref(),
            env::var("RUST_LOG").ok().as_deref(),
        )))
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn filter_directives(translate_log: Option<&str>, rust_log: Option<&str>) -> String {
    if let Some(value) = translate_log.map(str::trim).filter(|v| !v.is_empty()) {
        return expand_translate_log(value);
    }
    if let Some(value) = rust_log.filter(|v| !v.trim().is_empty()) {
        return value.to_string();
    }
    "warn".to_string()
}

fn expand_translate_log(value: &str) -> String {
    if value.contains(['=', ',', ':']) {
        return value.to_string();
    }
    let mut directives = vec!["warn".to_string()];
    directives.extend(CRATE_TARGETS.iter().map(|target| format!("{}={}", target, value)));
    directives.join(",")
}
