//! Diagnostic logging to stderr.
//!
//! `RUST_LOG` takes precedence; otherwise each `-v` raises the level of the
//! valgen crates from `warn` to `info`, `debug` and `trace`.

use tracing_subscriber::EnvFilter;

const CRATES: &[&str] = &[
    "valgen",
    "valgen_codegen",
    "valgen_codegen_go",
    "valgen_core",
    "valgen_rules",
    "valgen_source",
];

pub fn init(verbosity: u8) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter(verbosity));

    // a second init (tests) keeps the first subscriber
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(verbosity > 1)
        .without_time()
        .try_init();
}

fn level(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    }
}

fn default_filter(verbosity: u8) -> EnvFilter {
    let level = level(verbosity);
    let directives: Vec<String> = CRATES
        .iter()
        .map(|krate| format!("{}={}", krate, level))
        .collect();
    EnvFilter::new(format!("warn,{}", directives.join(",")))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_verbosity_levels() {
        assert_eq!(level(0), "warn");
        assert_eq!(level(1), "info");
        assert_eq!(level(2), "debug");
        assert_eq!(level(9), "trace");
    }

    #[test]
    fn test_default_filter_names_every_crate() {
        let filter = default_filter(2).to_string();
        assert!(filter.contains("valgen_codegen_go=debug"));
    }
}
