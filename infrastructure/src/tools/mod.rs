//! Per-module tool providers
//!
//! Each business module ships one [`ModuleToolProvider`] exposing its stub
//! scrapers, calculators and parsers. The [`ToolRegistry`] merges all
//! providers into one spec and routes calls back to the owning provider.
//!
//! Tool names are globally unique across the registry; the registry logs and
//! skips duplicates at mount time.

pub mod financing;
pub mod investment;
pub mod legal;
pub mod market;
pub mod provider;
pub mod registry;
pub mod search;
pub mod valuation;

pub use provider::ModuleToolProvider;
pub use registry::ToolRegistry;

/// Round to 2 decimal places (money)
pub(crate) fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Round to 4 decimal places (ratios)
pub(crate) fn round4(value: f64) -> f64 {
    (value * 10_000.0).round() / 10_000.0
}

/// RFC 3339 timestamp stamped onto every tool record
pub(crate) fn now_iso() -> String {
    chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Secs, true)
}

/// All six module providers, in catalog order
pub fn all_providers() -> Vec<ModuleToolProvider> {
    vec![
        valuation::provider(),
        search::provider(),
        market::provider(),
        investment::provider(),
        financing::provider(),
        legal::provider(),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use estate_domain::ToolProvider;

    #[test]
    fn test_rounding() {
        assert_eq!(round2(2.346), 2.35);
        assert_eq!(round2(2.344), 2.34);
        assert_eq!(round4(0.04999999), 0.05);
    }

    #[test]
    fn test_all_providers_have_distinct_tools() {
        let providers = all_providers();
        let mut seen = std::collections::BTreeSet::new();
        for provider in &providers {
            for name in provider.tool_spec().names() {
                assert!(seen.insert(name.to_string()), "duplicate tool {}", name);
            }
        }
        assert_eq!(seen.len(), 21);
    }
}
