//! Process-wide highlight cache.

use std::sync::OnceLock;

use crate::cache::HighlightCache;
use crate::syntect_engine::SyntectEngine;

/// Theme used when none is configured.
pub const DEFAULT_THEME: &str = "base16-ocean.dark";

static GLOBAL: OnceLock<HighlightCache<SyntectEngine>> = OnceLock::new();

/// Set the theme of the process-wide cache.
///
/// Only effective before the first call to [`global`]; returns `false` when
/// the cache already exists. The engine itself is still built lazily.
pub fn configure_global(theme: &str) -> bool {
    let theme = theme.to_owned();
    let configured = GLOBAL
        .set(HighlightCache::new(move || SyntectEngine::load(&theme)))
        .is_ok();
    if !configured {
        tracing::debug!("highlight cache already initialized, theme not applied");
    }
    configured
}

/// The process-wide highlight cache.
///
/// Created on first access with [`DEFAULT_THEME`] unless
/// [`configure_global`] ran first. The engine is constructed on the first
/// highlight request and never torn down.
pub fn global() -> &'static HighlightCache<SyntectEngine> {
    GLOBAL.get_or_init(|| HighlightCache::new(|| SyntectEngine::load(DEFAULT_THEME)))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_global_is_a_singleton() {
        let a = global() as *const _;
        let b = global() as *const _;
        assert_eq!(a, b);
        assert!(!configure_global("InspiredGitHub"));
    }
}
