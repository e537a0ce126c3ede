//! Default values for configuration fields.
//!
//! These functions are used by serde for default deserialization.
//!
//! The `[theme]` defaults reproduce the conventional theme directory
//! layout: a theme root with `mixins.scss` at the top and the ontology
//! files (`variables.scss`, `customization-mixins.scss`) below it.

// ============================================================================
// [theme] Section Defaults
// ============================================================================

pub mod theme {
    use std::path::PathBuf;

    pub fn dir() -> PathBuf {
        "default-aspect/themes/cotton".into()
    }

    pub fn variables() -> PathBuf {
        "ontology/variables.scss".into()
    }

    pub fn mixins() -> PathBuf {
        "mixins.scss".into()
    }

    pub fn customization_mixins() -> PathBuf {
        "ontology/customization-mixins.scss".into()
    }
}

// ============================================================================
// [build] Section Defaults
// ============================================================================

pub mod build {
    use super::super::CssStyle;
    use std::path::PathBuf;

    pub fn root() -> Option<PathBuf> {
        None
    }

    pub fn sources() -> PathBuf {
        "default-aspect".into()
    }

    pub fn style() -> CssStyle {
        CssStyle::default()
    }

    pub fn jobs() -> usize {
        0
    }
}

// ============================================================================
// [watch] Section Defaults
// ============================================================================

pub mod watch {
    pub fn debounce_ms() -> u64 {
        300
    }
}
