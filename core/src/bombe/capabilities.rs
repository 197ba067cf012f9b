//! Editing capabilities
//!
//! A presentation layer may freeze parts of a machine (for a worked example,
//! say). Every mutating entry point checks the matching flag.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What a caller may change on a Bombe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct Editable {
    /// Add, remove, reconnect and rotate drum columns
    pub columns: bool,

    /// Move the test register
    pub test_register: bool,

    /// Toggle the diagonal board
    pub dboard: bool,

    /// Start searches
    pub search: bool,
}

impl Default for Editable {
    fn default() -> Self {
        Self {
            columns: true,
            test_register: true,
            dboard: true,
            search: true,
        }
    }
}

impl Editable {
    /// Nothing may change
    pub fn locked() -> Self {
        Self {
            columns: false,
            test_register: false,
            dboard: false,
            search: false,
        }
    }

    pub fn allows(&self, capability: Capability) -> bool {
        match capability {
            Capability::Columns => self.columns,
            Capability::TestRegister => self.test_register,
            Capability::DBoard => self.dboard,
            Capability::Search => self.search,
        }
    }
}

/// One lockable aspect of a Bombe
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Capability {
    Columns,
    TestRegister,
    DBoard,
    Search,
}

impl fmt::Display for Capability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Capability::Columns => "drum column",
            Capability::TestRegister => "test register",
            Capability::DBoard => "diagonal board",
            Capability::Search => "search",
        };
        f.write_str(name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_allows_everything() {
        let editable = Editable::default();
        for capability in [
            Capability::Columns,
            Capability::TestRegister,
            Capability::DBoard,
            Capability::Search,
        ] {
            assert!(editable.allows(capability));
            assert!(!Editable::locked().allows(capability));
        }
    }

    #[test]
    fn test_partial_json_defaults_to_editable() {
        let editable: Editable = serde_json::from_str(r#"{"dboard": false}"#).unwrap();
        assert!(!editable.allows(Capability::DBoard));
        assert!(editable.allows(Capability::Columns));
    }
}
