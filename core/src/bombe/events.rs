//! Structured event log
//!
//! Each Bombe appends one record per state change or rejected request, so a
//! renderer or a test can replay what happened without intercepting setters.

use serde::{Deserialize, Serialize};

pub const BOMBE_COMPONENT: &str = "bombe";
pub const SEARCH_COMPONENT: &str = "bombe_search";
pub const POWER_COMPONENT: &str = "bombe_power";

/// One entry of a Bombe's event log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BombeLogEvent {
    pub component: String,
    pub event: String,
    /// "ok", "rejected", or a search outcome such as "stop"
    pub outcome: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub combs: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<String>,
}

impl BombeLogEvent {
    pub fn new(component: &str, event: &str, outcome: &str) -> Self {
        Self {
            component: component.to_string(),
            event: event.to_string(),
            outcome: outcome.to_string(),
            combs: None,
            error_code: None,
        }
    }

    pub fn with_combs(mut self, combs: u64) -> Self {
        self.combs = Some(combs);
        self
    }

    pub fn with_error_code(mut self, code: &str) -> Self {
        self.error_code = Some(code.to_string());
        self
    }

    pub fn is_rejection(&self) -> bool {
        self.error_code.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_event_json_omits_empty_fields() {
        let event = BombeLogEvent::new(SEARCH_COMPONENT, "search_finished", "stop").with_combs(354);
        let json = serde_json::to_value(&event).unwrap();

        assert_eq!(json["component"], "bombe_search");
        assert_eq!(json["combs"], 354);
        assert!(json.get("error_code").is_none());
        assert!(!event.is_rejection());
    }
}
