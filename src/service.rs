//! `service` — one request through the admission gate, the constraint
//! builder, and the engine, down to the wire-shaped response.
//!
//! The response is either `{"error": <message>}` or `{"results": {<length>:
//! [{word, length, score, blank_substitutions?}, ...]}}`. An empty query
//! (no filter carries signal) is not an error: it produces `{"results": {}}`.
//! Map keys serialize as strings, as JSON requires.

use log::warn;
use serde::Serialize;

use crate::constraints::{ConstraintSet, RawFilters};
use crate::engine::{self, GroupedResults};
use crate::errors::FinderError;
use crate::gate::AdmissionGate;
use crate::word_store::WordStore;

/// Wire shape of a completed request.
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum ApiResponse {
    Failure { error: String },
    Success { results: GroupedResults },
}

impl ApiResponse {
    /// Error payload carrying the detailed (code + help) rendering.
    #[must_use]
    pub fn from_error(e: &FinderError) -> Self {
        ApiResponse::Failure {
            error: e.display_detailed(),
        }
    }

    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, ApiResponse::Failure { .. })
    }
}

/// Run one search request end to end.
///
/// Admission is claimed first and held until the search completes; a full
/// gate yields the "busy" failure payload immediately, without queueing.
#[must_use]
pub fn handle_request(store: &WordStore, gate: &AdmissionGate, raw: &RawFilters) -> ApiResponse {
    let Some(_permit) = gate.try_acquire() else {
        warn!("admission gate full ({} in flight)", gate.in_flight());
        return ApiResponse::from_error(&FinderError::CapacityExceeded);
    };

    let Some(set) = ConstraintSet::build(raw) else {
        return ApiResponse::Success {
            results: GroupedResults::new(),
        };
    };

    ApiResponse::Success {
        results: engine::search(store, &set),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store() -> WordStore {
        WordStore::parse_from_str("act\ncab\ncat\nqi\nquiz")
    }

    fn to_json(response: &ApiResponse) -> String {
        serde_json::to_string(response).unwrap()
    }

    #[test]
    fn test_empty_query_yields_empty_results_object() {
        let gate = AdmissionGate::new(1);
        let response = handle_request(&store(), &gate, &RawFilters::default());
        assert_eq!(to_json(&response), r#"{"results":{}}"#);
    }

    #[test]
    fn test_results_shape_groups_by_length_with_string_keys() {
        let gate = AdmissionGate::new(1);
        let raw = RawFilters {
            rack: "cat".to_string(),
            ..RawFilters::default()
        };
        let response = handle_request(&store(), &gate, &raw);
        assert_eq!(
            to_json(&response),
            r#"{"results":{"3":[{"word":"act","length":3,"score":5},{"word":"cat","length":3,"score":5}]}}"#
        );
    }

    #[test]
    fn test_blank_substitutions_serialize_with_string_indices() {
        let gate = AdmissionGate::new(1);
        let raw = RawFilters {
            rack: "ca?".to_string(),
            ends_with: "b".to_string(),
            ..RawFilters::default()
        };
        let response = handle_request(&store(), &gate, &raw);
        assert_eq!(
            to_json(&response),
            r#"{"results":{"3":[{"word":"cab","length":3,"score":7,"blank_substitutions":{"2":"b"}}]}}"#
        );
    }

    #[test]
    fn test_full_gate_reports_busy() {
        let gate = AdmissionGate::new(1);
        let _held = gate.try_acquire().unwrap();
        let raw = RawFilters {
            rack: "cat".to_string(),
            ..RawFilters::default()
        };
        let response = handle_request(&store(), &gate, &raw);
        assert!(response.is_failure());
        assert!(to_json(&response).contains("busy"));
    }

    #[test]
    fn test_permit_is_released_after_the_request() {
        let gate = AdmissionGate::new(1);
        let raw = RawFilters {
            rack: "cat".to_string(),
            ..RawFilters::default()
        };
        let _ = handle_request(&store(), &gate, &raw);
        assert_eq!(gate.in_flight(), 0);
    }

    #[test]
    fn test_error_payload_shape() {
        let response = ApiResponse::from_error(&FinderError::CapacityExceeded);
        let json = to_json(&response);
        assert!(json.starts_with(r#"{"error":"#));
        assert!(json.contains("W003"));
    }
}
