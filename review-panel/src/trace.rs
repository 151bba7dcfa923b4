//! Recorded overlay event sequences and their replay through a session.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::key::ReviewKey;
use crate::session::ReviewSession;
use crate::transition::{TransitionInput, TransitionKind, TransitionResult};

#[derive(Debug, Error)]
pub enum TraceError {
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("trace `{name}` has no events")]
    Empty { name: String },
}

/// One observed overlay change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PanelEvent {
    pub open: bool,
    #[serde(default)]
    pub key: Option<ReviewKey>,
}

impl PanelEvent {
    #[must_use]
    pub fn open(key: impl Into<ReviewKey>) -> Self {
        Self {
            open: true,
            key: Some(key.into()),
        }
    }

    #[must_use]
    pub const fn open_empty() -> Self {
        Self {
            open: true,
            key: None,
        }
    }

    #[must_use]
    pub const fn close() -> Self {
        Self {
            open: false,
            key: None,
        }
    }
}

/// Named sequence of overlay changes replayed against a fresh session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionTrace {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Key cached before the first event, for traces starting mid-session.
    #[serde(default)]
    pub initial_last_key: Option<ReviewKey>,
    pub events: Vec<PanelEvent>,
}

/// Input, verdict, and edge recorded for one replayed event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceStep {
    pub index: usize,
    pub input: TransitionInput<ReviewKey>,
    pub result: TransitionResult<ReviewKey>,
    pub kind: TransitionKind,
}

impl TransitionTrace {
    #[must_use]
    pub fn new(name: &str, description: &str, events: Vec<PanelEvent>) -> Self {
        Self {
            name: name.to_string(),
            description: description.to_string(),
            initial_last_key: None,
            events,
        }
    }

    #[must_use]
    pub fn starting_from(mut self, key: impl Into<ReviewKey>) -> Self {
        self.initial_last_key = Some(key.into());
        self
    }

    /// Load and validate a trace from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON does not describe a trace or the trace has no events.
    pub fn from_json(json: &str) -> Result<Self, TraceError> {
        let trace: Self = serde_json::from_str(json)?;
        trace.validate()?;
        Ok(trace)
    }

    /// Load a list of traces from a JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or any trace has no events.
    pub fn list_from_json(json: &str) -> Result<Vec<Self>, TraceError> {
        let traces: Vec<Self> = serde_json::from_str(json)?;
        for trace in &traces {
            trace.validate()?;
        }
        Ok(traces)
    }

    /// # Errors
    ///
    /// Returns [`TraceError::Empty`] when the trace has no events.
    pub fn validate(&self) -> Result<(), TraceError> {
        if self.events.is_empty() {
            return Err(TraceError::Empty {
                name: self.name.clone(),
            });
        }
        Ok(())
    }

    /// Replay every event through a fresh session, recording each transition.
    #[must_use]
    pub fn replay(&self) -> Vec<TraceStep> {
        let mut session = ReviewSession::with_last_key(self.initial_last_key.clone());
        self.events
            .iter()
            .enumerate()
            .map(|(index, event)| {
                let input = TransitionInput::new(
                    event.open,
                    event.key.clone(),
                    session.last_key().cloned(),
                );
                let kind = input.kind();
                let result = session.observe(event.open, event.key.clone());
                TraceStep {
                    index,
                    input,
                    result,
                    kind,
                }
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_trace_with_mixed_keys() {
        let json = r#"{
            "name": "mixed",
            "initialLastKey": 12,
            "events": [
                { "open": true, "key": 12 },
                { "open": true, "key": "boss-review" },
                { "open": true, "key": null },
                { "open": false }
            ]
        }"#;

        let trace = TransitionTrace::from_json(json).unwrap();
        assert_eq!(trace.initial_last_key, Some(ReviewKey::number(12)));
        assert_eq!(trace.events[1], PanelEvent::open("boss-review"));
        assert_eq!(trace.events[2], PanelEvent::open_empty());
        assert_eq!(trace.events[3], PanelEvent::close());
        assert!(trace.description.is_empty());
    }

    #[test]
    fn loads_fractional_and_large_numeric_keys() {
        let json = r#"{
            "name": "numbers",
            "events": [
                { "open": true, "key": 1.5 },
                { "open": true, "key": 18446744073709551615 },
                { "open": true, "key": 18446744073709551615 }
            ]
        }"#;

        let trace = TransitionTrace::from_json(json).unwrap();
        let steps = trace.replay();
        assert!(steps[1].result.should_fetch);
        assert!(steps[2].result.is_noop());
    }

    #[test]
    fn recorded_steps_round_trip_through_json() {
        let trace =
            TransitionTrace::new("t", "", vec![PanelEvent::open("A"), PanelEvent::close()]);
        let steps = trace.replay();
        let json = serde_json::to_string(&steps).unwrap();
        let parsed: Vec<TraceStep> = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, steps);

        let input: TransitionInput<ReviewKey> =
            serde_json::from_str(r#"{"reviewOpen":false}"#).unwrap();
        assert_eq!(input.review_key, None);
        assert_eq!(input.last_key, None);
    }

    #[test]
    fn rejects_empty_trace() {
        let err = TransitionTrace::from_json(r#"{ "name": "blank", "events": [] }"#).unwrap_err();
        assert!(matches!(err, TraceError::Empty { ref name } if name == "blank"));
        assert_eq!(err.to_string(), "trace `blank` has no events");
    }

    #[test]
    fn rejects_malformed_json() {
        let err = TransitionTrace::from_json(r#"{ "name": 3 }"#).unwrap_err();
        assert!(matches!(err, TraceError::Json(_)));
    }

    #[test]
    fn replay_threads_last_key_between_steps() {
        let trace = TransitionTrace::new(
            "cycle",
            "",
            vec![
                PanelEvent::open("A"),
                PanelEvent::open("A"),
                PanelEvent::open("B"),
                PanelEvent::close(),
                PanelEvent::close(),
            ],
        );

        let steps = trace.replay();
        let kinds: Vec<_> = steps.iter().map(|step| step.kind).collect();
        assert_eq!(
            kinds,
            vec![
                TransitionKind::Open,
                TransitionKind::Stay,
                TransitionKind::Switch,
                TransitionKind::Close,
                TransitionKind::StayClosed,
            ]
        );
        assert_eq!(steps[2].input.last_key, Some(ReviewKey::text("A")));
        assert_eq!(steps[3].result.cleared_key, Some(ReviewKey::text("B")));
        assert_eq!(steps[4].input.last_key, None);
    }

    #[test]
    fn replay_honours_initial_last_key() {
        let trace =
            TransitionTrace::new("resume", "", vec![PanelEvent::open("A")]).starting_from("A");
        let steps = trace.replay();
        assert!(steps[0].result.is_noop());
    }
}
