//! Law checks over replayed traces.
//!
//! Every step of a replay is re-derived independently of the session and
//! compared against the shape rules of the controller, the idempotence law,
//! and determinism.

use serde::{Deserialize, Serialize};

use crate::key::{ReviewKey, describe};
use crate::trace::{TraceStep, TransitionTrace};
use crate::transition::{TransitionInput, TransitionKind, TransitionResult, transition};

/// Rule a transition step can break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Law {
    ClosedShape,
    OpenShape,
    FetchResetCoupling,
    Idempotence,
    Determinism,
}

impl Law {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::ClosedShape => "closed-shape",
            Self::OpenShape => "open-shape",
            Self::FetchResetCoupling => "fetch-reset-coupling",
            Self::Idempotence => "idempotence",
            Self::Determinism => "determinism",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LawViolation {
    pub step: usize,
    pub law: Law,
    pub detail: String,
}

/// Outcome of checking a whole trace.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TraceReport {
    pub name: String,
    pub steps: Vec<TraceStep>,
    pub violations: Vec<LawViolation>,
}

impl TraceReport {
    #[must_use]
    pub fn passed(&self) -> bool {
        self.violations.is_empty()
    }

    #[must_use]
    pub fn fetch_count(&self) -> usize {
        self.steps.iter().filter(|s| s.result.should_fetch).count()
    }

    #[must_use]
    pub fn reset_count(&self) -> usize {
        self.steps.iter().filter(|s| s.result.should_reset).count()
    }
}

/// Check a single recorded step against every law.
///
/// The determinism check recomputes the verdict twice; on a genuine replay it
/// only fails if the controller grew hidden state or the recorded step was altered.
#[must_use]
pub fn check_step(step: &TraceStep) -> Vec<LawViolation> {
    let mut violations = Vec::new();
    let mut flag = |law: Law, detail: String| {
        violations.push(LawViolation {
            step: step.index,
            law,
            detail,
        });
    };

    let input = &step.input;
    let result = &step.result;

    if input.review_open {
        if !result.open || result.next_key != input.review_key || result.cleared_key.is_some() {
            flag(
                Law::OpenShape,
                format!(
                    "open step reported open={} next={} cleared={}",
                    result.open,
                    describe(result.next_key.as_ref()),
                    describe(result.cleared_key.as_ref())
                ),
            );
        }
        let changed = input.review_key != input.last_key;
        if result.should_fetch != changed || result.should_reset != changed {
            flag(
                Law::FetchResetCoupling,
                format!(
                    "key change={changed} but fetch={} reset={}",
                    result.should_fetch, result.should_reset
                ),
            );
        }
    } else if result.open
        || result.next_key.is_some()
        || result.should_fetch
        || result.should_reset != input.last_key.is_some()
        || result.cleared_key != input.last_key
    {
        flag(
            Law::ClosedShape,
            format!(
                "closing from {} reported reset={} cleared={}",
                describe(input.last_key.as_ref()),
                result.should_reset,
                describe(result.cleared_key.as_ref())
            ),
        );
    }

    let settled = transition(&TransitionInput::new(
        input.review_open,
        input.review_key.clone(),
        result.next_key.clone(),
    ));
    if !settled.is_noop() {
        flag(
            Law::Idempotence,
            format!(
                "repeating with last={} still asks fetch={} reset={}",
                describe(result.next_key.as_ref()),
                settled.should_fetch,
                settled.should_reset
            ),
        );
    }

    // Two fresh calls must agree with each other and with the recorded verdict.
    let first = transition(input);
    let second = transition(input);
    if first != second {
        flag(
            Law::Determinism,
            "two calls on the same input produced different verdicts".to_string(),
        );
    } else if first != *result {
        flag(
            Law::Determinism,
            "recorded verdict differs from recomputing the step".to_string(),
        );
    }

    violations
}

/// Replay a trace and check every step.
#[must_use]
pub fn check_trace(trace: &TransitionTrace) -> TraceReport {
    let steps = trace.replay();
    let violations = steps.iter().flat_map(check_step).collect::<Vec<_>>();
    for violation in &violations {
        log::warn!(
            "trace {} step {} broke {}: {}",
            trace.name,
            violation.step,
            violation.law.label(),
            violation.detail
        );
    }
    TraceReport {
        name: trace.name.clone(),
        steps,
        violations,
    }
}

/// Reference case pairing an input with the verdict it must produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TruthCase {
    pub name: &'static str,
    pub kind: TransitionKind,
    pub input: TransitionInput<ReviewKey>,
    pub expected: TransitionResult<ReviewKey>,
}

impl TruthCase {
    #[must_use]
    pub fn holds(&self) -> bool {
        transition(&self.input) == self.expected
    }
}

/// The canonical verdicts for each edge of the overlay state machine.
#[must_use]
pub fn truth_table() -> Vec<TruthCase> {
    let a = || Some(ReviewKey::text("A"));
    let b = || Some(ReviewKey::text("B"));
    vec![
        TruthCase {
            name: "closed-idle",
            kind: TransitionKind::StayClosed,
            input: TransitionInput::new(false, Some(ReviewKey::text("anything")), None),
            expected: TransitionResult {
                open: false,
                next_key: None,
                should_fetch: false,
                should_reset: false,
                cleared_key: None,
            },
        },
        TruthCase {
            name: "closing-with-prior-content",
            kind: TransitionKind::Close,
            input: TransitionInput::new(false, Some(ReviewKey::text("X")), a()),
            expected: TransitionResult {
                open: false,
                next_key: None,
                should_fetch: false,
                should_reset: true,
                cleared_key: a(),
            },
        },
        TruthCase {
            name: "opening-fresh",
            kind: TransitionKind::Open,
            input: TransitionInput::opened(a(), None),
            expected: TransitionResult {
                open: true,
                next_key: a(),
                should_fetch: true,
                should_reset: true,
                cleared_key: None,
            },
        },
        TruthCase {
            name: "open-same-key",
            kind: TransitionKind::Stay,
            input: TransitionInput::opened(a(), a()),
            expected: TransitionResult {
                open: true,
                next_key: a(),
                should_fetch: false,
                should_reset: false,
                cleared_key: None,
            },
        },
        TruthCase {
            name: "open-key-changes",
            kind: TransitionKind::Switch,
            input: TransitionInput::opened(b(), a()),
            expected: TransitionResult {
                open: true,
                next_key: b(),
                should_fetch: true,
                should_reset: true,
                cleared_key: None,
            },
        },
    ]
}
