//! Review Panel
//!
//! Key-transition controller for the game's review overlay. Decides, on every
//! change of the overlay, whether the caller must fetch, clear, or keep its
//! cached review. This crate has no UI or platform-specific dependencies.

#![forbid(unsafe_code)]

pub mod key;
pub mod oracle;
pub mod session;
pub mod trace;
pub mod transition;

// Re-export commonly used types
pub use key::ReviewKey;
pub use oracle::{Law, LawViolation, TraceReport, TruthCase, check_step, check_trace, truth_table};
pub use session::{ReviewSession, ReviewSink};
pub use trace::{PanelEvent, TraceError, TraceStep, TransitionTrace};
pub use transition::{PanelState, TransitionInput, TransitionKind, TransitionResult, transition};
