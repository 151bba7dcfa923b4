//! Key-transition controller for the review overlay.
//!
//! Every observed change of the overlay (opened, closed, or a different key
//! requested while open) is fed through [`transition`], which tells the caller
//! whether to fetch, clear, or leave its cached review alone.

use serde::{Deserialize, Serialize};

/// Snapshot of the overlay at the moment a change is observed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionInput<K> {
    /// Whether the overlay is currently visible.
    pub review_open: bool,
    /// Key the caller wants displayed; ignored while closed.
    pub review_key: Option<K>,
    /// Key most recently fetched by the caller.
    pub last_key: Option<K>,
}

/// Verdict returned by [`transition`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionResult<K> {
    /// Echo of the input's `review_open`.
    pub open: bool,
    /// Key the caller should treat as current; `None` while closed.
    pub next_key: Option<K>,
    /// The caller must fetch `next_key`.
    pub should_fetch: bool,
    /// Displayed content must be cleared before the new state is shown.
    pub should_reset: bool,
    /// Key being invalidated on close, for cache eviction.
    pub cleared_key: Option<K>,
}

/// Visibility macro-state of the overlay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PanelState<K> {
    Closed,
    Open(Option<K>),
}

impl<K> PanelState<K> {
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::Open(_))
    }
}

/// Edge of the overlay state machine taken by a single transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TransitionKind {
    /// Closed and nothing cached.
    StayClosed,
    /// Closing, or staying closed while a key is still cached.
    Close,
    /// Opening with nothing cached yet.
    Open,
    /// Open on the key already cached.
    Stay,
    /// Open on a different key than the cached one.
    Switch,
}

impl TransitionKind {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::StayClosed => "stay-closed",
            Self::Close => "close",
            Self::Open => "open",
            Self::Stay => "stay",
            Self::Switch => "switch",
        }
    }
}

impl<K> TransitionInput<K> {
    #[must_use]
    pub const fn new(review_open: bool, review_key: Option<K>, last_key: Option<K>) -> Self {
        Self {
            review_open,
            review_key,
            last_key,
        }
    }

    /// Input for a closed overlay.
    #[must_use]
    pub const fn closed(last_key: Option<K>) -> Self {
        Self::new(false, None, last_key)
    }

    /// Input for an open overlay requesting `review_key`.
    #[must_use]
    pub const fn opened(review_key: Option<K>, last_key: Option<K>) -> Self {
        Self::new(true, review_key, last_key)
    }
}

impl<K: PartialEq + Clone> TransitionInput<K> {
    /// State implied by the cached key before this transition.
    ///
    /// The controller keeps no history, so a cached key is read as "was open on it".
    #[must_use]
    pub fn previous_state(&self) -> PanelState<K> {
        match &self.last_key {
            Some(key) => PanelState::Open(Some(key.clone())),
            None => PanelState::Closed,
        }
    }

    #[must_use]
    pub fn kind(&self) -> TransitionKind {
        match (self.review_open, &self.last_key) {
            (false, None) => TransitionKind::StayClosed,
            (false, Some(_)) => TransitionKind::Close,
            (true, None) if self.review_key.is_none() => TransitionKind::Stay,
            (true, None) => TransitionKind::Open,
            (true, Some(_)) if self.review_key == self.last_key => TransitionKind::Stay,
            (true, Some(_)) => TransitionKind::Switch,
        }
    }
}

impl<K> TransitionResult<K> {
    /// True when the caller has nothing to fetch and nothing to clear.
    #[must_use]
    pub const fn is_noop(&self) -> bool {
        !self.should_fetch && !self.should_reset
    }

    #[must_use]
    pub fn state(&self) -> PanelState<K>
    where
        K: Clone,
    {
        if self.open {
            PanelState::Open(self.next_key.clone())
        } else {
            PanelState::Closed
        }
    }
}

/// Decide what the caller must do with its cached review.
///
/// Closing reports the cached key in `cleared_key` and only asks for a reset when
/// something was cached. While open, a key different from the cached one (by value,
/// `None` included) asks for both a reset and a fetch; `cleared_key` stays `None`
/// on the open side even when the key changes.
#[must_use]
pub fn transition<K: PartialEq + Clone>(input: &TransitionInput<K>) -> TransitionResult<K> {
    if !input.review_open {
        return TransitionResult {
            open: false,
            next_key: None,
            should_fetch: false,
            should_reset: input.last_key.is_some(),
            cleared_key: input.last_key.clone(),
        };
    }

    let changed = input.review_key != input.last_key;
    TransitionResult {
        open: true,
        next_key: input.review_key.clone(),
        should_fetch: changed,
        should_reset: changed,
        cleared_key: None,
    }
}
