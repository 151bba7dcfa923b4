use std::fmt::Debug;

use crate::transition::{PanelState, TransitionInput, TransitionResult, transition};

/// Collaborator that acts on transition verdicts.
/// Platform-specific callers (fetch layer, view cache) implement this.
pub trait ReviewSink<K> {
    type Error: std::error::Error + Send + Sync + 'static;

    /// Start loading the review for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the fetch cannot be issued.
    fn fetch(&mut self, key: &K) -> Result<(), Self::Error>;

    /// Clear whatever review content is currently shown.
    ///
    /// # Errors
    ///
    /// Returns an error if the displayed content cannot be cleared.
    fn reset(&mut self) -> Result<(), Self::Error>;

    /// Drop the cache entry for `key`.
    ///
    /// # Errors
    ///
    /// Returns an error if the cache entry cannot be evicted.
    fn evict(&mut self, key: &K) -> Result<(), Self::Error>;
}

/// Caller-side owner of the last fetched key.
///
/// Feeds each observed overlay change through [`transition`] and remembers the
/// verdict's `next_key`, so the controller itself stays stateless.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewSession<K> {
    last_key: Option<K>,
    open: bool,
}

impl<K> Default for ReviewSession<K> {
    fn default() -> Self {
        Self {
            last_key: None,
            open: false,
        }
    }
}

impl<K: PartialEq + Clone + Debug> ReviewSession<K> {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Resume from a key cached by an earlier panel instance.
    #[must_use]
    pub const fn with_last_key(last_key: Option<K>) -> Self {
        let open = last_key.is_some();
        Self { last_key, open }
    }

    #[must_use]
    pub const fn last_key(&self) -> Option<&K> {
        self.last_key.as_ref()
    }

    #[must_use]
    pub fn state(&self) -> PanelState<K> {
        if self.open {
            PanelState::Open(self.last_key.clone())
        } else {
            PanelState::Closed
        }
    }

    /// Forget the cached key without consulting the controller.
    pub fn reset(&mut self) {
        self.last_key = None;
        self.open = false;
    }

    /// Run the controller for an observed change and remember its `next_key`.
    pub fn observe(&mut self, open: bool, key: Option<K>) -> TransitionResult<K> {
        let input = TransitionInput::new(open, key, self.last_key.take());
        let kind = input.kind();
        let result = transition(&input);
        log::debug!(
            "review transition {}: last={:?} next={:?} fetch={} reset={}",
            kind.label(),
            input.last_key,
            result.next_key,
            result.should_fetch,
            result.should_reset
        );
        self.last_key.clone_from(&result.next_key);
        self.open = result.open;
        result
    }

    /// Observe a change and dispatch the verdict to `sink`.
    ///
    /// Dispatch order is evict, reset, fetch. The remembered key is updated
    /// before the sink runs, so a failing sink never leaves it stale.
    ///
    /// # Errors
    ///
    /// Returns the first error reported by the sink.
    pub fn apply<S>(
        &mut self,
        sink: &mut S,
        open: bool,
        key: Option<K>,
    ) -> Result<TransitionResult<K>, S::Error>
    where
        S: ReviewSink<K>,
    {
        let result = self.observe(open, key);
        if let Some(cleared) = &result.cleared_key {
            sink.evict(cleared)?;
        }
        if result.should_reset {
            sink.reset()?;
        }
        if result.should_fetch {
            match &result.next_key {
                Some(next) => sink.fetch(next)?,
                None => log::trace!("review fetch skipped: overlay opened without a key"),
            }
        }
        Ok(result)
    }
}
