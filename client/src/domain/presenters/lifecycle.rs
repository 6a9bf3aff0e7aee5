//! Mount generation bookkeeping shared by the presenters.

use tracing::debug;

use super::{FetchOutcome, LoadState};
use crate::domain::FetchError;

/// Mount epoch captured by a fetch when it is dispatched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) struct Generation(u64);

/// Mount flag, generation counter and the data they guard.
#[derive(Debug)]
pub(super) struct Mounted<D> {
    generation: u64,
    mounted: bool,
    data: LoadState<D>,
}

impl<D> Default for Mounted<D> {
    fn default() -> Self {
        Self {
            generation: 0,
            mounted: false,
            data: LoadState::Idle,
        }
    }
}

impl<D> Mounted<D> {
    pub(super) fn mount(&mut self) {
        self.generation += 1;
        self.mounted = true;
        self.data = LoadState::Idle;
    }

    pub(super) fn unmount(&mut self) {
        self.generation += 1;
        self.mounted = false;
    }

    pub(super) const fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub(super) const fn data(&self) -> &LoadState<D> {
        &self.data
    }

    /// Mark a fetch as started. `None` while unmounted.
    pub(super) fn begin(&mut self) -> Option<Generation> {
        if !self.mounted {
            return None;
        }
        self.data = LoadState::Loading;
        Some(Generation(self.generation))
    }

    /// Store a fetch result if `generation` is still live.
    ///
    /// Failures on a live generation are stored and returned; anything for a
    /// stale generation is dropped and reported as discarded.
    pub(super) fn finish(
        &mut self,
        generation: Generation,
        result: Result<D, FetchError>,
    ) -> Result<FetchOutcome, FetchError> {
        if !self.mounted || generation != Generation(self.generation) {
            debug!(
                dispatched = generation.0,
                current = self.generation,
                "discarding stale dashboard fetch"
            );
            return Ok(FetchOutcome::Discarded);
        }
        match result {
            Ok(data) => {
                self.data = LoadState::Loaded(data);
                Ok(FetchOutcome::Applied)
            }
            Err(error) => {
                self.data = LoadState::Failed(error.clone());
                Err(error)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unmounted_slot_refuses_to_begin() {
        let mut slot = Mounted::<u8>::default();
        assert_eq!(slot.begin(), None);
    }

    #[rstest]
    fn remount_invalidates_earlier_generation() {
        let mut slot = Mounted::<u8>::default();
        slot.mount();
        let first = slot.begin().expect("mounted");
        slot.mount();

        assert_eq!(slot.finish(first, Ok(1)), Ok(FetchOutcome::Discarded));
        assert_eq!(slot.data(), &LoadState::Idle);
    }

    #[rstest]
    fn live_failure_is_stored_and_returned() {
        let mut slot = Mounted::<u8>::default();
        slot.mount();
        let generation = slot.begin().expect("mounted");
        let error = FetchError::unavailable("offline");

        assert_eq!(slot.finish(generation, Err(error.clone())), Err(error.clone()));
        assert_eq!(slot.data(), &LoadState::Failed(error));
    }
}
