//! Worker slots.
//!
//! A slot owns its backend while idle. Acquiring a slot moves the backend
//! out, leaving [`SlotState::Busy`] behind, so no two callers can hold the
//! same worker and the worker never needs its own lock.

use serde::Serialize;

use glossa_types::Fingerprint;

/// Occupancy of a slot.
#[derive(Debug)]
pub(crate) enum SlotState<B> {
    Idle(B),
    Busy,
}

/// One pool element: a worker plus the configuration it holds.
#[derive(Debug)]
pub(crate) struct WorkerSlot<B> {
    state: SlotState<B>,
    /// `None` until the worker is first configured, or after a failed
    /// configure.
    configuration: Option<Fingerprint>,
}

impl<B> WorkerSlot<B> {
    pub(crate) fn new(worker: B, configuration: Option<Fingerprint>) -> Self {
        Self {
            state: SlotState::Idle(worker),
            configuration,
        }
    }

    pub(crate) fn is_idle(&self) -> bool {
        matches!(self.state, SlotState::Idle(_))
    }

    pub(crate) fn holds(&self, fingerprint: &Fingerprint) -> bool {
        self.configuration.as_ref() == Some(fingerprint)
    }

    pub(crate) fn configuration(&self) -> Option<Fingerprint> {
        self.configuration
    }

    /// Move the worker out and mark the slot busy.
    ///
    /// Returns `None` if the slot is already busy.
    pub(crate) fn take(&mut self) -> Option<B> {
        match std::mem::replace(&mut self.state, SlotState::Busy) {
            SlotState::Idle(worker) => Some(worker),
            SlotState::Busy => None,
        }
    }

    /// Return the worker and record the configuration it now holds.
    pub(crate) fn restore(&mut self, worker: B, configuration: Option<Fingerprint>) {
        debug_assert!(!self.is_idle(), "releasing a slot that is already idle");
        self.state = SlotState::Idle(worker);
        self.configuration = configuration;
    }

    pub(crate) fn snapshot(&self) -> SlotStats {
        SlotStats {
            busy: !self.is_idle(),
            configuration: self.configuration,
        }
    }
}

/// Point-in-time view of one slot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SlotStats {
    pub busy: bool,
    pub configuration: Option<Fingerprint>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use glossa_types::RecognitionConfig;

    fn fp(word: &str) -> Fingerprint {
        Fingerprint::of(&RecognitionConfig::new("el", vec![word.into()], vec![], vec![]))
    }

    #[test]
    fn take_marks_busy_and_only_succeeds_once() {
        let mut slot = WorkerSlot::new(7u32, None);
        assert!(slot.is_idle());
        assert_eq!(slot.take(), Some(7));
        assert!(!slot.is_idle());
        assert_eq!(slot.take(), None);
    }

    #[test]
    fn restore_records_configuration() {
        let mut slot = WorkerSlot::new(1u32, None);
        let worker = slot.take().unwrap();
        slot.restore(worker, Some(fp("ναι")));
        assert!(slot.is_idle());
        assert!(slot.holds(&fp("ναι")));
        assert!(!slot.holds(&fp("όχι")));
    }

    #[test]
    fn unconfigured_slot_holds_nothing() {
        let slot = WorkerSlot::new((), None);
        assert!(!slot.holds(&fp("ναι")));
        assert_eq!(
            slot.snapshot(),
            SlotStats {
                busy: false,
                configuration: None
            }
        );
    }
}
