//! Contracts the engine needs from its host.
//!
//! The engine never does I/O of its own. Timestamps, persistence, scheduled
//! advances, and narration playback all come in through these traits, which
//! keeps every transition a pure function and every test deterministic.

use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use crate::error::EngineResult;
use crate::state::SessionState;
use crate::step::StepDescriptor;

/// Source of timestamps for log entries.
pub trait SessionClock {
    /// The current time.
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl SessionClock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock pinned to one instant, for deterministic tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub DateTime<Utc>);

impl FixedClock {
    /// A fixed clock at an arbitrary but stable instant.
    pub fn stable() -> Self {
        Self(Utc.with_ymd_and_hms(2024, 1, 1, 20, 0, 0).unwrap())
    }
}

impl SessionClock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.0
    }
}

/// Whole-snapshot persistence under a single fixed key.
///
/// `load` returning `Ok(None)` means no saved session exists; the host falls
/// back to a fresh [`SessionState::new`].
pub trait SnapshotStore {
    /// Load the saved snapshot, if one exists.
    fn load(&self) -> EngineResult<Option<SessionState>>;
    /// Persist the snapshot, replacing any previous one.
    fn save(&self, state: &SessionState) -> EngineResult<()>;
    /// Delete the saved snapshot.
    fn clear(&self) -> EngineResult<()>;
}

/// A cancellable scheduled advance.
///
/// The engine only reports that a step is eligible for an automatic advance
/// after [`StepDescriptor::auto_advance_after`]; arming, cancelling on
/// pause, re-arming on resume, and actually firing the advance are the
/// host's job. There is no timeout failure: an unarmed step waits forever.
pub trait AdvanceTimer {
    /// Ask for an advance after `delay`.
    fn arm(&mut self, delay: Duration);
    /// Cancel any armed advance.
    fn cancel(&mut self);
}

/// Fire-and-forget narration playback.
///
/// Implementations must swallow their own failures; playback can never
/// affect session state.
pub trait Narration {
    /// Speak (or play) the step's narration line.
    fn speak(&self, step: &StepDescriptor);
}

/// Narration sink that does nothing.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentNarration;

impl Narration for SilentNarration {
    fn speak(&self, _step: &StepDescriptor) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_clock_is_stable() {
        let clock = FixedClock::stable();
        assert_eq!(clock.now(), clock.now());
    }

    #[test]
    fn system_clock_moves_forward() {
        let clock = SystemClock;
        let a = clock.now();
        let b = clock.now();
        assert!(b >= a);
    }
}
