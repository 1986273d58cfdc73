//! The action vocabulary the engine's transition function accepts.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::role::RoleId;
use crate::rules::RuleKey;
use crate::seat::SeatNo;
use crate::state::SessionState;
use crate::step::{Phase, StepId};

/// A step input payload, one shape per input kind.
///
/// The shape is checked against the current step at commit time; a payload
/// that does not match the step's declared kind is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum StepPayload {
    /// A single seat selection, `None` meaning "no target".
    Seat {
        /// The selected seat, if any.
        target: Option<SeatNo>,
    },
    /// The witch's decision for the night.
    Witch {
        /// Whether she asks to use the antidote on the wolf target.
        save: bool,
        /// Seat she asks to poison, if any.
        poison_target: Option<SeatNo>,
    },
    /// A raw vote matrix: target seat to the seats voting for it.
    Votes {
        /// The matrix as entered by the moderator.
        matrix: BTreeMap<SeatNo, BTreeSet<SeatNo>>,
    },
}

/// Everything the host can ask the engine to do.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Action {
    /// Replace the whole state with a previously saved snapshot.
    Hydrate {
        /// The saved snapshot.
        state: Box<SessionState>,
    },
    /// Resize the table (clamped to 5-20); recreates the seats.
    SetPlayerCount {
        /// Requested seat count.
        count: u32,
    },
    /// Enable or disable a role in the catalog. Ignored once rules are locked.
    ToggleRole {
        /// The role to toggle.
        role: RoleId,
        /// New enabled flag.
        enabled: bool,
    },
    /// Flip one table rule. Ignored once rules are locked.
    SetRule {
        /// The rule to change.
        rule: RuleKey,
        /// New value.
        value: bool,
    },
    /// Jump the session to a phase (setup navigation).
    SetPhase {
        /// Target phase.
        phase: Phase,
    },
    /// Freeze rules and role pool for the rest of the session.
    LockRules,
    /// Record that the host may play narration audio.
    UnlockAudio,
    /// Rename a seat.
    SetSeatName {
        /// Seat to rename.
        seat: SeatNo,
        /// New display name.
        name: String,
    },
    /// Mark a seat's role card as shown.
    MarkSeatRevealed {
        /// The seat that saw its card.
        seat: SeatNo,
    },
    /// Move the deal cursor to the next seat.
    AdvanceDealCursor,
    /// Enter a step: applies the step's phase, input status, and runtime
    /// resets.
    StartStep {
        /// The step to start.
        step: StepId,
    },
    /// Pause the current step.
    PauseStep,
    /// Resume the current step.
    ResumeStep,
    /// Log a skip and advance without waiting for input.
    SkipStep,
    /// Commit the current step's input payload.
    CommitInput {
        /// The payload, shaped per the current step.
        payload: StepPayload,
    },
    /// Run the current step's resolution effects and move to its successor.
    AdvanceStep,
    /// Reset to a fresh session with the same table size.
    ResetSession,
}
