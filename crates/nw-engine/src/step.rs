//! The step catalog: the ordered stages a session walks through each round.
//!
//! The catalog defines the default linear order. Non-linear jumps (hunter
//! chain, win-check shortcut, round loop-back) live in the transition logic
//! in [`crate::engine`].

use std::fmt;
use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Coarse phase of the session, carried on every log entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Phase {
    /// Configuring the role pool.
    SetupRoles,
    /// Configuring the table rules.
    SetupRules,
    /// Final confirmation before dealing.
    PreGameConfirm,
    /// Handing out role cards seat by seat.
    Deal,
    /// Night actions are being collected.
    Night,
    /// Night actions are being resolved.
    NightResolve,
    /// Daytime discussion and voting.
    Day,
    /// A dying hunter is choosing a target.
    HunterResolve,
    /// Win conditions are being evaluated.
    CheckWin,
    /// The session has ended.
    GameEnd,
}

impl fmt::Display for Phase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::SetupRoles => write!(f, "setup/roles"),
            Self::SetupRules => write!(f, "setup/rules"),
            Self::PreGameConfirm => write!(f, "confirm"),
            Self::Deal => write!(f, "deal"),
            Self::Night => write!(f, "night"),
            Self::NightResolve => write!(f, "night resolve"),
            Self::Day => write!(f, "day"),
            Self::HunterResolve => write!(f, "hunter"),
            Self::CheckWin => write!(f, "win check"),
            Self::GameEnd => write!(f, "game end"),
        }
    }
}

/// Execution status of the current step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepStatus {
    /// The step is running.
    #[default]
    Playing,
    /// The step is waiting for a committed input.
    WaitingForInput,
    /// The moderator paused the step.
    Paused,
}

/// Identifier of one catalog step.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StepId {
    /// Night falls; everyone closes their eyes.
    NightStart,
    /// The wolves pick a kill target.
    WolfAction,
    /// The seer checks one seat.
    SeerAction,
    /// The witch decides on her potions.
    WitchAction,
    /// Night actions resolve into a death set.
    NightResolve,
    /// Dawn; everyone opens their eyes.
    DayStart,
    /// Open discussion.
    DayDiscussion,
    /// The table votes.
    DayVote,
    /// The vote result is carried out.
    DayExecution,
    /// A dying hunter takes the shot.
    HunterResolve,
    /// Win conditions are evaluated.
    CheckWin,
    /// Terminal step.
    GameEnd,
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NightStart => write!(f, "night_start"),
            Self::WolfAction => write!(f, "wolf_action"),
            Self::SeerAction => write!(f, "seer_action"),
            Self::WitchAction => write!(f, "witch_action"),
            Self::NightResolve => write!(f, "night_resolve"),
            Self::DayStart => write!(f, "day_start"),
            Self::DayDiscussion => write!(f, "day_discussion"),
            Self::DayVote => write!(f, "day_vote"),
            Self::DayExecution => write!(f, "day_execution"),
            Self::HunterResolve => write!(f, "hunter_resolve"),
            Self::CheckWin => write!(f, "check_win"),
            Self::GameEnd => write!(f, "game_end"),
        }
    }
}

/// The payload shape a step accepts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputKind {
    /// A single seat number (or none, when `allow_none`).
    SeatSelect,
    /// The witch's save decision plus optional poison target.
    WitchPotions,
    /// A full vote matrix: target seat to voter seats.
    VoteMatrix,
}

/// Input requirements of a step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InputSpec {
    /// The accepted payload shape.
    pub kind: InputKind,
    /// Whether an empty selection is a valid commit.
    pub allow_none: bool,
}

/// Static description of one catalog step.
#[derive(Debug, Clone)]
pub struct StepDescriptor {
    /// Step identifier.
    pub id: StepId,
    /// Phase the session enters when this step starts.
    pub phase: Phase,
    /// Short title for the moderator screen.
    pub title: &'static str,
    /// Narration line read aloud (or played) when the step starts.
    pub script: &'static str,
    /// Whether the step waits for a committed input before advancing.
    pub requires_input: bool,
    /// Whether the host scheduler should advance this step on its own.
    pub auto_advance: bool,
    /// Minimum time to sit on this step before a scheduled advance.
    pub min_duration_secs: u64,
    /// Upper bound the host may use as a hard cutoff.
    pub max_duration_secs: u64,
    /// Accepted input, if any.
    pub input: Option<InputSpec>,
}

impl StepDescriptor {
    /// The delay after which the host scheduler may fire an automatic
    /// advance, or `None` for steps the moderator must end explicitly.
    pub fn auto_advance_after(&self) -> Option<Duration> {
        self.auto_advance
            .then(|| Duration::from_secs(self.min_duration_secs))
    }
}

const CATALOG: &[StepDescriptor] = &[
    StepDescriptor {
        id: StepId::NightStart,
        phase: Phase::Night,
        title: "Night falls",
        script: "Night falls. Everyone, close your eyes.",
        requires_input: false,
        auto_advance: true,
        min_duration_secs: 2,
        max_duration_secs: 6,
        input: None,
    },
    StepDescriptor {
        id: StepId::WolfAction,
        phase: Phase::Night,
        title: "Werewolves act",
        script: "Werewolves, open your eyes and pick a target.",
        requires_input: true,
        auto_advance: true,
        min_duration_secs: 2,
        max_duration_secs: 20,
        input: Some(InputSpec {
            kind: InputKind::SeatSelect,
            allow_none: true,
        }),
    },
    StepDescriptor {
        id: StepId::SeerAction,
        phase: Phase::Night,
        title: "Seer acts",
        script: "Seer, open your eyes and check one player.",
        requires_input: true,
        auto_advance: true,
        min_duration_secs: 2,
        max_duration_secs: 20,
        input: Some(InputSpec {
            kind: InputKind::SeatSelect,
            allow_none: false,
        }),
    },
    StepDescriptor {
        id: StepId::WitchAction,
        phase: Phase::Night,
        title: "Witch acts",
        script: "Witch, open your eyes. Will you use a potion tonight?",
        requires_input: true,
        auto_advance: true,
        min_duration_secs: 2,
        max_duration_secs: 20,
        input: Some(InputSpec {
            kind: InputKind::WitchPotions,
            allow_none: true,
        }),
    },
    StepDescriptor {
        id: StepId::NightResolve,
        phase: Phase::NightResolve,
        title: "Night resolves",
        script: "Collecting the night's results.",
        requires_input: false,
        auto_advance: true,
        min_duration_secs: 2,
        max_duration_secs: 10,
        input: None,
    },
    StepDescriptor {
        id: StepId::DayStart,
        phase: Phase::Day,
        title: "Dawn",
        script: "It is morning. Everyone, open your eyes.",
        requires_input: false,
        auto_advance: true,
        min_duration_secs: 2,
        max_duration_secs: 8,
        input: None,
    },
    StepDescriptor {
        id: StepId::DayDiscussion,
        phase: Phase::Day,
        title: "Discussion",
        script: "The floor is open for discussion.",
        requires_input: false,
        auto_advance: false,
        min_duration_secs: 20,
        max_duration_secs: 180,
        input: None,
    },
    StepDescriptor {
        id: StepId::DayVote,
        phase: Phase::Day,
        title: "Vote",
        script: "Time to vote.",
        requires_input: true,
        auto_advance: true,
        min_duration_secs: 2,
        max_duration_secs: 60,
        input: Some(InputSpec {
            kind: InputKind::VoteMatrix,
            allow_none: false,
        }),
    },
    StepDescriptor {
        id: StepId::DayExecution,
        phase: Phase::Day,
        title: "Execution",
        script: "The vote is closed. Announcing the result.",
        requires_input: false,
        auto_advance: true,
        min_duration_secs: 2,
        max_duration_secs: 20,
        input: None,
    },
    StepDescriptor {
        id: StepId::HunterResolve,
        phase: Phase::HunterResolve,
        title: "Hunter's last shot",
        script: "Hunter, you may take one player with you.",
        requires_input: true,
        auto_advance: false,
        min_duration_secs: 2,
        max_duration_secs: 30,
        input: Some(InputSpec {
            kind: InputKind::SeatSelect,
            allow_none: true,
        }),
    },
    StepDescriptor {
        id: StepId::CheckWin,
        phase: Phase::CheckWin,
        title: "Win check",
        script: "Checking whether the game is over.",
        requires_input: false,
        auto_advance: true,
        min_duration_secs: 2,
        max_duration_secs: 10,
        input: None,
    },
    StepDescriptor {
        id: StepId::GameEnd,
        phase: Phase::GameEnd,
        title: "Game over",
        script: "The game has ended.",
        requires_input: false,
        auto_advance: false,
        min_duration_secs: 2,
        max_duration_secs: 10,
        input: None,
    },
];

/// The full catalog in default order.
pub fn catalog() -> &'static [StepDescriptor] {
    CATALOG
}

/// Find a step descriptor by id.
pub fn find(id: StepId) -> Option<&'static StepDescriptor> {
    CATALOG.iter().find(|step| step.id == id)
}

/// Look up a step descriptor, falling back to the catalog head.
pub fn lookup(id: StepId) -> &'static StepDescriptor {
    find(id).unwrap_or(&CATALOG[0])
}

/// The first step of a round.
pub fn first() -> StepId {
    CATALOG[0].id
}

/// The default catalog successor. A missing current step maps to the
/// catalog head; the terminal step has no successor.
pub fn next_in_order(current: Option<StepId>) -> Option<StepId> {
    let Some(current) = current else {
        return Some(first());
    };
    let index = CATALOG.iter().position(|step| step.id == current)?;
    CATALOG.get(index + 1).map(|step| step.id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_starts_with_night() {
        assert_eq!(first(), StepId::NightStart);
        assert_eq!(catalog()[0].phase, Phase::Night);
    }

    #[test]
    fn every_id_resolves() {
        for step in catalog() {
            assert_eq!(find(step.id).unwrap().id, step.id);
        }
    }

    #[test]
    fn default_order_walks_the_catalog() {
        assert_eq!(next_in_order(None), Some(StepId::NightStart));
        assert_eq!(
            next_in_order(Some(StepId::NightStart)),
            Some(StepId::WolfAction)
        );
        assert_eq!(
            next_in_order(Some(StepId::NightResolve)),
            Some(StepId::DayStart)
        );
        assert_eq!(next_in_order(Some(StepId::GameEnd)), None);
    }

    #[test]
    fn input_steps_declare_their_payload_shape() {
        assert_eq!(
            lookup(StepId::WolfAction).input.unwrap().kind,
            InputKind::SeatSelect
        );
        assert_eq!(
            lookup(StepId::WitchAction).input.unwrap().kind,
            InputKind::WitchPotions
        );
        assert_eq!(
            lookup(StepId::DayVote).input.unwrap().kind,
            InputKind::VoteMatrix
        );
        assert!(!lookup(StepId::SeerAction).input.unwrap().allow_none);
        assert!(lookup(StepId::HunterResolve).input.unwrap().allow_none);
    }

    #[test]
    fn execution_needs_no_input() {
        // The vote is collected at DayVote; execution only announces it.
        assert!(!lookup(StepId::DayExecution).requires_input);
        assert!(lookup(StepId::DayExecution).input.is_none());
    }

    #[test]
    fn auto_advance_window() {
        let night = lookup(StepId::NightStart);
        assert_eq!(
            night.auto_advance_after(),
            Some(Duration::from_secs(night.min_duration_secs))
        );
        assert_eq!(lookup(StepId::DayDiscussion).auto_advance_after(), None);
        assert_eq!(lookup(StepId::HunterResolve).auto_advance_after(), None);
    }

    #[test]
    fn durations_are_ordered() {
        for step in catalog() {
            assert!(
                step.min_duration_secs <= step.max_duration_secs,
                "{} has inverted duration bounds",
                step.id
            );
        }
    }
}
