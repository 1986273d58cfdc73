//! The session snapshot: aggregate root plus per-round runtime scratch.
//!
//! Every transition produces a new snapshot; nothing mutates a snapshot the
//! caller still holds. The whole structure serializes to JSON, which is what
//! the storage contract persists between launches.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::{MAX_PLAYERS, MIN_PLAYERS};
use crate::log::{EventLog, LogEntry};
use crate::role::{self, Role, RoleId};
use crate::rules::RuleSet;
use crate::seat::{self, Seat, SeatNo};
use crate::step::{Phase, StepId, StepStatus};

/// Night-phase scratch, reset when a night begins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NightRuntime {
    /// The wolves' chosen target, if any.
    pub wolf_target: Option<SeatNo>,
    /// The seat the seer checked tonight.
    pub seer_check: Option<SeatNo>,
    /// Whether the witch's save was honored.
    pub witch_save: bool,
    /// The witch's honored poison target.
    pub witch_poison_target: Option<SeatNo>,
    /// Seats that died tonight, in resolution order.
    pub resolved_deaths: Vec<SeatNo>,
}

/// Day-phase scratch, reset when a day begins.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayRuntime {
    /// Normalized vote matrix: target seat to its voters.
    pub vote_matrix: BTreeMap<SeatNo, BTreeSet<SeatNo>>,
    /// The unique top-voted seat, if the tally produced one.
    pub executed_seat: Option<SeatNo>,
    /// Seats tied for the maximum, empty unless the tally tied.
    pub tied_seats: Vec<SeatNo>,
    /// How many times the vote tied this day.
    pub re_vote_count: u32,
}

/// Single-use ability resources. Flags only ever move from available to
/// consumed within a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Resources {
    /// The witch's antidote is still unused.
    pub antidote_available: bool,
    /// The witch's poison is still unused.
    pub poison_available: bool,
    /// The hunter's shot is still unused.
    pub shot_available: bool,
}

impl Default for Resources {
    fn default() -> Self {
        Self {
            antidote_available: true,
            poison_available: true,
            shot_available: true,
        }
    }
}

/// At most one outstanding chained trigger.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Pending {
    /// Seat of a hunter who just died with the shot available.
    pub hunter_shot_from: Option<SeatNo>,
}

/// Transient per-round state, grouped by concern.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuntimeState {
    /// Night scratch.
    pub night: NightRuntime,
    /// Day scratch.
    pub day: DayRuntime,
    /// Single-use ability flags.
    pub resources: Resources,
    /// Outstanding chained trigger.
    pub pending: Pending,
}

/// The full session snapshot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SessionState {
    /// Number of seats at the table.
    pub player_count: u32,
    /// The seats, in seat order.
    pub seats: Vec<Seat>,
    /// The role catalog with enabled flags.
    pub roles: Vec<Role>,
    /// The table rules.
    pub rules: RuleSet,
    /// Whether rules and role pool are frozen.
    pub rules_locked: bool,
    /// Whether the host may play narration audio.
    pub audio_unlocked: bool,
    /// Current coarse phase.
    pub phase: Phase,
    /// Current round, starting at 1.
    pub round: u32,
    /// The active step, if the sequencer has started.
    pub step: Option<StepId>,
    /// Execution status of the active step.
    pub step_status: StepStatus,
    /// Whether the active input-bearing step has accepted a commit.
    pub input_committed: bool,
    /// Index of the seat currently being handed its card.
    pub deal_cursor: usize,
    /// Per-round scratch.
    pub runtime: RuntimeState,
    /// The moderator event log.
    pub log: EventLog,
}

impl SessionState {
    /// Create a fresh session for `player_count` seats (clamped to 5-20):
    /// empty seats, the base role catalog, default rules, setup phase.
    pub fn new(player_count: u32) -> Self {
        let player_count = player_count.clamp(MIN_PLAYERS, MAX_PLAYERS);
        Self {
            player_count,
            seats: seat::create_seats(player_count),
            roles: role::base_catalog(),
            rules: RuleSet::default(),
            rules_locked: false,
            audio_unlocked: false,
            phase: Phase::SetupRoles,
            round: 1,
            step: None,
            step_status: StepStatus::Playing,
            input_committed: false,
            deal_cursor: 0,
            runtime: RuntimeState::default(),
            log: EventLog::new(),
        }
    }

    /// Look up a seat by number.
    pub fn seat(&self, seat_no: SeatNo) -> Option<&Seat> {
        self.seats.iter().find(|s| s.seat_no == seat_no)
    }

    /// Look up a seat by number, mutably.
    pub fn seat_mut(&mut self, seat_no: SeatNo) -> Option<&mut Seat> {
        self.seats.iter_mut().find(|s| s.seat_no == seat_no)
    }

    /// The first seat holding `role`, if dealt.
    pub fn seat_by_role(&self, role: RoleId) -> Option<&Seat> {
        self.seats.iter().find(|s| s.role == Some(role))
    }

    /// Whether `seat_no` names a currently-alive seat.
    pub fn is_alive(&self, seat_no: Option<SeatNo>) -> bool {
        seat_no.is_some_and(|n| self.seat(n).is_some_and(|s| s.alive))
    }

    /// All living seats, in seat order.
    pub fn alive_seats(&self) -> impl Iterator<Item = &Seat> {
        self.seats.iter().filter(|s| s.alive)
    }

    /// Record a log entry at the current round and phase.
    pub fn push_log(&mut self, message: impl Into<String>, now: DateTime<Utc>) {
        self.log
            .record(LogEntry::new(self.round, self.phase, message, now));
    }

    /// Kill a seat, flipping its reveal flag unless the no-reveal rule is on.
    /// Returns true if the seat was alive.
    pub fn kill_seat(&mut self, seat_no: SeatNo) -> bool {
        let reveal = !self.rules.no_reveal_on_death;
        match self.seat_mut(seat_no) {
            Some(seat) if seat.alive => {
                seat.alive = false;
                if reveal {
                    seat.revealed = true;
                }
                true
            }
            _ => false,
        }
    }
}
