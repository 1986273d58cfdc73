//! The pure transition function over session snapshots.
//!
//! [`apply_action`] never mutates its input: it clones the snapshot, applies
//! the action to the clone, and returns it. Invalid or stale actions come
//! back as the unchanged clone; the only operation that can fail outright is
//! [`start_new_game`], on a role pool that does not fit the table.

use chrono::{DateTime, Utc};
use rand::rngs::StdRng;

use crate::action::{Action, StepPayload};
use crate::assign;
use crate::config::{MAX_PLAYERS, MIN_PLAYERS};
use crate::error::EngineResult;
use crate::host::SessionClock;
use crate::resolve::{day, hunter, night, win};
use crate::seat;
use crate::state::{DayRuntime, NightRuntime, RuntimeState, SessionState};
use crate::step::{self, InputKind, Phase, StepId, StepStatus};

/// Apply one action to a snapshot, producing the next snapshot.
///
/// Total over the action vocabulary: unknown targets, mismatched payloads,
/// and out-of-phase requests are normalized or ignored, never raised.
pub fn apply_action(
    state: &SessionState,
    action: Action,
    clock: &impl SessionClock,
) -> SessionState {
    let mut next = state.clone();
    match action {
        Action::Hydrate { state: saved } => {
            next = *saved;
        }
        Action::SetPlayerCount { count } => {
            let count = count.clamp(MIN_PLAYERS, MAX_PLAYERS);
            next.player_count = count;
            next.seats = seat::create_seats(count);
        }
        Action::ToggleRole { role, enabled } => {
            if !next.rules_locked
                && let Some(entry) = next.roles.iter_mut().find(|r| r.id == role)
            {
                entry.enabled = enabled;
            }
        }
        Action::SetRule { rule, value } => {
            if !next.rules_locked {
                next.rules.set(rule, value);
            }
        }
        Action::SetPhase { phase } => {
            next.phase = phase;
        }
        Action::LockRules => {
            next.rules_locked = true;
        }
        Action::UnlockAudio => {
            next.audio_unlocked = true;
        }
        Action::SetSeatName { seat, name } => {
            if let Some(entry) = next.seat_mut(seat) {
                entry.name = name;
            }
        }
        Action::MarkSeatRevealed { seat } => {
            if let Some(entry) = next.seat_mut(seat) {
                entry.revealed = true;
            }
        }
        Action::AdvanceDealCursor => {
            next.deal_cursor += 1;
        }
        Action::StartStep { step } => {
            start_step(&mut next, step);
        }
        Action::PauseStep => {
            next.step_status = StepStatus::Paused;
        }
        Action::ResumeStep => {
            next.step_status = resumed_status(&next);
        }
        Action::SkipStep => {
            if let Some(current) = next.step {
                let title = step::lookup(current).title;
                next.push_log(format!("Step skipped: {title}."), clock.now());
                advance_step(&mut next, true, clock.now());
            }
        }
        Action::CommitInput { payload } => {
            commit_input(&mut next, payload, clock.now());
        }
        Action::AdvanceStep => {
            advance_step(&mut next, false, clock.now());
        }
        Action::ResetSession => {
            next = SessionState::new(state.player_count);
        }
    }
    next
}

/// Deal roles and enter the hand-out phase.
///
/// Validates the role pool against the seat count first; a mismatch is the
/// one configuration error that is surfaced instead of normalized. The deal
/// resets round, runtime, and sequencer, but keeps the log.
pub fn start_new_game(
    state: &SessionState,
    rng: &mut StdRng,
    clock: &impl SessionClock,
) -> EngineResult<SessionState> {
    let mut next = state.clone();
    next.seats = assign::assign_roles(&state.seats, &state.roles, rng)?;
    next.phase = Phase::Deal;
    next.round = 1;
    next.deal_cursor = 0;
    next.step = None;
    next.step_status = StepStatus::Playing;
    next.input_committed = false;
    next.runtime = RuntimeState::default();
    next.push_log("Dealing roles.", clock.now());
    Ok(next)
}

/// Enter a step: adopt its phase, arm its input status, and reset the
/// matching runtime scratch on the two round boundaries.
fn start_step(state: &mut SessionState, id: StepId) {
    let descriptor = step::lookup(id);
    if id == StepId::NightStart {
        state.runtime.night = NightRuntime::default();
    }
    if id == StepId::DayStart {
        state.runtime.day = DayRuntime::default();
    }
    state.step = Some(descriptor.id);
    state.phase = descriptor.phase;
    state.step_status = if descriptor.requires_input {
        StepStatus::WaitingForInput
    } else {
        StepStatus::Playing
    };
    state.input_committed = false;
}

/// The status a paused step returns to: still waiting if it wants input and
/// none has been committed, playing otherwise.
fn resumed_status(state: &SessionState) -> StepStatus {
    let waiting = state
        .step
        .map(step::lookup)
        .is_some_and(|d| d.requires_input)
        && !state.input_committed;
    if waiting {
        StepStatus::WaitingForInput
    } else {
        StepStatus::Playing
    }
}

/// Route a payload to the current step's commit handler.
///
/// The payload shape must match the step's declared input kind; anything
/// else is ignored. An accepted commit marks the step ready to advance.
fn commit_input(state: &mut SessionState, payload: StepPayload, now: DateTime<Utc>) {
    let Some(current) = state.step else {
        return;
    };
    let Some(spec) = step::lookup(current).input else {
        return;
    };

    let accepted = match (spec.kind, payload) {
        (InputKind::SeatSelect, StepPayload::Seat { target }) => match current {
            StepId::WolfAction => {
                night::commit_wolf(state, target, now);
                true
            }
            StepId::SeerAction => {
                night::commit_seer(state, target, now);
                true
            }
            StepId::HunterResolve => hunter::commit_shot(state, target, now),
            _ => false,
        },
        (InputKind::WitchPotions, StepPayload::Witch {
            save,
            poison_target,
        }) => {
            night::commit_witch(state, save, poison_target, now);
            true
        }
        (InputKind::VoteMatrix, StepPayload::Votes { matrix }) => {
            day::commit_votes(state, &matrix, now);
            true
        }
        _ => false,
    };

    if accepted {
        state.input_committed = true;
        if state.step_status == StepStatus::WaitingForInput {
            state.step_status = StepStatus::Playing;
        }
    }
}

/// Run the current step's resolution side effects and move to its
/// successor.
///
/// An input-bearing step that has not accepted a commit refuses to advance
/// unless `forced` (a skip). The successor is the catalog order, overridden
/// by the hunter chain and the win-check shortcut; the win check itself
/// ends the session or loops the round.
fn advance_step(state: &mut SessionState, forced: bool, now: DateTime<Utc>) {
    let Some(current) = state.step else {
        start_step(state, step::first());
        return;
    };
    if !forced && state.step_status == StepStatus::WaitingForInput {
        return;
    }

    match current {
        StepId::NightResolve => night::resolve(state, now),
        StepId::DayExecution => day::resolve_execution(state, now),
        StepId::CheckWin => {
            win::advance(state, now);
            return;
        }
        _ => {}
    }

    let mut next_id = step::next_in_order(Some(current));
    let pending_hunter = state.runtime.pending.hunter_shot_from.is_some();
    if pending_hunter && matches!(current, StepId::NightResolve | StepId::DayExecution) {
        next_id = Some(StepId::HunterResolve);
    }
    if current == StepId::HunterResolve
        || (current == StepId::DayExecution && !pending_hunter)
    {
        next_id = Some(StepId::CheckWin);
    }

    if let Some(id) = next_id {
        start_step(state, id);
    }
}
