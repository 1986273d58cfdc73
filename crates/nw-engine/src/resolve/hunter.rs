//! The hunter's chained shot.

use chrono::{DateTime, Utc};

use crate::seat::SeatNo;
use crate::state::SessionState;

/// Apply the hunter's choice for the pending trigger.
///
/// Returns `false` when the commit is rejected: a `None` target while the
/// may-skip rule is off leaves the step waiting and changes nothing. On an
/// accepted commit the shot is consumed whether or not anyone died (the
/// ability is single-use per game, spent by the trigger, not by the choice)
/// and the pending trigger clears unconditionally.
pub fn commit_shot(state: &mut SessionState, target: Option<SeatNo>, now: DateTime<Utc>) -> bool {
    if !state.rules.hunter_may_skip && target.is_none() {
        return false;
    }

    let shooter = state.runtime.pending.hunter_shot_from;
    let validated = target
        .filter(|&t| state.is_alive(Some(t)))
        .filter(|&t| Some(t) != shooter);

    if let Some(seat_no) = validated {
        state.kill_seat(seat_no);
        state.push_log(format!("Hunter takes seat {seat_no} down."), now);
    } else {
        state.push_log("Hunter declines the shot.", now);
    }

    state.runtime.resources.shot_available = false;
    state.runtime.pending.hunter_shot_from = None;
    true
}
