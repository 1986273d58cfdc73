//! Day vote normalization, tally, and execution.

use std::collections::{BTreeMap, BTreeSet};

use chrono::{DateTime, Utc};

use crate::role::RoleId;
use crate::seat::SeatNo;
use crate::state::SessionState;

/// Outcome of a vote tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VoteOutcome {
    /// The unique top-voted seat, if one exists.
    pub executed_seat: Option<SeatNo>,
    /// Seats sharing the maximum when the tally tied.
    pub tied_seats: Vec<SeatNo>,
}

/// Drop dead targets and dead voters from a raw vote matrix. Voters are
/// deduplicated per target by construction of the set.
pub fn normalize_votes(
    state: &SessionState,
    raw: &BTreeMap<SeatNo, BTreeSet<SeatNo>>,
) -> BTreeMap<SeatNo, BTreeSet<SeatNo>> {
    let alive: BTreeSet<SeatNo> = state.alive_seats().map(|s| s.seat_no).collect();
    raw.iter()
        .filter(|(target, _)| alive.contains(target))
        .map(|(&target, voters)| {
            let voters: BTreeSet<SeatNo> =
                voters.iter().copied().filter(|v| alive.contains(v)).collect();
            (target, voters)
        })
        .collect()
}

/// Tally a normalized matrix. The winner is the unique target with the
/// strict maximum count; two or more targets at the maximum is a tie and
/// nobody is executed.
pub fn tally(matrix: &BTreeMap<SeatNo, BTreeSet<SeatNo>>) -> VoteOutcome {
    if matrix.is_empty() {
        return VoteOutcome {
            executed_seat: None,
            tied_seats: Vec::new(),
        };
    }
    let top_count = matrix.values().map(BTreeSet::len).max().unwrap_or(0);
    let top_seats: Vec<SeatNo> = matrix
        .iter()
        .filter(|(_, voters)| voters.len() == top_count)
        .map(|(&target, _)| target)
        .collect();
    if top_seats.len() == 1 {
        VoteOutcome {
            executed_seat: Some(top_seats[0]),
            tied_seats: Vec::new(),
        }
    } else {
        VoteOutcome {
            executed_seat: None,
            tied_seats: top_seats,
        }
    }
}

/// Commit the day's vote: normalize, tally, and record the outcome. A tie
/// bumps the re-vote counter; the moderator re-runs the vote at the table
/// and commits again.
pub fn commit_votes(
    state: &mut SessionState,
    raw: &BTreeMap<SeatNo, BTreeSet<SeatNo>>,
    now: DateTime<Utc>,
) {
    let matrix = normalize_votes(state, raw);
    let outcome = tally(&matrix);

    let day = &mut state.runtime.day;
    day.vote_matrix = matrix;
    day.executed_seat = outcome.executed_seat;
    day.tied_seats = outcome.tied_seats.clone();
    if !outcome.tied_seats.is_empty() {
        day.re_vote_count += 1;
    }

    let message = match outcome.executed_seat {
        Some(seat) => format!("Votes recorded: seat {seat} leads."),
        None if !outcome.tied_seats.is_empty() => {
            let list: Vec<String> = outcome.tied_seats.iter().map(|s| s.to_string()).collect();
            format!("Votes tied between seats {}.", list.join(", "))
        }
        None => "Votes recorded: no valid votes.".to_string(),
    };
    state.push_log(message, now);
}

/// Carry out the execution decided at the vote step. A dead hunter with the
/// shot still available records the pending trigger.
pub fn resolve_execution(state: &mut SessionState, now: DateTime<Utc>) {
    let executed = state.runtime.day.executed_seat;
    match executed {
        Some(seat_no) => {
            let was_hunter = state
                .seat(seat_no)
                .is_some_and(|s| s.role == Some(RoleId::Hunter));
            state.kill_seat(seat_no);
            if was_hunter && state.runtime.resources.shot_available {
                state.runtime.pending.hunter_shot_from = Some(seat_no);
            }
            state.push_log(format!("Execution: seat {seat_no}."), now);
        }
        None => {
            state.push_log("No execution today.", now);
        }
    }
}
