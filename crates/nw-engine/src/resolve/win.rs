//! Win evaluation and the round loop.

use chrono::{DateTime, Utc};

use crate::role::Camp;
use crate::state::{NightRuntime, SessionState};
use crate::step::{StepId, StepStatus};

/// The verdict of a win check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// All wolves are dead.
    GoodWins,
    /// Wolves match or outnumber the others, or the specialist-wipe rule
    /// fired.
    WolfWins,
    /// Neither side has won; play continues.
    Continues {
        /// Living wolves.
        wolves: u32,
        /// Living non-wolves.
        others: u32,
    },
}

/// Evaluate the win conditions on the current seats.
pub fn evaluate(state: &SessionState) -> Verdict {
    let wolves = state
        .alive_seats()
        .filter(|s| s.camp == Some(Camp::Wolf))
        .count() as u32;
    let others = state.alive_seats().count() as u32 - wolves;

    let specialists_dealt = state
        .seats
        .iter()
        .filter(|s| s.role.is_some_and(|r| r.is_specialist()))
        .count();
    let specialists_alive = state
        .alive_seats()
        .filter(|s| s.role.is_some_and(|r| r.is_specialist()))
        .count();
    let specialist_wipe =
        state.rules.win_by_specialist_wipe && specialists_dealt > 0 && specialists_alive == 0;

    if wolves == 0 {
        Verdict::GoodWins
    } else if wolves >= others || specialist_wipe {
        Verdict::WolfWins
    } else {
        Verdict::Continues { wolves, others }
    }
}

/// Apply the win check: end the session on a verdict, otherwise loop the
/// sequencer into the next round's first night step.
pub fn advance(state: &mut SessionState, now: DateTime<Utc>) {
    match evaluate(state) {
        Verdict::GoodWins => finish(state, "The good side wins.", now),
        Verdict::WolfWins => finish(state, "The wolf side wins.", now),
        Verdict::Continues { wolves, others } => {
            state.push_log(
                format!("Wolves {wolves}, others {others}. The game continues."),
                now,
            );
            state.round += 1;
            state.step = Some(StepId::NightStart);
            state.phase = crate::step::lookup(StepId::NightStart).phase;
            state.step_status = StepStatus::Playing;
            state.input_committed = false;
            state.runtime.night = NightRuntime::default();
        }
    }
}

fn finish(state: &mut SessionState, result: &str, now: DateTime<Utc>) {
    // Result entry above the session-end marker in the newest-first log.
    state.push_log("The session has ended.", now);
    state.push_log(result, now);
    state.phase = crate::step::lookup(StepId::GameEnd).phase;
    state.step = Some(StepId::GameEnd);
    state.step_status = StepStatus::Playing;
    state.input_committed = false;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{FixedClock, SessionClock};
    use crate::role::RoleId;
    use crate::step::Phase;

    fn table(roles: &[RoleId]) -> SessionState {
        let mut state = SessionState::new((roles.len() as u32).max(5));
        for (seat, &role) in state.seats.iter_mut().zip(roles) {
            seat.role = Some(role);
            seat.camp = Some(role.camp());
        }
        state
    }

    fn now() -> chrono::DateTime<chrono::Utc> {
        FixedClock::stable().now()
    }

    #[test]
    fn good_wins_when_no_wolves_remain() {
        let mut state = table(&[
            RoleId::Seer,
            RoleId::Witch,
            RoleId::Hunter,
            RoleId::Villager,
            RoleId::Werewolf,
        ]);
        state.seat_mut(5).unwrap().alive = false;
        assert_eq!(evaluate(&state), Verdict::GoodWins);

        advance(&mut state, now());
        assert_eq!(state.phase, Phase::GameEnd);
        assert_eq!(state.step, Some(StepId::GameEnd));
        assert!(state.log.entries()[0].message.contains("good side wins"));
        assert!(state.log.entries()[1].message.contains("session has ended"));
    }

    #[test]
    fn wolves_win_on_parity() {
        let mut state = table(&[
            RoleId::Seer,
            RoleId::Villager,
            RoleId::Villager,
            RoleId::Werewolf,
            RoleId::Werewolf,
        ]);
        state.seat_mut(1).unwrap().alive = false; // 2 wolves vs 2 others
        assert_eq!(evaluate(&state), Verdict::WolfWins);

        advance(&mut state, now());
        assert_eq!(state.phase, Phase::GameEnd);
        assert!(state.log.entries()[0].message.contains("wolf side wins"));
    }

    #[test]
    fn specialist_wipe_ends_the_game_when_enabled() {
        let mut state = table(&[
            RoleId::Seer,
            RoleId::Witch,
            RoleId::Hunter,
            RoleId::Villager,
            RoleId::Villager,
            RoleId::Villager,
            RoleId::Villager,
            RoleId::Werewolf,
        ]);
        state.rules.win_by_specialist_wipe = true;
        for seat_no in 1..=3 {
            state.seat_mut(seat_no).unwrap().alive = false;
        }
        // 1 wolf vs 4 others: raw counts would continue the game.
        assert_eq!(evaluate(&state), Verdict::WolfWins);
    }

    #[test]
    fn specialist_wipe_ignored_when_disabled() {
        let mut state = table(&[
            RoleId::Seer,
            RoleId::Witch,
            RoleId::Hunter,
            RoleId::Villager,
            RoleId::Villager,
            RoleId::Villager,
            RoleId::Villager,
            RoleId::Werewolf,
        ]);
        for seat_no in 1..=3 {
            state.seat_mut(seat_no).unwrap().alive = false;
        }
        assert_eq!(
            evaluate(&state),
            Verdict::Continues {
                wolves: 1,
                others: 4
            }
        );
    }

    #[test]
    fn continuation_loops_into_the_next_night() {
        let mut state = table(&[
            RoleId::Seer,
            RoleId::Witch,
            RoleId::Hunter,
            RoleId::Villager,
            RoleId::Villager,
            RoleId::Villager,
            RoleId::Villager,
            RoleId::Werewolf,
        ]);
        state.phase = Phase::CheckWin;
        state.runtime.night.wolf_target = Some(4);
        advance(&mut state, now());
        assert_eq!(state.round, 2);
        assert_eq!(state.step, Some(StepId::NightStart));
        assert_eq!(state.phase, Phase::Night);
        // Night scratch is fresh for the new round.
        assert_eq!(state.runtime.night.wolf_target, None);
        assert!(state.log.entries()[0].message.contains("game continues"));
    }
}
