//! Night action collection and resolution.
//!
//! The three night actions are collected on separate steps but none of them
//! touches a seat until [`resolve`] runs: the table only ever sees the
//! combined outcome, never a partial one.

use chrono::{DateTime, Utc};

use crate::role::{Camp, RoleId};
use crate::seat::SeatNo;
use crate::state::SessionState;

/// Record the wolves' kill choice. A dead or unknown seat normalizes to
/// "no kill".
pub fn commit_wolf(state: &mut SessionState, target: Option<SeatNo>, now: DateTime<Utc>) {
    let validated = target.filter(|&t| state.is_alive(Some(t)));
    state.runtime.night.wolf_target = validated;
    let message = match validated {
        Some(seat) => format!("Wolves target seat {seat}."),
        None => "Wolves choose no kill.".to_string(),
    };
    state.push_log(message, now);
}

/// Record the seer's check and log the target's camp. The check is
/// read-only; nothing later in the night depends on it.
pub fn commit_seer(state: &mut SessionState, target: Option<SeatNo>, now: DateTime<Utc>) {
    let validated = target.filter(|&t| state.is_alive(Some(t)));
    state.runtime.night.seer_check = validated;
    let message = match validated.and_then(|t| state.seat(t)) {
        Some(seat) => {
            let reading = if seat.camp == Some(Camp::Wolf) {
                "wolf"
            } else {
                "good"
            };
            format!("Seer checks seat {}: {reading}.", seat.seat_no)
        }
        None => "Seer check had no valid target.".to_string(),
    };
    state.push_log(message, now);
}

/// Apply the witch's decision and consume her potions.
///
/// The save is honored only if a wolf target exists, the antidote is
/// unconsumed, and the first-night self-save rule does not forbid it. The
/// poison is honored only against a living seat with the poison unconsumed,
/// and is discarded entirely when the no-double-potion rule is on and the
/// save was honored. Consumption happens here, atomically with the commit,
/// not at resolution time.
pub fn commit_witch(
    state: &mut SessionState,
    save: bool,
    poison_target: Option<SeatNo>,
    now: DateTime<Utc>,
) {
    let witch_seat = state.seat_by_role(RoleId::Witch).map(|s| s.seat_no);
    let wolf_target = state.runtime.night.wolf_target;

    let self_save_blocked = state.rules.witch_no_self_save_first_night
        && state.round == 1
        && witch_seat.is_some()
        && wolf_target == witch_seat;

    let save_honored = save
        && wolf_target.is_some()
        && state.runtime.resources.antidote_available
        && !self_save_blocked;

    let requested_poison = poison_target.filter(|&t| state.is_alive(Some(t)));
    let poison_honored = if state.rules.witch_no_double_potion_same_night && save_honored {
        None
    } else {
        requested_poison.filter(|_| state.runtime.resources.poison_available)
    };

    if save_honored {
        state.runtime.resources.antidote_available = false;
    }
    if poison_honored.is_some() {
        state.runtime.resources.poison_available = false;
    }
    state.runtime.night.witch_save = save_honored;
    state.runtime.night.witch_poison_target = poison_honored;

    let mut message = if save_honored {
        "Witch uses the antidote.".to_string()
    } else {
        "Witch does not save.".to_string()
    };
    if let Some(seat) = poison_honored {
        message.push_str(&format!(" Poison on seat {seat}."));
    }
    state.push_log(message, now);
}

/// Resolve the night into a death set and apply it.
///
/// Death set: the wolf target (unless saved) plus the poison target,
/// deduplicated and filtered to living seats. A dead hunter with the shot
/// still available records the round's single pending trigger.
pub fn resolve(state: &mut SessionState, now: DateTime<Utc>) {
    let night = &state.runtime.night;
    let mut deaths: Vec<SeatNo> = Vec::new();
    if let Some(target) = night.wolf_target
        && !night.witch_save
    {
        deaths.push(target);
    }
    if let Some(target) = night.witch_poison_target {
        deaths.push(target);
    }
    deaths.dedup();
    deaths.retain(|&seat| state.is_alive(Some(seat)));

    let poison_target = state.runtime.night.witch_poison_target;
    for &seat_no in &deaths {
        state.kill_seat(seat_no);
        if Some(seat_no) == poison_target
            && let Some(seat) = state.seat_mut(seat_no)
        {
            seat.marks.poisoned = true;
        }
    }

    let hunter_death = deaths.iter().copied().find(|&seat_no| {
        state.seat(seat_no).is_some_and(|s| s.role == Some(RoleId::Hunter))
    });
    if let Some(seat_no) = hunter_death
        && state.runtime.resources.shot_available
    {
        state.runtime.pending.hunter_shot_from = Some(seat_no);
    }

    let message = if deaths.is_empty() {
        "Peaceful night, no deaths.".to_string()
    } else {
        let list: Vec<String> = deaths.iter().map(|s| s.to_string()).collect();
        format!("Night deaths: seat {}.", list.join(", seat "))
    };
    state.runtime.night.resolved_deaths = deaths;
    state.push_log(message, now);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::host::{FixedClock, SessionClock};
    use crate::role::RoleId;

    /// A dealt 6-seat table with known roles: 1 seer, 2 witch, 3 hunter,
    /// 4 villager, 5 wolf, 6 wolf.
    fn table() -> SessionState {
        let mut state = SessionState::new(6);
        let roles = [
            RoleId::Seer,
            RoleId::Witch,
            RoleId::Hunter,
            RoleId::Villager,
            RoleId::Werewolf,
            RoleId::Werewolf,
        ];
        for (seat, role) in state.seats.iter_mut().zip(roles) {
            seat.role = Some(role);
            seat.camp = Some(role.camp());
        }
        state
    }

    fn now() -> DateTime<Utc> {
        FixedClock::stable().now()
    }

    #[test]
    fn wolf_target_must_be_alive() {
        let mut state = table();
        state.seat_mut(4).unwrap().alive = false;
        commit_wolf(&mut state, Some(4), now());
        assert_eq!(state.runtime.night.wolf_target, None);

        commit_wolf(&mut state, Some(3), now());
        assert_eq!(state.runtime.night.wolf_target, Some(3));
    }

    #[test]
    fn seer_logs_the_camp() {
        let mut state = table();
        commit_seer(&mut state, Some(5), now());
        assert_eq!(state.runtime.night.seer_check, Some(5));
        assert!(state.log.entries()[0].message.contains("seat 5: wolf"));

        commit_seer(&mut state, Some(1), now());
        assert!(state.log.entries()[0].message.contains("seat 1: good"));
    }

    #[test]
    fn witch_save_consumes_the_antidote() {
        let mut state = table();
        state.runtime.night.wolf_target = Some(4);
        commit_witch(&mut state, true, None, now());
        assert!(state.runtime.night.witch_save);
        assert!(!state.runtime.resources.antidote_available);
    }

    #[test]
    fn witch_save_without_wolf_target_is_ignored() {
        let mut state = table();
        commit_witch(&mut state, true, None, now());
        assert!(!state.runtime.night.witch_save);
        assert!(state.runtime.resources.antidote_available);
    }

    #[test]
    fn first_night_self_save_is_rejected() {
        let mut state = table();
        state.runtime.night.wolf_target = Some(2); // the witch herself
        commit_witch(&mut state, true, None, now());
        assert!(!state.runtime.night.witch_save);
        assert!(state.runtime.resources.antidote_available);
    }

    #[test]
    fn self_save_allowed_after_round_one() {
        let mut state = table();
        state.round = 2;
        state.runtime.night.wolf_target = Some(2);
        commit_witch(&mut state, true, None, now());
        assert!(state.runtime.night.witch_save);
    }

    #[test]
    fn self_save_allowed_when_rule_is_off() {
        let mut state = table();
        state.rules.witch_no_self_save_first_night = false;
        state.runtime.night.wolf_target = Some(2);
        commit_witch(&mut state, true, None, now());
        assert!(state.runtime.night.witch_save);
    }

    #[test]
    fn double_potion_discards_the_poison_request() {
        let mut state = table();
        state.runtime.night.wolf_target = Some(4);
        commit_witch(&mut state, true, Some(5), now());
        assert!(state.runtime.night.witch_save);
        assert_eq!(state.runtime.night.witch_poison_target, None);
        // The discarded poison stays available.
        assert!(state.runtime.resources.poison_available);
    }

    #[test]
    fn both_potions_allowed_when_rule_is_off() {
        let mut state = table();
        state.rules.witch_no_double_potion_same_night = false;
        state.runtime.night.wolf_target = Some(4);
        commit_witch(&mut state, true, Some(5), now());
        assert!(state.runtime.night.witch_save);
        assert_eq!(state.runtime.night.witch_poison_target, Some(5));
        assert!(!state.runtime.resources.poison_available);
    }

    #[test]
    fn poison_alone_consumes_only_the_poison() {
        let mut state = table();
        commit_witch(&mut state, false, Some(5), now());
        assert_eq!(state.runtime.night.witch_poison_target, Some(5));
        assert!(!state.runtime.resources.poison_available);
        assert!(state.runtime.resources.antidote_available);
    }

    #[test]
    fn resolve_kills_wolf_target_and_poison_target() {
        let mut state = table();
        state.runtime.night.wolf_target = Some(4);
        state.runtime.night.witch_poison_target = Some(5);
        resolve(&mut state, now());
        assert!(!state.seat(4).unwrap().alive);
        assert!(!state.seat(5).unwrap().alive);
        assert!(state.seat(5).unwrap().marks.poisoned);
        assert_eq!(state.runtime.night.resolved_deaths, vec![4, 5]);
        assert!(state.log.entries()[0].message.contains("seat 4, seat 5"));
    }

    #[test]
    fn saved_wolf_target_survives() {
        let mut state = table();
        state.runtime.night.wolf_target = Some(4);
        state.runtime.night.witch_save = true;
        resolve(&mut state, now());
        assert!(state.seat(4).unwrap().alive);
        assert!(state.runtime.night.resolved_deaths.is_empty());
        assert!(state.log.entries()[0].message.contains("Peaceful night"));
    }

    #[test]
    fn duplicate_targets_die_once() {
        let mut state = table();
        state.runtime.night.wolf_target = Some(4);
        state.runtime.night.witch_poison_target = Some(4);
        resolve(&mut state, now());
        assert_eq!(state.runtime.night.resolved_deaths, vec![4]);
    }

    #[test]
    fn dead_hunter_records_the_pending_trigger() {
        let mut state = table();
        state.runtime.night.wolf_target = Some(3); // the hunter
        resolve(&mut state, now());
        assert_eq!(state.runtime.pending.hunter_shot_from, Some(3));
    }

    #[test]
    fn no_trigger_when_the_shot_is_spent() {
        let mut state = table();
        state.runtime.resources.shot_available = false;
        state.runtime.night.wolf_target = Some(3);
        resolve(&mut state, now());
        assert_eq!(state.runtime.pending.hunter_shot_from, None);
    }
}
