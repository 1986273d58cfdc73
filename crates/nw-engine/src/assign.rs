//! One-time randomized role distribution.

use rand::rngs::StdRng;
use rand::seq::SliceRandom;

use crate::error::{EngineError, EngineResult};
use crate::role::{self, Role};
use crate::seat::Seat;

/// Check that the expanded enabled-role pool matches the seat count.
///
/// A mismatch is a setup-time contract violation; it is surfaced here,
/// before any card is handed out, never patched during assignment.
pub fn validate_role_pool(roles: &[Role], seat_count: usize) -> EngineResult<()> {
    let pool_size = role::expand_pool(roles).len();
    if pool_size == seat_count {
        Ok(())
    } else {
        Err(EngineError::RolePoolMismatch {
            pool_size,
            seat_count,
        })
    }
}

/// Deal roles onto the seats.
///
/// Expands each enabled role into `count` copies, shuffles the pool
/// (Fisher-Yates over the injected rng), and assigns `pool[i]` to
/// `seats[i]` in seat order. Every invocation reshuffles; seats come back
/// alive and unrevealed.
pub fn assign_roles(seats: &[Seat], roles: &[Role], rng: &mut StdRng) -> EngineResult<Vec<Seat>> {
    validate_role_pool(roles, seats.len())?;

    let mut pool = role::expand_pool(roles);
    pool.shuffle(rng);

    Ok(seats
        .iter()
        .zip(pool)
        .map(|(seat, card)| {
            let mut seat = seat.clone();
            seat.role = Some(card.id);
            seat.camp = Some(card.camp);
            seat.alive = true;
            seat.revealed = false;
            seat
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use proptest::prelude::*;
    use rand::SeedableRng;

    use super::*;
    use crate::role::{RoleId, base_catalog};
    use crate::seat::create_seats;

    /// Catalog sized for `n` seats by adjusting the villager count.
    fn catalog_for(n: u32) -> Vec<Role> {
        let mut catalog = base_catalog();
        // Keep the six non-villager cards, fill the rest with villagers.
        let fixed: u32 = catalog
            .iter()
            .filter(|r| r.id != RoleId::Villager)
            .map(|r| r.count)
            .sum();
        catalog
            .iter_mut()
            .find(|r| r.id == RoleId::Villager)
            .unwrap()
            .count = n.saturating_sub(fixed);
        catalog
    }

    #[test]
    fn mismatch_is_a_setup_error() {
        let seats = create_seats(8);
        let result = validate_role_pool(&base_catalog(), seats.len());
        assert!(matches!(
            result,
            Err(EngineError::RolePoolMismatch {
                pool_size: 10,
                seat_count: 8
            })
        ));
    }

    #[test]
    fn assignment_is_a_bijection() {
        let seats = create_seats(10);
        let mut rng = StdRng::seed_from_u64(7);
        let dealt = assign_roles(&seats, &base_catalog(), &mut rng).unwrap();

        assert_eq!(dealt.len(), 10);
        let mut counts: BTreeMap<RoleId, u32> = BTreeMap::new();
        for seat in &dealt {
            assert!(seat.alive);
            assert!(!seat.revealed);
            assert_eq!(seat.camp, seat.role.map(RoleId::camp));
            *counts.entry(seat.role.unwrap()).or_default() += 1;
        }
        assert_eq!(counts[&RoleId::Werewolf], 3);
        assert_eq!(counts[&RoleId::Villager], 4);
        assert_eq!(counts[&RoleId::Seer], 1);
        assert_eq!(counts[&RoleId::Witch], 1);
        assert_eq!(counts[&RoleId::Hunter], 1);
    }

    #[test]
    fn same_seed_deals_the_same_hands() {
        let seats = create_seats(10);
        let mut rng1 = StdRng::seed_from_u64(99);
        let mut rng2 = StdRng::seed_from_u64(99);
        let a = assign_roles(&seats, &base_catalog(), &mut rng1).unwrap();
        let b = assign_roles(&seats, &base_catalog(), &mut rng2).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn reinvocation_reshuffles() {
        let seats = create_seats(10);
        let mut rng = StdRng::seed_from_u64(3);
        let first = assign_roles(&seats, &base_catalog(), &mut rng).unwrap();
        let second = assign_roles(&seats, &base_catalog(), &mut rng).unwrap();
        // Same multiset of roles either way.
        let roles_of = |seats: &[Seat]| {
            let mut ids: Vec<_> = seats.iter().filter_map(|s| s.role).collect();
            ids.sort_by_key(|id| format!("{id}"));
            ids
        };
        assert_eq!(roles_of(&first), roles_of(&second));
    }

    proptest! {
        #[test]
        fn bijection_for_any_table_size(n in 7u32..=20, seed: u64) {
            let seats = create_seats(n);
            let catalog = catalog_for(n);
            let mut rng = StdRng::seed_from_u64(seed);
            let dealt = assign_roles(&seats, &catalog, &mut rng).unwrap();

            prop_assert_eq!(dealt.len(), n as usize);
            // Every seat got exactly one role and the pool is fully used.
            let mut counts: BTreeMap<RoleId, u32> = BTreeMap::new();
            for seat in &dealt {
                prop_assert!(seat.role.is_some());
                *counts.entry(seat.role.unwrap()).or_default() += 1;
            }
            for role in catalog.iter().filter(|r| r.enabled && r.count > 0) {
                prop_assert_eq!(counts.get(&role.id).copied().unwrap_or(0), role.count);
            }
        }
    }
}
