//! Role identities, camps, and the base role catalog.
//!
//! The catalog covers the classic five-role lineup: seer, witch, hunter,
//! villager, and werewolf. Enabled roles and their counts define the
//! distribution pool that [`crate::assign`] shuffles onto the seats.

use std::fmt;

use serde::{Deserialize, Serialize};

/// A seat's allegiance, determining win-condition membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Camp {
    /// The village side.
    Good,
    /// The werewolf side.
    Wolf,
    /// Neutral third parties (reserved for variant lineups).
    Third,
}

impl fmt::Display for Camp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Good => write!(f, "good"),
            Self::Wolf => write!(f, "wolf"),
            Self::Third => write!(f, "third"),
        }
    }
}

/// The shape of a role's night ability, which dictates its input payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityShape {
    /// No night ability.
    None,
    /// Must pick a target seat.
    SelectTarget,
    /// May pick a target seat or decline.
    SelectTargetOptional,
    /// A yes/no decision.
    YesNo,
}

/// Identifier for one of the base roles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoleId {
    /// Checks one seat's camp each night.
    Seer,
    /// Holds a single-use antidote and a single-use poison.
    Witch,
    /// May take one seat down when dying.
    Hunter,
    /// No special ability.
    Villager,
    /// Picks the night kill together with the pack.
    Werewolf,
}

impl RoleId {
    /// Parse a role id from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().trim() {
            "seer" => Some(Self::Seer),
            "witch" => Some(Self::Witch),
            "hunter" => Some(Self::Hunter),
            "villager" => Some(Self::Villager),
            "werewolf" | "wolf" => Some(Self::Werewolf),
            _ => None,
        }
    }

    /// The camp this role is dealt into.
    pub fn camp(self) -> Camp {
        match self {
            Self::Werewolf => Camp::Wolf,
            _ => Camp::Good,
        }
    }

    /// Whether this is an ability-bearing good role (seer, witch, hunter),
    /// tracked for the specialist-wipe win condition.
    pub fn is_specialist(self) -> bool {
        matches!(self, Self::Seer | Self::Witch | Self::Hunter)
    }
}

impl fmt::Display for RoleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Seer => write!(f, "seer"),
            Self::Witch => write!(f, "witch"),
            Self::Hunter => write!(f, "hunter"),
            Self::Villager => write!(f, "villager"),
            Self::Werewolf => write!(f, "werewolf"),
        }
    }
}

/// One catalog entry: a role identity plus its deal count and enabled flag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Role {
    /// Role identity.
    pub id: RoleId,
    /// Display name for the moderator.
    pub name: String,
    /// Camp the role is dealt into.
    pub camp: Camp,
    /// Shape of the role's night ability.
    pub ability: AbilityShape,
    /// How many copies go into the distribution pool when enabled.
    pub count: u32,
    /// Whether the role participates in the next deal.
    pub enabled: bool,
    /// One-line ability description for the setup screen.
    pub description: String,
}

impl Role {
    fn new(id: RoleId, name: &str, ability: AbilityShape, count: u32, description: &str) -> Self {
        Self {
            id,
            name: name.to_string(),
            camp: id.camp(),
            ability,
            count,
            enabled: true,
            description: description.to_string(),
        }
    }
}

/// The base five-role catalog with its default deal counts.
pub fn base_catalog() -> Vec<Role> {
    vec![
        Role::new(
            RoleId::Seer,
            "Seer",
            AbilityShape::SelectTarget,
            1,
            "Checks one player's camp every night.",
        ),
        Role::new(
            RoleId::Witch,
            "Witch",
            AbilityShape::SelectTargetOptional,
            1,
            "Holds one antidote and one poison, each usable once.",
        ),
        Role::new(
            RoleId::Hunter,
            "Hunter",
            AbilityShape::YesNo,
            1,
            "May take one player down when dying.",
        ),
        Role::new(
            RoleId::Villager,
            "Villager",
            AbilityShape::None,
            4,
            "No special ability.",
        ),
        Role::new(
            RoleId::Werewolf,
            "Werewolf",
            AbilityShape::SelectTarget,
            3,
            "Picks the night kill together with the pack.",
        ),
    ]
}

/// Expand each enabled role into `count` copies, in catalog order.
pub fn expand_pool(roles: &[Role]) -> Vec<Role> {
    let mut pool = Vec::new();
    for role in roles.iter().filter(|r| r.enabled) {
        for _ in 0..role.count {
            pool.push(role.clone());
        }
    }
    pool
}

/// Per-camp totals over a set of roles.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CampCounts {
    /// Good-camp roles.
    pub good: u32,
    /// Wolf-camp roles.
    pub wolf: u32,
    /// Third-party roles.
    pub third: u32,
}

/// Count roles per camp (used by the setup summary).
pub fn count_by_camp(roles: &[Role]) -> CampCounts {
    let mut counts = CampCounts::default();
    for role in roles {
        match role.camp {
            Camp::Good => counts.good += role.count,
            Camp::Wolf => counts.wolf += role.count,
            Camp::Third => counts.third += role.count,
        }
    }
    counts
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_catalog_totals_ten() {
        let total: u32 = base_catalog().iter().map(|r| r.count).sum();
        assert_eq!(total, 10);
    }

    #[test]
    fn expand_pool_respects_counts() {
        let pool = expand_pool(&base_catalog());
        assert_eq!(pool.len(), 10);
        assert_eq!(pool.iter().filter(|r| r.id == RoleId::Werewolf).count(), 3);
        assert_eq!(pool.iter().filter(|r| r.id == RoleId::Villager).count(), 4);
        assert_eq!(pool.iter().filter(|r| r.id == RoleId::Seer).count(), 1);
    }

    #[test]
    fn expand_pool_skips_disabled() {
        let mut catalog = base_catalog();
        catalog
            .iter_mut()
            .find(|r| r.id == RoleId::Hunter)
            .unwrap()
            .enabled = false;
        let pool = expand_pool(&catalog);
        assert_eq!(pool.len(), 9);
        assert!(pool.iter().all(|r| r.id != RoleId::Hunter));
    }

    #[test]
    fn camps_match_identity() {
        assert_eq!(RoleId::Werewolf.camp(), Camp::Wolf);
        assert_eq!(RoleId::Seer.camp(), Camp::Good);
        assert_eq!(RoleId::Villager.camp(), Camp::Good);
    }

    #[test]
    fn specialists_are_the_three_ability_roles() {
        assert!(RoleId::Seer.is_specialist());
        assert!(RoleId::Witch.is_specialist());
        assert!(RoleId::Hunter.is_specialist());
        assert!(!RoleId::Villager.is_specialist());
        assert!(!RoleId::Werewolf.is_specialist());
    }

    #[test]
    fn count_by_camp_on_base_catalog() {
        let counts = count_by_camp(&base_catalog());
        assert_eq!(counts.good, 7);
        assert_eq!(counts.wolf, 3);
        assert_eq!(counts.third, 0);
    }

    #[test]
    fn parse_role_ids() {
        assert_eq!(RoleId::parse("seer"), Some(RoleId::Seer));
        assert_eq!(RoleId::parse("WOLF"), Some(RoleId::Werewolf));
        assert_eq!(RoleId::parse("werewolf"), Some(RoleId::Werewolf));
        assert_eq!(RoleId::parse("jester"), None);
    }

    #[test]
    fn role_serde_roundtrip() {
        let role = base_catalog().remove(0);
        let json = serde_json::to_string(&role).unwrap();
        let back: Role = serde_json::from_str(&json).unwrap();
        assert_eq!(back.id, role.id);
        assert_eq!(back.count, role.count);
    }
}
