//! Table-rule variants.
//!
//! Each rule is an independent boolean toggle. The set is configured before
//! the session starts and frozen once the moderator locks it; after that,
//! set-rule actions are ignored.

use std::fmt;

use serde::{Deserialize, Serialize};

/// The toggleable table rules affecting resolution logic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleSet {
    /// A dead seat's role card stays face down.
    pub no_reveal_on_death: bool,
    /// The witch may not save herself on the first night.
    pub witch_no_self_save_first_night: bool,
    /// The witch may not use both potions in the same night.
    pub witch_no_double_potion_same_night: bool,
    /// The hunter may decline the shot when dying.
    pub hunter_may_skip: bool,
    /// Wiping out all specialists ends the game even if raw counts would not.
    pub win_by_specialist_wipe: bool,
}

impl Default for RuleSet {
    fn default() -> Self {
        Self {
            no_reveal_on_death: false,
            witch_no_self_save_first_night: true,
            witch_no_double_potion_same_night: true,
            hunter_may_skip: true,
            win_by_specialist_wipe: false,
        }
    }
}

impl RuleSet {
    /// Read one rule by key.
    pub fn get(&self, key: RuleKey) -> bool {
        match key {
            RuleKey::NoRevealOnDeath => self.no_reveal_on_death,
            RuleKey::WitchNoSelfSaveFirstNight => self.witch_no_self_save_first_night,
            RuleKey::WitchNoDoublePotionSameNight => self.witch_no_double_potion_same_night,
            RuleKey::HunterMaySkip => self.hunter_may_skip,
            RuleKey::WinBySpecialistWipe => self.win_by_specialist_wipe,
        }
    }

    /// Set one rule by key.
    pub fn set(&mut self, key: RuleKey, value: bool) {
        match key {
            RuleKey::NoRevealOnDeath => self.no_reveal_on_death = value,
            RuleKey::WitchNoSelfSaveFirstNight => self.witch_no_self_save_first_night = value,
            RuleKey::WitchNoDoublePotionSameNight => {
                self.witch_no_double_potion_same_night = value;
            }
            RuleKey::HunterMaySkip => self.hunter_may_skip = value,
            RuleKey::WinBySpecialistWipe => self.win_by_specialist_wipe = value,
        }
    }
}

/// Key naming one rule, used by the set-rule action and the setup screen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleKey {
    /// See [`RuleSet::no_reveal_on_death`].
    NoRevealOnDeath,
    /// See [`RuleSet::witch_no_self_save_first_night`].
    WitchNoSelfSaveFirstNight,
    /// See [`RuleSet::witch_no_double_potion_same_night`].
    WitchNoDoublePotionSameNight,
    /// See [`RuleSet::hunter_may_skip`].
    HunterMaySkip,
    /// See [`RuleSet::win_by_specialist_wipe`].
    WinBySpecialistWipe,
}

impl RuleKey {
    /// All rule keys in display order.
    pub fn all() -> &'static [Self] {
        &[
            Self::NoRevealOnDeath,
            Self::WitchNoSelfSaveFirstNight,
            Self::WitchNoDoublePotionSameNight,
            Self::HunterMaySkip,
            Self::WinBySpecialistWipe,
        ]
    }

    /// Parse a rule key from a user-supplied string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().replace('-', "_").trim() {
            "no_reveal_on_death" | "no_reveal" => Some(Self::NoRevealOnDeath),
            "witch_no_self_save_first_night" | "no_self_save" => {
                Some(Self::WitchNoSelfSaveFirstNight)
            }
            "witch_no_double_potion_same_night" | "no_double_potion" => {
                Some(Self::WitchNoDoublePotionSameNight)
            }
            "hunter_may_skip" => Some(Self::HunterMaySkip),
            "win_by_specialist_wipe" | "specialist_wipe" => Some(Self::WinBySpecialistWipe),
            _ => None,
        }
    }

    /// One-line description for the setup screen.
    pub fn description(self) -> &'static str {
        match self {
            Self::NoRevealOnDeath => "Dead seats keep their role card face down",
            Self::WitchNoSelfSaveFirstNight => "The witch may not save herself on night one",
            Self::WitchNoDoublePotionSameNight => "The witch may not use both potions in one night",
            Self::HunterMaySkip => "The hunter may decline the shot",
            Self::WinBySpecialistWipe => "Losing every specialist ends the game",
        }
    }
}

impl fmt::Display for RuleKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoRevealOnDeath => write!(f, "no_reveal_on_death"),
            Self::WitchNoSelfSaveFirstNight => write!(f, "witch_no_self_save_first_night"),
            Self::WitchNoDoublePotionSameNight => {
                write!(f, "witch_no_double_potion_same_night")
            }
            Self::HunterMaySkip => write!(f, "hunter_may_skip"),
            Self::WinBySpecialistWipe => write!(f, "win_by_specialist_wipe"),
        }
    }
}
