//! Skill definitions.
//!
//! Skills are static content: the session never mutates them. The kind
//! decides the targeting protocol (single-target skills go through the
//! AwaitTarget phase, everything else resolves against an implicit
//! target), `power` scales the attacker's attack stat, and the two
//! flags layer the combo and area-freeze rules on top of the die table.

/// Identifier of a skill definition (e.g. `"slash"`, `"frost_nova"`).
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SkillId(pub String);

impl SkillId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for SkillId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

/// Targeting class of a skill.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SkillKind {
    /// Single-target damage; requires an explicit target pick.
    Normal,
    /// Restores the caster's hp.
    Heal,
    /// Self-targeted enhancement; no hp mutation.
    Buff,
    /// Hits every living enemy.
    Aoe,
    /// Self-targeted utility.
    SelfTarget,
}

impl SkillKind {
    /// Whether this kind needs an explicit target selection step.
    pub fn needs_target(self) -> bool {
        matches!(self, SkillKind::Normal)
    }
}

/// A combat skill.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub kind: SkillKind,
    /// Percentage of the attacker's attack stat (100 = full attack).
    pub power: u32,
    /// Combo rule: with a die of 4+ the base damage doubles and the
    /// tier upgrades to Crit, independent of the die table.
    #[cfg_attr(feature = "serde", serde(default))]
    pub combo: bool,
    /// Area freeze: sets every living enemy's frozen counter to 2.
    #[cfg_attr(feature = "serde", serde(default))]
    pub freeze: bool,
    /// Flavor line shown by the presentation layer.
    #[cfg_attr(feature = "serde", serde(default))]
    pub desc: String,
}

impl Skill {
    /// Plain single-target attack, the shape enemy strikes also report.
    pub fn basic_attack() -> Self {
        Self {
            id: SkillId::new("basic_attack"),
            name: "Slam".to_string(),
            kind: SkillKind::Normal,
            power: 100,
            combo: false,
            freeze: false,
            desc: String::new(),
        }
    }
}
