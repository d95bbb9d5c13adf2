//! Engine state enums and the per-call state report.

use std::fmt;

use serde::Serialize;

use dw_world::{Enemy, HealthState};

/// Current mode of the game. Investigation is the default; certain events
/// (entering a trigger room, taking a trigger item) switch to combat, and
/// killing the fighting enemy switches back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Mode {
    Investigation,
    Combat,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Investigation => write!(f, "investigation"),
            Self::Combat => write!(f, "combat"),
        }
    }
}

/// Completion state of the level. Once `Complete` or `Failed`, every verb is
/// frozen.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Completion {
    InProgress,
    Complete,
    Failed,
}

impl fmt::Display for Completion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InProgress => write!(f, "in_progress"),
            Self::Complete => write!(f, "complete"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// A per-call flag summarizing the state transition a verb caused. Each verb
/// reports at most one: the latest transition its events produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Notification {
    EnterCombat,
    ExitCombat,
    LevelComplete,
    LevelFailed,
}

/// Whether a read verb enforces the usual state checks. The transport's
/// context endpoint reads `observe`/`inventory` even after completion by
/// passing [`Validation::Bypassed`]; everything else uses
/// [`Validation::Checked`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Validation {
    #[default]
    Checked,
    Bypassed,
}

/// Snapshot of the enemy currently being fought.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EnemyInfo {
    pub name: String,
    pub description: String,
    pub hp: i32,
    pub alive: bool,
}

impl From<&Enemy> for EnemyInfo {
    fn from(enemy: &Enemy) -> Self {
        Self {
            name: enemy.name.clone(),
            description: enemy.description.clone(),
            hp: enemy.hp,
            alive: enemy.is_alive(),
        }
    }
}

/// General engine state reported with every verb result.
#[derive(Debug, Clone, Serialize)]
pub struct StateInfo {
    pub completion: Completion,
    pub mode: Mode,
    pub player_health: HealthState,
    pub current_floor: String,
    pub current_room: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub fighting_enemy: Option<EnemyInfo>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notification: Option<Notification>,
    /// Present only once the level is complete.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub outro_narrative: Option<String>,
}

/// A verb's result paired with the engine state after the call.
#[derive(Debug, Clone, Serialize)]
pub struct VerbReply<T> {
    pub state: StateInfo,
    pub result: T,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_forms() {
        assert_eq!(Mode::Investigation.to_string(), "investigation");
        assert_eq!(Mode::Combat.to_string(), "combat");
        assert_eq!(Completion::InProgress.to_string(), "in_progress");
        assert_eq!(Completion::Failed.to_string(), "failed");
    }

    #[test]
    fn enemy_info_reports_liveness() {
        let mut enemy = Enemy::new("ghoul", "a hungry ghoul", 1);
        let info = EnemyInfo::from(&enemy);
        assert!(info.alive);

        enemy.inflict_damage();
        let info = EnemyInfo::from(&enemy);
        assert!(!info.alive);
        assert_eq!(info.hp, 0);
    }
}
