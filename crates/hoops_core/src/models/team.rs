//! Team rosters and tactical settings

use serde::{Deserialize, Serialize};

use super::player::{PlayerProfile, PlayerRatings, Position};
use crate::error::{Result, SimError};

/// Players on court per team.
pub const TEAM_SIZE: usize = 5;

/// Offensive tactic, settable per team at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OffenseTactic {
    FastBreak,
    Iso,
    Inside,
    Shoot,
    #[default]
    Motion,
}

impl OffenseTactic {
    pub fn as_str(&self) -> &'static str {
        match self {
            OffenseTactic::FastBreak => "fast_break",
            OffenseTactic::Iso => "iso",
            OffenseTactic::Inside => "inside",
            OffenseTactic::Shoot => "shoot",
            OffenseTactic::Motion => "motion",
        }
    }
}

/// Defensive tactic, settable per team at any time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum DefenseTactic {
    #[default]
    Man,
    Zone,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TeamTactics {
    #[serde(default)]
    pub offense: OffenseTactic,
    #[serde(default)]
    pub defense: DefenseTactic,
}

/// Five-player roster supplied by the roster collaborator.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamRoster {
    pub name: String,
    pub players: Vec<PlayerProfile>,
    #[serde(default)]
    pub tactics: TeamTactics,
}

impl TeamRoster {
    pub fn new(name: impl Into<String>, players: Vec<PlayerProfile>) -> Self {
        Self { name: name.into(), players, tactics: TeamTactics::default() }
    }

    pub fn with_tactics(mut self, offense: OffenseTactic, defense: DefenseTactic) -> Self {
        self.tactics = TeamTactics { offense, defense };
        self
    }

    /// Standard PG/SG/SF/PF/C lineup with archetype ratings around `base`.
    pub fn demo(name: &str, base: f32) -> Self {
        let players = [Position::PG, Position::SG, Position::SF, Position::PF, Position::C]
            .iter()
            .enumerate()
            .map(|(i, &pos)| {
                PlayerProfile::new(
                    format!("{} {} {}", name, pos.as_str(), i + 1),
                    pos,
                    PlayerRatings::archetype(pos, base),
                )
            })
            .collect();
        Self::new(name, players)
    }

    pub fn validate(&self) -> Result<()> {
        if self.players.len() != TEAM_SIZE {
            return Err(SimError::InvalidTeamSize {
                team: self.name.clone(),
                expected: TEAM_SIZE,
                found: self.players.len(),
            });
        }
        for player in &self.players {
            player.validate()?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_roster_is_valid() {
        let team = TeamRoster::demo("Harbor", 70.0);
        assert!(team.validate().is_ok());
        assert_eq!(team.players[0].position, Position::PG);
        assert_eq!(team.players[4].position, Position::C);
    }

    #[test]
    fn test_short_roster_rejected() {
        let mut team = TeamRoster::demo("Harbor", 70.0);
        team.players.pop();
        match team.validate() {
            Err(SimError::InvalidTeamSize { expected, found, .. }) => {
                assert_eq!(expected, 5);
                assert_eq!(found, 4);
            }
            other => panic!("unexpected: {:?}", other),
        }
    }

    #[test]
    fn test_tactics_serde_names() {
        let t: TeamTactics =
            serde_json::from_str(r#"{"offense":"fast_break","defense":"zone"}"#).unwrap();
        assert_eq!(t.offense, OffenseTactic::FastBreak);
        assert_eq!(t.defense, DefenseTactic::Zone);
        assert_eq!(t.offense.as_str(), "fast_break");
    }
}
