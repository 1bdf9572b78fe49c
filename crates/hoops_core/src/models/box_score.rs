use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Per-player counting stats, accumulated for the whole game.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
pub struct PlayerBoxScore {
    pub points: u32,
    pub offensive_rebounds: u32,
    pub defensive_rebounds: u32,
    pub assists: u32,
    pub steals: u32,
    pub blocks: u32,
    pub turnovers: u32,
    pub fouls: u32,
    pub fgm: u32,
    pub fga: u32,
    pub tpm: u32,
    pub tpa: u32,
    pub ftm: u32,
    pub fta: u32,
    pub seconds_played: f32,
}

impl PlayerBoxScore {
    pub fn rebounds(&self) -> u32 {
        self.offensive_rebounds + self.defensive_rebounds
    }

    pub fn minutes(&self) -> f32 {
        self.seconds_played / 60.0
    }

    fn accumulate(&mut self, other: &PlayerBoxScore) {
        self.points += other.points;
        self.offensive_rebounds += other.offensive_rebounds;
        self.defensive_rebounds += other.defensive_rebounds;
        self.assists += other.assists;
        self.steals += other.steals;
        self.blocks += other.blocks;
        self.turnovers += other.turnovers;
        self.fouls += other.fouls;
        self.fgm += other.fgm;
        self.fga += other.fga;
        self.tpm += other.tpm;
        self.tpa += other.tpa;
        self.ftm += other.ftm;
        self.fta += other.fta;
        self.seconds_played += other.seconds_played;
    }
}

/// Box score keyed by player id (court index 0..10; team = id / 5).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct BoxScore {
    pub players: BTreeMap<usize, PlayerBoxScore>,
}

impl BoxScore {
    pub fn new(player_count: usize) -> Self {
        Self { players: (0..player_count).map(|id| (id, PlayerBoxScore::default())).collect() }
    }

    pub fn player(&self, id: usize) -> PlayerBoxScore {
        self.players.get(&id).copied().unwrap_or_default()
    }

    pub fn player_mut(&mut self, id: usize) -> &mut PlayerBoxScore {
        self.players.entry(id).or_default()
    }

    pub fn team_totals(&self, team: usize) -> PlayerBoxScore {
        let mut total = PlayerBoxScore::default();
        for (_, line) in self.players.range(team * 5..team * 5 + 5) {
            total.accumulate(line);
        }
        total
    }

    /// Player FGA relative to the team's per-player average (1.0 = even share).
    pub fn usage_ratio(&self, id: usize) -> f32 {
        let team = id / 5;
        let team_fga = self.team_totals(team).fga as f32;
        if team_fga < 5.0 {
            return 1.0;
        }
        self.player(id).fga as f32 / (team_fga / 5.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_totals_only_sum_own_team() {
        let mut bs = BoxScore::new(10);
        bs.player_mut(1).points = 10;
        bs.player_mut(3).points = 5;
        bs.player_mut(7).points = 22;
        assert_eq!(bs.team_totals(0).points, 15);
        assert_eq!(bs.team_totals(1).points, 22);
    }

    #[test]
    fn test_usage_ratio_neutral_until_sample() {
        let mut bs = BoxScore::new(10);
        bs.player_mut(0).fga = 3;
        assert_eq!(bs.usage_ratio(0), 1.0);
        bs.player_mut(1).fga = 7;
        // team 10 FGA, avg 2 per player: player 0 has 3 -> 1.5
        assert!((bs.usage_ratio(0) - 1.5).abs() < 1e-5);
    }

    #[test]
    fn test_minutes_and_rebounds() {
        let line = PlayerBoxScore {
            seconds_played: 90.0,
            offensive_rebounds: 2,
            defensive_rebounds: 5,
            ..Default::default()
        };
        assert_eq!(line.rebounds(), 7);
        assert!((line.minutes() - 1.5).abs() < 1e-6);
    }
}
