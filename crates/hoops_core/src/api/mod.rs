//! # JSON API
//!
//! One request in, one finished game out. The request carries the seed,
//! both rosters and an optional tuning override; the response carries the
//! final score, quarter splits, the box score and the tail of the event log.

use serde::{Deserialize, Serialize};

use crate::engine::config::EngineConfig;
use crate::engine::events::GameEvent;
use crate::error::{Result, SimError};
use crate::models::{BoxScore, TeamRoster};
use crate::simulation::Simulation;

pub const SCHEMA_VERSION: u8 = 1;

const DEFAULT_EVENT_TAIL: usize = 50;

fn default_schema_version() -> u8 {
    SCHEMA_VERSION
}

fn default_event_tail() -> usize {
    DEFAULT_EVENT_TAIL
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameRequest {
    #[serde(default = "default_schema_version")]
    pub schema_version: u8,
    pub seed: u64,
    pub home: TeamRoster,
    pub away: TeamRoster,
    #[serde(default)]
    pub config: Option<EngineConfig>,
    /// How many trailing events to return.
    #[serde(default = "default_event_tail")]
    pub event_tail: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameResponse {
    pub schema_version: u8,
    pub seed: u64,
    pub team_names: [String; 2],
    pub score: [u32; 2],
    pub quarter_scores: Vec<[u32; 2]>,
    pub box_score: BoxScore,
    pub events: Vec<GameEvent>,
    pub ticks: u64,
    pub fingerprint: u64,
}

/// Run a full game from a JSON `GameRequest`.
pub fn simulate_game(request: GameRequest) -> Result<GameResponse> {
    if request.schema_version != SCHEMA_VERSION {
        return Err(SimError::UnsupportedSchema(request.schema_version));
    }
    let GameRequest { seed, home, away, config, event_tail, .. } = request;
    let config = config.unwrap_or_default();

    let mut sim = Simulation::new(&home, &away, config, seed)?;
    let result = sim.run_to_completion();
    let skip = result.events.len().saturating_sub(event_tail);

    Ok(GameResponse {
        schema_version: SCHEMA_VERSION,
        seed,
        team_names: result.team_names,
        score: result.score,
        quarter_scores: result.quarter_scores,
        box_score: result.box_score,
        events: result.events.into_iter().skip(skip).collect(),
        ticks: result.ticks,
        fingerprint: result.fingerprint,
    })
}

pub fn simulate_game_json(request_json: &str) -> Result<String> {
    let request: GameRequest = serde_json::from_str(request_json)?;
    let response = simulate_game(request)?;
    Ok(serde_json::to_string(&response)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request_json(seed: u64, extra: &str) -> String {
        let home = serde_json::to_string(&TeamRoster::demo("Harbor", 72.0)).unwrap();
        let away = serde_json::to_string(&TeamRoster::demo("Summit", 70.0)).unwrap();
        let config = serde_json::to_string(&EngineConfig::quick(30.0)).unwrap();
        format!(r#"{{"seed":{},"home":{},"away":{},"config":{}{}}}"#, seed, home, away, config, extra)
    }

    #[test]
    fn test_json_round_trip_game() {
        let out = simulate_game_json(&request_json(42, r#","event_tail":5"#)).unwrap();
        let response: GameResponse = serde_json::from_str(&out).unwrap();
        assert_eq!(response.seed, 42);
        assert_eq!(response.quarter_scores.len(), 4);
        assert!(response.events.len() <= 5);
        assert_eq!(response.box_score.players.len(), 10);
    }

    #[test]
    fn test_json_deterministic() {
        let a = simulate_game_json(&request_json(8, "")).unwrap();
        let b = simulate_game_json(&request_json(8, "")).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_bad_schema_version() {
        let err = simulate_game_json(&request_json(1, r#","schema_version":9"#)).unwrap_err();
        assert!(matches!(err, SimError::UnsupportedSchema(9)));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(simulate_game_json("{not json"), Err(SimError::Json(_))));
    }
}
