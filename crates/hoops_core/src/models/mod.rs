pub mod box_score;
pub mod player;
pub mod team;

pub use box_score::{BoxScore, PlayerBoxScore};
pub use player::{
    AthleticRatings, DefenseRatings, FinishingRatings, PhysicalRatings, PlayerProfile,
    PlayerRatings, PlaymakingRatings, Position, ShootingRatings,
};
pub use team::{DefenseTactic, OffenseTactic, TeamRoster, TeamTactics, TEAM_SIZE};
