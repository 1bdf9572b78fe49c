//! Offensive role assignment
//!
//! One bidirectional map (role -> player, player -> role). The spacing stage
//! owns writes through `assign`; the play engine only ever calls
//! `hand_ball_handler_to` for role continuity. Everyone else reads.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OffensiveRole {
    BallHandler,
    Screener,
    Cutter,
    Spacer,
    PostUp,
}

impl OffensiveRole {
    pub const ALL: [OffensiveRole; 5] = [
        OffensiveRole::BallHandler,
        OffensiveRole::Screener,
        OffensiveRole::Cutter,
        OffensiveRole::Spacer,
        OffensiveRole::PostUp,
    ];
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RoleMap {
    by_role: BTreeMap<OffensiveRole, usize>,
    by_player: BTreeMap<usize, OffensiveRole>,
}

impl RoleMap {
    pub fn is_empty(&self) -> bool {
        self.by_role.is_empty()
    }

    pub fn clear(&mut self) {
        self.by_role.clear();
        self.by_player.clear();
    }

    /// Give `role` to `player`, evicting any previous holder of either side.
    pub fn assign(&mut self, role: OffensiveRole, player: usize) {
        if let Some(prev_player) = self.by_role.remove(&role) {
            self.by_player.remove(&prev_player);
        }
        if let Some(prev_role) = self.by_player.remove(&player) {
            self.by_role.remove(&prev_role);
        }
        self.by_role.insert(role, player);
        self.by_player.insert(player, role);
    }

    pub fn player_for(&self, role: OffensiveRole) -> Option<usize> {
        self.by_role.get(&role).copied()
    }

    pub fn role_of(&self, player: usize) -> Option<OffensiveRole> {
        self.by_player.get(&player).copied()
    }

    /// Move BallHandler onto `new_carrier`; the old handler inherits the
    /// carrier's previous role. Returns false when nothing changed.
    pub fn hand_ball_handler_to(&mut self, new_carrier: usize) -> bool {
        let old_handler = match self.player_for(OffensiveRole::BallHandler) {
            Some(p) if p != new_carrier => p,
            _ => return false,
        };
        let vacated = self.role_of(new_carrier);
        self.assign(OffensiveRole::BallHandler, new_carrier);
        if let Some(role) = vacated {
            self.assign(role, old_handler);
        }
        true
    }

    pub fn iter(&self) -> impl Iterator<Item = (OffensiveRole, usize)> + '_ {
        self.by_role.iter().map(|(r, p)| (*r, *p))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_map() -> RoleMap {
        let mut m = RoleMap::default();
        for (i, role) in OffensiveRole::ALL.iter().enumerate() {
            m.assign(*role, i);
        }
        m
    }

    #[test]
    fn test_assign_is_bidirectional() {
        let m = full_map();
        for (i, role) in OffensiveRole::ALL.iter().enumerate() {
            assert_eq!(m.player_for(*role), Some(i));
            assert_eq!(m.role_of(i), Some(*role));
        }
    }

    #[test]
    fn test_reassign_evicts_previous_holder() {
        let mut m = full_map();
        m.assign(OffensiveRole::Screener, 4);
        assert_eq!(m.player_for(OffensiveRole::Screener), Some(4));
        assert_eq!(m.role_of(1), None);
        assert_eq!(m.player_for(OffensiveRole::PostUp), None);
    }

    #[test]
    fn test_hand_ball_handler_swaps_roles() {
        let mut m = full_map();
        assert!(m.hand_ball_handler_to(2));
        assert_eq!(m.player_for(OffensiveRole::BallHandler), Some(2));
        assert_eq!(m.role_of(0), Some(OffensiveRole::Cutter));
        assert!(!m.hand_ball_handler_to(2));
    }
}
