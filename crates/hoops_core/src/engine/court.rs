//! Court geometry (feet)
//!
//! Team 0 attacks the right basket (+x) for the whole game, team 1 the left.
//! Spacing slots are defined relative to the attacking basket as
//! (depth toward half court, lateral offset to the offense's right) and are
//! mirrored for team 1.

use serde::{Deserialize, Serialize};

use super::geometry::{clamp_point, distance, Point};

pub const COURT_LENGTH: f32 = 94.0;
pub const COURT_WIDTH: f32 = 50.0;
pub const HALF_COURT_X: f32 = 47.0;
pub const CENTER: Point = (HALF_COURT_X, COURT_WIDTH / 2.0);

/// Basket centre distance from its baseline.
pub const BASKET_FROM_BASELINE: f32 = 5.25;
pub const RIM_HEIGHT: f32 = 10.0;
pub const THREE_POINT_RADIUS: f32 = 23.75;
pub const CORNER_THREE_LATERAL: f32 = 22.0;
/// Depth (past the basket) where the straight corner three line ends.
pub const CORNER_THREE_DEPTH: f32 = 8.75;
pub const FREE_THROW_DEPTH: f32 = 13.75;
pub const PAINT_HALF_WIDTH: f32 = 8.0;
pub const PAINT_DEPTH: f32 = 13.75;

/// +1.0 when the team attacks toward +x, -1.0 otherwise.
#[inline]
pub fn attack_dir(team: usize) -> f32 {
    if team == 0 {
        1.0
    } else {
        -1.0
    }
}

/// Basket the team shoots at.
#[inline]
pub fn attack_basket(team: usize) -> Point {
    if team == 0 {
        (COURT_LENGTH - BASKET_FROM_BASELINE, COURT_WIDTH / 2.0)
    } else {
        (BASKET_FROM_BASELINE, COURT_WIDTH / 2.0)
    }
}

/// Basket the team defends.
#[inline]
pub fn own_basket(team: usize) -> Point {
    attack_basket(1 - team.min(1))
}

/// Convert basket-relative (depth, lateral) into court coordinates for `team`'s offense.
#[inline]
pub fn relative_to_basket(team: usize, depth: f32, lateral: f32) -> Point {
    let basket = attack_basket(team);
    let dir = attack_dir(team);
    (basket.0 - dir * depth, basket.1 - dir * lateral)
}

/// (depth, lateral) of a court point relative to `team`'s attacking basket.
#[inline]
pub fn basket_relative(team: usize, p: Point) -> (f32, f32) {
    let basket = attack_basket(team);
    let dir = attack_dir(team);
    ((basket.0 - p.0) * dir, (basket.1 - p.1) * dir)
}

pub fn distance_to_basket(team: usize, p: Point) -> f32 {
    distance(p, attack_basket(team))
}

pub fn is_frontcourt(team: usize, p: Point) -> bool {
    (p.0 - HALF_COURT_X) * attack_dir(team) > 0.0
}

pub fn is_three_point(team: usize, p: Point) -> bool {
    let (depth, lateral) = basket_relative(team, p);
    if depth <= CORNER_THREE_DEPTH {
        lateral.abs() >= CORNER_THREE_LATERAL
    } else {
        distance_to_basket(team, p) >= THREE_POINT_RADIUS
    }
}

pub fn in_paint(team: usize, p: Point) -> bool {
    let (depth, lateral) = basket_relative(team, p);
    depth >= -BASKET_FROM_BASELINE && depth <= PAINT_DEPTH && lateral.abs() <= PAINT_HALF_WIDTH
}

pub fn clamp_to_court(p: Point) -> Point {
    clamp_point(p, (0.0, 0.0), (COURT_LENGTH, COURT_WIDTH))
}

/// Baseline spot behind the team's own basket, used for inbounds.
pub fn inbound_spot(team: usize) -> Point {
    let x = if attack_dir(team) > 0.0 { 0.0 } else { COURT_LENGTH };
    (x, COURT_WIDTH / 2.0 + 6.0)
}

/// Free-throw line spot for `team`'s offense.
pub fn free_throw_spot(team: usize) -> Point {
    relative_to_basket(team, FREE_THROW_DEPTH, 0.0)
}

/// Nine named half-court spacing positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum CourtSlot {
    Top,
    LeftWing,
    RightWing,
    LeftCorner,
    RightCorner,
    LeftElbow,
    RightElbow,
    LeftBlock,
    RightBlock,
}

impl CourtSlot {
    pub const ALL: [CourtSlot; 9] = [
        CourtSlot::Top,
        CourtSlot::LeftWing,
        CourtSlot::RightWing,
        CourtSlot::LeftCorner,
        CourtSlot::RightCorner,
        CourtSlot::LeftElbow,
        CourtSlot::RightElbow,
        CourtSlot::LeftBlock,
        CourtSlot::RightBlock,
    ];

    /// (depth, lateral) relative to the attacking basket.
    pub fn offset(&self) -> (f32, f32) {
        match self {
            CourtSlot::Top => (25.0, 0.0),
            CourtSlot::LeftWing => (18.0, -18.0),
            CourtSlot::RightWing => (18.0, 18.0),
            CourtSlot::LeftCorner => (1.0, -22.5),
            CourtSlot::RightCorner => (1.0, 22.5),
            CourtSlot::LeftElbow => (13.75, -8.0),
            CourtSlot::RightElbow => (13.75, 8.0),
            CourtSlot::LeftBlock => (2.5, -6.5),
            CourtSlot::RightBlock => (2.5, 6.5),
        }
    }

    pub fn position(&self, team: usize) -> Point {
        let (depth, lateral) = self.offset();
        relative_to_basket(team, depth, lateral)
    }

    pub fn is_interior(&self) -> bool {
        matches!(
            self,
            CourtSlot::LeftElbow | CourtSlot::RightElbow | CourtSlot::LeftBlock | CourtSlot::RightBlock
        )
    }

    /// -1 left, 0 middle, +1 right (offense's view).
    pub fn side(&self) -> f32 {
        let (_, lateral) = self.offset();
        if lateral.abs() < 0.01 {
            0.0
        } else {
            lateral.signum()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_baskets_are_mirrored() {
        assert_eq!(attack_basket(0), (88.75, 25.0));
        assert_eq!(attack_basket(1), (5.25, 25.0));
        assert_eq!(own_basket(0), attack_basket(1));
    }

    #[test]
    fn test_relative_round_trip() {
        for team in 0..2 {
            let p = relative_to_basket(team, 12.0, -4.0);
            let (d, l) = basket_relative(team, p);
            assert!((d - 12.0).abs() < 1e-4);
            assert!((l + 4.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_three_point_zones() {
        // Top of the key at 25 ft is a three, 20 ft is not.
        assert!(is_three_point(0, relative_to_basket(0, 25.0, 0.0)));
        assert!(!is_three_point(0, relative_to_basket(0, 20.0, 0.0)));
        // Corner at 22.5 lateral counts even though closer than 23.75.
        assert!(is_three_point(1, CourtSlot::LeftCorner.position(1)));
        assert!(!is_three_point(0, CourtSlot::LeftBlock.position(0)));
    }

    #[test]
    fn test_slots_inside_court() {
        for team in 0..2 {
            for slot in CourtSlot::ALL {
                let p = slot.position(team);
                assert_eq!(clamp_to_court(p), p, "{:?} out of court", slot);
                assert!(is_frontcourt(team, p));
            }
        }
    }

    #[test]
    fn test_paint_and_interior_slots() {
        assert!(in_paint(0, CourtSlot::LeftBlock.position(0)));
        assert!(!in_paint(0, CourtSlot::Top.position(0)));
        assert!(CourtSlot::RightElbow.is_interior());
        assert!(!CourtSlot::RightCorner.is_interior());
    }

    #[test]
    fn test_inbound_spot_is_behind_own_basket() {
        assert!(!is_frontcourt(0, inbound_spot(0)));
        assert!(!is_frontcourt(1, inbound_spot(1)));
    }
}
