//! Ball flight integration
//!
//! Builds parametrized flights for passes, shots, free throws and the tip-off
//! toss, and advances flight/bounce progress once per tick. What happens on
//! arrival is decided by the outcome resolvers.

use super::court::RIM_HEIGHT;
use super::geometry::{distance, Point};
use super::state::{Ball, BallFlight, BallState, FlightKind, PassType, ShotFlight, ShotType};

/// Result of one integration step.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FlightProgress {
    /// Carried or dead ball.
    Idle,
    Airborne,
    /// Flight finished this tick; the ball is now dead at the landing point
    /// until a resolver hands it to someone.
    Landed(BallFlight),
    Bouncing,
    /// Bounce finished; the ball rests at the landing spot.
    Loose(Point),
}

/// Advance any flight or bounce by `dt` seconds.
pub fn advance(ball: &mut Ball, dt: f32) -> FlightProgress {
    match &mut ball.state {
        BallState::Flight(flight) => {
            flight.progress = (flight.progress + dt / flight.duration).min(1.0);
            let (pos, height) = flight.sample(flight.progress);
            let landed = *flight;
            ball.pos = pos;
            ball.height = height;
            if landed.is_complete() {
                ball.state = BallState::Dead;
                FlightProgress::Landed(landed)
            } else {
                FlightProgress::Airborne
            }
        }
        BallState::Bounce(bounce) => {
            bounce.progress = (bounce.progress + dt / bounce.duration.max(0.05)).min(1.0);
            ball.pos = bounce.position_at(bounce.progress);
            ball.height = bounce.height_at(bounce.progress);
            if bounce.is_complete() {
                FlightProgress::Loose(bounce.to)
            } else {
                FlightProgress::Bouncing
            }
        }
        BallState::Carried(_) | BallState::Dead => FlightProgress::Idle,
    }
}

pub fn pass_flight(from: Point, to: Point, pass_type: PassType, passer: usize, target: usize, alley_oop: bool) -> BallFlight {
    let dist = distance(from, to);
    let mut heights = pass_type.arc();
    if alley_oop {
        heights = (6.5, 13.5, RIM_HEIGHT + 1.0);
    }
    let duration = (dist / pass_type.speed()).max(0.15);
    let mut flight = BallFlight::new(
        from,
        to,
        heights,
        duration,
        FlightKind::Pass { passer, target, pass_type, alley_oop },
    );
    if pass_type == PassType::Bounce {
        flight.floor_touch = Some(0.6);
    }
    flight
}

/// Shot duration grows with distance; dunks are near-instant.
pub fn shot_duration(shot_type: ShotType, dist: f32) -> f32 {
    match shot_type {
        ShotType::Dunk => 0.3,
        _ => 0.45 + dist * 0.025,
    }
}

pub fn shot_flight(from: Point, basket: Point, shot: ShotFlight) -> BallFlight {
    let dist = distance(from, basket);
    let (release, peak) = shot.shot_type.arc();
    BallFlight::new(
        from,
        basket,
        (release, peak, RIM_HEIGHT),
        shot_duration(shot.shot_type, dist),
        FlightKind::Shot(shot),
    )
}

pub fn free_throw_flight(from: Point, basket: Point, shooter: usize, made: bool) -> BallFlight {
    BallFlight::new(from, basket, (7.5, 14.0, RIM_HEIGHT), 0.9, FlightKind::FreeThrow { shooter, made })
}

/// Referee toss straight up at `spot`, finishing at tap height.
pub fn jump_ball_flight(spot: Point, jumpers: [usize; 2]) -> BallFlight {
    BallFlight::new(spot, spot, (5.0, 14.0, 10.5), 0.8, FlightKind::JumpBall { jumpers })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::state::BallBounce;
    use crate::engine::timestep::DT;

    #[test]
    fn test_flight_lands_after_duration() {
        let mut ball = Ball::dead_at((10.0, 10.0));
        let flight = pass_flight((10.0, 10.0), (30.0, 10.0), PassType::Chest, 0, 1, false);
        let ticks = (flight.duration / DT).ceil() as usize;
        ball.state = BallState::Flight(flight);
        let mut landed = None;
        for _ in 0..ticks + 1 {
            if let FlightProgress::Landed(f) = advance(&mut ball, DT) {
                landed = Some(f);
                break;
            }
        }
        let f = landed.expect("flight should land");
        assert!(matches!(f.kind, FlightKind::Pass { target: 1, .. }));
        assert!(matches!(ball.state, BallState::Dead));
        assert!((ball.pos.0 - 30.0).abs() < 1e-3);
    }

    #[test]
    fn test_shot_duration_positive() {
        assert!(shot_duration(ShotType::Layup, 2.0) > 0.0);
        assert_eq!(shot_duration(ShotType::Dunk, 1.0), 0.3);
        assert!(shot_duration(ShotType::Three, 25.0) > shot_duration(ShotType::MidRange, 15.0));
    }

    #[test]
    fn test_bounce_pass_profile() {
        let f = pass_flight((0.0, 0.0), (14.0, 0.0), PassType::Bounce, 0, 1, false);
        assert_eq!(f.floor_touch, Some(0.6));
    }

    #[test]
    fn test_bounce_becomes_loose() {
        let mut ball = Ball::dead_at((0.0, 0.0));
        ball.state = BallState::Bounce(BallBounce {
            from: (0.0, 0.0),
            to: (5.0, 3.0),
            progress: 0.0,
            duration: 0.1,
            amplitude: 3.0,
        });
        let mut result = FlightProgress::Idle;
        for _ in 0..10 {
            result = advance(&mut ball, DT);
            if matches!(result, FlightProgress::Loose(_)) {
                break;
            }
        }
        assert_eq!(result, FlightProgress::Loose((5.0, 3.0)));
    }

    #[test]
    fn test_carried_ball_is_idle() {
        let mut ball = Ball { pos: (1.0, 1.0), height: 4.0, state: BallState::Carried(2) };
        assert_eq!(advance(&mut ball, DT), FlightProgress::Idle);
    }
}
