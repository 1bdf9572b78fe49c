//! The 26-play library
//!
//! Actions are listed per step in role order:
//! `[BallHandler, Screener, Cutter, Spacer, PostUp]`.

use once_cell::sync::Lazy;

use super::types::{Play, PlayAction as A, PlayCategory, PlayStep, PositionCondition as C, StepTrigger as T};
use crate::engine::court::CourtSlot as S;
use crate::engine::state::OffensiveRole as R;

fn step(duration: f32, trigger: T, actions: [A; 5]) -> PlayStep {
    PlayStep { actions, duration, trigger }
}

fn play(name: &'static str, category: PlayCategory, steps: Vec<PlayStep>) -> Play {
    Play { name, category, steps }
}

const SCREEN_SET: T = T::Position(Some(C::ScreenSet));
const POST_SEALED: T = T::Position(Some(C::PostSealed));
const CUTTER_ARRIVED: T = T::Position(Some(C::CutterArrived));

static PLAY_LIBRARY: Lazy<Vec<Play>> = Lazy::new(build_library);

/// Every play, in a fixed order (indices are stable play ids).
pub fn library() -> &'static [Play] {
    &PLAY_LIBRARY
}

pub fn play_by_id(id: usize) -> Option<&'static Play> {
    PLAY_LIBRARY.get(id)
}

pub fn play_id_by_name(name: &str) -> Option<usize> {
    PLAY_LIBRARY.iter().position(|p| p.name == name)
}

fn build_library() -> Vec<Play> {
    use PlayCategory::*;
    vec![
        // ========== Pick and roll ==========
        play("High Pick and Roll", PickAndRoll, vec![
            step(2.0, SCREEN_SET, [A::Hold, A::Screen(R::BallHandler), A::MoveTo(S::LeftWing), A::MoveTo(S::RightCorner), A::MoveTo(S::LeftBlock)]),
            step(1.5, T::Time, [A::Drive { side: 1.0 }, A::Roll, A::Relocate, A::Hold, A::Hold]),
            step(1.5, T::Time, [A::ReadAndReact, A::Roll, A::Hold, A::Hold, A::PostUp]),
        ]),
        play("Side Pick and Roll", PickAndRoll, vec![
            step(1.5, T::Time, [A::MoveTo(S::RightWing), A::MoveTo(S::RightElbow), A::MoveTo(S::LeftWing), A::MoveTo(S::LeftCorner), A::MoveTo(S::LeftBlock)]),
            step(2.0, SCREEN_SET, [A::Hold, A::Screen(R::BallHandler), A::Hold, A::Hold, A::Hold]),
            step(2.0, T::Time, [A::Drive { side: -1.0 }, A::Roll, A::Relocate, A::Hold, A::PostUp]),
            step(1.5, T::Time, [A::ReadAndReact, A::Hold, A::Hold, A::Hold, A::Hold]),
        ]),
        play("Spain Pick and Roll", PickAndRoll, vec![
            step(2.0, SCREEN_SET, [A::Hold, A::Screen(R::BallHandler), A::MoveTo(S::LeftElbow), A::MoveTo(S::RightCorner), A::MoveTo(S::LeftCorner)]),
            step(1.2, T::Time, [A::Drive { side: 1.0 }, A::Roll, A::Screen(R::Screener), A::Hold, A::Hold]),
            step(1.5, T::Time, [A::ReadAndReact, A::Roll, A::Pop(S::Top), A::Hold, A::Hold]),
        ]),
        play("Pick and Pop", PickAndRoll, vec![
            step(2.0, SCREEN_SET, [A::Hold, A::Screen(R::BallHandler), A::MoveTo(S::LeftCorner), A::MoveTo(S::RightCorner), A::MoveTo(S::LeftBlock)]),
            step(1.2, T::Time, [A::Drive { side: -1.0 }, A::Pop(S::RightWing), A::Hold, A::Hold, A::PostUp]),
            step(1.5, T::Pass, [A::PassTo(R::Screener), A::Hold, A::Hold, A::Hold, A::Hold]),
            step(1.5, T::Time, [A::Shoot, A::Relocate, A::Hold, A::Hold, A::Hold]),
        ]),
        play("Double Drag", PickAndRoll, vec![
            step(1.5, T::Time, [A::MoveTo(S::Top), A::MoveTo(S::LeftElbow), A::MoveTo(S::RightWing), A::MoveTo(S::RightCorner), A::MoveTo(S::RightElbow)]),
            step(2.0, SCREEN_SET, [A::Hold, A::Screen(R::BallHandler), A::Hold, A::Hold, A::Screen(R::BallHandler)]),
            step(1.5, T::Time, [A::Drive { side: -1.0 }, A::Roll, A::Hold, A::Hold, A::Pop(S::RightWing)]),
            step(1.5, T::Time, [A::ReadAndReact, A::Hold, A::Hold, A::Hold, A::Hold]),
        ]),
        // ========== Motion ==========
        play("Motion Weak", Motion, vec![
            step(1.5, T::Time, [A::MoveTo(S::Top), A::MoveTo(S::LeftElbow), A::MoveTo(S::RightWing), A::MoveTo(S::LeftCorner), A::MoveTo(S::RightBlock)]),
            step(1.5, T::Pass, [A::PassTo(R::Cutter), A::Screen(R::Spacer), A::Hold, A::Cut(S::LeftWing), A::Hold]),
            step(1.5, T::Time, [A::ReadAndReact, A::Relocate, A::Cut(S::LeftBlock), A::Hold, A::PostUp]),
        ]),
        play("Flex", Motion, vec![
            step(1.5, T::Time, [A::MoveTo(S::Top), A::MoveTo(S::LeftBlock), A::MoveTo(S::RightCorner), A::MoveTo(S::LeftWing), A::MoveTo(S::RightElbow)]),
            step(1.5, T::Time, [A::PassTo(R::Spacer), A::Screen(R::Cutter), A::Cut(S::LeftBlock), A::Hold, A::Hold]),
            step(1.5, T::Time, [A::ReadAndReact, A::Relocate, A::Hold, A::Relocate, A::Screen(R::Screener)]),
        ]),
        play("Princeton Chin", Motion, vec![
            step(1.5, T::Time, [A::MoveTo(S::RightWing), A::MoveTo(S::Top), A::MoveTo(S::LeftWing), A::MoveTo(S::LeftCorner), A::MoveTo(S::RightElbow)]),
            step(2.0, T::Pass, [A::PassTo(R::Screener), A::Hold, A::Hold, A::Hold, A::Screen(R::Cutter)]),
            step(1.5, T::Time, [A::ReadAndReact, A::Cut(S::RightBlock), A::Cut(S::LeftBlock), A::Hold, A::Pop(S::RightWing)]),
        ]),
        play("Swing", Motion, vec![
            step(1.2, T::Time, [A::MoveTo(S::Top), A::MoveTo(S::RightElbow), A::MoveTo(S::LeftWing), A::MoveTo(S::RightWing), A::MoveTo(S::LeftBlock)]),
            step(1.5, T::Pass, [A::PassTo(R::Cutter), A::Hold, A::Hold, A::Hold, A::Hold]),
            step(1.5, T::Pass, [A::PassTo(R::Spacer), A::Relocate, A::Relocate, A::Hold, A::Hold]),
            step(1.5, T::Time, [A::Shoot, A::Relocate, A::Relocate, A::Relocate, A::PostUp]),
        ]),
        play("Five Out Motion", Motion, vec![
            step(1.5, T::Time, [A::MoveTo(S::Top), A::MoveTo(S::LeftWing), A::MoveTo(S::RightWing), A::MoveTo(S::LeftCorner), A::MoveTo(S::RightCorner)]),
            step(1.5, T::Pass, [A::PassTo(R::Cutter), A::Hold, A::Hold, A::Hold, A::Hold]),
            step(1.5, T::Time, [A::ReadAndReact, A::Cut(S::RightBlock), A::Relocate, A::Relocate, A::Relocate]),
        ]),
        // ========== Post ==========
        play("Post Entry", Post, vec![
            step(2.0, POST_SEALED, [A::MoveTo(S::LeftWing), A::MoveTo(S::RightElbow), A::MoveTo(S::RightWing), A::MoveTo(S::RightCorner), A::PostUp]),
            step(1.5, T::Pass, [A::EntryPass, A::Hold, A::Hold, A::Hold, A::PostUp]),
            step(2.0, T::Time, [A::ReadAndReact, A::Hold, A::Hold, A::Hold, A::Relocate]),
        ]),
        play("High-Low", Post, vec![
            step(1.5, T::Time, [A::MoveTo(S::LeftWing), A::MoveTo(S::Top), A::MoveTo(S::RightWing), A::MoveTo(S::RightCorner), A::PostUp]),
            step(1.5, T::Pass, [A::PassTo(R::Screener), A::Hold, A::Hold, A::Hold, A::PostUp]),
            step(1.5, T::Pass, [A::EntryPass, A::Relocate, A::Hold, A::Hold, A::PostUp]),
            step(2.0, T::Time, [A::ReadAndReact, A::Relocate, A::Relocate, A::Hold, A::Relocate]),
        ]),
        play("Elbow Post", Post, vec![
            step(1.5, T::Time, [A::MoveTo(S::RightWing), A::MoveTo(S::LeftCorner), A::MoveTo(S::LeftWing), A::MoveTo(S::RightCorner), A::MoveTo(S::RightElbow)]),
            step(1.5, T::Pass, [A::EntryPass, A::Hold, A::Hold, A::Hold, A::Hold]),
            step(2.0, T::Time, [A::ReadAndReact, A::Hold, A::Cut(S::LeftBlock), A::Hold, A::Cut(S::RightBlock)]),
        ]),
        play("Duck In", Post, vec![
            step(2.5, POST_SEALED, [A::MoveTo(S::LeftWing), A::MoveTo(S::RightWing), A::MoveTo(S::RightCorner), A::MoveTo(S::LeftCorner), A::PostUp]),
            step(1.5, T::Pass, [A::EntryPass, A::Relocate, A::Hold, A::Hold, A::PostUp]),
            step(2.0, T::Time, [A::ReadAndReact, A::Hold, A::Hold, A::Hold, A::Relocate]),
        ]),
        // ========== Shooting ==========
        play("Floppy", Shooting, vec![
            step(1.5, T::Time, [A::MoveTo(S::Top), A::MoveTo(S::LeftBlock), A::MoveTo(S::RightBlock), A::MoveTo(S::LeftCorner), A::MoveTo(S::RightElbow)]),
            step(2.0, CUTTER_ARRIVED, [A::Hold, A::Screen(R::Cutter), A::Cut(S::LeftWing), A::Hold, A::Screen(R::Cutter)]),
            step(1.5, T::Pass, [A::PassTo(R::Cutter), A::Hold, A::Hold, A::Hold, A::Hold]),
            step(1.5, T::Time, [A::Shoot, A::Relocate, A::Relocate, A::Hold, A::PostUp]),
        ]),
        play("Pin Down", Shooting, vec![
            step(1.5, T::Time, [A::MoveTo(S::Top), A::MoveTo(S::RightElbow), A::MoveTo(S::RightCorner), A::MoveTo(S::LeftWing), A::MoveTo(S::LeftBlock)]),
            step(1.5, T::Time, [A::Hold, A::Screen(R::Cutter), A::Cut(S::RightWing), A::Hold, A::Hold]),
            step(1.5, T::Pass, [A::PassTo(R::Cutter), A::Roll, A::Hold, A::Hold, A::Hold]),
            step(1.5, T::Time, [A::Shoot, A::Hold, A::Relocate, A::Hold, A::PostUp]),
        ]),
        play("Stagger", Shooting, vec![
            step(1.5, T::Time, [A::MoveTo(S::Top), A::MoveTo(S::LeftElbow), A::MoveTo(S::LeftBlock), A::MoveTo(S::RightWing), A::MoveTo(S::RightBlock)]),
            step(2.0, CUTTER_ARRIVED, [A::Hold, A::Screen(R::Cutter), A::Cut(S::LeftWing), A::Hold, A::Hold]),
            step(1.5, T::Pass, [A::PassTo(R::Cutter), A::Roll, A::Hold, A::Hold, A::Hold]),
            step(1.5, T::Time, [A::Shoot, A::Relocate, A::Relocate, A::Hold, A::PostUp]),
        ]),
        play("Hammer", Shooting, vec![
            step(1.5, T::Time, [A::MoveTo(S::LeftWing), A::MoveTo(S::RightBlock), A::MoveTo(S::RightWing), A::MoveTo(S::RightCorner), A::MoveTo(S::LeftBlock)]),
            step(1.5, T::Time, [A::Drive { side: -1.0 }, A::Screen(R::Spacer), A::Hold, A::Cut(S::RightWing), A::Hold]),
            step(1.2, T::Pass, [A::PassTo(R::Spacer), A::Hold, A::Hold, A::Hold, A::Hold]),
            step(1.5, T::Time, [A::Shoot, A::Hold, A::Relocate, A::Relocate, A::PostUp]),
        ]),
        play("Zipper", Shooting, vec![
            step(1.2, T::Time, [A::MoveTo(S::RightWing), A::MoveTo(S::LeftElbow), A::MoveTo(S::LeftBlock), A::MoveTo(S::RightCorner), A::MoveTo(S::RightBlock)]),
            step(1.8, CUTTER_ARRIVED, [A::Hold, A::Screen(R::Cutter), A::Cut(S::Top), A::Hold, A::Hold]),
            step(1.5, T::Pass, [A::PassTo(R::Cutter), A::Pop(S::LeftWing), A::Hold, A::Hold, A::Hold]),
            step(1.5, T::Time, [A::Shoot, A::Hold, A::Relocate, A::Hold, A::PostUp]),
        ]),
        // ========== Transition ==========
        play("Early Drag", Transition, vec![
            step(1.2, T::Time, [A::MoveTo(S::Top), A::Screen(R::BallHandler), A::Cut(S::LeftCorner), A::Cut(S::RightCorner), A::Cut(S::RightBlock)]),
            step(1.5, T::Time, [A::Drive { side: 1.0 }, A::Roll, A::Hold, A::Hold, A::PostUp]),
            step(1.0, T::Time, [A::ReadAndReact, A::Hold, A::Hold, A::Hold, A::Hold]),
        ]),
        play("Wing Sprint", Transition, vec![
            step(1.2, T::Time, [A::Drive { side: 0.0 }, A::MoveTo(S::Top), A::Cut(S::LeftBlock), A::Cut(S::RightCorner), A::Cut(S::RightBlock)]),
            step(1.0, T::Time, [A::ReadAndReact, A::Hold, A::Hold, A::Hold, A::PostUp]),
        ]),
        play("Secondary Break", Transition, vec![
            step(1.5, T::Time, [A::MoveTo(S::Top), A::Cut(S::LeftBlock), A::Cut(S::LeftWing), A::Cut(S::RightWing), A::Cut(S::RightBlock)]),
            step(1.2, T::Pass, [A::PassTo(R::Spacer), A::Hold, A::Hold, A::Hold, A::PostUp]),
            step(1.2, T::Time, [A::Shoot, A::Relocate, A::Hold, A::Hold, A::PostUp]),
        ]),
        // ========== Isolation ==========
        play("Clear Out", Isolation, vec![
            step(1.5, T::Time, [A::MoveTo(S::Top), A::MoveTo(S::LeftCorner), A::MoveTo(S::RightCorner), A::MoveTo(S::LeftWing), A::MoveTo(S::RightWing)]),
            step(2.5, T::Time, [A::Drive { side: 1.0 }, A::Hold, A::Hold, A::Hold, A::Hold]),
            step(1.5, T::Time, [A::ReadAndReact, A::CallForBall, A::Hold, A::Hold, A::Hold]),
        ]),
        play("Elbow Iso", Isolation, vec![
            step(1.5, T::Time, [A::MoveTo(S::RightElbow), A::MoveTo(S::LeftCorner), A::MoveTo(S::LeftWing), A::MoveTo(S::RightCorner), A::MoveTo(S::LeftBlock)]),
            step(2.0, T::Time, [A::ReadAndReact, A::Hold, A::CallForBall, A::Hold, A::Hold]),
        ]),
        play("Wing Iso", Isolation, vec![
            step(1.5, T::Time, [A::MoveTo(S::LeftWing), A::MoveTo(S::RightElbow), A::MoveTo(S::RightWing), A::MoveTo(S::RightCorner), A::MoveTo(S::RightBlock)]),
            step(2.0, T::Time, [A::Drive { side: -1.0 }, A::Hold, A::Hold, A::Hold, A::Hold]),
            step(1.5, T::Time, [A::ReadAndReact, A::Hold, A::Hold, A::CallForBall, A::Hold]),
        ]),
        play("Post Iso", Isolation, vec![
            step(2.5, POST_SEALED, [A::MoveTo(S::RightWing), A::MoveTo(S::LeftCorner), A::MoveTo(S::LeftWing), A::MoveTo(S::RightCorner), A::PostUp]),
            step(1.5, T::Pass, [A::EntryPass, A::Relocate, A::Hold, A::Hold, A::PostUp]),
            step(2.5, T::Time, [A::ReadAndReact, A::Hold, A::Hold, A::Hold, A::Relocate]),
        ]),
    ]
}
