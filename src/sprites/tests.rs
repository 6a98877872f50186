//! Sprites domain: tests for the animation clock.

use super::AnimationClock;
use crate::textures::{AnimationFrame, FrameState};

fn frames(states: &[(i32, u32, FrameState)]) -> Vec<AnimationFrame> {
    states
        .iter()
        .map(|&(frame, duration, state)| AnimationFrame {
            frame,
            duration,
            state,
        })
        .collect()
}

#[test]
fn test_start_uses_first_frame() {
    let frames = frames(&[(4, 150, FrameState::Any), (5, 300, FrameState::Any)]);
    let clock = AnimationClock::start(&frames).unwrap();

    assert_eq!(clock.current_frame, 4);
    assert_eq!(clock.frame_index, 0);
    assert_eq!(clock.frame_duration_ms, 150);
    assert_eq!(clock.elapsed_ms, 0);
    assert!(AnimationClock::start(&[]).is_none());
}

#[test]
fn test_advance_resets_elapsed_without_carry_over() {
    let frames = frames(&[(0, 200, FrameState::Any), (1, 200, FrameState::Any)]);
    let mut clock = AnimationClock::start(&frames).unwrap();

    assert!(clock.tick(&frames, 250, false));
    assert_eq!(clock.current_frame, 1);
    assert_eq!(clock.frame_index, 1);
    assert_eq!(clock.elapsed_ms, 0);
}

#[test]
fn test_tick_accumulates_until_duration() {
    let frames = frames(&[(0, 200, FrameState::Any), (1, 200, FrameState::Any)]);
    let mut clock = AnimationClock::start(&frames).unwrap();

    assert!(!clock.tick(&frames, 120, false));
    assert!(!clock.tick(&frames, 79, false));
    assert_eq!(clock.elapsed_ms, 199);
    assert!(clock.tick(&frames, 1, false));
    assert_eq!(clock.current_frame, 1);
}

#[test]
fn test_wraps_to_first_frame() {
    let frames = frames(&[(0, 100, FrameState::Any), (1, 100, FrameState::Any)]);
    let mut clock = AnimationClock::start(&frames).unwrap();

    clock.tick(&frames, 100, false);
    clock.tick(&frames, 100, false);
    assert_eq!(clock.current_frame, 0);
    assert_eq!(clock.frame_index, 0);
}

#[test]
fn test_invalid_frame_advances_immediately() {
    let frames = frames(&[
        (0, 500, FrameState::Idle),
        (1, 100, FrameState::Active),
        (2, 100, FrameState::Active),
    ]);
    let mut clock = AnimationClock::start(&frames).unwrap();

    // The machine starts working: the idle frame is skipped at once.
    assert!(clock.tick(&frames, 1, true));
    assert_eq!(clock.current_frame, 1);

    assert!(clock.tick(&frames, 100, true));
    assert_eq!(clock.current_frame, 2);

    // Wrapping skips the idle frame while active.
    assert!(clock.tick(&frames, 100, true));
    assert_eq!(clock.current_frame, 1);

    // Going idle jumps back to the idle frame.
    assert!(clock.tick(&frames, 1, false));
    assert_eq!(clock.current_frame, 0);
    assert_eq!(clock.frame_duration_ms, 500);
}
