//! Property tests for the animated sort drivers.
//!
//! Drivers run with instant playback on a current-thread runtime, drawing
//! into a [`FrameRecorder`] so every visualized step can be inspected.

#![allow(clippy::expect_used)]

use std::future::Future;

use proptest::prelude::*;
use sortrace::engine::{is_non_decreasing, same_multiset, DriverStats};
use sortrace::prelude::*;

fn block_on<F: Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_time()
        .build()
        .expect("runtime should build")
        .block_on(future)
}

#[derive(Clone, Copy)]
enum Driver {
    Quick,
    Merge,
}

struct Outcome {
    data: Vec<u32>,
    frames: FrameRecorder,
    stats: DriverStats,
}

fn run_driver(driver: Driver, input: &[u32]) -> Outcome {
    let token = RunToken::new(1);
    let playback = PlaybackController::instant();
    let mut frames = FrameRecorder::new();
    let mut data = input.to_vec();

    let stats = block_on(async {
        let mut ctx = StepContext::new(&token, &playback, &mut frames);
        let result = match driver {
            Driver::Quick => quick_sort(&mut data, &mut ctx).await,
            Driver::Merge => merge_sort(&mut data, &mut ctx).await,
        };
        assert!(result.is_ok());
        ctx.stats()
    });

    Outcome {
        data,
        frames,
        stats,
    }
}

// ============================================================================
// Worked examples
// ============================================================================

#[test]
fn quick_sort_small_example() {
    let outcome = run_driver(Driver::Quick, &[5, 3, 8, 1]);
    assert_eq!(outcome.data, vec![1, 3, 5, 8]);
    assert_eq!(
        outcome.frames.frames().first().map(|f| f.elements.clone()),
        Some(vec![1, 3, 8, 5])
    );
}

#[test]
fn merge_sort_small_example() {
    let outcome = run_driver(Driver::Merge, &[5, 3, 8, 1]);
    assert_eq!(outcome.data, vec![1, 3, 5, 8]);
    assert_eq!(
        outcome.frames.last().map(|f| f.elements.clone()),
        Some(vec![1, 3, 5, 8])
    );
}

#[test]
fn trivial_inputs_draw_nothing() {
    for driver in [Driver::Quick, Driver::Merge] {
        for input in [&[][..], &[2][..]] {
            let outcome = run_driver(driver, input);
            assert_eq!(outcome.data, input.to_vec());
            assert!(outcome.frames.is_empty());
            assert_eq!(outcome.stats.draws, 0);
        }
    }
}

#[test]
fn merge_sort_keeps_equal_runs() {
    let outcome = run_driver(Driver::Merge, &[4, 4, 4, 4]);
    assert_eq!(outcome.data, vec![4, 4, 4, 4]);
    assert!(outcome
        .frames
        .frames()
        .iter()
        .all(|f| f.elements == vec![4, 4, 4, 4]));
}

// ============================================================================
// Properties
// ============================================================================

proptest! {
    #[test]
    fn quick_sort_sorts_and_permutes(input in prop::collection::vec(0u32..500, 0..64)) {
        let outcome = run_driver(Driver::Quick, &input);
        prop_assert!(is_non_decreasing(&outcome.data));
        prop_assert!(same_multiset(&outcome.data, &input));
    }

    #[test]
    fn merge_sort_sorts_and_permutes(input in prop::collection::vec(0u32..500, 0..64)) {
        let outcome = run_driver(Driver::Merge, &input);
        prop_assert!(is_non_decreasing(&outcome.data));
        prop_assert!(same_multiset(&outcome.data, &input));
    }

    #[test]
    fn quick_sort_frames_are_permutations(input in prop::collection::vec(0u32..50, 0..32)) {
        let outcome = run_driver(Driver::Quick, &input);
        for frame in outcome.frames.frames() {
            prop_assert!(same_multiset(&frame.elements, &input));
            prop_assert!(frame.highlighted.iter().all(|&i| i < input.len()));
        }
    }

    #[test]
    fn merge_sort_frames_stay_in_bounds(input in prop::collection::vec(0u32..50, 0..32)) {
        let outcome = run_driver(Driver::Merge, &input);
        for frame in outcome.frames.frames() {
            prop_assert_eq!(frame.elements.len(), input.len());
            prop_assert!(frame.elements.iter().all(|v| input.contains(v)));
            prop_assert!(frame.highlighted.iter().all(|&i| i < input.len()));
        }
    }

    #[test]
    fn every_write_is_drawn(input in prop::collection::vec(0u32..100, 0..48)) {
        for driver in [Driver::Quick, Driver::Merge] {
            let outcome = run_driver(driver, &input);
            prop_assert_eq!(outcome.stats.draws, outcome.frames.len() as u64);
            prop_assert_eq!(outcome.stats.draws, outcome.stats.writes);
            if let Some(last) = outcome.frames.last() {
                prop_assert_eq!(&last.elements, &outcome.data);
            }
        }
    }
}
