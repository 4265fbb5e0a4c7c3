//! Integration tests for TUI module.
//!
//! These tests drive the app the way the binary does: keys in, spawned runs
//! streaming frames back over a channel.

use std::time::Duration;

use crossterm::event::KeyCode;
use tokio::sync::mpsc;

use super::sort_app::{spawn_run, AppEvent, AppStatus, KeyAction, SortApp};
use crate::config::VizConfig;
use crate::engine::{is_non_decreasing, same_multiset, Lane, Orchestrator, PlaybackController};

fn drain(app: &mut SortApp, rx: &mut mpsc::UnboundedReceiver<AppEvent>) -> usize {
    let mut applied = 0;
    while let Ok(event) = rx.try_recv() {
        app.apply(event);
        applied += 1;
    }
    applied
}

fn launch(app: &mut SortApp) -> crate::engine::SortRun {
    match app.handle_key(KeyCode::Char('s')) {
        KeyAction::Launch(run) => run,
        KeyAction::None => panic!("sort key should launch a run"),
    }
}

#[tokio::test]
async fn test_sort_app_lifecycle() {
    let config = VizConfig::builder().size(16).seed(7).build();
    let orchestrator = Orchestrator::new(&config).with_playback(PlaybackController::instant());
    let mut app = SortApp::with_orchestrator(orchestrator, config.dataset.max_value);
    let input = app.quick.elements.clone();
    let (tx, mut rx) = mpsc::unbounded_channel();

    // Initial state
    assert_eq!(app.status(), AppStatus::Ready);

    let handle = spawn_run(launch(&mut app), tx);
    handle.await.expect("run task should not panic");
    assert!(drain(&mut app, &mut rx) > 0);

    // Both lanes end sorted and the orchestrator keeps the result
    assert_eq!(app.status(), AppStatus::Sorted);
    assert!(is_non_decreasing(&app.quick.elements));
    assert!(is_non_decreasing(&app.merge.elements));
    assert!(same_multiset(&app.quick.elements, &input));
    assert!(same_multiset(&app.merge.elements, &input));
    assert_eq!(app.orchestrator.dataset(Lane::Quick), app.quick.elements.as_slice());
    assert!(app.quick.highlighted.is_empty());
    assert!(app.merge.steps > 0);

    // Quit
    app.handle_key(KeyCode::Char('q'));
    assert!(app.should_quit());
}

#[tokio::test(start_paused = true)]
async fn test_randomize_mid_run_drops_stale_frames() {
    let config = VizConfig::builder().size(30).seed(11).build();
    let mut app = SortApp::new(&config);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let run = launch(&mut app);
    let token = run.token().clone();
    let handle = spawn_run(run, tx);

    tokio::time::sleep(Duration::from_millis(350)).await;
    app.randomize();
    let shown = (app.quick.elements.clone(), app.merge.elements.clone());

    handle.await.expect("run task should not panic");
    assert!(token.is_cancelled());

    drain(&mut app, &mut rx);
    assert_eq!((app.quick.elements.clone(), app.merge.elements.clone()), shown);
    assert_eq!(app.status(), AppStatus::Ready);
    assert!(app.last_report.is_none());

    // A new run is accepted straight away
    assert!(matches!(
        app.handle_key(KeyCode::Enter),
        KeyAction::Launch(_)
    ));
}

#[tokio::test(start_paused = true)]
async fn test_pause_holds_run_until_resumed() {
    let config = VizConfig::builder().size(8).seed(3).build();
    let mut app = SortApp::new(&config);
    let (tx, mut rx) = mpsc::unbounded_channel();

    app.handle_key(KeyCode::Char(' '));
    let handle = spawn_run(launch(&mut app), tx);
    assert_eq!(app.status(), AppStatus::Paused);

    tokio::time::sleep(Duration::from_secs(5)).await;
    drain(&mut app, &mut rx);
    // Each lane may draw its first step before the paused delay holds it.
    assert!(app.quick.steps <= 1);
    assert!(app.merge.steps <= 1);

    app.handle_key(KeyCode::Char(' '));
    handle.await.expect("run task should not panic");
    drain(&mut app, &mut rx);
    assert_eq!(app.status(), AppStatus::Sorted);
}

#[tokio::test(start_paused = true)]
async fn test_quit_cancels_running_sort() {
    let config = VizConfig::builder().size(20).seed(5).build();
    let mut app = SortApp::new(&config);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let handle = spawn_run(launch(&mut app), tx);
    tokio::time::sleep(Duration::from_millis(250)).await;
    app.handle_key(KeyCode::Esc);
    assert!(app.should_quit());

    handle.await.expect("run task should not panic");
    let mut finished = None;
    while let Ok(event) = rx.try_recv() {
        if let AppEvent::Finished(report) = event {
            finished = Some(report);
        }
    }
    let report = finished.expect("run should report when cancelled");
    assert!(report.is_cancelled());
}

#[tokio::test(start_paused = true)]
async fn test_randomize_while_paused_releases_held_run() {
    let config = VizConfig::builder().size(10).seed(17).build();
    let mut app = SortApp::new(&config);
    let (tx, mut rx) = mpsc::unbounded_channel();

    let handle = spawn_run(launch(&mut app), tx.clone());
    tokio::time::sleep(Duration::from_millis(250)).await;
    app.handle_key(KeyCode::Char(' '));
    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(app.status(), AppStatus::Paused);

    app.handle_key(KeyCode::Char('r'));
    let released_at = tokio::time::Instant::now();
    handle.await.expect("run task should not panic");
    assert!(released_at.elapsed() < Duration::from_millis(100));

    let mut held = None;
    while let Ok(event) = rx.try_recv() {
        if let AppEvent::Finished(report) = event {
            held = Some(report);
        }
    }
    let held = held.expect("held run should report");
    assert!(held.is_cancelled());
    assert!(app.orchestrator.is_paused());
    assert_eq!(app.status(), AppStatus::Ready);

    // Still paused, yet a new run is accepted and finishes once resumed.
    let handle = spawn_run(launch(&mut app), tx);
    assert_eq!(app.status(), AppStatus::Paused);
    app.handle_key(KeyCode::Char(' '));
    handle.await.expect("run task should not panic");
    drain(&mut app, &mut rx);
    assert_eq!(app.status(), AppStatus::Sorted);
}
