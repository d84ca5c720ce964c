//! End-to-end runs of the exercise against the silent audio output

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use explore_keys::app::{ExerciseHost, Playback};
use explore_keys::audio::assets::{AMBIENT_FILE, BOTTOM_CUE_FILE, MIDDLE_CUE_FILE, TOP_CUE_FILE};
use explore_keys::audio::{SilentOutput, TrackAction};
use explore_keys::config::ExploreConfig;
use explore_keys::exercise::{KeyRow, Phase};
use explore_keys::i18n::Catalog;
use explore_keys::models::{CompletionReason, GameCharacter};
use std::time::Duration;

fn config() -> ExploreConfig {
    ExploreConfig::default()
        .with_narration(false)
        .with_character(GameCharacter::new("Fox"))
}

fn mounted(config: &ExploreConfig) -> (ExerciseHost, Playback, SilentOutput) {
    let silent = SilentOutput::new();
    let mut playback = Playback::new(config, Box::new(silent.clone()));
    let mut host = ExerciseHost::new(config, &Catalog::default());
    host.mount(&mut playback);
    (host, playback, silent)
}

fn press(c: char) -> KeyEvent {
    KeyEvent::new(KeyCode::Char(c), KeyModifiers::NONE)
}

#[tokio::test]
async fn test_mount_starts_ambient_and_loads_cues() {
    let (host, _playback, silent) = mounted(&config());

    assert!(host.is_mounted());
    assert!(host.is_timer_running());
    assert_eq!(
        silent.actions_for(AMBIENT_FILE),
        vec![TrackAction::Opened, TrackAction::Volume(0.1), TrackAction::Played]
    );
    for cue in [TOP_CUE_FILE, MIDDLE_CUE_FILE, BOTTOM_CUE_FILE] {
        assert_eq!(silent.actions_for(cue), vec![TrackAction::Opened]);
    }
}

#[tokio::test]
async fn test_each_row_plays_its_cue() {
    let (mut host, mut playback, silent) = mounted(&config());

    for (key, cue) in [('q', TOP_CUE_FILE), ('a', MIDDLE_CUE_FILE), ('z', BOTTOM_CUE_FILE)] {
        silent.clear();
        host.key_down(&press(key), &mut playback);
        assert_eq!(silent.actions_for(cue).last(), Some(&TrackAction::Played));
    }

    let snapshot = host.take_snapshot().expect("keys change the snapshot");
    assert_eq!(snapshot.keystrokes, 3);
    assert_eq!(snapshot.last_row, Some(KeyRow::Bottom));
}

#[tokio::test]
async fn test_modified_and_unmapped_keys_count_silently() {
    let (mut host, mut playback, silent) = mounted(&config());
    silent.clear();

    host.key_down(
        &KeyEvent::new(KeyCode::Char('a'), KeyModifiers::CONTROL),
        &mut playback,
    );
    host.key_down(&press('5'), &mut playback);
    host.key_down(&KeyEvent::new(KeyCode::Enter, KeyModifiers::NONE), &mut playback);

    assert!(!silent
        .events()
        .iter()
        .any(|event| event.action == TrackAction::Played));
    assert_eq!(host.snapshot().keystrokes, 3);
}

#[tokio::test]
async fn test_keystroke_limit_completes_the_exercise() {
    let (mut host, mut playback, _silent) = mounted(&config());

    for _ in 0..50 {
        host.key_down(&press('f'), &mut playback);
    }
    assert!(!host.is_completed());
    assert!(!host.take_focus_request());

    host.key_down(&press('f'), &mut playback);
    assert!(host.is_completed());
    assert!(host.take_focus_request());
    assert!(!host.is_timer_running());

    let snapshot = host.snapshot();
    assert_eq!(snapshot.phase, Phase::Completed);
    assert_eq!(snapshot.header_text, "Exploration complete");
    assert_eq!(snapshot.intro_text, "Well done! Fox is ready for the next task.");

    let record = host.record().expect("completed exercise has a record");
    assert_eq!(record.keystrokes, 51);
    assert_eq!(record.character, "Fox");
    assert_eq!(record.reason, CompletionReason::KeystrokeLimit);

    // Further keys change nothing
    host.key_down(&press('f'), &mut playback);
    assert_eq!(host.snapshot().keystrokes, 51);
}

#[tokio::test]
async fn test_time_limit_completes_the_exercise() {
    let config = config()
        .with_time_limit(1)
        .with_tick_interval(Duration::from_millis(10));
    let (mut host, mut playback, _silent) = mounted(&config);

    for _ in 0..100 {
        tokio::time::sleep(Duration::from_millis(10)).await;
        host.pump(&mut playback);
        if host.is_completed() {
            break;
        }
    }

    assert!(host.is_completed());
    let record = host.record().unwrap();
    assert_eq!(record.elapsed_seconds, 2);
    assert_eq!(record.reason, CompletionReason::TimeLimit);

    // The timer is gone; no more time passes
    tokio::time::sleep(Duration::from_millis(50)).await;
    host.pump(&mut playback);
    assert_eq!(host.snapshot().elapsed_seconds, 2);
}

#[tokio::test]
async fn test_unmount_stops_timer_and_sound() {
    let (mut host, mut playback, silent) = mounted(&config());
    host.key_down(&press('q'), &mut playback);
    silent.clear();

    host.unmount(&mut playback);

    assert!(!host.is_mounted());
    assert!(!host.is_timer_running());
    assert_eq!(silent.actions_for(AMBIENT_FILE), vec![TrackAction::Stopped]);
    assert_eq!(silent.actions_for(TOP_CUE_FILE), vec![TrackAction::Stopped]);

    // Keys after leaving are ignored
    host.key_down(&press('q'), &mut playback);
    assert_eq!(host.snapshot().keystrokes, 1);
}

#[tokio::test]
async fn test_remount_starts_a_fresh_session() {
    let config = config();
    let (mut first, mut playback, silent) = mounted(&config);
    for _ in 0..51 {
        first.key_down(&press('j'), &mut playback);
    }
    first.unmount(&mut playback);
    silent.clear();

    let mut second = ExerciseHost::new(&config, &Catalog::default());
    second.mount(&mut playback);

    let snapshot = second.snapshot();
    assert_eq!(snapshot.phase, Phase::InProgress);
    assert_eq!(snapshot.keystrokes, 0);
    assert_eq!(snapshot.header_text, "Explore the keyboard");
    assert_eq!(
        silent.actions_for(AMBIENT_FILE).last(),
        Some(&TrackAction::Played)
    );
}

/// Narration through a shell that needs a moment before writing audio
#[cfg(unix)]
fn slow_narration_config() -> ExploreConfig {
    let mut config = config().with_narration(true);
    config.narration.program = "sh".to_string();
    config.narration.args = vec![
        "-c".to_string(),
        "sleep 0.2; printf RIFF".to_string(),
        "sh".to_string(),
    ];
    config.narration.max_attempts = 1;
    config
}

#[cfg(unix)]
#[tokio::test]
async fn test_intro_narration_plays_while_mounted() {
    let (_host, mut playback, silent) = mounted(&slow_narration_config());

    tokio::time::sleep(Duration::from_millis(600)).await;
    playback.poll_narration();

    assert_eq!(
        silent.actions_for("narration"),
        vec![TrackAction::Opened, TrackAction::Played]
    );
}

#[cfg(unix)]
#[tokio::test]
async fn test_unmount_drops_narration_still_synthesizing() {
    let (mut host, mut playback, silent) = mounted(&slow_narration_config());
    host.unmount(&mut playback);

    tokio::time::sleep(Duration::from_millis(600)).await;
    playback.poll_narration();

    assert!(silent.actions_for("narration").is_empty());
}
