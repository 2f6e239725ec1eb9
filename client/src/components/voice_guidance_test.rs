use super::*;

#[test]
fn start_speaks_first_line_and_reports_step() {
    let mut playback = Playback::new(3);
    assert_eq!(playback.status(), None);
    assert_eq!(playback.start(), Some(0));
    assert!(playback.is_playing());
    assert_eq!(playback.status().as_deref(), Some("Step 1 of 3"));
}

#[test]
fn finished_lines_advance_until_the_end() {
    let mut playback = Playback::new(2);
    playback.start();
    let run = playback.run();

    assert_eq!(playback.finished(run, 0), Some(1));
    assert_eq!(playback.status().as_deref(), Some("Step 2 of 2"));
    assert_eq!(playback.finished(run, 1), None);
    assert!(!playback.is_playing());
}

#[test]
fn stop_makes_pending_callbacks_stale() {
    let mut playback = Playback::new(3);
    playback.start();
    let old_run = playback.run();
    playback.stop();

    assert_eq!(playback.finished(old_run, 0), None);
    assert!(!playback.is_playing());

    // Restarting does not revive the old run either.
    playback.start();
    assert_eq!(playback.finished(old_run, 0), None);
    assert_eq!(playback.status().as_deref(), Some("Step 1 of 3"));
}

#[test]
fn nothing_to_speak_never_plays() {
    let mut playback = Playback::new(0);
    assert_eq!(playback.start(), None);
    assert!(!playback.is_playing());
}
