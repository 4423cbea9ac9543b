//! Integration tests: schedule file → parser → engine → controls.

use std::io::Write;

use sandman::control::{Action, Direction};
use sandman::scheduler::{ScheduleCues, ScheduleEngine, ScheduleEntry, load_schedule};

use super::mock_hw::{ControlCall, ManualClock, MockControls, RecordingSounds};
use sandman::app::ports::TimePort;

const MESSY_SCHEDULE: &str = "\
# Nightly routine
0, elev, up
start of timeline
5, back, up
# raise the legs later
3, legs, sideways
10, legs, down
end
1, back, down
";

fn cues() -> ScheduleCues {
    ScheduleCues {
        start: "start.wav".into(),
        stop: "stop.wav".into(),
    }
}

fn write_schedule(text: &str) -> tempfile::NamedTempFile {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    file.write_all(text.as_bytes()).unwrap();
    file
}

#[test]
fn messy_file_yields_only_valid_bracketed_entries() {
    let file = write_schedule(MESSY_SCHEDULE);
    let entries = load_schedule(file.path()).unwrap();
    assert_eq!(
        entries,
        vec![
            ScheduleEntry::new(5, "back", Direction::Up),
            ScheduleEntry::new(10, "legs", Direction::Down),
        ]
    );
}

#[test]
fn timeline_repeats_over_two_full_cycles() {
    let file = write_schedule(MESSY_SCHEDULE);
    let mut engine = ScheduleEngine::new(cues());
    engine.load(file.path()).unwrap();

    let clock = ManualClock::new();
    let mut controls = MockControls::bed();
    let mut sounds = RecordingSounds::default();
    engine.start(clock.now_ms(), &mut sounds);

    // Tick every 250 ms for two full cycles (2 × 15 s).
    while clock.now_ms() < 30_000 {
        clock.advance(250);
        engine.process(clock.now_ms(), &mut controls);
    }

    let one_cycle = vec![
        ControlCall::timed("back", Action::MoveUp),
        ControlCall::timed("legs", Action::MoveDown),
    ];
    let expected: Vec<_> = one_cycle.iter().chain(one_cycle.iter()).cloned().collect();
    assert_eq!(controls.calls(), expected);
    assert_eq!(engine.cursor(), Some(0));
}

#[test]
fn slow_caller_falls_behind_instead_of_skipping() {
    let file = write_schedule("start\n1, back, up\n1, legs, up\n1, elev, up\nend\n");
    let mut engine = ScheduleEngine::new(cues());
    engine.load(file.path()).unwrap();

    let clock = ManualClock::new();
    let mut controls = MockControls::bed();
    engine.start(0, &mut RecordingSounds::default());

    // One call ten seconds late fires exactly one entry.
    clock.set(10_000);
    engine.process(clock.now_ms(), &mut controls);
    assert_eq!(controls.calls().len(), 1);
    assert_eq!(engine.cursor(), Some(1));

    // Repeating the same instant does nothing more: the phase restarted.
    engine.process(clock.now_ms(), &mut controls);
    assert_eq!(controls.calls().len(), 1);
}

#[test]
fn stop_freezes_the_timeline() {
    let file = write_schedule(MESSY_SCHEDULE);
    let mut engine = ScheduleEngine::new(cues());
    engine.load(file.path()).unwrap();

    let clock = ManualClock::new();
    let mut controls = MockControls::bed();
    let mut sounds = RecordingSounds::default();

    engine.start(0, &mut sounds);
    clock.set(5_000);
    engine.process(clock.now_ms(), &mut controls);
    assert_eq!(controls.calls().len(), 1);

    engine.stop(&mut sounds);
    controls.clear();
    for _ in 0..50 {
        clock.advance(60_000);
        engine.process(clock.now_ms(), &mut controls);
    }

    assert!(controls.calls().is_empty());
    assert_eq!(engine.cursor(), None);
    assert_eq!(sounds.cues, vec!["start.wav", "stop.wav"]);
}

#[test]
fn unknown_control_in_schedule_does_not_stall_it() {
    let file = write_schedule("start\n1, headrest, up\n1, back, down\nend\n");
    let mut engine = ScheduleEngine::new(cues());
    engine.load(file.path()).unwrap();

    let mut controls = MockControls::bed();
    engine.start(0, &mut RecordingSounds::default());

    engine.process(1_000, &mut controls);
    engine.process(2_000, &mut controls);

    assert_eq!(
        controls.calls(),
        vec![ControlCall::timed("back", Action::MoveDown)]
    );
    assert_eq!(engine.cursor(), Some(0));
}
