/// Routing of realtime events onto dashboard state, driven the way the
/// event stream drives it: parse, filter, then write slots or log lines.
use claw_common::{LogPayload, TelemetrySample};
use claw_dashboard::display::{on_selection_change, DisplaySlot, DisplayState, PLACEHOLDER};
use claw_dashboard::log_router::{on_log, LogView, Severity};
use claw_dashboard::selection::DeviceSelection;
use claw_dashboard::telemetry::project;

fn sample(id: Option<i64>) -> TelemetrySample {
    TelemetrySample {
        id: id.map(Some),
        motor_angle: 3.14159,
        motor_speed: 120.0,
        motor_iq: -0.456,
        motor_temp: 72.6,
        claw_angle: 45.0,
        finger_0_pose: vec![1.005, -2.0],
        finger_0_force: vec![0.1, 0.2, 0.3],
        finger_1_pose: vec![0.0],
        finger_1_force: vec![],
        magiclaw_pose: vec![10.0, 20.0, 30.0],
        finger_0_img: Some("data:image/jpeg;base64,AAAA".to_string()),
        finger_1_img: None,
    }
}

fn render(display: &mut DisplayState, sample: &TelemetrySample, selection: &DeviceSelection, now_ms: u64) -> bool {
    match project(sample, selection, now_ms) {
        Some(frame) => {
            display.apply(&frame);
            true
        }
        None => false,
    }
}

#[test]
fn test_sample_for_other_claw_changes_nothing() {
    let selection = DeviceSelection::from_controls("2", "auto");
    let mut display = DisplayState::default();
    let before = display.clone();

    assert!(!render(&mut display, &sample(Some(3)), &selection, 1));
    assert_eq!(display, before);
}

#[test]
fn test_sample_for_selected_claw_renders() {
    let selection = DeviceSelection::from_controls("2", "auto");
    let mut display = DisplayState::default();

    assert!(render(&mut display, &sample(Some(2)), &selection, 1_700_000_000_000));
    assert_eq!(display.get(DisplaySlot::MotorAngle).as_str(), "3.14");
    assert_eq!(display.get(DisplaySlot::MotorSpeed).as_str(), "120.00");
    assert_eq!(display.get(DisplaySlot::MotorIq).as_str(), "-0.46");
    assert_eq!(display.get(DisplaySlot::MotorTemp).as_str(), "72.6");
    assert_eq!(display.get(DisplaySlot::ClawAngle).as_str(), "45.00");
    assert_eq!(
        display.get(DisplaySlot::Finger0Pose).as_str(),
        "<span class=\"fixed-num\">1.01</span>,<span class=\"fixed-num\">-2.00</span>"
    );
    assert!(display.get(DisplaySlot::Finger0Pose).is_markup());
    assert!(!display.get(DisplaySlot::MotorTemp).is_markup());
    assert_eq!(display.get(DisplaySlot::Finger1Force).as_str(), "");
    assert_eq!(display.finger_0_img, "data:image/jpeg;base64,AAAA#1700000000000");
    assert_eq!(display.finger_1_img, "");
}

#[test]
fn test_untagged_sample_updates_on_every_delivery() {
    let selection = DeviceSelection::from_controls("5", "auto");
    let mut display = DisplayState::default();

    let mut first = sample(None);
    first.claw_angle = 10.0;
    assert!(render(&mut display, &first, &selection, 1));
    assert_eq!(display.get(DisplaySlot::ClawAngle).as_str(), "10.00");

    let mut second = sample(None);
    second.claw_angle = 11.5;
    assert!(render(&mut display, &second, &selection, 2));
    assert_eq!(display.get(DisplaySlot::ClawAngle).as_str(), "11.50");
    assert_eq!(display.finger_0_img, "data:image/jpeg;base64,AAAA#2");
}

#[test]
fn test_invalid_selection_suppresses_tagged_telemetry() {
    let selection = DeviceSelection::from_controls("claw", "auto");
    let mut display = DisplayState::default();
    assert!(!render(&mut display, &sample(Some(0)), &selection, 1));
    assert!(render(&mut display, &sample(None), &selection, 1));
}

#[test]
fn test_null_sample_id_only_shows_unfiltered() {
    let mut null_id = sample(None);
    null_id.id = Some(None);

    let mut display = DisplayState::default();
    assert!(!render(&mut display, &null_id, &DeviceSelection::from_controls("2", "auto"), 1));
    assert_eq!(display, DisplayState::default());
    assert!(render(&mut display, &null_id, &DeviceSelection::single_device(), 1));
}

#[test]
fn test_tagged_log_line_follows_selection() {
    let mut view = LogView::default();

    let selected = DeviceSelection::from_controls("2", "auto");
    assert!(on_log(&mut view, LogPayload::from("[id 2] build ok"), &selected));
    assert_eq!(view.lines().last().unwrap().text, "build ok");

    let other = DeviceSelection::from_controls("3", "auto");
    let before = view.len();
    assert!(!on_log(&mut view, LogPayload::from("[id 2] build ok"), &other));
    assert_eq!(view.len(), before);
}

#[test]
fn test_structured_log_filtered_by_id() {
    let mut view = LogView::default();
    let selection = DeviceSelection::from_controls("1", "auto");

    let mine = LogPayload::Structured { id: 1, line: "t - claw - WARNING - hot".to_string() };
    let theirs = LogPayload::Structured { id: 4, line: "t - claw - ERROR - stall".to_string() };
    assert!(on_log(&mut view, mine, &selection));
    assert!(!on_log(&mut view, theirs, &selection));

    assert_eq!(view.len(), 1);
    assert_eq!(view.lines()[0].severity, Severity::Warning);
}

#[test]
fn test_untagged_log_always_appended() {
    let mut view = LogView::default();
    let selection = DeviceSelection::from_controls("nope", "auto");
    assert!(on_log(&mut view, LogPayload::from("<b>not markup</b>"), &selection));
    assert_eq!(view.lines()[0].text, "<b>not markup</b>");
    assert_eq!(view.lines()[0].severity, Severity::Default);
}

#[test]
fn test_single_device_appends_every_tagged_line() {
    let mut view = LogView::default();
    let selection = DeviceSelection::single_device();
    assert!(on_log(&mut view, LogPayload::from("[id 8] hello"), &selection));
    assert!(on_log(&mut view, LogPayload::Structured { id: 9, line: "there".to_string() }, &selection));
    assert!(on_log(&mut view, LogPayload::from("[id 99999999999999999999] hi"), &selection));
    assert_eq!(view.len(), 3);
    assert_eq!(view.lines()[2].text, "hi");
}

#[test]
fn test_selection_change_resets_view() {
    let mut selection = DeviceSelection::from_controls("2", "auto");
    let mut display = DisplayState::default();
    let mut view = LogView::default();

    let mut tagged = sample(Some(2));
    tagged.finger_1_img = Some("data:image/jpeg;base64,BBBB".to_string());
    assert!(render(&mut display, &tagged, &selection, 1));
    on_log(&mut view, LogPayload::from("[id 2] running"), &selection);
    on_log(&mut view, LogPayload::from("plain"), &selection);

    selection = DeviceSelection::from_controls("5", &selection.mode);
    on_selection_change(&mut display, &mut view, "5");

    for slot in DisplaySlot::ALL {
        assert_eq!(display.get(slot).as_str(), PLACEHOLDER);
    }
    assert_eq!(display.finger_0_img, "");
    assert_eq!(display.finger_1_img, "");
    assert_eq!(view.len(), 1);
    assert_eq!(view.lines()[0].text, "[client] Switched to claw ID 5");

    // the previous claw's telemetry no longer renders
    assert!(!render(&mut display, &tagged, &selection, 2));
    assert_eq!(display.get(DisplaySlot::MotorAngle).as_str(), PLACEHOLDER);
}
