//! Log routing: parse `log` events once, filter them by the selected claw,
//! and keep the classified lines shown in the log panel.

use std::sync::LazyLock;

use claw_common::LogPayload;
use regex::Regex;
use crate::selection::DeviceSelection;

/// Lines kept in the log panel; older lines are dropped first.
pub const MAX_LOG_LINES: usize = 1000;

/// `[id N] text` prefix used by producers that multiplex several claws onto
/// plain-string log lines. Only ASCII digits form a tag.
static TAGGED_LINE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\[id ([0-9]+)\] (.*)$").expect("tagged log regex is valid"));

/// A `log` event after shape dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LogEvent {
    /// `{id, line}` object
    Structured { id: i64, line: String },
    /// Bare string with an `[id N] ` prefix. `id` is `None` when the digit
    /// run does not fit an `i64`; such a line only shows on single-device
    /// dashboards.
    Tagged { id: Option<i64>, text: String },
    /// Bare string without a tag, device-agnostic
    Plain(String),
}

impl LogEvent {
    pub fn parse(payload: LogPayload) -> Self {
        match payload {
            LogPayload::Structured { id, line } => LogEvent::Structured { id, line },
            LogPayload::Text(text) => match TAGGED_LINE.captures(&text) {
                Some(caps) => LogEvent::Tagged {
                    id: caps[1].parse().ok(),
                    text: caps[2].to_string(),
                },
                None => LogEvent::Plain(text),
            },
        }
    }

    /// Line to append for this event under `selection`, or `None` when the
    /// event belongs to another claw.
    pub fn route(self, selection: &DeviceSelection) -> Option<String> {
        match self {
            LogEvent::Structured { id, line } => selection.admits(id).then_some(line),
            LogEvent::Tagged { id: Some(id), text } => selection.admits(id).then_some(text),
            LogEvent::Tagged { id: None, text } => selection.admits_any().then_some(text),
            LogEvent::Plain(text) => Some(text),
        }
    }
}

/// Severity of a log line, taken from the Python logging format
/// `<time> - <name> - LEVEL - <message>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    Info,
    Warning,
    Error,
    Default,
}

impl Severity {
    /// Markers are checked in this order; the first one found wins.
    const MARKERS: [(&'static str, Severity); 3] = [
        (" - INFO - ", Severity::Info),
        (" - WARNING - ", Severity::Warning),
        (" - ERROR - ", Severity::Error),
    ];

    pub fn classify(line: &str) -> Self {
        Self::MARKERS
            .iter()
            .find(|(marker, _)| line.contains(marker))
            .map(|(_, severity)| *severity)
            .unwrap_or(Severity::Default)
    }

    pub fn css_class(self) -> &'static str {
        match self {
            Severity::Info => "text-green-500",
            Severity::Warning => "text-yellow-400",
            Severity::Error => "text-red-600 font-bold",
            Severity::Default => "text-white",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogLine {
    /// Unique within a view for its whole lifetime, clears included
    pub seq: u64,
    pub text: String,
    pub severity: Severity,
}

/// Append-only log sink, cleared only on view reset.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct LogView {
    lines: Vec<LogLine>,
    next_seq: u64,
}

impl LogView {
    /// Append a line at the end, classifying its severity.
    pub fn append(&mut self, text: impl Into<String>) {
        let text = text.into();
        let severity = Severity::classify(&text);
        self.lines.push(LogLine { seq: self.next_seq, text, severity });
        self.next_seq += 1;
        if self.lines.len() > MAX_LOG_LINES {
            let excess = self.lines.len() - MAX_LOG_LINES;
            self.lines.drain(..excess);
        }
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[LogLine] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}

/// Route one inbound `log` payload into `view`. Returns whether a line was
/// appended.
pub fn on_log(view: &mut LogView, payload: LogPayload, selection: &DeviceSelection) -> bool {
    match LogEvent::parse(payload).route(selection) {
        Some(line) => {
            view.append(line);
            true
        }
        None => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_tagged_string() {
        assert_eq!(
            LogEvent::parse(LogPayload::from("[id 2] build ok")),
            LogEvent::Tagged { id: Some(2), text: "build ok".to_string() }
        );
    }

    #[test]
    fn test_parse_requires_exact_tag_shape() {
        assert_eq!(
            LogEvent::parse(LogPayload::from("[id 2]build ok")),
            LogEvent::Plain("[id 2]build ok".to_string())
        );
        assert_eq!(
            LogEvent::parse(LogPayload::from(" [id 2] build ok")),
            LogEvent::Plain(" [id 2] build ok".to_string())
        );
        assert_eq!(
            LogEvent::parse(LogPayload::from("[id x] build ok")),
            LogEvent::Plain("[id x] build ok".to_string())
        );
    }

    #[test]
    fn test_parse_tag_with_empty_rest() {
        assert_eq!(
            LogEvent::parse(LogPayload::from("[id 4] ")),
            LogEvent::Tagged { id: Some(4), text: String::new() }
        );
    }

    #[test]
    fn test_overflowing_tag_only_shows_unfiltered() {
        let event = LogEvent::parse(LogPayload::from("[id 99999999999999999999] hi"));
        assert_eq!(event, LogEvent::Tagged { id: None, text: "hi".to_string() });
        assert_eq!(event.clone().route(&DeviceSelection::from_controls("2", "auto")), None);
        assert_eq!(event.route(&DeviceSelection::single_device()), Some("hi".to_string()));
    }

    #[test]
    fn test_non_ascii_digits_are_not_a_tag() {
        let line = "[id \u{0662}] calibration done";
        assert_eq!(LogEvent::parse(LogPayload::from(line)), LogEvent::Plain(line.to_string()));

        let mut view = LogView::default();
        assert!(on_log(&mut view, LogPayload::from(line), &DeviceSelection::from_controls("2", "auto")));
        assert_eq!(view.lines()[0].text, line);
    }

    #[test]
    fn test_multiline_string_is_plain() {
        let event = LogEvent::parse(LogPayload::from("[id 1] first\nsecond"));
        assert_eq!(event, LogEvent::Plain("[id 1] first\nsecond".to_string()));
    }

    #[test]
    fn test_classify_markers() {
        assert_eq!(Severity::classify("t - claw - INFO - ready"), Severity::Info);
        assert_eq!(Severity::classify("t - claw - WARNING - hot"), Severity::Warning);
        assert_eq!(Severity::classify("t - claw - ERROR - stall"), Severity::Error);
        assert_eq!(Severity::classify("INFO without separators"), Severity::Default);
    }

    #[test]
    fn test_classify_first_marker_wins() {
        let line = "t - claw - ERROR - retry - INFO - done";
        assert_eq!(Severity::classify(line), Severity::Info);
        let line = "t - WARNING - x - ERROR - y";
        assert_eq!(Severity::classify(line), Severity::Warning);
    }

    #[test]
    fn test_view_is_bounded() {
        let mut view = LogView::default();
        for i in 0..(MAX_LOG_LINES + 5) {
            view.append(format!("line {}", i));
        }
        assert_eq!(view.len(), MAX_LOG_LINES);
        assert_eq!(view.lines()[0].text, "line 5");
        assert_eq!(view.lines()[MAX_LOG_LINES - 1].text, format!("line {}", MAX_LOG_LINES + 4));
    }

    #[test]
    fn test_line_keys_stay_unique_across_clear() {
        let mut view = LogView::default();
        view.append("a");
        view.append("b");
        let before: Vec<u64> = view.lines().iter().map(|l| l.seq).collect();
        assert_eq!(before, vec![0, 1]);

        view.clear();
        view.append("c");
        assert_eq!(view.lines()[0].seq, 2);
    }
}
