//! Terminal SessionView.
//!
//! Reads one command per line and forwards it to the session as the
//! equivalent gesture. Rendering is plain text built from `SessionSnapshot`.

use std::fmt::Write as _;

use dayswipe_core::app::{SessionSnapshot, Submission, TriageSession};
use dayswipe_core::domain::SessionSummary;
use dayswipe_core::gesture::{DragFeedback, DragGesture};
use tracing::debug;

pub const HELP: &str = "\
commands:
  y | d | right     mark done (button)
  n | left          mark not done (button)
  <offset>          swipe: drag to offset and release (e.g. 150, -120)
  drag <offset>     move the card without releasing
  release           release at the last drag offset
  ? | help          show this help
  q | quit          stop the session";

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    Press(bool),
    Swipe(f64),
    Drag(f64),
    Release,
    Help,
    Quit,
}

impl Command {
    /// Parse one input line. `None` for blank or unknown input.
    pub fn parse(line: &str) -> Option<Self> {
        let line = line.trim();
        let mut words = line.split_whitespace();
        let head = words.next()?.to_ascii_lowercase();

        let command = match head.as_str() {
            "y" | "d" | "done" | "right" => Command::Press(true),
            "n" | "left" => Command::Press(false),
            "drag" => Command::Drag(words.next()?.parse().ok()?),
            "release" | "r" => Command::Release,
            "?" | "help" | "h" => Command::Help,
            "q" | "quit" | "exit" => Command::Quit,
            other => Command::Swipe(other.parse().ok()?),
        };

        if words.next().is_some() {
            return None;
        }
        Some(command)
    }
}

/// Tracks the in-progress drag between `drag` and `release` lines.
#[derive(Debug, Default)]
pub struct TerminalView {
    drag: Option<DragGesture>,
}

impl TerminalView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a command to the session. Returns a line to print, if any.
    pub fn handle(&mut self, session: &TriageSession, command: Command) -> Option<String> {
        match command {
            Command::Press(outcome) => {
                self.drag = None;
                describe(session.press(outcome))
            }
            Command::Swipe(offset) => {
                self.drag = None;
                session.drag(offset);
                describe(session.release(offset))
            }
            Command::Drag(offset) => {
                if session.drag(offset).is_none() {
                    self.drag = None;
                    return Some("(card is not accepting input)".to_string());
                }
                let drag = self
                    .drag
                    .get_or_insert_with(|| DragGesture::begin(session.interpreter()));
                Some(render_feedback(&drag.sample(offset)))
            }
            Command::Release => {
                let drag = self.drag.take()?;
                let offset = drag.offset();
                debug!(samples = drag.samples(), offset, "drag released");
                describe(session.release(offset))
            }
            Command::Help => Some(HELP.to_string()),
            Command::Quit => None,
        }
    }
}

fn describe(submission: Submission) -> Option<String> {
    match submission {
        Submission::Committed { outcome, .. } if outcome => Some("✓ done".to_string()),
        Submission::Committed { .. } => Some("✗ not done".to_string()),
        Submission::Cancelled => Some("(snapped back)".to_string()),
        Submission::Ignored => None,
    }
}

/// Render the card currently on screen.
pub fn render_card(snapshot: &SessionSnapshot) -> Option<String> {
    let task = snapshot.current_task.as_ref()?;
    let progress = snapshot.progress;

    let width = 20usize;
    let filled = ((progress.percent() / 100.0) * width as f64).round() as usize;
    let bar: String = "#".repeat(filled) + &"-".repeat(width - filled.min(width));

    Some(format!(
        "[{bar}] {}/{}\n  {}\n  (y = done, n = not done, ? = help)",
        progress.current, progress.total, task.title
    ))
}

pub fn render_feedback(feedback: &DragFeedback) -> String {
    let badge = if feedback.done_badge_opacity > 0.0 {
        format!("DONE {:.0}%", feedback.done_badge_opacity * 100.0)
    } else if feedback.not_done_badge_opacity > 0.0 {
        format!("NOT DONE {:.0}%", feedback.not_done_badge_opacity * 100.0)
    } else {
        String::new()
    };
    format!(
        "  offset {:+.0}  tilt {:+.1}°  opacity {:.2}  {badge}",
        feedback.offset, feedback.rotation, feedback.opacity
    )
    .trim_end()
    .to_string()
}

pub fn render_summary(summary: &SessionSummary) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} {}", summary.tier.emoji(), summary.tier.message());
    let _ = writeln!(
        out,
        "{}% complete: {} done, {} remaining",
        summary.percentage, summary.completed, summary.remaining
    );
    for entry in &summary.entries {
        let mark = if entry.done { "✓" } else { "·" };
        let _ = writeln!(out, "  {mark} {}", entry.title);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use dayswipe_core::app::{SessionBuilder, start_session};
    use dayswipe_core::config::SessionConfig;
    use dayswipe_core::domain::{Decision, Task, TaskId, TaskTitle, TriageBatch, UserId};
    use dayswipe_core::ports::{Clock, NoopRecorder, SystemClock};
    use rstest::rstest;
    use std::sync::Arc;
    use std::time::Duration;

    fn batch(titles: &[&str]) -> TriageBatch {
        titles
            .iter()
            .enumerate()
            .map(|(i, title)| {
                Task::new(
                    TaskId::new(i as u64 + 1),
                    UserId::new(1),
                    TaskTitle::new(*title).unwrap(),
                    SystemClock.now(),
                )
            })
            .collect::<Vec<_>>()
            .into()
    }

    #[rstest]
    #[case("y", Some(Command::Press(true)))]
    #[case(" Right ", Some(Command::Press(true)))]
    #[case("n", Some(Command::Press(false)))]
    #[case("150", Some(Command::Swipe(150.0)))]
    #[case("-120.5", Some(Command::Swipe(-120.5)))]
    #[case("drag 40", Some(Command::Drag(40.0)))]
    #[case("release", Some(Command::Release))]
    #[case("q", Some(Command::Quit))]
    #[case("", None)]
    #[case("drag", None)]
    #[case("y please", None)]
    #[case("maybe", None)]
    fn parses_commands(#[case] line: &str, #[case] expected: Option<Command>) {
        assert_eq!(Command::parse(line), expected);
    }

    #[test]
    fn drag_then_release_commits_at_the_dragged_offset() {
        let session = SessionBuilder::new(Arc::new(NoopRecorder))
            .config(SessionConfig {
                advance_delay: Duration::ZERO,
                ..SessionConfig::default()
            })
            .start(batch(&["A", "B"]), |_| {});
        let mut view = TerminalView::new();

        let line = view.handle(&session, Command::Drag(-130.0)).unwrap();
        assert!(line.contains("NOT DONE"));
        assert_eq!(view.handle(&session, Command::Release).as_deref(), Some("✗ not done"));
        assert_eq!(session.decisions(), vec![Decision::not_done(TaskId::new(1))]);
        assert_eq!(session.position(), 1);

        assert_eq!(view.handle(&session, Command::Swipe(60.0)).as_deref(), Some("(snapped back)"));
    }

    #[test]
    fn release_uses_the_last_drag_sample() {
        let session = SessionBuilder::new(Arc::new(NoopRecorder))
            .advance_delay(Duration::ZERO)
            .start(batch(&["A", "B"]), |_| {});
        let mut view = TerminalView::new();

        view.handle(&session, Command::Drag(180.0));
        view.handle(&session, Command::Drag(40.0));
        assert_eq!(view.handle(&session, Command::Release).as_deref(), Some("(snapped back)"));
        assert_eq!(session.position(), 0);

        view.handle(&session, Command::Drag(40.0));
        view.handle(&session, Command::Drag(150.0));
        assert_eq!(view.handle(&session, Command::Release).as_deref(), Some("✓ done"));
        assert_eq!(session.position(), 1);
    }

    #[test]
    fn release_without_a_drag_does_nothing() {
        let session = start_session(batch(&["A"]), Arc::new(NoopRecorder), |_| {});
        let mut view = TerminalView::new();

        assert_eq!(view.handle(&session, Command::Release), None);
        assert!(session.decisions().is_empty());
    }

    #[test]
    fn card_shows_progress_and_title() {
        let session = start_session(batch(&["Stretch", "Read"]), Arc::new(NoopRecorder), |_| {});
        let card = render_card(&session.snapshot()).unwrap();
        assert!(card.contains("1/2"));
        assert!(card.contains("Stretch"));
        assert!(card.starts_with("[##########----------]"));
    }

    #[test]
    fn summary_lists_every_task() {
        let batch = batch(&["A", "B"]);
        let summary = SessionSummary::new(&batch, &[Decision::done(TaskId::new(1))]);
        let text = render_summary(&summary);
        assert!(text.contains("50% complete: 1 done, 1 remaining"));
        assert!(text.contains("✓ A"));
        assert!(text.contains("· B"));
    }
}
