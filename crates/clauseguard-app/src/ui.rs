//! Terminal rendering: transient notices and the analysis phase list.

use clauseguard_common::{Notification, NotificationLevel, NotificationQueue};

use clauseguard_api::AnalysisPhase;

/// All phases, in the order they appear in the checklist.
const PHASES: [AnalysisPhase; 3] = [
    AnalysisPhase::Received,
    AnalysisPhase::Analyzing,
    AnalysisPhase::Saving,
];

/// Console-side notice handling. A notice prints when pushed unless the
/// same one is already visible, so a repeating failure (a flaky network
/// during a long poll, say) shows once per dismiss window instead of
/// spamming every tick.
pub struct Console {
    notices: NotificationQueue,
}

impl Console {
    pub fn new() -> Self {
        Self {
            notices: NotificationQueue::default(),
        }
    }

    pub fn error(&mut self, body: impl Into<String>) {
        self.push(Notification::error(body));
    }

    pub fn warning(&mut self, body: impl Into<String>) {
        self.push(Notification::warning(body));
    }

    pub fn info(&mut self, body: impl Into<String>) {
        self.push(Notification::info(body));
    }

    fn push(&mut self, notice: Notification) {
        if should_show(&mut self.notices, &notice) {
            eprintln!("{}", format_notice(&notice));
        }
        self.notices.push(notice);
    }
}

/// A notice is shown unless an identical one is still on screen.
fn should_show(notices: &mut NotificationQueue, notice: &Notification) -> bool {
    !notices
        .visible()
        .iter()
        .any(|n| n.level == notice.level && n.body == notice.body)
}

impl Default for Console {
    fn default() -> Self {
        Self::new()
    }
}

fn format_notice(notice: &Notification) -> String {
    match notice.level {
        NotificationLevel::Info => format!("  {}", notice.body),
        NotificationLevel::Warning => format!("! {}", notice.body),
        NotificationLevel::Error => format!("⚠ {}", notice.body),
    }
}

/// One-line checklist for the current phase: done phases get a check,
/// the current one a pointer, later ones stay dim.
pub fn phase_checklist(current: AnalysisPhase) -> String {
    PHASES
        .iter()
        .map(|&phase| {
            if phase < current {
                format!("✓ {}", phase.label())
            } else if phase == current {
                format!("▸ {}", phase.label())
            } else {
                format!("· {}", phase.label())
            }
        })
        .collect::<Vec<_>>()
        .join("  ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn checklist_marks_earlier_phases_done() {
        let line = phase_checklist(AnalysisPhase::Saving);
        assert!(line.contains("✓ Uploading contract"));
        assert!(line.contains("✓ AI reviewing clauses"));
        assert!(line.contains("▸ Saving results"));
    }

    #[test]
    fn checklist_starts_with_everything_ahead() {
        let line = phase_checklist(AnalysisPhase::Received);
        assert!(line.starts_with("▸ Uploading contract"));
        assert!(line.contains("· AI reviewing clauses"));
        assert!(line.contains("· Saving results"));
    }

    #[test]
    fn notice_formatting_by_level() {
        assert_eq!(
            format_notice(&Notification::error("upload failed")),
            "⚠ upload failed"
        );
        assert_eq!(
            format_notice(&Notification::warning("note not saved")),
            "! note not saved"
        );
    }

    #[test]
    fn repeated_notice_is_suppressed_while_visible() {
        let mut notices = NotificationQueue::default();
        let notice = Notification::error("Could not reach the server.");

        assert!(should_show(&mut notices, &notice));
        notices.push(notice.clone());

        // Same body and level, still within the dismiss window.
        assert!(!should_show(
            &mut notices,
            &Notification::error("Could not reach the server.")
        ));
        // A different notice still shows.
        assert!(should_show(
            &mut notices,
            &Notification::error("Failed to save risk status")
        ));
    }
}
