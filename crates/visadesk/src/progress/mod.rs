//! Application progress model: a four stage timeline and payment completion derived
//! from an application's status string and payment totals.
//!
//! Everything here is a pure function of its inputs so admin and client views render
//! identical timelines for the same record.

mod stage;
mod status;

use serde::Serialize;

pub use stage::{Stage, StageState};
pub use status::ApplicationStatus;

/// One row of the rendered timeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StageEntry {
    pub ordinal: u8,
    pub stage: Stage,
    pub label: &'static str,
    pub state: StageState,
    pub state_label: &'static str,
}

/// Render-ready timeline plus payment completion.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApplicationProgress {
    pub status: ApplicationStatus,
    pub current_stage: Stage,
    pub stages: Vec<StageEntry>,
    pub payment_percentage: u8,
}

impl ApplicationProgress {
    pub fn derive(
        status: Option<&str>,
        total_amount: Option<f64>,
        paid_amount: Option<f64>,
    ) -> Self {
        let status = ApplicationStatus::from_optional(status);
        let current_stage = Stage::for_status(status);

        let stages = Stage::ordered()
            .into_iter()
            .map(|stage| {
                let state = StageState::relative_to(stage, current_stage);
                StageEntry {
                    ordinal: stage.ordinal(),
                    stage,
                    label: stage.label(),
                    state,
                    state_label: state.label(),
                }
            })
            .collect();

        Self {
            status,
            current_stage,
            stages,
            payment_percentage: payment_percentage(
                total_amount.unwrap_or(0.0),
                paid_amount.unwrap_or(0.0),
            ),
        }
    }

    pub fn active(&self) -> Option<&StageEntry> {
        self.stages
            .iter()
            .find(|entry| entry.state == StageState::Active)
    }

    pub fn count(&self, state: StageState) -> usize {
        self.stages.iter().filter(|entry| entry.state == state).count()
    }
}

/// Whole-percent share of `total_amount` already paid, clamped to `0..=100`.
///
/// A zero, negative or non-finite total yields 0. Overpayment is clamped for display
/// and not reported as a data error.
pub fn payment_percentage(total_amount: f64, paid_amount: f64) -> u8 {
    if !total_amount.is_finite() || total_amount <= 0.0 || !paid_amount.is_finite() {
        return 0;
    }

    let ratio = (100.0 * paid_amount / total_amount).round();
    ratio.clamp(0.0, 100.0) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn states(progress: &ApplicationProgress) -> Vec<StageState> {
        progress.stages.iter().map(|entry| entry.state).collect()
    }

    #[test]
    fn approved_completes_first_three_stages() {
        let progress = ApplicationProgress::derive(Some("Approved"), Some(1000.0), Some(400.0));

        assert_eq!(progress.current_stage, Stage::Completion);
        assert_eq!(
            states(&progress),
            vec![
                StageState::Complete,
                StageState::Complete,
                StageState::Complete,
                StageState::Active,
            ]
        );
        assert_eq!(progress.count(StageState::Pending), 0);
        assert_eq!(progress.payment_percentage, 40);
    }

    #[test]
    fn empty_or_missing_status_starts_at_registration() {
        for status in [Some(""), None, Some("Escalated to embassy")] {
            let progress = ApplicationProgress::derive(status, None, None);
            assert_eq!(
                progress.active().map(|entry| entry.stage),
                Some(Stage::Registration)
            );
            assert_eq!(progress.count(StageState::Complete), 0);
            assert_eq!(progress.count(StageState::Pending), 3);
        }
    }

    #[test]
    fn exactly_one_stage_is_active_for_every_status() {
        for raw in [
            "New", "pending", "Submitted", "Return Docs", "Review", "Processing",
            "In Progress", "Rejected", "completed", "???",
        ] {
            let progress = ApplicationProgress::derive(Some(raw), Some(10.0), Some(1.0));
            assert_eq!(progress.count(StageState::Active), 1, "status {raw}");
            assert_eq!(progress.stages.len(), 4);
        }
    }

    #[test]
    fn processing_marks_documents_complete() {
        let progress = ApplicationProgress::derive(Some("processing"), Some(0.0), Some(0.0));
        let active = progress.active().expect("one stage is active");
        assert_eq!(active.ordinal, 3);
        assert_eq!(active.state_label, "In Progress");
        assert_eq!(progress.stages[1].state, StageState::Complete);
        assert_eq!(progress.stages[3].state_label, "Not Started");
    }

    #[test]
    fn percentage_handles_zero_total_and_overpayment() {
        assert_eq!(payment_percentage(0.0, 50.0), 0);
        assert_eq!(payment_percentage(0.0, 0.0), 0);
        assert_eq!(payment_percentage(100.0, 150.0), 100);
        assert_eq!(payment_percentage(200.0, 50.0), 25);
        assert_eq!(payment_percentage(3.0, 1.0), 33);
        assert_eq!(payment_percentage(3.0, 2.0), 67);
        assert_eq!(payment_percentage(100.0, -20.0), 0);
        assert_eq!(payment_percentage(f64::NAN, 10.0), 0);
        assert_eq!(payment_percentage(100.0, f64::INFINITY), 0);
    }

    #[test]
    fn derivation_is_idempotent() {
        let derive =
            || ApplicationProgress::derive(Some("Doc Processing"), Some(12450.0), Some(8200.0));
        let first = derive();
        let second = derive();
        assert_eq!(first, second);
        assert_eq!(first.payment_percentage, 66);
    }
}
