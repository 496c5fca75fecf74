//! Timeline and payment figures as every portal page renders them.

use visadesk::progress::{payment_percentage, ApplicationProgress, Stage, StageState};

fn states(status: Option<&str>) -> Vec<StageState> {
    ApplicationProgress::derive(status, None, None)
        .stages
        .into_iter()
        .map(|entry| entry.state)
        .collect()
}

#[test]
fn approved_completes_the_first_three_stages() {
    assert_eq!(
        states(Some("Approved")),
        vec![
            StageState::Complete,
            StageState::Complete,
            StageState::Complete,
            StageState::Active,
        ]
    );
}

#[test]
fn missing_and_unknown_status_start_at_registration() {
    let expected = vec![
        StageState::Active,
        StageState::Pending,
        StageState::Pending,
        StageState::Pending,
    ];
    assert_eq!(states(None), expected);
    assert_eq!(states(Some("")), expected);
    assert_eq!(states(Some("on the moon")), expected);
}

#[test]
fn every_status_label_has_exactly_one_active_stage() {
    for raw in [
        "New", "Draft", "Pending", "Registration", "Submitted", "Documents",
        "Doc Processing", "Return Docs", "Under Review", "Processing", "In Progress",
        "Approved", "Completed", "Rejected", "Cancelled", "???",
    ] {
        let progress = ApplicationProgress::derive(Some(raw), None, None);
        assert_eq!(progress.count(StageState::Active), 1, "{raw}");
        assert_eq!(
            progress.active().map(|entry| entry.stage),
            Some(progress.current_stage)
        );
    }
}

#[test]
fn terminal_statuses_share_the_completion_stage() {
    for raw in ["Approved", "Completed", "Rejected", "Cancelled"] {
        assert_eq!(
            ApplicationProgress::derive(Some(raw), None, None).current_stage,
            Stage::Completion
        );
    }
}

#[test]
fn payment_percentage_edge_cases() {
    assert_eq!(payment_percentage(0.0, 50.0), 0);
    assert_eq!(payment_percentage(100.0, 150.0), 100);
    assert_eq!(payment_percentage(200.0, 50.0), 25);
    assert_eq!(payment_percentage(3200.0, 1800.0), 56);
}
