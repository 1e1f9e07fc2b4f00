use super::*;

#[test]
fn terminal_states_are_stopped_and_failed_only() {
    assert!(ReadinessState::Stopped.is_terminal());
    assert!(ReadinessState::Failed.is_terminal());
    assert!(!ReadinessState::Starting.is_terminal());
    assert!(!ReadinessState::Ready.is_terminal());
    assert!(!ReadinessState::Stopping.is_terminal());
}

#[test]
fn scan_contribution_enablement() {
    assert!(!ScanContribution::None.enables_scan());
    assert!(!ScanContribution::None.enables_hidden());

    assert!(ScanContribution::WithoutHidden.enables_scan());
    assert!(!ScanContribution::WithoutHidden.enables_hidden());

    assert!(ScanContribution::WithHidden.enables_scan());
    assert!(ScanContribution::WithHidden.enables_hidden());
}

#[test]
fn manager_kind_display() {
    assert_eq!(ManagerKind::Client.to_string(), "client");
    assert_eq!(ManagerKind::ScanOnly.to_string(), "scan_only");
    assert_eq!(ManagerKind::SoftAp.to_string(), "soft_ap");
}
