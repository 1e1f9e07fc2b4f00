use super::*;

#[tokio::test]
async fn fake_collaborator_records_every_call_in_order() {
    let fake = FakeCollaborator::new();

    fake.scan_enablement(true, false).await;
    fake.battery_on().await;
    fake.scan_mode_active().await;
    fake.diagnostic_capture(RecoveryReason::HalFailure).await;
    fake.recovery_trigger(RecoveryReason::NativeDaemonFailure).await;
    fake.battery_off().await;

    assert_eq!(
        fake.calls(),
        vec![
            CollaboratorCall::ScanEnablement { enabled: true, hidden_enabled: false },
            CollaboratorCall::BatteryOn,
            CollaboratorCall::ScanModeActive,
            CollaboratorCall::DiagnosticCapture(RecoveryReason::HalFailure),
            CollaboratorCall::RecoveryTrigger(RecoveryReason::NativeDaemonFailure),
            CollaboratorCall::BatteryOff,
        ]
    );
}

#[tokio::test]
async fn noop_collaborator_does_not_panic_on_any_call() {
    let noop = NoopCollaborator;
    noop.scan_enablement(true, true).await;
    noop.battery_on().await;
    noop.battery_off().await;
    noop.scan_mode_active().await;
    noop.diagnostic_capture(RecoveryReason::Other).await;
    noop.recovery_trigger(RecoveryReason::Stack).await;
}
