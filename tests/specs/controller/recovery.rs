//! Scenario 4: recovery restart with a configured delay.

use crate::prelude::*;

#[tokio::test(start_paused = true)]
async fn recovery_restart_shuts_down_then_returns_to_client_mode_after_the_delay() {
    let rig = rig_with(PolicySnapshot { recovery_delay_ms: 3_000, ..PolicySnapshot::default() });
    rig.runtime.wifi_toggled();
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::BatteryOn)).await;

    rig.runtime.recovery_restart(RecoveryReason::HalFailure);

    wait_until(&rig.collaborator, |calls| {
        calls.contains(&CollaboratorCall::DiagnosticCapture(RecoveryReason::HalFailure))
    })
    .await;
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::BatteryOff)).await;

    // The paused clock auto-advances past the 3s recoveryDelay while every
    // task in the runtime is idle on a timer; no manual `advance` is needed.
    wait_until(&rig.collaborator, |calls| {
        calls.iter().filter(|c| matches!(c, CollaboratorCall::BatteryOn)).count() == 2
    })
    .await;

    rig.runtime.shutdown(SPEC_WAIT).await;
}

#[tokio::test(start_paused = true)]
async fn last_resort_watchdog_skips_the_diagnostic_capture() {
    let rig = rig_with(PolicySnapshot { recovery_delay_ms: 100, ..PolicySnapshot::default() });
    rig.runtime.wifi_toggled();
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::BatteryOn)).await;

    rig.runtime.recovery_restart(RecoveryReason::LastResortWatchdog);
    wait_until(&rig.collaborator, |calls| {
        calls.iter().filter(|c| matches!(c, CollaboratorCall::BatteryOn)).count() == 2
    })
    .await;

    assert!(
        !rig.collaborator.calls().iter().any(|c| matches!(c, CollaboratorCall::DiagnosticCapture(_))),
        "LastResortWatchdog must restart without a bug-report capture"
    );

    rig.runtime.shutdown(SPEC_WAIT).await;
}
