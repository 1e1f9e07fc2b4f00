//! §8 round-trip laws.

use crate::prelude::*;

#[tokio::test]
async fn emergency_on_then_off_does_not_restart_a_soft_ap_that_was_torn_down() {
    let rig = rig();
    rig.runtime.wifi_toggled();
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::BatteryOn)).await;

    rig.runtime.set_ap(true, SoftApPurpose::Tethered, None);
    tokio::time::sleep(std::time::Duration::from_millis(30)).await;
    let scan_calls_before = rig
        .collaborator
        .calls()
        .iter()
        .filter(|c| matches!(c, CollaboratorCall::ScanEnablement { .. }))
        .count();

    rig.runtime.emergency_mode_changed(true);
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::BatteryOff)).await;
    rig.runtime.emergency_mode_changed(false);
    wait_until(&rig.collaborator, |calls| {
        calls.iter().filter(|c| matches!(c, CollaboratorCall::BatteryOn)).count() == 2
    })
    .await;

    tokio::time::sleep(std::time::Duration::from_millis(30)).await;
    let scan_calls_after = rig
        .collaborator
        .calls()
        .iter()
        .filter(|c| matches!(c, CollaboratorCall::ScanEnablement { .. }))
        .count();
    assert_eq!(
        scan_calls_before, scan_calls_after,
        "emergency exit restores client mode but never re-spawns a soft ap the emergency entry stopped"
    );

    rig.runtime.shutdown(SPEC_WAIT).await;
}

#[tokio::test(start_paused = true)]
async fn recovery_restart_then_continue_returns_to_scan_only_when_that_was_the_prior_active_state() {
    let rig = rig_with(snapshot(false, false, true, true));
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::ScanModeActive)).await;

    rig.runtime.recovery_restart(RecoveryReason::Stack);
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::BatteryOff)).await;

    // The paused clock fast-forwards through the default 2s recovery delay
    // while the runtime is otherwise idle.
    wait_until(&rig.collaborator, |calls| {
        calls.iter().filter(|c| matches!(c, CollaboratorCall::ScanModeActive)).count() == 2
    })
    .await;

    rig.runtime.shutdown(SPEC_WAIT).await;
}
