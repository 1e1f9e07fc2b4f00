//! Scenario 3: emergency during client mode with overlapping triggers.

use crate::prelude::*;

#[tokio::test]
async fn overlapping_emergency_triggers_return_to_client_mode_once_depth_drains() {
    let rig = rig();
    rig.runtime.wifi_toggled();
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::BatteryOn)).await;

    rig.runtime.emergency_mode_changed(true);
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::BatteryOff)).await;

    rig.runtime.emergency_mode_changed(true);
    rig.runtime.emergency_call_state_changed(false);
    rig.runtime.emergency_mode_changed(false);

    // Depth returns to 0 only after the second `emergencyModeChanged(false)`;
    // the controller then re-enters client mode since wifi is still on.
    wait_until(&rig.collaborator, |calls| {
        calls.iter().filter(|c| matches!(c, CollaboratorCall::BatteryOn)).count() == 2
    })
    .await;

    let calls = rig.collaborator.calls();
    let battery_offs = calls.iter().filter(|c| matches!(c, CollaboratorCall::BatteryOff)).count();
    assert_eq!(battery_offs, 1, "wifi must go down exactly once across the whole emergency window");

    rig.runtime.shutdown(SPEC_WAIT).await;
}

#[tokio::test]
async fn set_ap_during_emergency_is_a_no_op() {
    let rig = rig();
    // If the soft-ap request below were (incorrectly) honored, this scripted
    // failure would surface as a recovery trigger within milliseconds.
    rig.fail_on_start(ManagerKind::SoftAp);

    rig.runtime.wifi_toggled();
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::BatteryOn)).await;

    rig.runtime.emergency_mode_changed(true);
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::BatteryOff)).await;

    rig.runtime.set_ap(true, SoftApPurpose::Tethered, None);
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    assert!(
        !rig.collaborator.calls().iter().any(|c| matches!(c, CollaboratorCall::RecoveryTrigger(_))),
        "a soft-ap request issued mid-emergency must never reach the Warden at all"
    );

    rig.runtime.shutdown(SPEC_WAIT).await;
}
