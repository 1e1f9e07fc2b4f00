//! Scenario 5: a late callback from an orphaned manager is silently dropped.

use crate::prelude::*;
use wmo_daemon::mode_manager::ManagerBehavior;

#[tokio::test]
async fn a_late_failure_from_a_manager_stopped_before_wifi_was_disabled_never_triggers_recovery() {
    let rig = rig();
    // The Client manager reaches Ready quickly, then reports Unknown on its
    // own well after the Warden has already moved on to WifiDisabled.
    rig.factory.set_behavior(
        ManagerKind::Client,
        ManagerBehavior::FailAfterReady { then_fail_after: std::time::Duration::from_millis(80) },
    );

    rig.runtime.wifi_toggled();
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::BatteryOn)).await;

    // Disable wifi well before the scripted failure fires; the manager is
    // now orphaned from the Warden's point of view.
    tokio::time::sleep(std::time::Duration::from_millis(10)).await;
    rig.runtime.wifi_toggled();
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::BatteryOff)).await;

    // Wait past the scripted failure delay; the late Unknown report must be
    // discarded by the listener-freshness check rather than surfacing as a
    // recovery trigger.
    tokio::time::sleep(std::time::Duration::from_millis(150)).await;
    assert!(
        !rig.collaborator.calls().iter().any(|c| matches!(c, CollaboratorCall::RecoveryTrigger(_))),
        "a stale manager callback must never reach the recovery collaborator"
    );

    rig.runtime.shutdown(SPEC_WAIT).await;
}
