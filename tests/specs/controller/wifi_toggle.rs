//! Scenario 2: toggling wifi on from a disabled start.

use crate::prelude::*;

#[tokio::test]
async fn toggling_wifi_on_from_scan_only_switches_to_a_client_manager() {
    let rig = rig_with(snapshot(false, false, true, true));
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::ScanModeActive)).await;

    rig.runtime.wifi_toggled();

    // The scan-only manager's hidden-disabled signal must be superseded by
    // the client manager's hidden-enabled one; battery accounting must
    // never observe a 0-active edge across the handoff.
    wait_until(&rig.collaborator, |calls| {
        calls.contains(&CollaboratorCall::ScanEnablement { enabled: true, hidden_enabled: true })
    })
    .await;
    assert_eq!(
        rig.collaborator
            .calls()
            .iter()
            .filter(|c| matches!(c, CollaboratorCall::BatteryOn))
            .count(),
        1,
        "the client manager replaces the scan-only manager without an intervening battery-off edge"
    );
    assert!(!rig.collaborator.calls().contains(&CollaboratorCall::BatteryOff));

    rig.runtime.shutdown(SPEC_WAIT).await;
}
