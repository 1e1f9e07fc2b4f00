//! Scenario 6: a soft AP concurrent with an active client manager.

use crate::prelude::*;

#[tokio::test]
async fn soft_ap_coexists_with_client_mode_and_stop_unspecified_only_tears_down_the_ap() {
    let rig = rig();
    rig.runtime.wifi_toggled();
    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::BatteryOn)).await;

    rig.runtime.set_ap(true, SoftApPurpose::Tethered, None);
    tokio::time::sleep(std::time::Duration::from_millis(30)).await;

    // A soft ap contributes ScanContribution::None, so the client manager's
    // (true, true) emission must still be the only scan-enablement call.
    assert_eq!(
        rig.collaborator
            .calls()
            .iter()
            .filter(|c| matches!(c, CollaboratorCall::ScanEnablement { .. }))
            .count(),
        1
    );

    rig.runtime.set_ap(false, SoftApPurpose::Unspecified, None);
    tokio::time::sleep(std::time::Duration::from_millis(30)).await;

    // Client mode must be untouched: battery stays up the whole time.
    assert!(!rig.collaborator.calls().contains(&CollaboratorCall::BatteryOff));

    rig.runtime.shutdown(SPEC_WAIT).await;
}

#[tokio::test]
async fn starting_a_soft_ap_with_an_unspecified_purpose_never_reaches_the_factory() {
    let rig = rig();
    rig.fail_on_start(ManagerKind::SoftAp);

    rig.runtime.set_ap(true, SoftApPurpose::Unspecified, None);
    tokio::time::sleep(std::time::Duration::from_millis(30)).await;

    assert!(rig.collaborator.calls().is_empty(), "Unspecified must be rejected at the boundary, not started and failed");

    rig.runtime.shutdown(SPEC_WAIT).await;
}
