//! Scenario 1: cold start with scan-only available.

use crate::prelude::*;

#[tokio::test]
async fn scan_only_available_at_cold_start_enters_scan_only_without_a_toggle() {
    let rig = rig_with(snapshot(false, false, true, true));

    wait_until(&rig.collaborator, |calls| calls.contains(&CollaboratorCall::ScanModeActive)).await;
    assert_eq!(
        rig.collaborator
            .calls()
            .iter()
            .filter(|c| matches!(c, CollaboratorCall::BatteryOn))
            .count(),
        1,
        "battery on must be emitted exactly once for the single scan-only manager"
    );

    rig.runtime.shutdown(SPEC_WAIT).await;
}

#[tokio::test]
async fn cold_start_without_scan_only_available_never_spawns_a_manager() {
    let rig = rig();

    tokio::time::sleep(std::time::Duration::from_millis(30)).await;
    assert!(rig.collaborator.calls().is_empty(), "an all-false snapshot must leave wifi fully disabled");

    rig.runtime.shutdown(SPEC_WAIT).await;
}
