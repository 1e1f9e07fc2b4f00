// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared fixtures for the workspace spec suite.

use std::sync::Arc;
use std::time::Duration;

pub use wmo_core::PolicySnapshot;
use wmo_daemon::collaborators::{BatteryCollaborator, DiagnosticCollaborator, FakeCollaborator, RecoveryCollaborator, ScanCollaborator};
pub use wmo_daemon::collaborators::CollaboratorCall;
use wmo_daemon::mode_manager::fake::FakeManagerFactory;
use wmo_daemon::mode_manager::ManagerBehavior;
pub use wmo_daemon::runtime::{Runtime, RuntimeBuilder};
pub use wmo_core::{ManagerKind, RecoveryReason, SoftApConfig, SoftApPurpose};

/// A running [`Runtime`] wired entirely to fakes, plus the shared
/// [`FakeCollaborator`] so a test can assert on everything the Warden/
/// Controller emitted to the outside world.
pub struct Rig {
    pub runtime: Runtime,
    pub collaborator: Arc<FakeCollaborator>,
    pub factory: FakeManagerFactory,
}

pub fn snapshot(wifi: bool, airplane: bool, scan_always: bool, location: bool) -> PolicySnapshot {
    PolicySnapshot {
        wifi_toggled: wifi,
        airplane_mode: airplane,
        scan_always_available: scan_always,
        location_mode: location,
        emergency_depth: 0,
        recovery_delay_ms: 0,
    }
}

pub fn rig() -> Rig {
    rig_with(PolicySnapshot::default())
}

pub fn rig_with(inputs: PolicySnapshot) -> Rig {
    let factory = FakeManagerFactory::new();
    let collaborator = Arc::new(FakeCollaborator::new());
    let runtime = RuntimeBuilder::new()
        .with_factory(factory.clone())
        .with_scan(collaborator.clone() as Arc<dyn ScanCollaborator>)
        .with_battery(collaborator.clone() as Arc<dyn BatteryCollaborator>)
        .with_diagnostic(collaborator.clone() as Arc<dyn DiagnosticCollaborator>)
        .with_recovery(collaborator.clone() as Arc<dyn RecoveryCollaborator>)
        .with_inputs(inputs)
        .spawn();
    Rig { runtime, collaborator, factory }
}

impl Rig {
    pub fn fail_on_start(&self, kind: ManagerKind) {
        self.factory.set_behavior(kind, ManagerBehavior::FailOnStart);
    }
}

/// Polls `predicate` against the collaborator's recorded calls until it
/// holds or the budget runs out. Each dispatcher runs on its own spawned
/// task, so there is no synchronous point at which "the Warden has already
/// reacted" holds without this.
pub async fn wait_until(collaborator: &FakeCollaborator, predicate: impl Fn(&[CollaboratorCall]) -> bool) {
    for _ in 0..400 {
        if predicate(&collaborator.calls()) {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
    panic!("condition never became true; last calls: {:?}", collaborator.calls());
}

pub const SPEC_WAIT: Duration = Duration::from_secs(2);
