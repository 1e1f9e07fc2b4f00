// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Collaborator traits for the four external subsystems the Warden emits to
//! (§4.5, §6): scan enablement, battery accounting, diagnostic capture, and
//! recovery triggering. Each is out of scope as a subsystem — their real
//! implementations (network scanning, the battery stats service, bugreport
//! capture, and the radio-recovery watchdog) live outside this crate — but
//! the Warden still needs something concrete to call, so each trait ships a
//! logging no-op and a call-recording fake, the same pairing the daemon uses
//! for its own adapter traits.

use async_trait::async_trait;
use wmo_core::RecoveryReason;

/// Receives the Warden's aggregate scan-enablement signal (§4.3).
#[async_trait]
pub trait ScanCollaborator: Send + Sync + 'static {
    async fn scan_enablement(&self, enabled: bool, hidden_enabled: bool);
}

/// Receives battery on/off edges and the scan-mode-active signal (§6).
#[async_trait]
pub trait BatteryCollaborator: Send + Sync + 'static {
    async fn battery_on(&self);
    async fn battery_off(&self);
    async fn scan_mode_active(&self);
}

/// Receives a request to capture diagnostic data ahead of a recovery restart
/// (§4.3, §4.4's "take a bug report unless reason = LastResortWatchdog").
#[async_trait]
pub trait DiagnosticCollaborator: Send + Sync + 'static {
    async fn diagnostic_capture(&self, reason: RecoveryReason);
}

/// Receives a request to restart the radio stack after a failure (§4.3's
/// `NativeDaemonFailure` path).
#[async_trait]
pub trait RecoveryCollaborator: Send + Sync + 'static {
    async fn recovery_trigger(&self, reason: RecoveryReason);
}

/// Logs and drops every call. The production default for all four traits:
/// none of the backing subsystems are part of this crate, so "do nothing
/// but leave a trace" is the only honest implementation available here.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopCollaborator;

#[async_trait]
impl ScanCollaborator for NoopCollaborator {
    async fn scan_enablement(&self, enabled: bool, hidden_enabled: bool) {
        tracing::debug!(enabled, hidden_enabled, "scan enablement (noop collaborator)");
    }
}

#[async_trait]
impl BatteryCollaborator for NoopCollaborator {
    async fn battery_on(&self) {
        tracing::debug!("battery on (noop collaborator)");
    }

    async fn battery_off(&self) {
        tracing::debug!("battery off (noop collaborator)");
    }

    async fn scan_mode_active(&self) {
        tracing::debug!("scan mode active (noop collaborator)");
    }
}

#[async_trait]
impl DiagnosticCollaborator for NoopCollaborator {
    async fn diagnostic_capture(&self, reason: RecoveryReason) {
        tracing::info!(%reason, "diagnostic capture requested (noop collaborator)");
    }
}

#[async_trait]
impl RecoveryCollaborator for NoopCollaborator {
    async fn recovery_trigger(&self, reason: RecoveryReason) {
        tracing::warn!(%reason, "recovery triggered (noop collaborator)");
    }
}

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::sync::Arc;

    /// One recorded emission to any of the four collaborator traits.
    #[derive(Debug, Clone, PartialEq)]
    pub enum CollaboratorCall {
        ScanEnablement { enabled: bool, hidden_enabled: bool },
        BatteryOn,
        BatteryOff,
        ScanModeActive,
        DiagnosticCapture(RecoveryReason),
        RecoveryTrigger(RecoveryReason),
    }

    #[derive(Debug, Default)]
    struct FakeState {
        calls: Vec<CollaboratorCall>,
    }

    /// Records every call across all four traits on one shared, cloneable
    /// handle, so a single fixture can be wired to the Warden in place of
    /// all four collaborators and inspected afterward.
    #[derive(Clone, Default)]
    pub struct FakeCollaborator {
        inner: Arc<Mutex<FakeState>>,
    }

    impl FakeCollaborator {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn calls(&self) -> Vec<CollaboratorCall> {
            self.inner.lock().calls.clone()
        }

        fn record(&self, call: CollaboratorCall) {
            self.inner.lock().calls.push(call);
        }
    }

    #[async_trait]
    impl ScanCollaborator for FakeCollaborator {
        async fn scan_enablement(&self, enabled: bool, hidden_enabled: bool) {
            self.record(CollaboratorCall::ScanEnablement { enabled, hidden_enabled });
        }
    }

    #[async_trait]
    impl BatteryCollaborator for FakeCollaborator {
        async fn battery_on(&self) {
            self.record(CollaboratorCall::BatteryOn);
        }

        async fn battery_off(&self) {
            self.record(CollaboratorCall::BatteryOff);
        }

        async fn scan_mode_active(&self) {
            self.record(CollaboratorCall::ScanModeActive);
        }
    }

    #[async_trait]
    impl DiagnosticCollaborator for FakeCollaborator {
        async fn diagnostic_capture(&self, reason: RecoveryReason) {
            self.record(CollaboratorCall::DiagnosticCapture(reason));
        }
    }

    #[async_trait]
    impl RecoveryCollaborator for FakeCollaborator {
        async fn recovery_trigger(&self, reason: RecoveryReason) {
            self.record(CollaboratorCall::RecoveryTrigger(reason));
        }
    }
}

#[cfg(any(test, feature = "test-support"))]
pub use fake::{CollaboratorCall, FakeCollaborator};

#[cfg(test)]
#[path = "collaborators_tests.rs"]
mod tests;
