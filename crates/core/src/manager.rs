// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Mode manager identity and lifecycle vocabulary shared by the Warden and
//! the concrete manager implementations (`wmo-daemon`).

use serde::{Deserialize, Serialize};

/// Which mode a manager instance is running, independent of its [`crate::mode::SoftApPurpose`].
///
/// Mirrors the three concrete variants of the abstract `ModeManager` contract;
/// kept distinct from [`crate::mode::OperatingMode`] because `Disabled` has no
/// manager to tag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ManagerKind {
    Client,
    ScanOnly,
    SoftAp,
}

crate::simple_display! {
    ManagerKind {
        Client => "client",
        ScanOnly => "scan_only",
        SoftAp => "soft_ap",
    }
}

/// Per-manager lifecycle state. Terminal states (`Stopped`, `Failed`) are
/// absorbing: a manager instance is never reused past either one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ReadinessState {
    Starting,
    Ready,
    Stopping,
    Stopped,
    Failed,
}

crate::simple_display! {
    ReadinessState {
        Starting => "starting",
        Ready => "ready",
        Stopping => "stopping",
        Stopped => "stopped",
        Failed => "failed",
    }
}

impl ReadinessState {
    /// Terminal states are never left; the owner must dispose the manager.
    pub fn is_terminal(self) -> bool {
        matches!(self, ReadinessState::Stopped | ReadinessState::Failed)
    }
}

/// A manager's contribution to the Warden's aggregate scan-enablement signal.
///
/// Stable for the duration of `Ready`; read by the Warden after every
/// readiness change or set-membership change to recompute `scanEnabled` /
/// `hiddenEnabled` (§4.3).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ScanContribution {
    None,
    WithoutHidden,
    WithHidden,
}

crate::simple_display! {
    ScanContribution {
        None => "none",
        WithoutHidden => "without_hidden",
        WithHidden => "with_hidden",
    }
}

impl ScanContribution {
    pub fn enables_scan(self) -> bool {
        !matches!(self, ScanContribution::None)
    }

    pub fn enables_hidden(self) -> bool {
        matches!(self, ScanContribution::WithHidden)
    }
}

#[cfg(test)]
#[path = "manager_tests.rs"]
mod tests;
