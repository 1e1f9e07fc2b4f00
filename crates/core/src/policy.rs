// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Controller policy inputs and recovery vocabulary.
//!
//! [`PolicySnapshot`] is the read-only projection the Controller samples once
//! per handler invocation (§5: "reads consistent snapshots... does not rely
//! on cross-handler consistency") rather than reading live fields off a
//! shared mutable settings object.

use serde::{Deserialize, Serialize};

/// Upper bound for `recoveryDelay`, enforced by [`clamp_recovery_delay`].
pub const MAX_RECOVERY_DELAY_MS: u64 = 4_000;

/// Clamp a configured recovery delay into `[0, MAX_RECOVERY_DELAY_MS]`.
///
/// `u64` already excludes negative values; this only caps the upper bound.
pub fn clamp_recovery_delay(delay_ms: u64) -> u64 {
    delay_ms.min(MAX_RECOVERY_DELAY_MS)
}

/// A consistent read of the Controller's external policy inputs, taken once
/// at the start of a handler so a single dispatch never observes two
/// different values for the same field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicySnapshot {
    pub wifi_toggled: bool,
    pub airplane_mode: bool,
    pub scan_always_available: bool,
    pub location_mode: bool,
    pub emergency_depth: u32,
    pub recovery_delay_ms: u64,
}

impl PolicySnapshot {
    /// `scanOnlyAvailable = locationMode ∧ scanAlwaysAvailable` (§3, Derived).
    pub fn scan_only_available(&self) -> bool {
        self.location_mode && self.scan_always_available
    }

    pub fn in_emergency(&self) -> bool {
        self.emergency_depth > 0
    }
}

impl Default for PolicySnapshot {
    fn default() -> Self {
        Self {
            wifi_toggled: false,
            airplane_mode: false,
            scan_always_available: false,
            location_mode: false,
            emergency_depth: 0,
            recovery_delay_ms: 0,
        }
    }
}

/// Why a recovery restart (or diagnostic capture) was triggered.
///
/// `REASON_STRINGS` below is advisory labeling for diagnostic captures; it is
/// not part of the core's dispatch semantics (§6).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RecoveryReason {
    LastResortWatchdog,
    NativeDaemonFailure,
    HalFailure,
    WifiNativeFailure,
    Stack,
    Other,
}

crate::simple_display! {
    RecoveryReason {
        LastResortWatchdog => "last_resort_watchdog",
        NativeDaemonFailure => "native_daemon_failure",
        HalFailure => "hal_failure",
        WifiNativeFailure => "wifi_native_failure",
        Stack => "stack",
        Other => "other",
    }
}

impl RecoveryReason {
    /// Human-readable label used only for diagnostic-capture annotations.
    pub const REASON_STRINGS: [(RecoveryReason, &'static str); 6] = [
        (RecoveryReason::LastResortWatchdog, "last resort watchdog"),
        (RecoveryReason::NativeDaemonFailure, "native daemon failure"),
        (RecoveryReason::HalFailure, "hal failure"),
        (RecoveryReason::WifiNativeFailure, "wifi native failure"),
        (RecoveryReason::Stack, "stack"),
        (RecoveryReason::Other, "other"),
    ];

    pub fn label(self) -> &'static str {
        Self::REASON_STRINGS
            .iter()
            .find(|(reason, _)| *reason == self)
            .map(|(_, label)| *label)
            .unwrap_or("other")
    }

    /// Whether a bug report should be taken before this restart (§4.4
    /// StaEnabled/RecoveryRestart: "unless reason = LastResortWatchdog").
    pub fn warrants_bug_report(self) -> bool {
        !matches!(self, RecoveryReason::LastResortWatchdog)
    }
}

#[cfg(test)]
#[path = "policy_tests.rs"]
mod tests;
