// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Event vocabulary carried on the Controller and Warden buses (§6).
//!
//! Two distinct message shapes exist on purpose: [`ControllerEvent`] is
//! everything the Controller's dispatcher accepts (external policy inputs,
//! already-interpreted semantic events relayed up from the Warden); and
//! [`ManagerCallback`]/[`ManagerReport`] is the narrower `stateChanged`
//! signal a spawned manager posts back to the Warden's dispatcher. The
//! Warden is what bridges the two: it holds enough context (which mini-FSM
//! state it was in when the callback arrived) to turn a raw `ManagerReport`
//! into the right semantic `ControllerEvent` (`StaStartFailure` vs.
//! `StaStopped`, for instance).

use crate::id::ManagerId;
use crate::mode::{SoftApConfig, SoftApPurpose};
use crate::policy::RecoveryReason;

/// The distilled readiness signal a mode manager reports to the Warden
/// (§6 "Inbound to Warden": `stateChanged`). `Unknown` is the wire name for
/// `Failed` per spec vocabulary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ManagerReport {
    Ready,
    Disabled,
    Unknown,
}

crate::simple_display! {
    ManagerReport {
        Ready => "ready",
        Disabled => "disabled",
        Unknown => "unknown",
    }
}

/// A `stateChanged` callback tagged with the id of the manager instance that
/// produced it, so the Warden can apply the listener-freshness check (§4.3)
/// before acting on it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ManagerCallback {
    pub manager_id: ManagerId,
    pub report: ManagerReport,
}

impl ManagerCallback {
    pub fn new(manager_id: ManagerId, report: ManagerReport) -> Self {
        Self { manager_id, report }
    }
}

/// Everything the Controller's dispatcher accepts, inbound from policy
/// sources (§6) plus the semantic events the Warden relays upward once it
/// has interpreted a manager's raw [`ManagerReport`] in context.
#[derive(Debug, Clone, PartialEq)]
pub enum ControllerEvent {
    WifiToggled,
    AirplaneToggled,
    ScanAlwaysChanged,
    SetAp { enable: bool, purpose: SoftApPurpose, config: Option<SoftApConfig> },
    EmergencyCallStateChanged(bool),
    EmergencyModeChanged(bool),
    RecoveryRestart(RecoveryReason),
    RecoveryRestartContinue,
    DeferredRecoveryRestart,
    RecoveryDisable,
    StaStartFailure,
    StaStopped,
    ScanningStopped,
    ApStopped,
}

impl ControllerEvent {
    /// Stable lowercase name for log lines and the diagnostic ring buffer.
    pub fn name(&self) -> &'static str {
        match self {
            ControllerEvent::WifiToggled => "wifi_toggled",
            ControllerEvent::AirplaneToggled => "airplane_toggled",
            ControllerEvent::ScanAlwaysChanged => "scan_always_changed",
            ControllerEvent::SetAp { .. } => "set_ap",
            ControllerEvent::EmergencyCallStateChanged(_) => "emergency_call_state_changed",
            ControllerEvent::EmergencyModeChanged(_) => "emergency_mode_changed",
            ControllerEvent::RecoveryRestart(_) => "recovery_restart",
            ControllerEvent::RecoveryRestartContinue => "recovery_restart_continue",
            ControllerEvent::DeferredRecoveryRestart => "deferred_recovery_restart",
            ControllerEvent::RecoveryDisable => "recovery_disable",
            ControllerEvent::StaStartFailure => "sta_start_failure",
            ControllerEvent::StaStopped => "sta_stopped",
            ControllerEvent::ScanningStopped => "scanning_stopped",
            ControllerEvent::ApStopped => "ap_stopped",
        }
    }

    /// One-line summary for `tracing` events, cheap enough to call unconditionally.
    pub fn log_summary(&self) -> String {
        match self {
            ControllerEvent::SetAp { enable, purpose, .. } => {
                format!("{} enable={enable} purpose={purpose}", self.name())
            }
            ControllerEvent::EmergencyCallStateChanged(on)
            | ControllerEvent::EmergencyModeChanged(on) => {
                format!("{} on={on}", self.name())
            }
            ControllerEvent::RecoveryRestart(reason) => {
                format!("{} reason={reason}", self.name())
            }
            _ => self.name().to_string(),
        }
    }
}

#[cfg(test)]
#[path = "event_tests.rs"]
mod tests;
