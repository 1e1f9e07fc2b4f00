// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared test fixtures: a [`PolicySnapshot`] builder and `proptest`
//! strategies for generating valid-looking [`ControllerEvent`] sequences,
//! used by the Warden/Controller property tests in `wmo-daemon` (§8).

use crate::event::ControllerEvent;
use crate::mode::SoftApPurpose;
use crate::policy::{PolicySnapshot, RecoveryReason};
use proptest::prelude::*;

crate::builder! {
    pub struct PolicySnapshotBuilder => PolicySnapshot {
        set {
            wifi_toggled: bool = false,
            airplane_mode: bool = false,
            scan_always_available: bool = false,
            location_mode: bool = false,
            emergency_depth: u32 = 0,
            recovery_delay_ms: u64 = 0,
        }
    }
}

pub fn arb_softap_purpose() -> impl Strategy<Value = SoftApPurpose> {
    prop_oneof![Just(SoftApPurpose::Tethered), Just(SoftApPurpose::LocalOnly)]
}

pub fn arb_recovery_reason() -> impl Strategy<Value = RecoveryReason> {
    prop_oneof![
        Just(RecoveryReason::LastResortWatchdog),
        Just(RecoveryReason::NativeDaemonFailure),
        Just(RecoveryReason::HalFailure),
        Just(RecoveryReason::WifiNativeFailure),
        Just(RecoveryReason::Stack),
        Just(RecoveryReason::Other),
    ]
}

/// A single controller-facing event, excluding the Warden-relayed semantic
/// events (`StaStartFailure`, `StaStopped`, ...) since those are only ever
/// produced internally, never injected as test input.
pub fn arb_controller_event() -> impl Strategy<Value = ControllerEvent> {
    prop_oneof![
        Just(ControllerEvent::WifiToggled),
        Just(ControllerEvent::AirplaneToggled),
        Just(ControllerEvent::ScanAlwaysChanged),
        any::<bool>().prop_map(ControllerEvent::EmergencyCallStateChanged),
        any::<bool>().prop_map(ControllerEvent::EmergencyModeChanged),
        arb_recovery_reason().prop_map(ControllerEvent::RecoveryRestart),
        Just(ControllerEvent::RecoveryDisable),
        (any::<bool>(), arb_softap_purpose()).prop_map(|(enable, purpose)| {
            ControllerEvent::SetAp { enable, purpose, config: None }
        }),
    ]
}

/// A bounded sequence of controller events, for invariant-style property
/// checks over "any sequence of valid inputs" (§8 invariants 1-4).
pub fn arb_controller_event_sequence(max_len: usize) -> impl Strategy<Value = Vec<ControllerEvent>> {
    proptest::collection::vec(arb_controller_event(), 0..=max_len)
}
