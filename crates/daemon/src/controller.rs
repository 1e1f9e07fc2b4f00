// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Controller: outer policy state machine (§4.4).
//!
//! Modeled per §9's guidance for a hierarchical FSM without a message-pump
//! library: `Emergency` aside, every state either fully handles an event or
//! falls through to a shared `Default` handler (`handle_via_default`) rather
//! than a literal parent-pointer walk, since there is exactly one level of
//! nesting here.

use std::sync::Arc;

use wmo_core::{ControllerEvent, EventBus, EventBusHandle, PolicySnapshot, SoftApPurpose};

use crate::collaborators::DiagnosticCollaborator;
use crate::warden::WardenHandle;

/// The Controller's active state (§4.4). `Default` is not a state an instance
/// ever occupies — it is the shared fallback path every other state bubbles
/// unconsumed events to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControllerState {
    StaDisabled,
    StaEnabled,
    StaDisabledWithScan,
    Emergency,
}

/// Owns the Controller's dispatcher, its policy-input snapshot, and the
/// handle it issues mode-change intents through.
pub struct Controller<W: WardenHandle> {
    warden: W,
    diagnostic: Arc<dyn DiagnosticCollaborator>,
    bus: EventBus<ControllerEvent>,
    inputs: PolicySnapshot,
    disable_wifi_in_emergency: bool,
    state: ControllerState,
}

impl<W: WardenHandle> Controller<W> {
    /// `inputs` is sampled once at construction to pick the initial state
    /// (§4.4 "Initial state"); the constructor also runs that state's entry
    /// action so the Warden is brought up to match before the first event.
    ///
    /// Takes its bus rather than constructing one, mirroring
    /// [`crate::warden::Warden::new`] — a caller wires both components'
    /// handles to each other before either is fully constructed.
    pub fn new(
        warden: W,
        bus: EventBus<ControllerEvent>,
        diagnostic: Arc<dyn DiagnosticCollaborator>,
        inputs: PolicySnapshot,
        disable_wifi_in_emergency: bool,
    ) -> Self {
        let state = if inputs.scan_only_available() {
            ControllerState::StaDisabledWithScan
        } else {
            ControllerState::StaDisabled
        };
        let mut controller = Self { warden, diagnostic, bus, inputs, disable_wifi_in_emergency, state };
        controller.run_entry_action(state);
        controller
    }

    pub fn handle(&self) -> EventBusHandle<ControllerEvent> {
        self.bus.handle()
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn inputs(&self) -> PolicySnapshot {
        self.inputs
    }

    pub fn set_wifi_toggled(&mut self, value: bool) {
        self.inputs.wifi_toggled = value;
    }

    pub fn set_airplane_mode(&mut self, value: bool) {
        self.inputs.airplane_mode = value;
    }

    pub fn set_scan_always_available(&mut self, value: bool) {
        self.inputs.scan_always_available = value;
    }

    pub fn set_location_mode(&mut self, value: bool) {
        self.inputs.location_mode = value;
    }

    pub fn set_recovery_delay_ms(&mut self, value: u64) {
        self.inputs.recovery_delay_ms = wmo_core::clamp_recovery_delay(value);
    }

    /// Runs the dispatch loop to completion (until every producer handle has
    /// been dropped). Intended to run as its own `tokio` task, independent of
    /// the Warden's (§5).
    pub async fn run(mut self) {
        while let Some(dispatched) = self.bus.recv().await {
            let event = dispatched.into_inner();
            tracing::trace!(event = %event.log_summary(), state = ?self.state, "controller dispatch");
            self.handle_event(event).await;
        }
    }

    async fn handle_event(&mut self, event: ControllerEvent) {
        match self.state {
            ControllerState::StaDisabled => self.handle_in_sta_disabled(event).await,
            ControllerState::StaEnabled => self.handle_in_sta_enabled(event).await,
            ControllerState::StaDisabledWithScan => self.handle_in_sta_disabled_with_scan(event).await,
            ControllerState::Emergency => self.handle_in_emergency(event).await,
        }
    }

    fn transition_to(&mut self, next: ControllerState) {
        self.state = next;
        self.run_entry_action(next);
        self.bus.replay_deferred();
    }

    fn run_entry_action(&mut self, state: ControllerState) {
        match state {
            ControllerState::StaDisabled => self.warden.disable_wifi(),
            ControllerState::StaEnabled => self.warden.enter_client_mode(),
            ControllerState::StaDisabledWithScan => self.warden.enter_scan_only_mode(),
            ControllerState::Emergency => {
                self.warden.stop_soft_ap(SoftApPurpose::Unspecified);
                if self.disable_wifi_in_emergency {
                    self.warden.shutdown_wifi();
                }
                self.inputs.emergency_depth = 1;
            }
        }
    }

    /// Where `wifi on ⇒ StaEnabled; else scanOnlyAvailable ⇒ StaDisabledWithScan;
    /// else StaDisabled` is re-derived, shared by post-emergency and
    /// post-recovery-continue target selection (§4.4).
    fn active_state_from_inputs(&self) -> ControllerState {
        if self.inputs.wifi_toggled {
            ControllerState::StaEnabled
        } else if self.inputs.scan_only_available() {
            ControllerState::StaDisabledWithScan
        } else {
            ControllerState::StaDisabled
        }
    }

    // ---- StaDisabled ----

    async fn handle_in_sta_disabled(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::WifiToggled => {
                if self.inputs.wifi_toggled {
                    self.transition_to(ControllerState::StaEnabled);
                } else if self.inputs.scan_only_available() && self.inputs.airplane_mode {
                    self.transition_to(ControllerState::StaDisabledWithScan);
                }
            }
            ControllerEvent::AirplaneToggled => self.handle_via_default(event).await,
            ControllerEvent::ScanAlwaysChanged => {
                if self.inputs.scan_only_available() {
                    self.transition_to(ControllerState::StaDisabledWithScan);
                }
            }
            ControllerEvent::RecoveryRestartContinue => {
                self.transition_to(self.active_state_from_inputs());
            }
            ControllerEvent::DeferredRecoveryRestart => {
                let delay = std::time::Duration::from_millis(self.inputs.recovery_delay_ms);
                self.bus.handle().send_delayed(ControllerEvent::RecoveryRestartContinue, delay);
            }
            ControllerEvent::SetAp { .. } | ControllerEvent::RecoveryRestart(_) | ControllerEvent::RecoveryDisable => {
                self.handle_via_default(event).await;
            }
            other => self.handle_via_default(other).await,
        }
    }

    // ---- StaEnabled ----

    async fn handle_in_sta_enabled(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::WifiToggled => {
                if !self.inputs.wifi_toggled {
                    let next = if self.inputs.scan_only_available() {
                        ControllerState::StaDisabledWithScan
                    } else {
                        ControllerState::StaDisabled
                    };
                    self.transition_to(next);
                }
            }
            ControllerEvent::AirplaneToggled => {
                if self.inputs.airplane_mode {
                    self.handle_via_default(event).await;
                }
                // else: handled locally as a no-op.
            }
            ControllerEvent::StaStartFailure => {
                let next = if self.inputs.scan_only_available() {
                    ControllerState::StaDisabledWithScan
                } else {
                    ControllerState::StaDisabled
                };
                self.transition_to(next);
            }
            ControllerEvent::StaStopped => self.transition_to(ControllerState::StaDisabled),
            ControllerEvent::SetAp { .. } | ControllerEvent::RecoveryRestart(_) | ControllerEvent::RecoveryDisable => {
                self.handle_via_default(event).await;
            }
            other => self.handle_via_default(other).await,
        }
    }

    // ---- StaDisabledWithScan ----

    async fn handle_in_sta_disabled_with_scan(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::WifiToggled => {
                if self.inputs.wifi_toggled {
                    self.transition_to(ControllerState::StaEnabled);
                }
            }
            ControllerEvent::AirplaneToggled => self.handle_via_default(event).await,
            ControllerEvent::ScanAlwaysChanged => {
                if !self.inputs.scan_only_available() {
                    self.transition_to(ControllerState::StaDisabled);
                }
            }
            ControllerEvent::ScanningStopped => self.transition_to(ControllerState::StaDisabled),
            ControllerEvent::SetAp { .. } | ControllerEvent::RecoveryRestart(_) | ControllerEvent::RecoveryDisable => {
                self.handle_via_default(event).await;
            }
            other => self.handle_via_default(other).await,
        }
    }

    // ---- Emergency ----

    async fn handle_in_emergency(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::EmergencyCallStateChanged(true) | ControllerEvent::EmergencyModeChanged(true) => {
                self.inputs.emergency_depth += 1;
            }
            ControllerEvent::EmergencyCallStateChanged(false) | ControllerEvent::EmergencyModeChanged(false) => {
                self.inputs.emergency_depth = self.inputs.emergency_depth.saturating_sub(1);
                if self.inputs.emergency_depth == 0 {
                    self.transition_to(self.active_state_from_inputs());
                }
            }
            // Every other event is inhibited while an emergency is active
            // (§8 invariant 5): consumed as a no-op, including AirplaneToggled,
            // ScanAlwaysChanged, StaStartFailure/StaStopped/ScanningStopped,
            // SetAp, ApStopped, RecoveryRestart/RecoveryDisable, and the
            // recovery-continuation messages.
            _ => {}
        }
    }

    // ---- Default (shared fallback) ----

    async fn handle_via_default(&mut self, event: ControllerEvent) {
        match event {
            ControllerEvent::AirplaneToggled => {
                if self.inputs.airplane_mode {
                    self.warden.shutdown_wifi();
                    self.transition_to(ControllerState::StaDisabled);
                } else {
                    self.transition_to(self.active_state_from_inputs());
                }
            }
            ControllerEvent::SetAp { enable, purpose, config } => {
                if enable {
                    self.warden.start_soft_ap(purpose, config.unwrap_or_default());
                } else {
                    self.warden.stop_soft_ap(purpose);
                }
            }
            ControllerEvent::ApStopped => {
                // Only StaDisabled re-evaluates on ApStopped; StaEnabled and
                // StaDisabledWithScan deliberately do not (§9 open question 3).
                if self.state == ControllerState::StaDisabled {
                    self.transition_to(self.active_state_from_inputs());
                }
            }
            ControllerEvent::EmergencyCallStateChanged(true) | ControllerEvent::EmergencyModeChanged(true) => {
                self.inputs.emergency_depth = 1;
                self.transition_to(ControllerState::Emergency);
            }
            ControllerEvent::RecoveryRestart(reason) => {
                // Bug-report capture is only called for under the
                // StaEnabled column of §4.4's table; Default's own cell
                // carries no capture of its own.
                if self.state == ControllerState::StaEnabled && reason.warrants_bug_report() {
                    self.diagnostic.diagnostic_capture(reason).await;
                }
                self.bus.defer(ControllerEvent::DeferredRecoveryRestart);
                // "shutdown → StaDisabled" (§4.4): tear down any concurrent
                // SoftAp managers too, not just the Client/ScanOnly manager
                // StaDisabled's entry action would stop on its own.
                self.warden.shutdown_wifi();
                self.transition_to(ControllerState::StaDisabled);
            }
            ControllerEvent::RecoveryDisable => {
                self.warden.shutdown_wifi();
                self.transition_to(ControllerState::StaDisabled);
            }
            // Every ControllerEvent variant is accounted for above or in the
            // calling state's own arm, so this is unreachable in practice;
            // it exists to honor §7's "unhandled message in Default is a
            // programming error" contract if the event taxonomy ever grows
            // without a matching Default arm.
            other => {
                let err = wmo_core::CoreError::UnhandledDefaultEvent(other.name().to_string());
                debug_assert!(false, "{err}");
                tracing::error!(event = %err, "unhandled event reached Default state");
            }
        }
    }
}

#[cfg(test)]
#[path = "controller_tests.rs"]
mod tests;
