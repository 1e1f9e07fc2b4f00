// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Wires a [`Controller`] and a [`Warden`] into the two independent
//! dispatcher tasks §5 calls for, and exposes the inbound policy surface of
//! §6 as plain async methods.
//!
//! Construction order resolves the Controller/Warden cyclic reference the
//! same way §9's "Cyclic dependency (Warden ↔ Recovery)" note prescribes for
//! the Warden/Recovery cycle: build both buses first, hand each side the
//! other's handle, then construct the owners. Neither `Controller::new` nor
//! `Warden::new` needs the other's concrete type — only a handle/trait
//! object — so there is no unsafe late-binding or global injector required.

use std::sync::Arc;
use std::time::Duration;

use wmo_core::{ControllerEvent, EventBus, EventBusHandle, PolicySnapshot, SoftApConfig, SoftApPurpose};

use crate::collaborators::{BatteryCollaborator, DiagnosticCollaborator, NoopCollaborator, RecoveryCollaborator, ScanCollaborator};
use crate::controller::Controller;
use crate::mode_manager::{ManagerFactory, SimulatedManagerFactory};
use crate::warden::Warden;

/// Everything [`Runtime::spawn`] needs beyond the env-driven defaults.
///
/// Defaults to the production [`NoopCollaborator`] for all four collaborator
/// traits and a [`SimulatedManagerFactory`] built from `env.rs`; tests
/// substitute fakes through [`RuntimeBuilder`] instead of constructing a
/// `Runtime` by hand.
pub struct RuntimeBuilder<F: ManagerFactory> {
    factory: F,
    scan: Arc<dyn ScanCollaborator>,
    battery: Arc<dyn BatteryCollaborator>,
    diagnostic: Arc<dyn DiagnosticCollaborator>,
    recovery: Arc<dyn RecoveryCollaborator>,
    inputs: PolicySnapshot,
    disable_wifi_in_emergency: bool,
}

impl RuntimeBuilder<SimulatedManagerFactory> {
    /// The production default: simulated managers timed from the environment
    /// (`env.rs`), logging no-op collaborators, and an all-`false`
    /// [`PolicySnapshot`] (the process starts with wifi off, airplane off,
    /// scanning unavailable — the caller is expected to push real values in
    /// immediately after spawning).
    pub fn new() -> Self {
        Self {
            factory: SimulatedManagerFactory::from_env(),
            scan: Arc::new(NoopCollaborator),
            battery: Arc::new(NoopCollaborator),
            diagnostic: Arc::new(NoopCollaborator),
            recovery: Arc::new(NoopCollaborator),
            inputs: PolicySnapshot { recovery_delay_ms: crate::env::recovery_delay().as_millis() as u64, ..PolicySnapshot::default() },
            disable_wifi_in_emergency: crate::env::disable_wifi_in_emergency(),
        }
    }
}

impl Default for RuntimeBuilder<SimulatedManagerFactory> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: ManagerFactory> RuntimeBuilder<F> {
    /// Swap in a different manager factory (tests use [`crate::mode_manager::fake::FakeManagerFactory`]).
    pub fn with_factory<G: ManagerFactory>(self, factory: G) -> RuntimeBuilder<G> {
        RuntimeBuilder {
            factory,
            scan: self.scan,
            battery: self.battery,
            diagnostic: self.diagnostic,
            recovery: self.recovery,
            inputs: self.inputs,
            disable_wifi_in_emergency: self.disable_wifi_in_emergency,
        }
    }

    pub fn with_scan(mut self, scan: Arc<dyn ScanCollaborator>) -> Self {
        self.scan = scan;
        self
    }

    pub fn with_battery(mut self, battery: Arc<dyn BatteryCollaborator>) -> Self {
        self.battery = battery;
        self
    }

    pub fn with_diagnostic(mut self, diagnostic: Arc<dyn DiagnosticCollaborator>) -> Self {
        self.diagnostic = diagnostic;
        self
    }

    pub fn with_recovery(mut self, recovery: Arc<dyn RecoveryCollaborator>) -> Self {
        self.recovery = recovery;
        self
    }

    pub fn with_inputs(mut self, inputs: PolicySnapshot) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_disable_wifi_in_emergency(mut self, value: bool) -> Self {
        self.disable_wifi_in_emergency = value;
        self
    }

    /// Construct both buses, wire the Controller/Warden handles to each
    /// other, spawn each dispatcher as its own `tokio` task (§5: one
    /// single-threaded loop per component), and return the inbound handle.
    pub fn spawn(self) -> Runtime {
        let (controller_bus, controller_handle): (EventBus<ControllerEvent>, _) = EventBus::new();
        let (warden_bus, warden_handle) = EventBus::new();

        let controller_listener: Arc<dyn crate::warden::ControllerListener> =
            Arc::new(controller_handle.clone());

        let controller_diagnostic = Arc::clone(&self.diagnostic);
        let warden = Warden::new(
            self.factory,
            warden_bus,
            controller_listener,
            self.scan,
            self.battery,
            self.diagnostic,
            self.recovery,
        );
        let controller = Controller::new(
            warden_handle,
            controller_bus,
            controller_diagnostic,
            self.inputs,
            self.disable_wifi_in_emergency,
        );

        let inbound = controller_handle;
        let controller_task = tokio::spawn(controller.run());
        let warden_task = tokio::spawn(warden.run());

        Runtime { inbound, controller_task, warden_task }
    }
}

/// A running Controller/Warden pair plus the inbound handle external policy
/// sources drive it through (§6 "Inbound to Controller").
///
/// Dropping every clone of the handle lets both dispatch loops observe their
/// channel close and exit `run()`'s loop; `shutdown` offers an explicit,
/// awaitable version of the same thing.
pub struct Runtime {
    inbound: EventBusHandle<ControllerEvent>,
    controller_task: tokio::task::JoinHandle<()>,
    warden_task: tokio::task::JoinHandle<()>,
}

impl Runtime {
    pub fn builder() -> RuntimeBuilder<SimulatedManagerFactory> {
        RuntimeBuilder::new()
    }

    /// A cloneable handle for injecting events from multiple external
    /// sources (settings observer, telephony listener, ...) concurrently;
    /// per-producer ordering is still preserved (§4.1).
    pub fn handle(&self) -> EventBusHandle<ControllerEvent> {
        self.inbound.clone()
    }

    pub fn wifi_toggled(&self) {
        self.inbound.send(ControllerEvent::WifiToggled);
    }

    pub fn airplane_toggled(&self) {
        self.inbound.send(ControllerEvent::AirplaneToggled);
    }

    pub fn scan_always_changed(&self) {
        self.inbound.send(ControllerEvent::ScanAlwaysChanged);
    }

    pub fn set_ap(&self, enable: bool, purpose: SoftApPurpose, config: Option<SoftApConfig>) {
        self.inbound.send(ControllerEvent::SetAp { enable, purpose, config });
    }

    pub fn emergency_call_state_changed(&self, on: bool) {
        self.inbound.send(ControllerEvent::EmergencyCallStateChanged(on));
    }

    pub fn emergency_mode_changed(&self, on: bool) {
        self.inbound.send(ControllerEvent::EmergencyModeChanged(on));
    }

    pub fn recovery_restart(&self, reason: wmo_core::RecoveryReason) {
        self.inbound.send(ControllerEvent::RecoveryRestart(reason));
    }

    pub fn recovery_disable(&self) {
        self.inbound.send(ControllerEvent::RecoveryDisable);
    }

    pub fn sta_start_failure(&self) {
        self.inbound.send(ControllerEvent::StaStartFailure);
    }

    pub fn sta_stopped(&self) {
        self.inbound.send(ControllerEvent::StaStopped);
    }

    pub fn scanning_stopped(&self) {
        self.inbound.send(ControllerEvent::ScanningStopped);
    }

    pub fn ap_stopped(&self) {
        self.inbound.send(ControllerEvent::ApStopped);
    }

    /// Drop every handle this `Runtime` owns and wait (bounded by `timeout`)
    /// for both dispatch loops to observe the close and return. Manager
    /// tasks spawned by the Warden are not joined here — they self-terminate
    /// once their own listener's channel closes.
    pub async fn shutdown(self, timeout: Duration) {
        let Runtime { inbound, controller_task, warden_task } = self;
        drop(inbound);
        let _ = tokio::time::timeout(timeout, async {
            let _ = controller_task.await;
            let _ = warden_task.await;
        })
        .await;
    }
}

#[cfg(test)]
#[path = "runtime_tests.rs"]
mod tests;
