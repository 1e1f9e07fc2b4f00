// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! The Warden: owns the live set of mode managers, drives their lifecycle,
//! and aggregates cross-mode side effects (§4.3).

use std::collections::HashMap;
use std::sync::Arc;

use wmo_core::{
    ControllerEvent, EventBus, EventBusHandle, ManagerCallback, ManagerId, ManagerKind,
    ManagerReport, SoftApConfig, SoftApPurpose,
};

use crate::collaborators::{BatteryCollaborator, DiagnosticCollaborator, RecoveryCollaborator, ScanCollaborator};
use crate::mode_manager::{ManagerFactory, ManagerListener, ModeManager};

/// Commands the Warden's single dispatcher accepts: the outbound-from-
/// Controller operations (§6) and the inbound `stateChanged` callback from a
/// manager, folded onto one bus so both sources are strictly serialized.
pub enum WardenCommand {
    EnterClientMode,
    EnterScanOnlyMode,
    DisableWifi,
    StartSoftAp { purpose: SoftApPurpose, config: SoftApConfig },
    StopSoftAp { purpose: SoftApPurpose },
    ShutdownWifi,
    ManagerCallback(ManagerCallback),
}

/// The Warden's internal mini-FSM (§4.3): mutually exclusive among no
/// Client/ScanOnly manager, exactly one Client manager, or exactly one
/// ScanOnly manager. SoftAp managers are tracked separately and can coexist
/// with any of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WardenState {
    WifiDisabled,
    ClientActive,
    ScanOnlyActive,
}

/// The Warden's outbound command surface, as the Controller sees it (§6).
/// A trait (rather than a concrete type) so the Controller can hold it
/// without depending on the Warden's concrete type.
pub trait WardenHandle: Send + Sync {
    fn enter_client_mode(&self);
    fn enter_scan_only_mode(&self);
    fn disable_wifi(&self);
    fn start_soft_ap(&self, purpose: SoftApPurpose, config: SoftApConfig);
    fn stop_soft_ap(&self, purpose: SoftApPurpose);
    fn shutdown_wifi(&self);
}

impl WardenHandle for EventBusHandle<WardenCommand> {
    fn enter_client_mode(&self) {
        self.send(WardenCommand::EnterClientMode);
    }

    fn enter_scan_only_mode(&self) {
        self.send(WardenCommand::EnterScanOnlyMode);
    }

    fn disable_wifi(&self) {
        self.send(WardenCommand::DisableWifi);
    }

    fn start_soft_ap(&self, purpose: SoftApPurpose, config: SoftApConfig) {
        self.send(WardenCommand::StartSoftAp { purpose, config });
    }

    fn stop_soft_ap(&self, purpose: SoftApPurpose) {
        self.send(WardenCommand::StopSoftAp { purpose });
    }

    fn shutdown_wifi(&self) {
        self.send(WardenCommand::ShutdownWifi);
    }
}

/// The per-mode semantic events the Warden relays upward to the Controller
/// (§6's `clientModeState`/`scanOnlyState`/`softApState`, collapsed into the
/// named events the Controller's dispatch table already expects — see
/// DESIGN.md for why this translation lives here rather than as raw state).
pub trait ControllerListener: Send + Sync {
    fn notify(&self, event: ControllerEvent);
}

impl ControllerListener for EventBusHandle<ControllerEvent> {
    fn notify(&self, event: ControllerEvent) {
        self.send(event);
    }
}

struct ActiveManager {
    handle: Arc<dyn ModeManager>,
    kind: ManagerKind,
}

/// Owns `activeManagers`, the Warden's internal mini-FSM, and the
/// collaborator handles it emits aggregate signals to.
pub struct Warden<F: ManagerFactory> {
    factory: F,
    bus: EventBus<WardenCommand>,
    controller: Arc<dyn ControllerListener>,
    scan: Arc<dyn ScanCollaborator>,
    battery: Arc<dyn BatteryCollaborator>,
    diagnostic: Arc<dyn DiagnosticCollaborator>,
    recovery: Arc<dyn RecoveryCollaborator>,

    state: WardenState,
    sta_manager: Option<ActiveManager>,
    soft_aps: HashMap<ManagerId, ActiveManager>,

    last_scan_emission: Option<(bool, bool)>,
    last_active_count: usize,
}

impl<F: ManagerFactory> Warden<F> {
    /// Takes its bus rather than constructing one, so a caller can extract
    /// `bus.handle()` and hand it to the Controller as its [`ControllerListener`]
    /// before the Warden itself exists (§9 "Cyclic dependency (Warden ↔ Recovery)").
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        factory: F,
        bus: EventBus<WardenCommand>,
        controller: Arc<dyn ControllerListener>,
        scan: Arc<dyn ScanCollaborator>,
        battery: Arc<dyn BatteryCollaborator>,
        diagnostic: Arc<dyn DiagnosticCollaborator>,
        recovery: Arc<dyn RecoveryCollaborator>,
    ) -> Self {
        Self {
            factory,
            bus,
            controller,
            scan,
            battery,
            diagnostic,
            recovery,
            state: WardenState::WifiDisabled,
            sta_manager: None,
            soft_aps: HashMap::new(),
            last_scan_emission: None,
            last_active_count: 0,
        }
    }

    /// A cloneable handle producers (the Controller, external callers) use
    /// to post [`WardenCommand`]s onto this Warden's dispatcher.
    pub fn handle(&self) -> EventBusHandle<WardenCommand> {
        self.bus.handle()
    }

    pub fn state(&self) -> WardenState {
        self.state
    }

    pub fn soft_ap_count(&self) -> usize {
        self.soft_aps.len()
    }

    pub fn has_sta_manager(&self) -> bool {
        self.sta_manager.is_some()
    }

    fn new_listener(&self) -> ManagerListener {
        ManagerListener::new(ManagerId::next(), self.bus.handle())
    }

    /// Runs the dispatch loop to completion (until every producer handle,
    /// including the Controller's, has been dropped). Intended to run as its
    /// own `tokio` task (§5: one single-threaded dispatcher per component).
    pub async fn run(mut self) {
        while let Some(dispatched) = self.bus.recv().await {
            let command = dispatched.into_inner();
            self.handle_command(command).await;
        }
    }

    async fn handle_command(&mut self, command: WardenCommand) {
        match command {
            WardenCommand::EnterClientMode => self.enter_client_mode().await,
            WardenCommand::EnterScanOnlyMode => self.enter_scan_only_mode().await,
            WardenCommand::DisableWifi => self.disable_wifi().await,
            WardenCommand::StartSoftAp { purpose, config } => {
                self.start_soft_ap(purpose, config).await
            }
            WardenCommand::StopSoftAp { purpose } => self.stop_soft_ap(purpose).await,
            WardenCommand::ShutdownWifi => self.shutdown_wifi().await,
            WardenCommand::ManagerCallback(callback) => self.handle_manager_callback(callback).await,
        }
    }

    async fn enter_client_mode(&mut self) {
        if self.state == WardenState::ClientActive {
            return;
        }
        self.stop_sta_manager().await;
        let listener = self.new_listener();
        let manager = self.factory.make_client(listener);
        manager.start().await;
        self.sta_manager = Some(ActiveManager { handle: manager, kind: ManagerKind::Client });
        self.state = WardenState::ClientActive;
        self.recompute_aggregates().await;
    }

    async fn enter_scan_only_mode(&mut self) {
        if self.state == WardenState::ScanOnlyActive {
            return;
        }
        self.stop_sta_manager().await;
        let listener = self.new_listener();
        let manager = self.factory.make_scan_only(listener);
        manager.start().await;
        self.sta_manager = Some(ActiveManager { handle: manager, kind: ManagerKind::ScanOnly });
        self.state = WardenState::ScanOnlyActive;
        self.recompute_aggregates().await;
        self.battery.scan_mode_active().await;
    }

    async fn disable_wifi(&mut self) {
        if self.state == WardenState::WifiDisabled {
            return;
        }
        self.stop_sta_manager().await;
        self.state = WardenState::WifiDisabled;
        self.recompute_aggregates().await;
    }

    async fn stop_sta_manager(&mut self) {
        if let Some(active) = self.sta_manager.take() {
            active.handle.stop().await;
            // Left out of activeManagers immediately: a late report for this
            // id will fail the listener-freshness check and be dropped.
        }
    }

    /// `startSoftAp(config)` — does not affect the Client/ScanOnly state (§4.3).
    async fn start_soft_ap(&mut self, purpose: SoftApPurpose, config: SoftApConfig) {
        if !purpose.is_startable() {
            tracing::warn!(%purpose, "rejected softap start: purpose not startable");
            return;
        }
        if self.soft_aps.values().any(|m| m.handle.purpose() == Some(purpose)) {
            tracing::warn!(%purpose, "rejected softap start: purpose already running");
            return;
        }
        let listener = self.new_listener();
        let manager = self.factory.make_soft_ap(listener, purpose);
        let id = manager.id();
        manager.start().await;
        let _ = &config; // opaque payload: carried to the factory, not interpreted here
        self.soft_aps.insert(id, ActiveManager { handle: manager, kind: ManagerKind::SoftAp });
        self.recompute_aggregates().await;
    }

    /// `stopSoftAp(purpose | Unspecified)` — signals all matching SoftAp managers.
    async fn stop_soft_ap(&mut self, purpose: SoftApPurpose) {
        let matching: Vec<ManagerId> = self
            .soft_aps
            .iter()
            .filter(|(_, m)| m.handle.purpose().is_some_and(|running| purpose.matches(running)))
            .map(|(id, _)| *id)
            .collect();
        for id in matching {
            if let Some(active) = self.soft_aps.get(&id) {
                active.handle.stop().await;
            }
        }
    }

    /// `shutdownWifi()` — signals stop to every active manager.
    async fn shutdown_wifi(&mut self) {
        self.stop_sta_manager().await;
        let ids: Vec<ManagerId> = self.soft_aps.keys().copied().collect();
        for id in ids {
            if let Some(active) = self.soft_aps.get(&id) {
                active.handle.stop().await;
            }
        }
        // `stop_sta_manager` already removed the Client/ScanOnly manager from
        // `sta_manager`; the SoftAp entries above are still keyed in
        // `soft_aps` until their own `Disabled` report lands. Recompute now
        // so a pure-STA shutdown still emits its battery-off edge instead of
        // waiting on a report for a manager whose stop was already initiated
        // by a different call path.
        self.recompute_aggregates().await;
    }

    async fn handle_manager_callback(&mut self, callback: ManagerCallback) {
        if let Some(active) = &self.sta_manager {
            if active.handle.id() == callback.manager_id {
                self.handle_sta_report(callback.report).await;
                return;
            }
        }
        if self.soft_aps.contains_key(&callback.manager_id) {
            self.handle_soft_ap_report(callback.manager_id, callback.report).await;
            return;
        }
        // Listener freshness (§4.3): a callback from a manager we no longer
        // own — already stopped, already replaced — is silently dropped.
        tracing::trace!(
            manager_id = %callback.manager_id,
            report = %callback.report,
            "dropped callback from stale manager listener"
        );
    }

    async fn handle_sta_report(&mut self, report: ManagerReport) {
        if matches!(report, ManagerReport::Ready) {
            return;
        }
        let Some(active) = self.sta_manager.take() else { return };
        self.recompute_aggregates().await;

        if matches!(report, ManagerReport::Unknown) {
            self.diagnostic.diagnostic_capture(wmo_core::RecoveryReason::NativeDaemonFailure).await;
            self.recovery.recovery_trigger(wmo_core::RecoveryReason::NativeDaemonFailure).await;
        }

        let event = match (active.kind, report) {
            (ManagerKind::Client, ManagerReport::Unknown) => ControllerEvent::StaStartFailure,
            (ManagerKind::Client, ManagerReport::Disabled) => ControllerEvent::StaStopped,
            (ManagerKind::ScanOnly, _) => ControllerEvent::ScanningStopped,
            (ManagerKind::SoftAp, _) => unreachable!("sta_manager is never a SoftAp"),
            (_, ManagerReport::Ready) => unreachable!("handled above"),
        };
        self.controller.notify(event);
    }

    async fn handle_soft_ap_report(&mut self, id: ManagerId, report: ManagerReport) {
        if matches!(report, ManagerReport::Ready) {
            return;
        }
        if self.soft_aps.remove(&id).is_none() {
            return;
        }
        self.recompute_aggregates().await;

        if matches!(report, ManagerReport::Unknown) {
            self.diagnostic.diagnostic_capture(wmo_core::RecoveryReason::NativeDaemonFailure).await;
            self.recovery.recovery_trigger(wmo_core::RecoveryReason::NativeDaemonFailure).await;
        }
        self.controller.notify(ControllerEvent::ApStopped);
    }

    /// Recomputes the aggregate scan-enablement signal and battery edge
    /// after every readiness/membership change (§4.3). Emission is
    /// at-least-once per change and idempotent under equal value.
    async fn recompute_aggregates(&mut self) {
        let scan_enabled = self
            .sta_manager
            .iter()
            .map(|m| &m.handle)
            .chain(self.soft_aps.values().map(|m| &m.handle))
            .any(|m| m.scan_contribution().enables_scan());
        let hidden_enabled = self
            .sta_manager
            .iter()
            .map(|m| &m.handle)
            .chain(self.soft_aps.values().map(|m| &m.handle))
            .any(|m| m.scan_contribution().enables_hidden());

        if self.last_scan_emission != Some((scan_enabled, hidden_enabled)) {
            self.scan.scan_enablement(scan_enabled, hidden_enabled).await;
            self.last_scan_emission = Some((scan_enabled, hidden_enabled));
        }

        let active_count = self.sta_manager.is_some() as usize + self.soft_aps.len();
        if self.last_active_count == 0 && active_count > 0 {
            self.battery.battery_on().await;
        } else if self.last_active_count > 0 && active_count == 0 {
            self.battery.battery_off().await;
        }
        self.last_active_count = active_count;
    }
}

#[cfg(test)]
#[path = "warden_tests.rs"]
mod tests;
