// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Concrete mode managers (§4.2).
//!
//! The spec treats hardware bring-up as opaque; these managers simulate it
//! with a configurable delay before reporting `Ready` or `Failed` back
//! through their bound [`ManagerListener`] — the same "spawn, then report
//! completion asynchronously through a channel" shape as the coop adapter's
//! process-spawn-plus-reaper pattern.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;
use wmo_core::{ManagerId, ManagerKind, ManagerReport, ScanContribution, SoftApPurpose};

use crate::warden::WardenCommand;

/// A manager's bound callback channel, tagged with its own id so the Warden
/// can apply the listener-freshness check (§4.3) before acting on a report.
#[derive(Clone)]
pub struct ManagerListener {
    manager_id: ManagerId,
    bus: wmo_core::EventBusHandle<WardenCommand>,
}

impl ManagerListener {
    pub fn new(manager_id: ManagerId, bus: wmo_core::EventBusHandle<WardenCommand>) -> Self {
        Self { manager_id, bus }
    }

    pub fn report(&self, report: ManagerReport) {
        self.bus.send(WardenCommand::ManagerCallback(
            wmo_core::ManagerCallback::new(self.manager_id, report),
        ));
    }
}

/// Uniform lifecycle contract every mode manager implements (§4.2).
///
/// `start`/`stop` are idempotent and asynchronous: they kick off the
/// transition and return immediately, reporting completion later through the
/// bound [`ManagerListener`] rather than via their own return value.
#[async_trait]
pub trait ModeManager: Send + Sync {
    fn id(&self) -> ManagerId;
    fn kind(&self) -> ManagerKind;

    /// Only meaningful for `SoftAp` managers.
    fn purpose(&self) -> Option<SoftApPurpose> {
        None
    }

    /// Stable for the duration of `Ready`; the Warden only consults this for
    /// managers it currently considers ready.
    fn scan_contribution(&self) -> ScanContribution;

    async fn start(&self);
    async fn stop(&self);
}

/// How a simulated manager's bring-up should resolve, for exercising the
/// Warden/Controller's failure paths without real hardware.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ManagerBehavior {
    /// Reaches `Ready` after `start_delay`, then runs indefinitely.
    Healthy,
    /// Reaches `Failed` after `start_delay` instead of `Ready`.
    FailOnStart,
    /// Reaches `Ready` after `start_delay`, then unsolicited `Failed` after
    /// `then_fail_after` — models underlying-daemon death (§4.3, §9 supplement).
    FailAfterReady { then_fail_after: Duration },
}

struct SimulatedManager {
    id: ManagerId,
    kind: ManagerKind,
    purpose: Option<SoftApPurpose>,
    scan_contribution: ScanContribution,
    listener: ManagerListener,
    start_delay: Duration,
    stop_delay: Duration,
    behavior: ManagerBehavior,
    started: AtomicBool,
    stopping: AtomicBool,
}

impl SimulatedManager {
    #[allow(clippy::too_many_arguments)]
    fn new(
        kind: ManagerKind,
        purpose: Option<SoftApPurpose>,
        scan_contribution: ScanContribution,
        listener: ManagerListener,
        start_delay: Duration,
        stop_delay: Duration,
        behavior: ManagerBehavior,
    ) -> Arc<Self> {
        Arc::new(Self {
            id: listener.manager_id,
            kind,
            purpose,
            scan_contribution,
            listener,
            start_delay,
            stop_delay,
            behavior,
            started: AtomicBool::new(false),
            stopping: AtomicBool::new(false),
        })
    }
}

#[async_trait]
impl ModeManager for SimulatedManager {
    fn id(&self) -> ManagerId {
        self.id
    }

    fn kind(&self) -> ManagerKind {
        self.kind
    }

    fn purpose(&self) -> Option<SoftApPurpose> {
        self.purpose
    }

    fn scan_contribution(&self) -> ScanContribution {
        self.scan_contribution
    }

    async fn start(&self) {
        // Idempotent: a second start() while already starting/started is a no-op.
        if self.started.swap(true, Ordering::SeqCst) {
            return;
        }

        let listener = self.listener.clone();
        let delay = self.start_delay;
        let behavior = self.behavior;
        let id = self.id;
        let kind = self.kind;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            match behavior {
                ManagerBehavior::Healthy => {
                    tracing::info!(%id, %kind, "manager ready");
                    listener.report(ManagerReport::Ready);
                }
                ManagerBehavior::FailOnStart => {
                    tracing::warn!(%id, %kind, "manager failed to start");
                    listener.report(ManagerReport::Unknown);
                }
                ManagerBehavior::FailAfterReady { then_fail_after } => {
                    tracing::info!(%id, %kind, "manager ready");
                    listener.report(ManagerReport::Ready);
                    tokio::time::sleep(then_fail_after).await;
                    tracing::warn!(%id, %kind, "manager failed after reaching ready");
                    listener.report(ManagerReport::Unknown);
                }
            }
        });
    }

    async fn stop(&self) {
        // Idempotent: stopping an already-stopping (or never-started) manager is a no-op.
        if self.stopping.swap(true, Ordering::SeqCst) {
            return;
        }

        let listener = self.listener.clone();
        let delay = self.stop_delay;
        let id = self.id;
        let kind = self.kind;

        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            tracing::info!(%id, %kind, "manager stopped");
            listener.report(ManagerReport::Disabled);
        });
    }
}

/// Constructs concrete managers, bound to a fresh listener, on the Warden's
/// behalf (§6 "manager factory contract"). Substitutable in tests.
pub trait ManagerFactory: Send + Sync {
    fn make_client(&self, listener: ManagerListener) -> Arc<dyn ModeManager>;
    fn make_scan_only(&self, listener: ManagerListener) -> Arc<dyn ModeManager>;
    fn make_soft_ap(&self, listener: ManagerListener, purpose: SoftApPurpose) -> Arc<dyn ModeManager>;
}

/// Default factory: every manager simulates hardware bring-up with
/// configurable delays (§5's env-driven timing knobs) and succeeds.
pub struct SimulatedManagerFactory {
    pub client_start_delay: Duration,
    pub scan_only_start_delay: Duration,
    pub soft_ap_start_delay: Duration,
    pub stop_delay: Duration,
}

impl SimulatedManagerFactory {
    pub fn from_env() -> Self {
        Self {
            client_start_delay: crate::env::client_start_delay(),
            scan_only_start_delay: crate::env::scan_only_start_delay(),
            soft_ap_start_delay: crate::env::soft_ap_start_delay(),
            stop_delay: crate::env::manager_stop_delay(),
        }
    }
}

impl ManagerFactory for SimulatedManagerFactory {
    fn make_client(&self, listener: ManagerListener) -> Arc<dyn ModeManager> {
        SimulatedManager::new(
            ManagerKind::Client,
            None,
            ScanContribution::WithHidden,
            listener,
            self.client_start_delay,
            self.stop_delay,
            ManagerBehavior::Healthy,
        )
    }

    fn make_scan_only(&self, listener: ManagerListener) -> Arc<dyn ModeManager> {
        SimulatedManager::new(
            ManagerKind::ScanOnly,
            None,
            ScanContribution::WithoutHidden,
            listener,
            self.scan_only_start_delay,
            self.stop_delay,
            ManagerBehavior::Healthy,
        )
    }

    fn make_soft_ap(&self, listener: ManagerListener, purpose: SoftApPurpose) -> Arc<dyn ModeManager> {
        SimulatedManager::new(
            ManagerKind::SoftAp,
            Some(purpose),
            ScanContribution::None,
            listener,
            self.soft_ap_start_delay,
            self.stop_delay,
            ManagerBehavior::Healthy,
        )
    }
}

#[cfg(any(test, feature = "test-support"))]
pub mod fake {
    use super::*;
    use parking_lot::Mutex;
    use std::collections::HashMap;

    /// Scripted per-kind behavior, settable before wiring the factory into a
    /// Warden, so a test can force a particular manager kind to fail.
    #[derive(Clone)]
    pub struct FakeManagerFactory {
        behavior: Arc<Mutex<HashMap<ManagerKind, ManagerBehavior>>>,
        delay: Duration,
    }

    impl Default for FakeManagerFactory {
        fn default() -> Self {
            Self { behavior: Arc::new(Mutex::new(HashMap::new())), delay: Duration::from_millis(1) }
        }
    }

    impl FakeManagerFactory {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn set_behavior(&self, kind: ManagerKind, behavior: ManagerBehavior) {
            self.behavior.lock().insert(kind, behavior);
        }

        fn behavior_for(&self, kind: ManagerKind) -> ManagerBehavior {
            self.behavior.lock().get(&kind).copied().unwrap_or(ManagerBehavior::Healthy)
        }
    }

    impl ManagerFactory for FakeManagerFactory {
        fn make_client(&self, listener: ManagerListener) -> Arc<dyn ModeManager> {
            SimulatedManager::new(
                ManagerKind::Client,
                None,
                ScanContribution::WithHidden,
                listener,
                self.delay,
                self.delay,
                self.behavior_for(ManagerKind::Client),
            )
        }

        fn make_scan_only(&self, listener: ManagerListener) -> Arc<dyn ModeManager> {
            SimulatedManager::new(
                ManagerKind::ScanOnly,
                None,
                ScanContribution::WithoutHidden,
                listener,
                self.delay,
                self.delay,
                self.behavior_for(ManagerKind::ScanOnly),
            )
        }

        fn make_soft_ap(
            &self,
            listener: ManagerListener,
            purpose: SoftApPurpose,
        ) -> Arc<dyn ModeManager> {
            SimulatedManager::new(
                ManagerKind::SoftAp,
                Some(purpose),
                ScanContribution::None,
                listener,
                self.delay,
                self.delay,
                self.behavior_for(ManagerKind::SoftAp),
            )
        }
    }
}

#[cfg(test)]
#[path = "mode_manager_tests.rs"]
mod tests;
