// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized environment variable access for the daemon crate.

use std::time::Duration;
use wmo_core::{clamp_recovery_delay, MAX_RECOVERY_DELAY_MS};

/// `recoveryDelay`, clamped to `[0, 4000]` ms at startup (§4.4).
///
/// `WMO_RECOVERY_DELAY_MS` overrides the default of 2000ms; out-of-range
/// values are clamped rather than rejected, matching spec's "clamped to"
/// wording rather than "validated against".
pub fn recovery_delay() -> Duration {
    let configured = std::env::var("WMO_RECOVERY_DELAY_MS")
        .ok()
        .and_then(|s| s.parse::<u64>().ok())
        .unwrap_or(2_000);
    Duration::from_millis(clamp_recovery_delay(configured))
}

pub const fn max_recovery_delay() -> Duration {
    Duration::from_millis(MAX_RECOVERY_DELAY_MS)
}

/// Whether `Emergency.enter` also calls `Warden.shutdownWifi()` (§4.4).
/// Defaults to `true` — the conservative choice for an emergency-call state.
pub fn disable_wifi_in_emergency() -> bool {
    std::env::var("WMO_DISABLE_WIFI_IN_EMERGENCY")
        .ok()
        .map(|v| v != "0" && !v.eq_ignore_ascii_case("false"))
        .unwrap_or(true)
}

/// Simulated hardware bring-up delay for a Client manager's `start()`.
pub fn client_start_delay() -> Duration {
    manager_timing_ms("WMO_CLIENT_START_MS", 150)
}

/// Simulated hardware bring-up delay for a ScanOnly manager's `start()`.
pub fn scan_only_start_delay() -> Duration {
    manager_timing_ms("WMO_SCAN_ONLY_START_MS", 100)
}

/// Simulated hardware bring-up delay for a SoftAp manager's `start()`.
pub fn soft_ap_start_delay() -> Duration {
    manager_timing_ms("WMO_SOFT_AP_START_MS", 200)
}

/// Simulated teardown delay shared by every manager kind's `stop()`.
pub fn manager_stop_delay() -> Duration {
    manager_timing_ms("WMO_MANAGER_STOP_MS", 50)
}

fn manager_timing_ms(var: &str, default_ms: u64) -> Duration {
    let ms = std::env::var(var).ok().and_then(|s| s.parse::<u64>().ok()).unwrap_or(default_ms);
    Duration::from_millis(ms)
}

#[cfg(test)]
#[path = "env_tests.rs"]
mod tests;
