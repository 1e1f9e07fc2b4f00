// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Operating mode and SoftAp purpose types.
//!
//! `OperatingMode` is the enumerated intent the Controller decides between;
//! multiple `SoftAp` instances may coexist with distinct purposes, while at
//! most one of `{Client, ScanOnly, Disabled}` is active at a time.

use serde::{Deserialize, Serialize};

/// Why a soft access point is being requested.
///
/// `Unspecified` is only a valid purpose for *stop* operations (it means
/// "every soft-ap purpose currently running"); requesting a start with
/// `Unspecified` is rejected at the boundary (see [`crate::error::CoreError`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SoftApPurpose {
    Tethered,
    LocalOnly,
    Unspecified,
}

crate::simple_display! {
    SoftApPurpose {
        Tethered => "tethered",
        LocalOnly => "local_only",
        Unspecified => "unspecified",
    }
}

impl SoftApPurpose {
    /// Purposes a SoftAp manager may actually run under.
    pub const STARTABLE: [SoftApPurpose; 2] = [SoftApPurpose::Tethered, SoftApPurpose::LocalOnly];

    pub fn is_startable(self) -> bool {
        matches!(self, SoftApPurpose::Tethered | SoftApPurpose::LocalOnly)
    }

    /// Whether `self` (as a stop request) matches a running manager's purpose.
    pub fn matches(self, running: SoftApPurpose) -> bool {
        self == SoftApPurpose::Unspecified || self == running
    }
}

/// Opaque soft-ap configuration payload.
///
/// Channel/band/credentials live in the external SoftAp configuration-storage
/// collaborator (out of scope, §1); the core only carries this value through
/// to the manager factory unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SoftApConfig {
    pub opaque: Vec<u8>,
}

/// The high-level intent the Controller decides between.
///
/// `SoftAp` carries a purpose because several soft-ap instances with
/// distinct purposes can coexist; the STA-side variants are mutually
/// exclusive with each other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum OperatingMode {
    Disabled,
    Client,
    ScanOnly,
    SoftAp(SoftApPurpose),
}

crate::simple_display! {
    OperatingMode {
        Disabled => "disabled",
        Client => "client",
        ScanOnly => "scan_only",
        SoftAp(..) => "soft_ap",
    }
}

#[cfg(test)]
#[path = "mode_tests.rs"]
mod tests;
