// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error taxonomy (§7).
//!
//! Manager-level failures are never surfaced as `Result` errors across the
//! dispatcher boundary — they arrive as [`crate::event::ManagerReport`]
//! callbacks instead. `CoreError` covers only the boundary-validation and
//! programming-error cases §7 calls out explicitly.

use crate::mode::SoftApPurpose;
use thiserror::Error;

/// Boundary and programming-error failures from the Warden/Controller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A SoftAp start request used a purpose outside `{Tethered, LocalOnly}`.
    /// `Unspecified` is only valid for stop operations (§7, Invalid input).
    #[error("softap purpose {0} cannot be started")]
    UnstartableSoftApPurpose(SoftApPurpose),

    /// A SoftAp start request named a purpose that already has a running
    /// manager (§8 invariant 2: at most one manager per distinct purpose).
    #[error("softap purpose {0} is already running")]
    DuplicateSoftApPurpose(SoftApPurpose),

    /// An event reached the Controller's `Default` state unhandled. Fatal in
    /// debug builds via `debug_assert!`; logged and dropped in release (§4.1,
    /// §7 Programming error).
    #[error("unhandled event in default state: {0}")]
    UnhandledDefaultEvent(String),
}
