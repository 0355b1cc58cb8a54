//! Application layer containing the core business logic orchestration.
//!
//! This module defines the `TellerEngine` which is the single entry point for
//! every operator command: customer registration, account opening, and the
//! money movements against the shared ledger.

pub mod engine;
