//! Ledger Client Module
//!
//! This module defines the contract for the external ledger collaborator:
//! loading the signing account's sequence number and submitting one signed
//! transaction per batch. Transaction construction, signing, and the wire
//! protocol live behind this seam.

mod client;
pub use client::{LedgerClient, LedgerError, SubmitOutcome};
