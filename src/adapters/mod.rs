//! Infrastructure adapters. Implement outbound ports and the inbound UI.
//!
//! Content stores, page stores, terminal UI. Map errors to DomainError.

pub mod persistence;
pub mod ui;
