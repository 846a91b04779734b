//! Core use-case services.
//!
//! # Responsibility
//! - Compose the registries and the store into application-level flows.
//! - Keep the UI shell decoupled from registry wiring and persistence.

pub mod inventory_service;
