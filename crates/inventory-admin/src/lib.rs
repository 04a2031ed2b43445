//! # Inventory Admin
//!
//! The inventory back office built on [`slice_framework`]:
//!
//! - **[model]**: the 17 REST resources (products, storages, income notes, ...) with their
//!   forms and table columns.
//! - **[system]**: [`AdminSystem`], which runs one slice per resource.
//! - **[config]**: environment configuration ([`AdminConfig`]).
//! - **[commands]**: the flows behind the `inventory-admin` binary.

pub mod commands;
pub mod config;
pub mod model;
pub mod system;

pub use config::{AdminConfig, ConfigError};
pub use system::{AdminError, AdminSystem, ApiFactory, Managed};
