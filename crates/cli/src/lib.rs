//! `medclinic-cli` library crate.
//!
//! Re-exports the configuration, seed data and report builder for
//! integration testing. The binary entrypoint lives in `main.rs`.

pub mod config;
pub mod report;
pub mod seed;
