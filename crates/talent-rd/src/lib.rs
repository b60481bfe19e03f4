//! Competency scoring, R&D evaluation workflows, and training analytics.
//!
//! The dashboard talks to this crate through three workflow surfaces:
//! pure competency scoring ([`workflows::competency`]), the R&D evaluation
//! lifecycle with its audit history ([`workflows::evaluation`]), and the
//! training-hours analyzer ([`workflows::training`]).

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
