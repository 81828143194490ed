//! Common test utilities for Controlla contract and property tests.
//!
//! This module provides:
//! - Fixtures: the demo schema and attribute maps used across suites
//! - Gateways: a counting wrapper and an always-failing gateway

#![allow(dead_code)]

pub mod fixtures;
pub mod gateways;

pub use fixtures::*;
pub use gateways::*;
