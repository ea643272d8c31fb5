//! Test Module
//!
//! Cross-module tests for the analysis engine.
//!
//! ## Test Categories
//! - `mocks`: Stub summarizers and similarity backends
//! - `analyzer_tests`: Output properties and reference scenarios of `analyze`
//! - `resilience_tests`: Collaborator failures, worker panics and deadlines
//! - `integration_tests`: Full analysis against a mock llama.cpp server

mod mocks;

pub mod resilience_tests;
