//! Shared test fixtures for the filemem workspace.

pub mod fixtures;

pub use fixtures::*;
