//! Shared helpers for the engine tooling binaries

pub mod selfplay;
