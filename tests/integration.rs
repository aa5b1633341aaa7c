//! Single integration test binary: all integration tests as modules.
//! Shared common code is compiled once, so no dead_code from per-binary subsets.
//!
//! Run: `cargo test --test integration`
//! Filter by module: `cargo test --test integration persistence_roundtrip::`

mod common;
mod persistence_roundtrip;
