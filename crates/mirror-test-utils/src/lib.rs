//! Shared test utilities for the mirrorkit workspace.
//!
//! This crate provides standardised test fixtures to eliminate duplication
//! across crate test suites. It is a dev-dependency only — never published.
//!
//! - [`FakeRemote`] — an in-memory [`RemoteTree`] with scripted failures

pub mod remote;

pub use remote::FakeRemote;
