//! Test doubles and fixtures, available to downstream crates via the `testing` feature

pub mod fixtures;
