//! Local persistence.

pub mod credentials;
