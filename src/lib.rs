//! `mailquery`: a terminal client for a public mailbox-query service.
//!
//! The crate is split into an I/O-free core (sender/recipient parsing, the
//! page controller state machine) and the adapters around it: an HTTP client
//! for the mail API, a file-backed credential store and a ratatui front end.

pub mod api;
pub mod config;
pub mod controller;
pub mod error;
pub mod i18n;
pub mod model;
pub mod store;
pub mod tui;
