//! Core data model types: emails, list pages, and parsed address fields.

pub mod address;
pub mod mail;
