//! Shared fixtures for the end-to-end tests
//!
//! - Mock origin and CDN sites
//! - A raw TCP server for misbehaving artifact responses
//! - Event collection helpers

#![allow(dead_code)] // not every test target uses every fixture

pub mod mock_site;
pub mod scripted_server;
pub mod test_helpers;

pub use mock_site::{MockSite, PACKAGE};
pub use scripted_server::{AfterBody, ScriptedHttpServer};
pub use test_helpers::EventLog;
