//! Edge service for contest page styling.
//!
//! Serves small dynamically generated stylesheets: a color override for
//! the interwiki rate counter and a general sanitized-injection route.
//! The modules are public so integration tests can drive the router
//! in-process without binding a socket.

#![forbid(unsafe_code)]

pub mod config;
pub mod routes;
