//! Conversion of legacy ClearCase VCS-root settings.
//!
//! The server half splits an old whole view path into the view root and the
//! path relative to it and answers with a small XML document. The client half
//! posts the old value, reads that document and updates the settings form.

pub mod api_doc;
pub mod config;
pub mod converter;
pub mod error;
pub mod form;
pub mod handlers;
pub mod models;
pub mod payload;
pub mod routes;
pub mod transport;
pub mod view_path;
