//! ReadAssist: reading accommodations applied to a single loaded page.
//!
//! A popup sends commands to a per-page [`app::App`], which applies each
//! effect as a reversible document mutation and reports the resulting state.

pub mod app;
pub mod database;
pub mod dom;
pub mod platform;
pub mod popup_client;
pub mod rpc_handler;
pub mod services;
pub mod types;
