//! Administrative console for inspecting game server player data.
//!
//! Console commands run against file-backed snapshots of the server's
//! sessions, preferences and prototypes. Commands only read that data.

pub mod admin;
pub mod cli;
pub mod commands;
pub mod config;
pub mod console;
pub mod locale;
pub mod preferences;
pub mod prototype;
pub mod server;
pub mod session;
