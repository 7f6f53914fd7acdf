//! `retailgate-api`: HTTP surface with per-route permission enforcement.

pub mod app;
pub mod config;
pub mod context;
pub mod directory;
pub mod gate;
pub mod inventory;
pub mod middleware;
pub mod store;
