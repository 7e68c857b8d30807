// Device Authorization Portal - core/mod.rs
//
// Core business logic layer.
// Must NOT depend on: ui, platform, app, or any file I/O directly.

pub mod export;
pub mod filter;
pub mod model;
pub mod validate;
