// Device Authorization Portal - app/mod.rs
//
// Application layer: request store, persistence adapters, state management.
// Dependencies: core layer.
// Must NOT depend on: ui, platform specifics.

pub mod persistence;
pub mod state;
pub mod store;
