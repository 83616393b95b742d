//! Gem dropdown core — catalog, option population, pair synchronization,
//! and the in-memory page state. Pure Rust; the DOM only ever sees the
//! patches these modules produce.

pub mod catalog;
pub mod dropdown;
pub mod pairs;
pub mod render;
pub mod state;
