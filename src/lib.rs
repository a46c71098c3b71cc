//! SA3 investment radar: load scored regions once, filter them by score
//! ranges, and compare a selection on a radar chart with CSV/PDF downloads.

pub mod chart;
pub mod color;
pub mod config;
pub mod data;
pub mod export;
pub mod state;
pub mod view;
