//! Data Studio: load a CSV or JSON table, preview it and chart it.
//!
//! The library half holds everything that does not draw: the data layer
//! ([`data`]), the UI-independent application state ([`state`]) and the chart
//! palette ([`color`]). The `data-studio` binary renders it with egui.

pub mod color;
pub mod data;
pub mod state;
