//! egui rendering. Reads [`crate::state::AppState`]; all mutation goes
//! through its setters.

pub mod panels;
pub mod plot;
pub mod tables;
