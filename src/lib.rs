//! Baseball salary percentile dashboard.
//!
//! The [`data`] and [`report`] modules hold all business logic and know
//! nothing about egui; [`ui`], [`app`] and [`state`] drive them from the
//! eframe event loop.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod report;
pub mod state;
pub mod ui;
