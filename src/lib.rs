//! Weight Goal Calorie Analyzer Library
//!
//! Energy-balance estimation for a single weight-loss or weight-gain session,
//! plus the dashboards that collect inputs and show the results.

pub mod build_info;
pub mod config;
pub mod dashboard;
pub mod db;
pub mod engine;
pub mod models;
pub mod session;
pub mod tools;
