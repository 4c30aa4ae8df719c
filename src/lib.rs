pub mod api;
pub mod app;
pub mod clock;
pub mod config;
pub mod dashboard;
pub mod duration;
pub mod format;
pub mod models;
pub mod session;
pub mod transactions;
pub mod valuation;
