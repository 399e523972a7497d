pub mod api;
pub mod cache;
pub mod catalog;
pub mod config;
pub mod error;
pub mod extract;
pub mod models;
pub mod services;
pub mod state;
