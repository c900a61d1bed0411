pub mod config;
pub mod error;
pub mod gateway;
pub mod listing;
pub mod models;
pub mod routes;
pub mod services;
pub mod state;
pub mod view;
