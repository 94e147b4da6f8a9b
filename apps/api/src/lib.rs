pub mod config;
pub mod errors;
pub mod generation;
pub mod llm_client;
pub mod models;
pub mod persistence;
pub mod resume;
pub mod routes;
pub mod state;
pub mod transfer;
