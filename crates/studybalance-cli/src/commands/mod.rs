pub mod classify;
pub mod common;
pub mod config;
pub mod health;
pub mod mood;
pub mod plan;
