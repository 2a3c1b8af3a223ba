//! Core pipeline components

pub mod config;
pub mod enhancer;
pub mod errors;
pub mod models;
pub mod pipeline;
pub mod resolver;
pub mod scorer;
pub mod speech;
pub mod translator;
