//! Brand kit service: intake webhook to generated, rendered brand kit.

pub mod config;
pub mod error;
pub mod generator;
pub mod intake;
pub mod kit;
pub mod llm;
pub mod mail;
pub mod pipeline;
pub mod render;
pub mod routes;
