// StaySafe API - Core
//
// Classifies whether a product (given by URL) may be imported into
// Switzerland by asking an LLM and normalizing its reply into a typed result.
//
// Layout: kernel/ holds infrastructure (completion trait, OpenAI adapter,
// test doubles), domains/ holds the classification logic, server/ the axum
// HTTP surface.

pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
