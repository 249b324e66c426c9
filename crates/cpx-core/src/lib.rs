//! Core cpx library (config, prompts, generation client).

pub mod boilerplate;
pub mod config;
pub mod gemini;
pub mod platform;
pub mod problem;
pub mod prompts;
pub mod validate;
