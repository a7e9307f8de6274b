//! External generation capability: client trait and the Gemini backend.

pub mod client;
pub mod gemini;

pub use client::{GeneratedMedia, GenerationClient};
pub use gemini::GeminiClient;
