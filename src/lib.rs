//! sahayak - AI teaching assistant.
//!
//! Generation flows for hyper-local lesson content, differentiated
//! worksheets, knowledge-base explanations, and visual aids, backed by the
//! Gemini API, with a fail-soft local history log.

pub mod adapter;
pub mod cli;
pub mod config;
pub mod error;
pub mod flows;
pub mod genai;
pub mod history;
pub mod media;
pub mod prompt;

pub use config::Config;
pub use error::{Error, Result};
