pub mod config;
pub mod conversion;
pub mod dictionary;
pub mod domain;
pub mod engine;
pub mod input;
pub mod util;

pub use engine::{CorrectionEngine, EngineEvent, UndoError};

#[cfg(test)]
mod tests;
