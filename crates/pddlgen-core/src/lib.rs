//! Core library for pddlgen: project model, prompt, generation adapter,
//! and the session state machine.
//!
//! This crate is free of any terminal concern. The CLI crate decides how
//! the session is displayed; everything here is driven through plain
//! method calls and is unit-testable without a network or a terminal.

pub mod generate;
pub mod project;
pub mod prompt;
pub mod session;

pub use generate::{GeminiClient, GeminiOptions, GenerationError, ProjectGenerator};
pub use project::{Artifact, GeneratedProject, SaveError};
pub use session::{GenerationToken, Session, SessionView};
