//! # Partita - interactive score-metadata assistant
//!
//! Partita walks a composer or arranger through describing a new score
//! (title, composer, instrumentation, movements, publication headers) before
//! any notation source is generated, reusing previously entered composers and
//! instruments from a small local registry.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────┐     ┌─────────────┐     ┌──────────────┐     ┌────────────┐
//! │  prompt  │────▶│   session   │────▶│   resolve    │────▶│  registry  │
//! │ (1 line) │     │ (dialogs)   │     │ (load/create)│     │ (JSON dir) │
//! └──────────┘     └─────────────┘     └──────────────┘     └────────────┘
//!                        │
//!                        ▼
//!                  ┌─────────────┐     ┌────────────┐
//!                  │   models    │────▶│   config   │
//!                  │  (Piece)    │     │ (load/save)│
//!                  └─────────────┘     └────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`error`] - Hierarchical error types
//! - [`names`] - Name normalization and derivation
//! - [`mutopia`] - Static style/license/clef enumerations
//! - [`models`] - Domain models (Piece, Headers, Composer, Instrument, ...)
//! - [`registry`] - Identity registry of reusable entries
//! - [`resolve`] - Free text to Composer/Instrument resolution
//! - [`collection`] - Ordered collection editing primitives
//! - [`prompt`] - Line-prompt capability
//! - [`session`] - The interactive editing state machine
//! - [`config`] - Piece config persistence

// Core modules
pub mod error;
pub mod models;
pub mod names;

// Static tables
pub mod mutopia;

// Storage
pub mod config;
pub mod registry;

// Interaction
pub mod collection;
pub mod prompt;
pub mod resolve;
pub mod session;

// =============================================================================
// Re-exports - Error types
// =============================================================================

pub use error::{ConfigError, RegistryError, SessionError, ValidationError};

// =============================================================================
// Re-exports - Models
// =============================================================================

pub use models::{Composer, Ensemble, Headers, Instrument, Movement, MutopiaHeaders, Piece};

// =============================================================================
// Re-exports - Names
// =============================================================================

pub use names::{abbreviate_name, display_name, mutopia_name_guess, normalize_name, split_number};

// =============================================================================
// Re-exports - Registry
// =============================================================================

pub use registry::{Kind, Registry, DEFAULT_REGISTRY_DIR};

// =============================================================================
// Re-exports - Resolution
// =============================================================================

pub use resolve::{resolve_composer, resolve_instrument};

// =============================================================================
// Re-exports - Collection editing
// =============================================================================

pub use collection::{delete_at, list_with_indexes, reorder, CollectionError, Labeled};

// =============================================================================
// Re-exports - Prompt & session
// =============================================================================

pub use prompt::{Prompter, ScriptedPrompt, StdinPrompt};
pub use session::Session;
