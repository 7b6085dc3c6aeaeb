//! Shared types, error model, and configuration for skillsync.
//!
//! This crate is the foundation depended on by all other skillsync crates.
//! It provides:
//! - [`SkillSyncError`] — the unified error type
//! - Configuration ([`SyncConfig`], [`SectionRules`], the built-in constants)

pub mod config;
pub mod error;

// Re-export public API at crate root for ergonomic imports.
pub use config::{
    EXCLUDE_SECTIONS, INCLUDE_SECTIONS, MARKER, README_URL, SKILL_FILE, SectionRules, SyncConfig,
    workspace_root,
};
pub use error::{Result, SkillSyncError};
