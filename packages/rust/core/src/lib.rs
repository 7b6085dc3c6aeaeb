//! Core pipeline orchestration for skillsync.
//!
//! Ties the fetcher, the section filter and the splicer into the single
//! `update_skill` workflow.

pub mod pipeline;
pub mod splice;
