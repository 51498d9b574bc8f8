//! Core pipeline and domain logic for adrindex.
//!
//! This crate ties together document loading, record building, corpus
//! validation, tag indexing, and rendering into one batch run
//! ([`pipeline::build_index`]).

pub mod builder;
pub mod index;
pub mod loader;
pub mod pipeline;
pub mod render;
pub mod sequence;
pub mod validate;
