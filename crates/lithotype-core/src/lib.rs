//! Lithotype Core
//!
//! This crate contains the ambient functionality shared by every lithotype crate:
//! hash collections, logging setup, profiling hooks and the pipeline configuration.

pub mod alloc;
pub mod config;
pub mod logging;
pub mod profiling;
