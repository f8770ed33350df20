//! Foundation types for the waterfall layout engine.
//!
//! This crate contains the types shared by all waterfall crates: the error
//! enum and the widget configuration loaded from TOML.

pub mod config;
pub mod error;
