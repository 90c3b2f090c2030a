//! Configuration management module
//!
//! This module handles loading pool settings from environment variables
//! and .env files.

pub mod settings;

pub use settings::{keys_from_env, split_key_list, Settings};
