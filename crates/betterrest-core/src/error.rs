//! Core error types for betterrest-core.
//!
//! This module defines the error hierarchy using thiserror. Only
//! [`ModelError`] is part of the estimator contract; the others cover
//! input parsing and configuration around it.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for betterrest-core.
#[derive(Error, Debug)]
pub enum CoreError {
    /// Sleep model errors
    #[error("Model error: {0}")]
    Model(#[from] ModelError),

    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// Form input errors
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure to obtain a prediction from the sleep model.
///
/// The estimator recovers every variant locally and shows the fallback
/// message instead.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// The model artifact could not be loaded
    #[error("Failed to load sleep model from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// A feature value was rejected by the model
    #[error("Invalid feature '{feature}': {value}")]
    InvalidFeatures { feature: &'static str, value: f64 },

    /// The model ran but produced no usable output
    #[error("Sleep model failed: {0}")]
    Internal(String),
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to load configuration
    #[error("Failed to load configuration from {path}: {message}")]
    LoadFailed { path: PathBuf, message: String },

    /// Failed to save configuration
    #[error("Failed to save configuration to {path}: {message}")]
    SaveFailed { path: PathBuf, message: String },

    /// Unknown configuration key
    #[error("Unknown configuration key: {0}")]
    UnknownKey(String),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Errors raised while parsing form input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Wake time text is not `HH:MM`
    #[error("Invalid time '{0}': expected HH:MM")]
    InvalidTime(String),

    /// Hour or minute out of range
    #[error("Time component out of range: {hour:02}:{minute:02}")]
    TimeOutOfRange { hour: u32, minute: u32 },

    /// Value is not a number
    #[error("Invalid number for {field}: '{value}'")]
    InvalidNumber { field: &'static str, value: String },

    /// Clock style is neither 12h nor 24h
    #[error("Invalid clock style '{0}': expected 12h or 24h")]
    InvalidClock(String),
}

/// Result type alias for CoreError
pub type Result<T, E = CoreError> = std::result::Result<T, E>;
