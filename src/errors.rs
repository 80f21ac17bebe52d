// ABOUTME: Unified error handling with standard error codes for all pipeline stages
// ABOUTME: Defines ErrorCode taxonomy, AppError with source chaining, and AppResult alias
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pantry Planner Project

//! # Unified Error Handling
//!
//! Centralized error types shared by the nutrition pipeline, the USDA
//! adapter, and the CLI. Every fallible operation returns [`AppResult`].

use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Standard error codes used throughout the application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ErrorCode {
    /// Caller-correctable input problem (malformed identifier, bad quantity)
    #[serde(rename = "INVALID_INPUT")]
    InvalidInput,
    /// The external provider has no record for the given identifier
    #[serde(rename = "NOT_FOUND")]
    NotFound,
    /// External provider failure, potentially transient
    #[serde(rename = "LOOKUP_ERROR")]
    LookupError,
    /// Aggregation or planning attempted over zero inventory entries
    #[serde(rename = "EMPTY_INVENTORY")]
    EmptyInventory,
    /// Configuration is missing or invalid
    #[serde(rename = "CONFIG_ERROR")]
    ConfigError,
    /// Invariant violation or unexpected internal state
    #[serde(rename = "INTERNAL_ERROR")]
    InternalError,
}

impl ErrorCode {
    /// Get a user-friendly description of this error
    #[must_use]
    pub const fn description(&self) -> &'static str {
        match self {
            Self::InvalidInput => "The provided input is invalid",
            Self::NotFound => "The requested food record was not found",
            Self::LookupError => "The nutrient data provider encountered an error",
            Self::EmptyInventory => "The operation requires at least one inventory entry",
            Self::ConfigError => "Configuration error encountered",
            Self::InternalError => "An internal error occurred",
        }
    }
}

/// Unified error type for the application
#[derive(Debug, Error)]
pub struct AppError {
    /// Error code
    pub code: ErrorCode,
    /// Human-readable error message
    pub message: String,
    /// Source error for error chaining
    #[source]
    pub source: Option<Box<dyn std::error::Error + Send + Sync>>,
}

impl AppError {
    /// Create a new `AppError` with the given code and message
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            source: None,
        }
    }

    /// Add a source error for error chaining
    #[must_use]
    pub fn with_source(mut self, source: impl std::error::Error + Send + Sync + 'static) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    /// Caller-correctable invalid input
    pub fn invalid_input(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InvalidInput, message)
    }

    /// External record absent for the given identifier
    pub fn not_found(resource: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::NotFound,
            format!("{} not found", resource.into()),
        )
    }

    /// External provider failure
    pub fn lookup(provider: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::LookupError,
            format!("{}: {}", provider.into(), message.into()),
        )
    }

    /// Aggregation or planning over zero entries
    pub fn empty_inventory(operation: impl Into<String>) -> Self {
        Self::new(
            ErrorCode::EmptyInventory,
            format!("{} requires a non-empty inventory", operation.into()),
        )
    }

    /// Configuration error
    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::ConfigError, message)
    }

    /// Internal invariant violation
    pub fn internal(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::InternalError, message)
    }
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.code.description(), self.message)
    }
}

/// Result type alias for convenience
pub type AppResult<T> = Result<T, AppError>;

/// Conversion from `anyhow::Error` for the binary boundary
impl From<anyhow::Error> for AppError {
    fn from(error: anyhow::Error) -> Self {
        Self::new(ErrorCode::InternalError, error.to_string())
    }
}
