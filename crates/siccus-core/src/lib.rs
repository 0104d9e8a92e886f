// ABOUTME: Core types and constants for the Siccus wellness progression engine
// ABOUTME: Foundation crate with unified error handling and progression constants
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Siccus Contributors

#![deny(unsafe_code)]

//! # Siccus Core
//!
//! Foundation crate providing shared types and constants for the Siccus
//! progression engine. It changes rarely so the algorithm crate and the
//! binaries can compile incrementally on top of it.
//!
//! ## Modules
//!
//! - **errors**: Unified error handling with `AppError`, `ErrorCode` and `ErrorResponse`
//! - **constants**: Progression defaults, percent bounds and environment variable names

/// Unified error handling system with standard error codes
pub mod errors;

/// Progression constants organized by domain
pub mod constants;

pub use errors::{AppError, AppResult, ErrorCode, ErrorResponse};
