// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Adapters to integrate with other ctxmenu crates.
//!
//! Each adapter is gated behind a feature flag to keep the core responder lightweight and `no_std` by default.
//!
//! ## Available Adapters
//!
//! - [`document`] (`document_adapter` feature): parent lookup over a [`ctxmenu_document::Document`]
//!   so element events can be routed along their ancestor chain.

#[cfg(feature = "document_adapter")]
pub mod document;
