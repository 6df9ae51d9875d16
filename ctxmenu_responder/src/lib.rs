// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Ctxmenu Responder: a deterministic, `no_std` delivery path for element events.
//!
//! ## Overview
//!
//! This crate builds the responder chain sequence (capture → target → bubble) for an
//! event whose target is already known, and runs handlers over it.
//! It does not perform hit testing: document input arrives with its target element attached.
//!
//! ## Workflow
//!
//! 1) Route: [`Router`](crate::router::Router) reconstructs the root→target path through a
//!    [`ParentLookup`](crate::types::ParentLookup) and emits the dispatch sequence.
//! 2) Dispatch: [`dispatcher::run`] executes a handler for each step and honors
//!    [`Outcome::Stop`](crate::types::Outcome::Stop).
//!
//! Because pointer clicks, keyboard activation and synthetic notifications all go through the
//! same two steps, a handler cannot tell a keyboard-activated item from a clicked one.
//!
//! ```
//! use ctxmenu_responder::dispatcher;
//! use ctxmenu_responder::router::Router;
//! use ctxmenu_responder::types::{Outcome, ParentLookup, Phase};
//!
//! struct Parents;
//! impl ParentLookup<u32> for Parents {
//!     fn parent_of(&self, node: &u32) -> Option<u32> {
//!         (*node > 1).then(|| node - 1)
//!     }
//! }
//!
//! let router: Router<u32, Parents> = Router::with_parent(Parents);
//! let seq = router.dispatch_for::<()>(3);
//!
//! let mut bubbled_through = Vec::new();
//! dispatcher::run(&seq, &mut bubbled_through, |d, seen| {
//!     if d.phase == Phase::Bubble {
//!         seen.push(d.node);
//!     }
//!     Outcome::Continue
//! });
//! assert_eq!(bubbled_through, vec![2, 1]);
//! ```
//!
//! ## Adapters
//!
//! - **Document Adapter** (`document_adapter` feature): routes along the element hierarchy of a
//!   [`ctxmenu_document::Document`].
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod adapters;
pub mod dispatcher;
pub mod router;
pub mod types;
