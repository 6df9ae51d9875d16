// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Dispatcher helper: walk a dispatch sequence and honor stop outcomes.
//!
//! - [`Outcome::Stop`] aborts propagation at the current step, the way
//!   `stopPropagation` does in a browser.
//! - [`run`] reports the step where propagation stopped, or `None` if every
//!   step was visited.
//! - Anything richer, such as "default prevented", belongs on the event
//!   payload passed through [`run`].
//!
//! Sequences normally come from
//! [`Router::dispatch_for`](crate::router::Router::dispatch_for), which is how
//! pointer clicks, keyboard activation, and menu notifications all reach their
//! listeners.
//!
//! ## Example: a click bubbling to the item that handles it
//!
//! ```
//! use ctxmenu_responder::dispatcher;
//! use ctxmenu_responder::types::{Dispatch, Outcome, Phase};
//!
//! // body(1) > menu(2) > item(3) > label(4); the click lands on the label.
//! let seq: Vec<Dispatch<u32>> = vec![
//!     Dispatch::capture(1),
//!     Dispatch::capture(2),
//!     Dispatch::capture(3),
//!     Dispatch::target(4),
//!     Dispatch::bubble(3),
//!     Dispatch::bubble(2),
//!     Dispatch::bubble(1),
//! ];
//!
//! #[derive(Default)]
//! struct Click {
//!     activated: Option<u32>,
//!     default_prevented: bool,
//! }
//!
//! let mut click = Click::default();
//! let stopped = dispatcher::run(&seq, &mut click, |d, c| {
//!     // Only the item (3) has an activation handler.
//!     if d.phase != Phase::Capture && d.node == 3 {
//!         c.activated = Some(d.node);
//!         c.default_prevented = true;
//!         return Outcome::Stop;
//!     }
//!     Outcome::Continue
//! });
//!
//! assert_eq!(click.activated, Some(3));
//! assert!(click.default_prevented);
//! assert_eq!(stopped.map(|d| (d.phase, d.node)), Some((Phase::Bubble, 3)));
//! ```

use crate::types::{Dispatch, Outcome};

/// Run a handler over a dispatch sequence and honor stop outcomes.
///
/// `seq` must be ordered capture → target → bubble, as the router emits it.
/// `event` is handed to every handler call so handlers can record what they
/// did. Returns the step at which a handler returned [`Outcome::Stop`], or
/// `None` if the sequence ran to completion.
pub fn run<'a, K, M, E>(
    seq: &'a [Dispatch<K, M>],
    event: &mut E,
    mut handler: impl FnMut(&Dispatch<K, M>, &mut E) -> Outcome,
) -> Option<&'a Dispatch<K, M>> {
    for d in seq {
        match handler(d, event) {
            Outcome::Continue => {}
            Outcome::Stop => return Some(d),
        }
    }
    None
}
