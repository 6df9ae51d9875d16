// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Keeping a menu box inside the viewport.

use kurbo::{Point, Size};

/// Gap between a corrected menu and the viewport edge, in viewport units.
pub const DEFAULT_EDGE_INSET: f64 = 5.0;

/// Correct `anchor` so a box of `size` placed there stays inside `viewport`.
///
/// Each axis is handled on its own. An axis whose far edge already fits is
/// left alone; an overflowing axis is pulled back so the far edge sits
/// `inset` units inside the viewport, but never past `0`. An empty `size`
/// (nothing measured yet) returns `anchor` unchanged.
///
/// ```
/// use ctxmenu::geometry::{DEFAULT_EDGE_INSET, fit_in_viewport};
/// use kurbo::{Point, Size};
///
/// let corrected = fit_in_viewport(
///     Point::new(990.0, 50.0),
///     Size::new(150.0, 80.0),
///     Size::new(1000.0, 700.0),
///     DEFAULT_EDGE_INSET,
/// );
/// assert_eq!(corrected, Point::new(845.0, 50.0));
/// ```
pub fn fit_in_viewport(anchor: Point, size: Size, viewport: Size, inset: f64) -> Point {
    if size.is_zero_area() {
        return anchor;
    }
    Point::new(
        fit_axis(anchor.x, size.width, viewport.width, inset),
        fit_axis(anchor.y, size.height, viewport.height, inset),
    )
}

fn fit_axis(start: f64, extent: f64, limit: f64, inset: f64) -> f64 {
    if start + extent <= limit {
        return start;
    }
    (limit - extent - inset).max(0.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    const VIEWPORT: Size = Size::new(1000.0, 700.0);

    #[test]
    fn fitting_box_is_untouched() {
        let anchor = Point::new(100.0, 50.0);
        assert_eq!(
            fit_in_viewport(anchor, Size::new(150.0, 80.0), VIEWPORT, DEFAULT_EDGE_INSET),
            anchor
        );
    }

    #[test]
    fn exact_fit_is_not_corrected() {
        let anchor = Point::new(850.0, 620.0);
        assert_eq!(
            fit_in_viewport(anchor, Size::new(150.0, 80.0), VIEWPORT, DEFAULT_EDGE_INSET),
            anchor
        );
    }

    #[test]
    fn right_overflow_pulls_back_with_inset() {
        let p = fit_in_viewport(
            Point::new(990.0, 50.0),
            Size::new(150.0, 80.0),
            VIEWPORT,
            DEFAULT_EDGE_INSET,
        );
        assert_eq!(p, Point::new(845.0, 50.0));
    }

    #[test]
    fn bottom_overflow_pulls_back_with_inset() {
        let p = fit_in_viewport(
            Point::new(10.0, 690.0),
            Size::new(150.0, 80.0),
            VIEWPORT,
            DEFAULT_EDGE_INSET,
        );
        assert_eq!(p, Point::new(10.0, 615.0));
    }

    #[test]
    fn oversized_box_clamps_to_zero() {
        let p = fit_in_viewport(
            Point::new(500.0, 500.0),
            Size::new(1200.0, 698.0),
            VIEWPORT,
            DEFAULT_EDGE_INSET,
        );
        assert_eq!(p, Point::ZERO);
    }

    #[test]
    fn unmeasured_box_keeps_anchor() {
        let anchor = Point::new(990.0, 690.0);
        assert_eq!(
            fit_in_viewport(anchor, Size::ZERO, VIEWPORT, DEFAULT_EDGE_INSET),
            anchor
        );
        assert_eq!(
            fit_in_viewport(anchor, Size::new(150.0, 0.0), VIEWPORT, DEFAULT_EDGE_INSET),
            anchor
        );
    }
}
