// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Property tests for viewport correction.

use ctxmenu::geometry::{DEFAULT_EDGE_INSET, fit_in_viewport};
use kurbo::{Point, Size};
use proptest::prelude::*;

const VIEWPORT: Size = Size::new(1000.0, 700.0);

prop_compose! {
    fn menu_size()(w in 1.0_f64..400.0, h in 1.0_f64..400.0) -> Size {
        Size::new(w, h)
    }
}

proptest! {
    #[test]
    fn fitting_boxes_stay_put(size in menu_size(), fx in 0.0_f64..=1.0, fy in 0.0_f64..=1.0) {
        let anchor = Point::new(
            fx * (VIEWPORT.width - size.width),
            fy * (VIEWPORT.height - size.height),
        );
        prop_assert_eq!(fit_in_viewport(anchor, size, VIEWPORT, DEFAULT_EDGE_INSET), anchor);
    }

    #[test]
    fn overflowing_axes_end_inset_from_the_edge(
        size in menu_size(),
        x in 0.0_f64..1200.0,
        y in 0.0_f64..900.0,
    ) {
        let anchor = Point::new(x, y);
        let fitted = fit_in_viewport(anchor, size, VIEWPORT, DEFAULT_EDGE_INSET);

        prop_assert!(fitted.x >= 0.0 && fitted.y >= 0.0);
        for (start, extent, limit, out) in [
            (x, size.width, VIEWPORT.width, fitted.x),
            (y, size.height, VIEWPORT.height, fitted.y),
        ] {
            if start + extent <= limit {
                prop_assert_eq!(out, start);
            } else {
                prop_assert!(out + extent <= limit);
                let inset = limit - extent - out;
                prop_assert!((inset - DEFAULT_EDGE_INSET).abs() < 1e-9 || out == 0.0);
            }
        }
    }

    #[test]
    fn oversized_boxes_pin_to_the_origin(w in 1000.0_f64..2000.0, x in 0.0_f64..1000.0) {
        let fitted = fit_in_viewport(
            Point::new(x, 10.0),
            Size::new(w, 10.0),
            VIEWPORT,
            DEFAULT_EDGE_INSET,
        );
        prop_assert_eq!(fitted.x, 0.0);
        prop_assert_eq!(fitted.y, 10.0);
    }
}

#[test]
fn unmeasured_boxes_are_left_alone() {
    let anchor = Point::new(990.0, 690.0);
    assert_eq!(
        fit_in_viewport(anchor, Size::ZERO, VIEWPORT, DEFAULT_EDGE_INSET),
        anchor
    );
}
