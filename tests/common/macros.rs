/// Asserts that two floats agree within an absolute tolerance (default 1e-9).
#[macro_export]
macro_rules! assert_close {
    ($left:expr, $right:expr) => {
        $crate::assert_close!($left, $right, 1e-9)
    };
    ($left:expr, $right:expr, $tol:expr) => {{
        let (left, right): (f64, f64) = ($left, $right);
        assert!(
            (left - right).abs() <= $tol,
            "{} = {} is not within {} of {} = {}",
            stringify!($left),
            left,
            $tol,
            stringify!($right),
            right
        );
    }};
}

/// Asserts that every quantity of a cell lies in its physical range.
#[macro_export]
macro_rules! assert_cell_in_bounds {
    ($cell:expr, $capacity:expr) => {{
        let cell = &$cell;
        assert!(
            cell.is_within_bounds($capacity),
            "Cell ({}, {}) out of bounds: water {}/{} L, health {}, {:?}, {:?}",
            cell.x,
            cell.y,
            cell.water_l,
            $capacity,
            cell.microlife_health,
            cell.nutrients,
            cell.contaminants
        );
    }};
}
