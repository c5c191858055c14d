//! Y-axis bounds and tick spacing.
//!
//! The tick interval is a step function of the value range. Only ranges of
//! 1 or less look at the domain.

use climact_core::catalog::Domain;

/// Tick used below a range of 1 for energy variables.
pub const FINE_TICK_ENERGY: f64 = 0.2;
/// Tick used below a range of 1 for every other domain.
pub const FINE_TICK: f64 = 0.5;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxisBounds {
    pub min: f64,
    pub max: f64,
}

/// Lower bound is `0` when the smallest value floors to zero, otherwise one
/// below its floor. Upper bound is one above the floor of the largest value.
pub fn axis_bounds(min_value: f64, max_value: f64) -> AxisBounds {
    let floor_min = min_value.floor();
    let min = if floor_min == 0.0 { 0.0 } else { floor_min - 1.0 };
    AxisBounds {
        min,
        max: max_value.floor() + 1.0,
    }
}

pub fn tick_interval(range: f64, domain: Option<Domain>) -> f64 {
    if range >= 100.0 {
        50.0
    } else if range >= 20.0 {
        5.0
    } else if range > 10.0 {
        2.0
    } else if range > 1.0 {
        1.0
    } else if domain.is_some_and(Domain::is_energy) {
        FINE_TICK_ENERGY
    } else {
        FINE_TICK
    }
}

/// Smallest and largest value, `None` for an empty slice.
pub fn value_extent(values: &[f64]) -> Option<(f64, f64)> {
    let first = *values.first()?;
    Some(
        values
            .iter()
            .fold((first, first), |(lo, hi), &v| (lo.min(v), hi.max(v))),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_steps() {
        assert_eq!(tick_interval(150.0, None), 50.0);
        assert_eq!(tick_interval(100.0, None), 50.0);
        assert_eq!(tick_interval(25.0, None), 5.0);
        assert_eq!(tick_interval(20.0, None), 5.0);
        assert_eq!(tick_interval(15.0, None), 2.0);
        assert_eq!(tick_interval(10.0, None), 1.0);
        assert_eq!(tick_interval(1.0, Some(Domain::Temperature)), FINE_TICK);
        assert_eq!(tick_interval(0.8, Some(Domain::Temperature)), 0.5);
        assert_eq!(tick_interval(0.8, Some(Domain::Energy)), 0.2);
    }

    #[test]
    fn lower_bound_snaps_to_zero() {
        let bounds = axis_bounds(0.4, 7.9);
        assert_eq!(bounds, AxisBounds { min: 0.0, max: 8.0 });
    }

    #[test]
    fn bounds_pad_by_one() {
        assert_eq!(axis_bounds(8.7, 27.2), AxisBounds { min: 7.0, max: 28.0 });
        assert_eq!(axis_bounds(-3.2, -0.5), AxisBounds { min: -5.0, max: 0.0 });
    }

    #[test]
    fn bounds_enclose_values() {
        let samples: [&[f64]; 5] = [
            &[0.0, 0.0],
            &[5.5, 31.2, 12.0],
            &[-12.4, -1.0, 3.3],
            &[1650.0, 2120.5],
            &[0.12, 0.18, 0.15],
        ];
        for values in samples {
            let (lo, hi) = value_extent(values).unwrap();
            let bounds = axis_bounds(lo, hi);
            assert!(bounds.min <= lo && hi <= bounds.max, "{:?} -> {:?}", values, bounds);
        }
    }

    #[test]
    fn extent_of_empty_series() {
        assert_eq!(value_extent(&[]), None);
        assert_eq!(value_extent(&[3.0, -1.0, 2.0]), Some((-1.0, 3.0)));
    }
}
