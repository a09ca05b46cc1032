//! Trigger index resolution.
//!
//! Maps the configured trigger position and the current item count to two
//! concrete sentinel indices: the primary index and the fallback index
//! (always the last item). Pure and cheap; the caller re-resolves on
//! every change to the item count or the trigger position, because stale
//! indices are a correctness bug.

/// Where the primary sentinel sits within the list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum TriggerPoint {
    /// Fraction of the list, in `(0, 1]`. Out-of-range values are clamped.
    Fraction(f32),
    /// Explicit item index, clamped into the list bounds.
    Index(usize),
}

impl TriggerPoint {
    /// Trigger at the list midpoint.
    pub const HALF: TriggerPoint = TriggerPoint::Fraction(0.5);
    /// Trigger three quarters of the way down the list.
    pub const THREE_QUARTERS: TriggerPoint = TriggerPoint::Fraction(0.75);
    /// Trigger at the last item; primary and fallback coincide.
    pub const END: TriggerPoint = TriggerPoint::Fraction(1.0);
}

impl Default for TriggerPoint {
    fn default() -> Self {
        TriggerPoint::END
    }
}

/// Sentinel indices derived for one trigger cycle.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SentinelIndices {
    /// Position derived from the configured [`TriggerPoint`].
    pub primary: usize,
    /// Always the last item; acts as a backstop trigger.
    pub fallback: usize,
}

impl SentinelIndices {
    /// True when the primary sentinel falls on the last item, in which
    /// case a single watch covers both roles.
    pub fn coincide(&self) -> bool {
        self.primary == self.fallback
    }
}

/// Resolves the sentinel indices for the given list length.
///
/// Returns `None` for an empty list: there is nothing to watch and the
/// binding layer must arm no watches.
pub fn resolve(item_count: usize, point: TriggerPoint) -> Option<SentinelIndices> {
    if item_count == 0 {
        return None;
    }
    let fallback = item_count - 1;
    let primary = match point {
        TriggerPoint::Fraction(fraction) => {
            let clamped = f64::from(fraction.clamp(0.0, 1.0));
            ((item_count as f64 * clamped).floor() as usize).min(fallback)
        }
        TriggerPoint::Index(index) => index.min(fallback),
    };
    Some(SentinelIndices { primary, fallback })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_named_tiers() {
        let half = resolve(10, TriggerPoint::HALF).unwrap();
        assert_eq!(half.primary, 5);
        assert_eq!(half.fallback, 9);

        let three_quarters = resolve(10, TriggerPoint::THREE_QUARTERS).unwrap();
        assert_eq!(three_quarters.primary, 7);
        assert_eq!(three_quarters.fallback, 9);

        let end = resolve(10, TriggerPoint::END).unwrap();
        assert_eq!(end.primary, 9);
        assert!(end.coincide());
    }

    #[test]
    fn test_tiers_stay_in_bounds() {
        for count in 1..=50 {
            for point in [
                TriggerPoint::HALF,
                TriggerPoint::THREE_QUARTERS,
                TriggerPoint::END,
            ] {
                let indices = resolve(count, point).unwrap();
                assert!(indices.primary <= indices.fallback);
                assert_eq!(indices.fallback, count - 1);
            }
        }
    }

    #[test]
    fn test_explicit_index_clamped() {
        let indices = resolve(10, TriggerPoint::Index(3)).unwrap();
        assert_eq!(indices.primary, 3);

        let clamped = resolve(10, TriggerPoint::Index(42)).unwrap();
        assert_eq!(clamped.primary, 9);
        assert!(clamped.coincide());
    }

    #[test]
    fn test_fraction_out_of_range_clamped() {
        let below = resolve(10, TriggerPoint::Fraction(-0.5)).unwrap();
        assert_eq!(below.primary, 0);

        let above = resolve(10, TriggerPoint::Fraction(2.0)).unwrap();
        assert_eq!(above.primary, 9);
    }

    #[test]
    fn test_empty_list_has_no_sentinel() {
        assert_eq!(resolve(0, TriggerPoint::HALF), None);
        assert_eq!(resolve(0, TriggerPoint::Index(5)), None);
    }

    #[test]
    fn test_single_item_coincides() {
        for point in [
            TriggerPoint::HALF,
            TriggerPoint::THREE_QUARTERS,
            TriggerPoint::END,
            TriggerPoint::Index(0),
        ] {
            let indices = resolve(1, point).unwrap();
            assert_eq!(indices.primary, 0);
            assert_eq!(indices.fallback, 0);
            assert!(indices.coincide());
        }
    }
}
