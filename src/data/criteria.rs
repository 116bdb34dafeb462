use std::fmt;

use thiserror::Error;

use super::model::RawEventRecord;

pub const MILLIS_PER_DAY: f64 = 86_400_000.0;

pub const MAGNITUDE_DOMAIN_MIN: f64 = 0.0;
pub const LONGITUDE_DOMAIN: (f64, f64) = (-180.0, 180.0);
pub const LATITUDE_DOMAIN: (f64, f64) = (-90.0, 90.0);

// ---------------------------------------------------------------------------
// Errors / setter outcomes
// ---------------------------------------------------------------------------

/// A setter was given a value outside its field's domain.  State is untouched.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("invalid {field}: {value} ({reason})")]
pub struct InvalidInput {
    pub field: &'static str,
    pub value: f64,
    pub reason: &'static str,
}

/// Whether a successful setter call actually changed anything.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjustment {
    Unchanged,
    Changed,
}

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// Closed interval, `min <= max` always.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Range {
    pub min: f64,
    pub max: f64,
}

impl Range {
    pub const fn new(min: f64, max: f64) -> Self {
        Range { min, max }
    }

    pub fn contains(&self, v: f64) -> bool {
        self.min <= v && v <= self.max
    }
}

impl fmt::Display for Range {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.min, self.max)
    }
}

// ---------------------------------------------------------------------------
// FilterCriteria
// ---------------------------------------------------------------------------

/// Inclusive bounds used to select events from a feed.
#[derive(Debug, Clone, PartialEq)]
pub struct FilterCriteria {
    magnitude: Range,
    max_age_millis: f64,
    longitude: Range,
    latitude: Range,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            magnitude: Range::new(0.0, 10.0),
            max_age_millis: 30.0 * MILLIS_PER_DAY,
            longitude: Range::new(LONGITUDE_DOMAIN.0, LONGITUDE_DOMAIN.1),
            latitude: Range::new(LATITUDE_DOMAIN.0, LATITUDE_DOMAIN.1),
        }
    }
}

fn check(field: &'static str, value: f64, ok: bool, reason: &'static str) -> Result<(), InvalidInput> {
    if !value.is_finite() {
        return Err(InvalidInput {
            field,
            value,
            reason: "not a finite number",
        });
    }
    if !ok {
        return Err(InvalidInput { field, value, reason });
    }
    Ok(())
}

fn check_in(field: &'static str, value: f64, domain: (f64, f64), reason: &'static str) -> Result<(), InvalidInput> {
    check(field, value, domain.0 <= value && value <= domain.1, reason)
}

/// Replace `*slot` with `new`, reporting whether the value differed.
fn store<T: PartialEq>(slot: &mut T, new: T) -> Adjustment {
    if *slot == new {
        Adjustment::Unchanged
    } else {
        *slot = new;
        Adjustment::Changed
    }
}

impl FilterCriteria {
    pub fn magnitude(&self) -> Range {
        self.magnitude
    }

    pub fn max_age_millis(&self) -> f64 {
        self.max_age_millis
    }

    pub fn max_age_days(&self) -> f64 {
        self.max_age_millis / MILLIS_PER_DAY
    }

    pub fn longitude(&self) -> Range {
        self.longitude
    }

    pub fn latitude(&self) -> Range {
        self.latitude
    }

    /// Set the lower magnitude bound.  Raising it above the current maximum
    /// pushes the maximum up to the same value.
    pub fn set_magnitude_min(&mut self, v: f64) -> Result<Adjustment, InvalidInput> {
        check("magnitude min", v, v >= MAGNITUDE_DOMAIN_MIN, "must be >= 0")?;
        let max = self.magnitude.max.max(v);
        Ok(store(&mut self.magnitude, Range::new(v, max)))
    }

    /// Set the upper magnitude bound.  Lowering it below the current minimum
    /// pushes the minimum down to the same value.
    pub fn set_magnitude_max(&mut self, v: f64) -> Result<Adjustment, InvalidInput> {
        check("magnitude max", v, v >= MAGNITUDE_DOMAIN_MIN, "must be >= 0")?;
        let min = self.magnitude.min.min(v);
        Ok(store(&mut self.magnitude, Range::new(min, v)))
    }

    pub fn set_max_age_days(&mut self, days: f64) -> Result<Adjustment, InvalidInput> {
        check("age", days, days > 0.0, "must be > 0 days")?;
        Ok(store(&mut self.max_age_millis, days * MILLIS_PER_DAY))
    }

    /// Set both longitude bounds; a reversed pair is swapped.
    pub fn set_longitude_range(&mut self, lo: f64, hi: f64) -> Result<Adjustment, InvalidInput> {
        check_in("longitude min", lo, LONGITUDE_DOMAIN, "must be within [-180, 180]")?;
        check_in("longitude max", hi, LONGITUDE_DOMAIN, "must be within [-180, 180]")?;
        Ok(store(&mut self.longitude, Range::new(lo.min(hi), lo.max(hi))))
    }

    /// Set both latitude bounds; a reversed pair is swapped.
    pub fn set_latitude_range(&mut self, lo: f64, hi: f64) -> Result<Adjustment, InvalidInput> {
        check_in("latitude min", lo, LATITUDE_DOMAIN, "must be within [-90, 90]")?;
        check_in("latitude max", hi, LATITUDE_DOMAIN, "must be within [-90, 90]")?;
        Ok(store(&mut self.latitude, Range::new(lo.min(hi), lo.max(hi))))
    }

    /// Combined inclusive test over magnitude, recency, longitude and latitude.
    ///
    /// The second argument is the reference "now" in epoch milliseconds; an
    /// event exactly `max_age` old still passes.
    pub fn to_predicate(&self) -> impl Fn(&RawEventRecord, i64) -> bool + '_ {
        move |rec: &RawEventRecord, now_millis: i64| {
            let oldest = now_millis as f64 - self.max_age_millis;
            self.magnitude.contains(rec.magnitude)
                && rec.timestamp_millis as f64 >= oldest
                && self.longitude.contains(rec.longitude)
                && self.latitude.contains(rec.latitude)
        }
    }
}

impl fmt::Display for FilterCriteria {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "mag {} within {:.1} days, lon {}, lat {}",
            self.magnitude,
            self.max_age_days(),
            self.longitude,
            self.latitude
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(mag: f64, time: i64, lon: f64, lat: f64) -> RawEventRecord {
        RawEventRecord {
            magnitude: mag,
            longitude: lon,
            latitude: lat,
            title: "t".to_string(),
            timestamp_millis: time,
        }
    }

    #[test]
    fn defaults() {
        let c = FilterCriteria::default();
        assert_eq!(c.magnitude(), Range::new(0.0, 10.0));
        assert_eq!(c.max_age_millis(), 2_592_000_000.0);
        assert_eq!(c.longitude(), Range::new(-180.0, 180.0));
        assert_eq!(c.latitude(), Range::new(-90.0, 90.0));
    }

    #[test]
    fn raising_min_above_max_pushes_max() {
        let mut c = FilterCriteria::default();
        c.set_magnitude_max(5.0).unwrap();
        c.set_magnitude_min(8.0).unwrap();
        assert_eq!(c.magnitude(), Range::new(8.0, 8.0));
    }

    #[test]
    fn lowering_max_below_min_pushes_min() {
        let mut c = FilterCriteria::default();
        c.set_magnitude_min(6.0).unwrap();
        c.set_magnitude_max(2.5).unwrap();
        assert_eq!(c.magnitude(), Range::new(2.5, 2.5));
    }

    #[test]
    fn reversed_pairs_collapse_to_last_value() {
        for (lo, hi) in [(3.0, 1.0), (9.5, 0.0), (7.0, 6.9)] {
            let mut c = FilterCriteria::default();
            c.set_magnitude_min(lo).unwrap();
            c.set_magnitude_max(hi).unwrap();
            assert_eq!(c.magnitude(), Range::new(hi, hi));

            let mut c = FilterCriteria::default();
            c.set_magnitude_max(hi).unwrap();
            c.set_magnitude_min(lo).unwrap();
            assert_eq!(c.magnitude(), Range::new(lo, lo));
        }
    }

    #[test]
    fn invalid_input_leaves_state_alone() {
        let mut c = FilterCriteria::default();
        let before = c.clone();
        assert!(c.set_magnitude_min(-1.0).is_err());
        assert!(c.set_magnitude_max(f64::NAN).is_err());
        assert!(c.set_max_age_days(0.0).is_err());
        assert!(c.set_max_age_days(f64::INFINITY).is_err());
        assert!(c.set_longitude_range(-181.0, 0.0).is_err());
        assert!(c.set_latitude_range(0.0, 90.5).is_err());
        assert_eq!(c, before);

        let err = c.set_max_age_days(-2.0).unwrap_err();
        assert_eq!(err.field, "age");
    }

    #[test]
    fn setters_are_idempotent() {
        let mut c = FilterCriteria::default();
        assert_eq!(c.set_magnitude_min(4.0).unwrap(), Adjustment::Changed);
        let snapshot = c.clone();
        assert_eq!(c.set_magnitude_min(4.0).unwrap(), Adjustment::Unchanged);
        assert_eq!(c, snapshot);

        assert_eq!(c.set_max_age_days(30.0).unwrap(), Adjustment::Unchanged);
        assert_eq!(c.set_max_age_days(7.0).unwrap(), Adjustment::Changed);
        assert_eq!(c.set_max_age_days(7.0).unwrap(), Adjustment::Unchanged);
    }

    #[test]
    fn coordinate_pairs_are_swapped_when_reversed() {
        let mut c = FilterCriteria::default();
        c.set_longitude_range(40.0, -10.0).unwrap();
        c.set_latitude_range(60.0, 30.0).unwrap();
        assert_eq!(c.longitude(), Range::new(-10.0, 40.0));
        assert_eq!(c.latitude(), Range::new(30.0, 60.0));
    }

    #[test]
    fn predicate_bounds_are_inclusive() {
        let mut c = FilterCriteria::default();
        c.set_magnitude_min(5.0).unwrap();
        c.set_magnitude_max(7.0).unwrap();
        c.set_max_age_days(1.0).unwrap();
        c.set_longitude_range(-10.0, 10.0).unwrap();
        c.set_latitude_range(-5.0, 5.0).unwrap();
        let now = 1_000_000_000_000;
        let oldest = now - 86_400_000;
        let pass = c.to_predicate();

        assert!(pass(&record(5.0, oldest, -10.0, -5.0), now));
        assert!(pass(&record(7.0, now, 10.0, 5.0), now));
        assert!(!pass(&record(7.01, now, 0.0, 0.0), now));
        assert!(!pass(&record(6.0, oldest - 1, 0.0, 0.0), now));
        assert!(!pass(&record(6.0, now, 10.5, 0.0), now));
        assert!(!pass(&record(6.0, now, 0.0, -5.5), now));
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn reversed_magnitude_pair_collapses_to_last_set(hi in 0.0f64..1e3, gap in 1e-6f64..1e3) {
                let lo = hi + gap;

                let mut c = FilterCriteria::default();
                c.set_magnitude_min(lo).unwrap();
                c.set_magnitude_max(hi).unwrap();
                prop_assert_eq!(c.magnitude(), Range::new(hi, hi));

                let mut c = FilterCriteria::default();
                c.set_magnitude_max(hi).unwrap();
                c.set_magnitude_min(lo).unwrap();
                prop_assert_eq!(c.magnitude(), Range::new(lo, lo));
            }

            #[test]
            fn magnitude_bounds_stay_ordered(
                ops in proptest::collection::vec((any::<bool>(), 0.0f64..20.0), 1..20)
            ) {
                let mut c = FilterCriteria::default();
                for (is_min, v) in ops {
                    if is_min {
                        c.set_magnitude_min(v).unwrap();
                        prop_assert_eq!(c.magnitude().min, v);
                    } else {
                        c.set_magnitude_max(v).unwrap();
                        prop_assert_eq!(c.magnitude().max, v);
                    }
                    prop_assert!(c.magnitude().min <= c.magnitude().max);
                }
            }

            #[test]
            fn repeating_a_setter_is_a_no_op(
                min in 0.0f64..20.0,
                max in 0.0f64..20.0,
                days in 0.001f64..365.0,
                lon in (-180.0f64..=180.0, -180.0f64..=180.0),
                lat in (-90.0f64..=90.0, -90.0f64..=90.0),
            ) {
                let mut c = FilterCriteria::default();

                c.set_magnitude_min(min).unwrap();
                let snapshot = c.clone();
                prop_assert_eq!(c.set_magnitude_min(min).unwrap(), Adjustment::Unchanged);
                prop_assert_eq!(&c, &snapshot);

                c.set_magnitude_max(max).unwrap();
                let snapshot = c.clone();
                prop_assert_eq!(c.set_magnitude_max(max).unwrap(), Adjustment::Unchanged);
                prop_assert_eq!(&c, &snapshot);

                c.set_max_age_days(days).unwrap();
                let snapshot = c.clone();
                prop_assert_eq!(c.set_max_age_days(days).unwrap(), Adjustment::Unchanged);
                prop_assert_eq!(&c, &snapshot);

                c.set_longitude_range(lon.0, lon.1).unwrap();
                let snapshot = c.clone();
                prop_assert_eq!(c.set_longitude_range(lon.0, lon.1).unwrap(), Adjustment::Unchanged);
                prop_assert_eq!(&c, &snapshot);

                c.set_latitude_range(lat.0, lat.1).unwrap();
                let snapshot = c.clone();
                prop_assert_eq!(c.set_latitude_range(lat.0, lat.1).unwrap(), Adjustment::Unchanged);
                prop_assert_eq!(&c, &snapshot);
            }

            #[test]
            fn negative_values_are_rejected(v in -1e6f64..-1e-9) {
                let mut c = FilterCriteria::default();
                prop_assert!(c.set_magnitude_min(v).is_err());
                prop_assert!(c.set_magnitude_max(v).is_err());
                prop_assert!(c.set_max_age_days(v).is_err());
                prop_assert_eq!(c, FilterCriteria::default());
            }
        }
    }
}
