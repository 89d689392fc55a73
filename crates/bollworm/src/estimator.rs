//! Theoretical yield-loss estimation.
//!
//! The estimator turns the two larval-generation counts of the cotton
//! bollworm into a yield-loss percentage. Both counts are first normalized by
//! fixed divisors, then fed through a frozen quadratic:
//!
//! ```text
//! y = c11*x1^2 + c1*x1 + c0
//! x1 = first_gen_count / 50
//! x2 = second_gen_count / 300
//! ```
//!
//! The frozen surface has no second-generation term. `x2` is part of the
//! contract and is normalized alongside `x1`, but it does not move the result.
//!
//! Everything here is a pure function of its arguments. There is no state,
//! so the functions are safe to call from any number of threads.

/// Divisor applied to the first-generation count (larvae per hundred plants).
pub const FIRST_GEN_DIVISOR: f64 = 50.0;

/// Divisor applied to the second-generation count (larvae per hundred plants).
pub const SECOND_GEN_DIVISOR: f64 = 300.0;

// Frozen coefficients. Do not re-fit: stored records were computed with these.
const INTERCEPT: f64 = 13.402_32;
const FIRST_LINEAR: f64 = 9.650_313;
const FIRST_QUADRATIC: f64 = 2.571_61;

/// Estimate the theoretical yield loss (%) from normalized counts.
///
/// `x1` and `x2` are the first- and second-generation counts already divided
/// by [`FIRST_GEN_DIVISOR`] and [`SECOND_GEN_DIVISOR`]. Non-finite `x1` is
/// not rejected here; it propagates into the result.
///
/// Terms are summed highest degree first; the published losses depend on
/// that order down to the last bit.
#[must_use]
pub fn estimate(x1: f64, _x2: f64) -> f64 {
    FIRST_QUADRATIC * x1 * x1 + FIRST_LINEAR * x1 + INTERCEPT
}

/// Normalize raw counts into the estimator's input domain.
#[must_use]
pub fn normalize(first_gen_count: f64, second_gen_count: f64) -> (f64, f64) {
    (
        first_gen_count / FIRST_GEN_DIVISOR,
        second_gen_count / SECOND_GEN_DIVISOR,
    )
}

/// Normalize raw counts and estimate the yield loss in one step.
#[must_use]
pub fn estimate_from_counts(first_gen_count: f64, second_gen_count: f64) -> f64 {
    let (x1, x2) = normalize(first_gen_count, second_gen_count);
    estimate(x1, x2)
}

/// Render a loss value with full native precision.
///
/// Uses the shortest representation that round-trips, so
/// `22.768400800000002` stays `22.768400800000002`.
#[must_use]
pub fn format_loss(value: f64) -> String {
    value.to_string()
}

/// One of the historical records shipped with the original data set.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SeedFixture {
    /// First-generation larvae per hundred plants.
    pub first_gen_count: f64,
    /// Second-generation larvae per hundred plants.
    pub second_gen_count: f64,
    /// Published theoretical yield loss (%).
    pub published_loss: f64,
    /// Date the measurement was taken, `YYYY-MM-DD`.
    pub recorded_date: &'static str,
}

/// The five historical fixtures, in their published order.
pub const SEED_FIXTURES: [SeedFixture; 5] = [
    SeedFixture {
        first_gen_count: 50.0,
        second_gen_count: 300.0,
        published_loss: 25.624_243,
        recorded_date: "2022-01-29",
    },
    SeedFixture {
        first_gen_count: 10.0,
        second_gen_count: 60.0,
        published_loss: 15.435_247,
        recorded_date: "2022-01-25",
    },
    SeedFixture {
        first_gen_count: 20.0,
        second_gen_count: 120.0,
        published_loss: 17.673_902_8,
        recorded_date: "2022-01-26",
    },
    SeedFixture {
        first_gen_count: 30.0,
        second_gen_count: 180.0,
        published_loss: 20.118_287_4,
        recorded_date: "2022-01-27",
    },
    SeedFixture {
        first_gen_count: 40.0,
        second_gen_count: 250.0,
        published_loss: 22.768_400_800_000_002,
        recorded_date: "2022-01-28",
    },
];

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    /// Published losses as they appear in the historical data, by date.
    const PUBLISHED_TEXT: [(&str, &str); 5] = [
        ("2022-01-29", "25.624243"),
        ("2022-01-25", "15.435247"),
        ("2022-01-26", "17.6739028"),
        ("2022-01-27", "20.1182874"),
        ("2022-01-28", "22.768400800000002"),
    ];

    #[test]
    fn test_estimate_full_scale_fixture() {
        assert_eq!(format_loss(estimate(50.0 / 50.0, 300.0 / 300.0)), "25.624243");
    }

    #[test]
    fn test_estimate_low_density_fixture() {
        assert_eq!(format_loss(estimate(10.0 / 50.0, 60.0 / 300.0)), "15.435247");
    }

    #[test]
    fn test_all_seed_fixtures_render_as_published() {
        for fixture in &SEED_FIXTURES {
            let (_, published) = PUBLISHED_TEXT
                .iter()
                .find(|(date, _)| *date == fixture.recorded_date)
                .expect("every fixture has published text");
            let loss = estimate_from_counts(fixture.first_gen_count, fixture.second_gen_count);
            assert_eq!(format_loss(loss), *published, "fixture {}", fixture.recorded_date);
            assert_eq!(loss.to_bits(), fixture.published_loss.to_bits());
        }
    }

    #[test]
    fn test_fifth_fixture_keeps_published_counts() {
        let fixture = SEED_FIXTURES[4];
        assert_eq!(fixture.first_gen_count, 40.0);
        assert_eq!(fixture.second_gen_count, 250.0);
        assert_eq!(
            format_loss(estimate_from_counts(40.0, 250.0)),
            "22.768400800000002"
        );
    }

    #[test]
    fn test_estimate_zero_counts_is_intercept() {
        assert_eq!(estimate(0.0, 0.0), 13.402_32);
    }

    #[test]
    fn test_second_generation_does_not_move_result() {
        assert_eq!(estimate(0.6, 0.0).to_bits(), estimate(0.6, 3.0).to_bits());
    }

    #[test]
    fn test_seed_fixtures_are_monotonic() {
        let mut fixtures = SEED_FIXTURES.to_vec();
        fixtures.sort_by(|a, b| a.first_gen_count.total_cmp(&b.first_gen_count));

        for pair in fixtures.windows(2) {
            assert!(pair[1].second_gen_count >= pair[0].second_gen_count);
            let lower = estimate_from_counts(pair[0].first_gen_count, pair[0].second_gen_count);
            let upper = estimate_from_counts(pair[1].first_gen_count, pair[1].second_gen_count);
            assert!(upper >= lower, "{upper} < {lower}");
            assert!(pair[1].published_loss >= pair[0].published_loss);
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize(50.0, 300.0), (1.0, 1.0));
        assert_eq!(normalize(0.0, 0.0), (0.0, 0.0));
        assert_eq!(normalize(40.0, 240.0), (0.8, 0.8));
    }

    #[test]
    fn test_format_loss_full_precision() {
        assert_eq!(format_loss(22.768_400_800_000_002), "22.768400800000002");
        assert_eq!(format_loss(25.624_243), "25.624243");
    }

    #[test]
    fn test_nan_propagates() {
        assert!(estimate(f64::NAN, 1.0).is_nan());
    }

    #[test]
    fn test_seed_fixture_dates_unique() {
        let mut dates: Vec<_> = SEED_FIXTURES.iter().map(|f| f.recorded_date).collect();
        dates.sort_unstable();
        dates.dedup();
        assert_eq!(dates.len(), SEED_FIXTURES.len());
    }

    proptest! {
        #[test]
        fn prop_estimate_is_deterministic(x1 in 0.0f64..20.0, x2 in 0.0f64..20.0) {
            prop_assert_eq!(estimate(x1, x2).to_bits(), estimate(x1, x2).to_bits());
        }

        #[test]
        fn prop_first_gen_increase_never_decreases_loss(
            x1 in 0.0f64..20.0,
            x2 in 0.0f64..20.0,
            delta in 0.0f64..5.0,
        ) {
            prop_assert!(estimate(x1 + delta, x2) >= estimate(x1, x2));
        }

        #[test]
        fn prop_second_gen_increase_never_decreases_loss(
            x1 in 0.0f64..20.0,
            x2 in 0.0f64..20.0,
            delta in 0.0f64..5.0,
        ) {
            prop_assert!(estimate(x1, x2 + delta) >= estimate(x1, x2));
        }
    }
}
