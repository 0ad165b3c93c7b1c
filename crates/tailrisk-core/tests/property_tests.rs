//! Property-based tests for dates and price-series windows.

use proptest::prelude::*;
use tailrisk_core::prelude::*;

fn base() -> Date {
    Date::from_ymd(2020, 1, 1).unwrap()
}

/// Price series over distinct day offsets from `base()`, given unordered.
fn price_series() -> impl Strategy<Value = PriceSeries> {
    prop::collection::btree_set(0i64..1_500, 0..80)
        .prop_flat_map(|offsets| {
            let n = offsets.len();
            (Just(offsets), prop::collection::vec(1.0f64..500.0, n))
        })
        .prop_map(|(offsets, prices)| {
            let mut points: Vec<PricePoint> = offsets
                .into_iter()
                .zip(prices)
                .map(|(o, p)| PricePoint::new(base().add_days(o), p))
                .collect();
            points.reverse();
            PriceSeries::from_unsorted(Symbol::new("PROP").unwrap(), points).unwrap()
        })
}

proptest! {
    #[test]
    fn checked_offsets_round_trip(start in -100_000i64..100_000, days in -100_000i64..100_000) {
        let date = base().add_days(start);
        let moved = date.checked_add_days(days).unwrap();
        prop_assert_eq!(date.days_between(&moved), days);
        prop_assert_eq!(moved.checked_add_days(-days).unwrap(), date);
    }

    #[test]
    fn from_unsorted_orders_dates(series in price_series()) {
        let dates: Vec<Date> = series.dates().collect();
        prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn window_keeps_exactly_the_dates_in_range(
        series in price_series(),
        a in -10i64..1_510,
        b in -10i64..1_510,
    ) {
        let (start, end) = (base().add_days(a), base().add_days(b));
        let window = series.window(start, end);

        let expected: Vec<Date> = series.dates().filter(|d| *d >= start && *d <= end).collect();
        let actual: Vec<Date> = window.dates().collect();
        prop_assert_eq!(actual, expected);

        for point in window.points() {
            prop_assert_eq!(series.price_on(point.date), Some(point.price));
        }
    }

    #[test]
    fn trailing_matches_window(series in price_series(), end in 0i64..1_500, lookback in 0u32..800) {
        let end = base().add_days(end);
        let trailing = series.trailing(end, lookback).unwrap();
        prop_assert_eq!(trailing, series.window(end.add_days(-i64::from(lookback)), end));
    }
}
