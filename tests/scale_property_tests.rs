use approx::assert_relative_eq;
use chart_flow::core::{DEFAULT_AXIS_MAX, DataPoint, LinearScale, TimeScale, ValueScale};
use chrono::{DateTime, TimeDelta, TimeZone, Utc};
use proptest::prelude::*;

fn base_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()
}

proptest! {
    #[test]
    fn time_scale_round_trip_property(
        span_secs in 60i64..(400 * 86_400),
        offset_factor in 0.0f64..1.0,
        width in 10.0f64..4_000.0
    ) {
        let from = base_time();
        let to = from + TimeDelta::seconds(span_secs);
        let at = from + TimeDelta::seconds((span_secs as f64 * offset_factor) as i64);

        let scale = TimeScale::new(from, to, (50.0, 50.0 + width)).expect("valid scale");
        let recovered = scale.invert(scale.map(at));

        let drift = (recovered - at).num_milliseconds().abs();
        prop_assert!(drift <= 1, "drift {drift} ms");
    }

    #[test]
    fn linear_scale_round_trip_property(
        domain_start in -1_000_000.0f64..1_000_000.0,
        domain_span in 0.001f64..1_000_000.0,
        value_factor in 0.0f64..1.0
    ) {
        let domain_end = domain_start + domain_span;
        let value = domain_start + value_factor * domain_span;
        let scale = LinearScale::new((domain_start, domain_end), (0.0, 1024.0))
            .expect("valid scale");

        let recovered = scale.invert(scale.map(value));
        prop_assert!((recovered - value).abs() <= 1e-6 * domain_span.max(1.0));
    }

    #[test]
    fn value_scale_tracks_observed_max(max in 0.001f64..1e9, padding in 1.0f64..2.0) {
        let points = vec![
            DataPoint::new(base_time()).with_field("val", max / 2.0),
            DataPoint::new(base_time() + TimeDelta::days(1)).with_field("val", max),
        ];
        let mut scale = ValueScale::new(300.0, padding).expect("valid scale");
        scale.fit_to_data(&points, "val").expect("fit");
        let (low, high) = scale.domain();
        prop_assert_eq!(low, 0.0);
        prop_assert!((high - max * padding).abs() <= 1e-9 * high);
    }
}

#[test]
fn value_scale_falls_back_to_default_max() {
    let mut scale = ValueScale::new(300.0, 1.1).expect("valid scale");
    scale.fit_to_data(&[], "val").expect("fit empty");
    assert_relative_eq!(scale.domain().1, DEFAULT_AXIS_MAX * 1.1);

    let zeros = vec![
        DataPoint::new(base_time()).with_field("val", 0.0),
        DataPoint::new(base_time() + TimeDelta::days(1)).with_field("other", 7.0),
    ];
    scale.fit_to_data(&zeros, "val").expect("fit zeros");
    assert_relative_eq!(scale.domain().1, 110.0);
}

#[test]
fn repeated_updates_are_idempotent() {
    let points = vec![DataPoint::new(base_time()).with_field("val", 40.0)];
    let mut once = ValueScale::new(200.0, 1.1).expect("valid scale");
    once.fit_to_data(&points, "val").expect("fit");
    let mut twice = once;
    twice.fit_to_data(&points, "val").expect("fit again");
    twice.set_height_px(200.0).expect("same height");
    assert_eq!(once, twice);

    let from = base_time();
    let to = from + TimeDelta::days(3);
    let mut time_scale = TimeScale::new(from, to, (0.0, 300.0)).expect("valid scale");
    let before = time_scale;
    time_scale.set_range((0.0, 300.0)).expect("same range");
    assert_eq!(before, time_scale);
}

#[test]
fn value_scale_maps_upward_from_zero() {
    let scale = ValueScale::new(200.0, 1.0).expect("valid scale");
    assert_relative_eq!(scale.map(0.0), 0.0);
    assert_relative_eq!(scale.map(50.0), 100.0);
    assert_eq!(scale.ticks(5), vec![0.0, 25.0, 50.0, 75.0, 100.0]);
}

#[test]
fn reversed_time_range_is_rejected() {
    let from = base_time();
    assert!(TimeScale::new(from + TimeDelta::days(1), from, (0.0, 100.0)).is_err());
}
