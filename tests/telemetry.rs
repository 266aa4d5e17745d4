// ============================================================================
// TELEMETRY BOUNDS
// ============================================================================

use cockpit::telemetry::{wrap_degrees, Bound, Field, TelemetryGenerator, TelemetrySample};
use pretty_assertions::assert_eq;

#[test]
fn every_field_stays_in_range_over_many_ticks() {
    for seed in [1, 2, 3, 42] {
        let mut generator = TelemetryGenerator::new(Some(seed));
        for _ in 0..2_000 {
            let sample = generator.tick().clone();
            for field in Field::ALL {
                let value = sample.get(field);
                assert!(
                    field.spec().contains(value),
                    "{field:?} = {value} escaped its range (seed {seed})"
                );
            }
        }
        assert_eq!(generator.ticks(), 2_000);
    }
}

#[test]
fn wrapped_fields_stay_below_360() {
    let mut generator = TelemetryGenerator::with_sample(
        TelemetrySample {
            heading: 359.9,
            course: 0.1,
            target_bearing: 359.5,
            radar_azimuth: 358.0,
            ..TelemetrySample::default()
        },
        Some(11),
    );
    for _ in 0..500 {
        let sample = generator.tick().clone();
        for field in Field::ALL
            .into_iter()
            .filter(|f| f.spec().bound == Bound::Wrap)
        {
            let value = sample.get(field);
            assert!((0.0..360.0).contains(&value), "{field:?} = {value}");
        }
    }
}

#[test]
fn one_tick_moves_altitude_and_heading_by_at_most_one_step() {
    for seed in 0..50 {
        let mut generator = TelemetryGenerator::with_sample(
            TelemetrySample {
                altitude: 35_000.0,
                heading: 274.0,
                ..TelemetrySample::default()
            },
            Some(seed),
        );
        let sample = generator.tick();
        assert!((34_970.0..=35_030.0).contains(&sample.altitude));
        let heading_delta = wrap_degrees(sample.heading - 274.0 + 180.0) - 180.0;
        assert!(heading_delta.abs() <= 0.5 + 1e-9, "heading {}", sample.heading);
    }
}

#[test]
fn same_seed_gives_same_stream() {
    let mut a = TelemetryGenerator::new(Some(99));
    let mut b = TelemetryGenerator::new(Some(99));
    for _ in 0..100 {
        assert_eq!(a.tick(), b.tick());
    }
}

#[test]
fn clamped_fields_saturate_at_their_limits() {
    let mut generator = TelemetryGenerator::with_sample(
        TelemetrySample {
            fuel: 0.0,
            g_load: 9.0,
            ..TelemetrySample::default()
        },
        Some(5),
    );
    for _ in 0..50 {
        let sample = generator.tick();
        assert_eq!(sample.fuel, 0.0);
        assert!(sample.g_load <= 9.0);
    }
}
