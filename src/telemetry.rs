// ============================================================================
// TELEMETRY SIMULATION
// ============================================================================
//
// Every field of TelemetrySample random-walks inside a declared range on
// each tick. Angular fields wrap modulo 360, everything else is clamped.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::time::{Duration, Instant};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Bound {
    /// Clamp into `min..=max`.
    Clamp,
    /// Wrap into `[0, 360)`.
    Wrap,
}

/// Range, per-tick delta and bounding mode of one telemetry field
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FieldSpec {
    pub min: f64,
    pub max: f64,
    pub delta: (f64, f64),
    pub bound: Bound,
}

impl FieldSpec {
    const fn clamp(min: f64, max: f64, delta: (f64, f64)) -> Self {
        Self {
            min,
            max,
            delta,
            bound: Bound::Clamp,
        }
    }

    const fn wrap(delta: (f64, f64)) -> Self {
        Self {
            min: 0.0,
            max: 360.0,
            delta,
            bound: Bound::Wrap,
        }
    }

    /// Brings an arbitrary value back inside the field's range.
    pub fn bound(&self, value: f64) -> f64 {
        match self.bound {
            Bound::Clamp => value.clamp(self.min, self.max),
            Bound::Wrap => wrap_degrees(value),
        }
    }

    pub fn contains(&self, value: f64) -> bool {
        match self.bound {
            Bound::Clamp => (self.min..=self.max).contains(&value),
            Bound::Wrap => (0.0..360.0).contains(&value),
        }
    }
}

/// Normalises an angle in degrees into `[0, 360)`.
pub fn wrap_degrees(value: f64) -> f64 {
    let wrapped = value.rem_euclid(360.0);
    // rem_euclid can round up to exactly 360.0 for tiny negative inputs
    if wrapped >= 360.0 {
        0.0
    } else {
        wrapped
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Latitude,
    Longitude,
    Altitude,
    Airspeed,
    Mach,
    Heading,
    Pitch,
    Roll,
    GLoad,
    Fuel,
    RpmLeft,
    RpmRight,
    EgtLeft,
    EgtRight,
    AngleOfAttack,
    VerticalSpeed,
    Course,
    WaypointDistance,
    TargetBearing,
    TargetRange,
    RadarAzimuth,
}

impl Field {
    pub const ALL: [Field; 21] = [
        Field::Latitude,
        Field::Longitude,
        Field::Altitude,
        Field::Airspeed,
        Field::Mach,
        Field::Heading,
        Field::Pitch,
        Field::Roll,
        Field::GLoad,
        Field::Fuel,
        Field::RpmLeft,
        Field::RpmRight,
        Field::EgtLeft,
        Field::EgtRight,
        Field::AngleOfAttack,
        Field::VerticalSpeed,
        Field::Course,
        Field::WaypointDistance,
        Field::TargetBearing,
        Field::TargetRange,
        Field::RadarAzimuth,
    ];

    pub const fn spec(self) -> FieldSpec {
        match self {
            Field::Latitude => FieldSpec::clamp(38.5, 40.5, (-0.002, 0.002)),
            Field::Longitude => FieldSpec::clamp(31.5, 34.5, (-0.002, 0.002)),
            Field::Altitude => FieldSpec::clamp(25_000.0, 45_000.0, (-30.0, 30.0)),
            Field::Airspeed => FieldSpec::clamp(350.0, 650.0, (-4.0, 4.0)),
            Field::Mach => FieldSpec::clamp(0.85, 2.0, (-0.01, 0.01)),
            Field::Heading => FieldSpec::wrap((-0.5, 0.5)),
            Field::Pitch => FieldSpec::clamp(-10.0, 15.0, (-0.4, 0.4)),
            Field::Roll => FieldSpec::clamp(-45.0, 45.0, (-1.5, 1.5)),
            Field::GLoad => FieldSpec::clamp(0.5, 9.0, (-0.1, 0.1)),
            Field::Fuel => FieldSpec::clamp(0.0, 100.0, (-0.05, 0.0)),
            Field::RpmLeft | Field::RpmRight => FieldSpec::clamp(85.0, 104.0, (-0.3, 0.3)),
            Field::EgtLeft | Field::EgtRight => FieldSpec::clamp(650.0, 900.0, (-2.0, 2.0)),
            Field::AngleOfAttack => FieldSpec::clamp(-2.0, 24.0, (-0.3, 0.3)),
            Field::VerticalSpeed => FieldSpec::clamp(-3000.0, 3000.0, (-60.0, 60.0)),
            Field::Course => FieldSpec::wrap((-0.5, 0.5)),
            Field::WaypointDistance => FieldSpec::clamp(0.0, 120.0, (-0.15, 0.05)),
            Field::TargetBearing => FieldSpec::wrap((-1.0, 1.0)),
            Field::TargetRange => FieldSpec::clamp(5.0, 80.0, (-0.3, 0.3)),
            Field::RadarAzimuth => FieldSpec::wrap((5.0, 7.0)),
        }
    }
}

/// Current flight state. Only the latest sample exists.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetrySample {
    pub latitude: f64,
    pub longitude: f64,
    pub altitude: f64,
    pub airspeed: f64,
    pub mach: f64,
    pub heading: f64,
    pub pitch: f64,
    pub roll: f64,
    pub g_load: f64,
    pub fuel: f64,
    pub rpm_left: f64,
    pub rpm_right: f64,
    pub egt_left: f64,
    pub egt_right: f64,
    pub aoa: f64,
    pub vertical_speed: f64,
    pub course: f64,
    pub waypoint_distance: f64,
    pub target_bearing: f64,
    pub target_range: f64,
    pub radar_azimuth: f64,
}

impl Default for TelemetrySample {
    fn default() -> Self {
        Self {
            latitude: 39.93,
            longitude: 32.85,
            altitude: 35_000.0,
            airspeed: 480.0,
            mach: 1.2,
            heading: 274.0,
            pitch: 2.0,
            roll: 0.0,
            g_load: 1.0,
            fuel: 78.0,
            rpm_left: 96.0,
            rpm_right: 96.0,
            egt_left: 760.0,
            egt_right: 765.0,
            aoa: 4.5,
            vertical_speed: 0.0,
            course: 270.0,
            waypoint_distance: 64.0,
            target_bearing: 300.0,
            target_range: 42.0,
            radar_azimuth: 0.0,
        }
    }
}

impl TelemetrySample {
    pub fn get(&self, field: Field) -> f64 {
        match field {
            Field::Latitude => self.latitude,
            Field::Longitude => self.longitude,
            Field::Altitude => self.altitude,
            Field::Airspeed => self.airspeed,
            Field::Mach => self.mach,
            Field::Heading => self.heading,
            Field::Pitch => self.pitch,
            Field::Roll => self.roll,
            Field::GLoad => self.g_load,
            Field::Fuel => self.fuel,
            Field::RpmLeft => self.rpm_left,
            Field::RpmRight => self.rpm_right,
            Field::EgtLeft => self.egt_left,
            Field::EgtRight => self.egt_right,
            Field::AngleOfAttack => self.aoa,
            Field::VerticalSpeed => self.vertical_speed,
            Field::Course => self.course,
            Field::WaypointDistance => self.waypoint_distance,
            Field::TargetBearing => self.target_bearing,
            Field::TargetRange => self.target_range,
            Field::RadarAzimuth => self.radar_azimuth,
        }
    }

    fn slot(&mut self, field: Field) -> &mut f64 {
        match field {
            Field::Latitude => &mut self.latitude,
            Field::Longitude => &mut self.longitude,
            Field::Altitude => &mut self.altitude,
            Field::Airspeed => &mut self.airspeed,
            Field::Mach => &mut self.mach,
            Field::Heading => &mut self.heading,
            Field::Pitch => &mut self.pitch,
            Field::Roll => &mut self.roll,
            Field::GLoad => &mut self.g_load,
            Field::Fuel => &mut self.fuel,
            Field::RpmLeft => &mut self.rpm_left,
            Field::RpmRight => &mut self.rpm_right,
            Field::EgtLeft => &mut self.egt_left,
            Field::EgtRight => &mut self.egt_right,
            Field::AngleOfAttack => &mut self.aoa,
            Field::VerticalSpeed => &mut self.vertical_speed,
            Field::Course => &mut self.course,
            Field::WaypointDistance => &mut self.waypoint_distance,
            Field::TargetBearing => &mut self.target_bearing,
            Field::TargetRange => &mut self.target_range,
            Field::RadarAzimuth => &mut self.radar_azimuth,
        }
    }

    /// Writes `value` after bounding it into the field's range.
    pub fn set(&mut self, field: Field, value: f64) {
        *self.slot(field) = field.spec().bound(value);
    }
}

/// Random-walk generator that owns the current sample
#[derive(Debug)]
pub struct TelemetryGenerator {
    sample: TelemetrySample,
    rng: StdRng,
    ticks: u64,
}

impl TelemetryGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self::with_sample(TelemetrySample::default(), seed)
    }

    /// Starts from `initial`, bounding every field first.
    pub fn with_sample(initial: TelemetrySample, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let mut sample = initial;
        for field in Field::ALL {
            let value = sample.get(field);
            sample.set(field, value);
        }
        Self {
            sample,
            rng,
            ticks: 0,
        }
    }

    pub fn sample(&self) -> &TelemetrySample {
        &self.sample
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Advances every field by one bounded random step.
    pub fn tick(&mut self) -> &TelemetrySample {
        for field in Field::ALL {
            let spec = field.spec();
            let step = self.rng.random_range(spec.delta.0..=spec.delta.1);
            let value = self.sample.get(field) + step;
            self.sample.set(field, value);
        }
        self.ticks += 1;
        log::debug!(
            "telemetry tick {}: alt={:.0} hdg={:.1} fuel={:.2}",
            self.ticks,
            self.sample.altitude,
            self.sample.heading,
            self.sample.fuel
        );
        &self.sample
    }
}

/// Fixed-interval trigger polled from the frame loop.
///
/// Fires at most once per poll; a stalled loop does not replay missed ticks.
#[derive(Debug, Clone)]
pub struct Ticker {
    interval: Duration,
    last: Instant,
}

impl Ticker {
    pub fn new(interval: Duration, now: Instant) -> Self {
        Self { interval, last: now }
    }

    pub fn poll(&mut self, now: Instant) -> bool {
        if now.saturating_duration_since(self.last) >= self.interval {
            self.last = now;
            true
        } else {
            false
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wrap_degrees_stays_in_half_open_range() {
        assert_eq!(wrap_degrees(360.0), 0.0);
        assert_eq!(wrap_degrees(-0.5), 359.5);
        assert_eq!(wrap_degrees(725.0), 5.0);
        assert!(wrap_degrees(-1e-15) < 360.0);
    }

    #[test]
    fn initial_sample_is_bounded() {
        let initial = TelemetrySample {
            altitude: 90_000.0,
            heading: -90.0,
            ..TelemetrySample::default()
        };
        let generator = TelemetryGenerator::with_sample(initial, Some(1));
        assert_eq!(generator.sample().altitude, 45_000.0);
        assert_eq!(generator.sample().heading, 270.0);
    }

    #[test]
    fn fuel_never_increases() {
        let mut generator = TelemetryGenerator::new(Some(3));
        let mut previous = generator.sample().fuel;
        for _ in 0..500 {
            let fuel = generator.tick().fuel;
            assert!(fuel <= previous);
            previous = fuel;
        }
    }

    #[test]
    fn radar_azimuth_always_advances() {
        let mut generator = TelemetryGenerator::new(Some(9));
        let before = generator.sample().radar_azimuth;
        let after = generator.tick().radar_azimuth;
        let advanced = wrap_degrees(after - before);
        assert!((5.0..=7.0).contains(&advanced));
    }

    #[test]
    fn ticker_fires_once_per_interval() {
        let start = Instant::now();
        let mut ticker = Ticker::new(Duration::from_millis(600), start);
        assert!(!ticker.poll(start + Duration::from_millis(599)));
        assert!(ticker.poll(start + Duration::from_millis(600)));
        assert!(!ticker.poll(start + Duration::from_millis(700)));
        // missed ticks are not replayed
        assert!(ticker.poll(start + Duration::from_millis(5000)));
        assert!(!ticker.poll(start + Duration::from_millis(5001)));
    }
}
