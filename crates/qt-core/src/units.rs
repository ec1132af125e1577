// qt-core/src/units.rs
//
// The tank model works in the cm/s system (levels in cm, areas in cm², flows in cm³/s).
// Pump capacity is quoted in L/min; uom carries that conversion.

use uom::si::f64::VolumeRate as UomVolumeRate;

pub type VolumeRate = UomVolumeRate;

#[inline]
pub fn lpm(v: f64) -> VolumeRate {
    use uom::si::volume_rate::liter_per_minute;
    VolumeRate::new::<liter_per_minute>(v)
}

/// Magnitude of a volume rate in cm³/s.
#[inline]
pub fn in_cm3ps(q: VolumeRate) -> f64 {
    use uom::si::volume_rate::cubic_centimeter_per_second;
    q.get::<cubic_centimeter_per_second>()
}

/// Pump capacity in L/min expressed as cm³/s.
#[inline]
pub fn lpm_to_cm3ps(v: f64) -> f64 {
    in_cm3ps(lpm(v))
}

pub mod constants {
    /// Gravitational acceleration as used by the tank model (cm/s²).
    pub const G_CMPS2: f64 = 981.0;
}
