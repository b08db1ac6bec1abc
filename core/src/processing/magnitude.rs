use crate::prelude::WARNING_MAGNITUDE;

/// Local-magnitude proxy: `log10(amplitude) + log10(distance_km) + 1.0`.
///
/// Both arguments must be strictly positive for a finite result. No
/// validation happens here: zero yields `-inf` and negative or NaN input
/// yields NaN, both of which fail `passes_warning_gate`.
pub fn estimate_magnitude(amplitude: f64, distance_km: f64) -> f64 {
    amplitude.log10() + distance_km.log10() + 1.0
}

/// True when a full-precision magnitude should escalate to a warning.
///
/// Non-finite magnitudes never pass, including `+inf`.
pub fn passes_warning_gate(magnitude: f64) -> bool {
    magnitude.is_finite() && magnitude >= WARNING_MAGNITUDE
}
