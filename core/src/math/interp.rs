pub struct InterpHelper;

impl InterpHelper {
    /// Linear interpolation of `value` from `[in_min, in_max]` onto `[out_min, out_max]`.
    ///
    /// Ranges may be descending; values outside the input range extrapolate.
    pub fn map_range(value: f64, in_min: f64, in_max: f64, out_min: f64, out_max: f64) -> f64 {
        (value - in_min) * (out_max - out_min) / (in_max - in_min) + out_min
    }
}
