/// Mathematical utility functions shared by the binning and geometry code.
///
/// The quantizer here is the single step function used for both LOD index
/// selection and marker formation lookup, so every caller inherits the same
/// inclusive clamping at the range ends.

/// Linear interpolation between two values
///
/// # Arguments
/// * `a` - Start value
/// * `b` - End value
/// * `ratio` - Interpolation ratio (0.0 = a, 1.0 = b)
///
/// # Examples
/// ```
/// use hextile_rust::math_utils::lerp;
///
/// assert_eq!(lerp(0.0, 10.0, 0.5), 5.0);
/// assert_eq!(lerp(100.0, 200.0, 0.25), 125.0);
/// ```
pub fn lerp(a: f64, b: f64, ratio: f64) -> f64 {
    a + (b - a) * ratio
}

/// Inverse linear interpolation: where `value` sits between `a` and `b`
///
/// # Examples
/// ```
/// use hextile_rust::math_utils::inverse_lerp;
///
/// assert_eq!(inverse_lerp(0.0, 10.0, 5.0), 0.5);
/// assert_eq!(inverse_lerp(100.0, 200.0, 200.0), 1.0);
/// ```
pub fn inverse_lerp(a: f64, b: f64, value: f64) -> f64 {
    if b == a {
        0.0
    } else {
        (value - a) / (b - a)
    }
}

/// Clamp a value into the unit interval
///
/// # Examples
/// ```
/// use hextile_rust::math_utils::clamp01;
///
/// assert_eq!(clamp01(0.5), 0.5);
/// assert_eq!(clamp01(-2.0), 0.0);
/// assert_eq!(clamp01(1.5), 1.0);
/// ```
pub fn clamp01(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Quantize a fraction in [0,1] into one of `buckets` equal buckets
///
/// Returns `clamp(floor(fraction * buckets), 0, buckets - 1)`, so 1.0 maps
/// to the last bucket rather than one past the end, and out-of-range input
/// stays inside the bucket range.
///
/// # Examples
/// ```
/// use hextile_rust::math_utils::quantize;
///
/// assert_eq!(quantize(0.0, 4), 0);
/// assert_eq!(quantize(1.0, 4), 3);
/// assert_eq!(quantize(0.5, 7), 3);
/// ```
pub fn quantize(fraction: f64, buckets: usize) -> usize {
    if buckets == 0 {
        return 0;
    }
    let raw = (fraction * buckets as f64).floor();
    (raw as isize).clamp(0, buckets as isize - 1) as usize
}

/// Remap a value from one range to another, clamped to the target range
///
/// Used to turn a map zoom value into the continuous resolution fraction.
///
/// # Examples
/// ```
/// use hextile_rust::math_utils::remap_clamped;
///
/// assert_eq!(remap_clamped(11.0, 9.0, 13.0, 0.0, 1.0), 0.5);
/// assert_eq!(remap_clamped(20.0, 9.0, 13.0, 0.0, 1.0), 1.0);
/// ```
pub fn remap_clamped(value: f64, from_min: f64, from_max: f64, to_min: f64, to_max: f64) -> f64 {
    let ratio = inverse_lerp(from_min, from_max, value).clamp(0.0, 1.0);
    lerp(to_min, to_max, ratio)
}
