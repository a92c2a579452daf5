/// Affine remap of `v` from `[in_min, in_max]` to `[out_min, out_max]`.
///
/// `in_min == in_max` is a caller bug: it trips a debug assertion and yields
/// a non-finite result in release builds. Values outside the input range
/// extrapolate linearly.
#[inline]
pub fn remap(v: f32, in_min: f32, in_max: f32, out_min: f32, out_max: f32) -> f32 {
    debug_assert!(in_min != in_max, "remap: zero-width input range [{in_min}, {in_max}]");
    out_min + (v - in_min) * (out_max - out_min) / (in_max - in_min)
}

/// Noise output in [-1, 1] → working range [0, 1].
#[inline]
pub fn unit(v: f32) -> f32 {
    remap(v, -1.0, 1.0, 0.0, 1.0)
}
