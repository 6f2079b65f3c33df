use argminmax::ArgMinMax;

pub fn get_max(vec: &[f64]) -> f64 {
    let max_index: usize = vec.argmax();
    vec[max_index]
}

/// Largest absolute value in `vec`, or `None` for an empty slice.
pub fn max_abs(vec: &[f64]) -> Option<f64> {
    if vec.is_empty() {
        return None;
    }
    let magnitudes: Vec<f64> = vec.iter().map(|v| v.abs()).collect();
    Some(get_max(&magnitudes))
}

// Normalizes a vector of (positive) f64 to 0.0 to 1.0. Guarantees largest value is 1.0
// Name: `Max normalization`, `Max-Abs normalization`, or `L∞ normalization`
pub fn normalize_max(vec: &[f64]) -> Vec<f64> {
    if vec.is_empty() {
        return Vec::new();
    }
    match get_max(vec) {
        val if val <= 0.0 || !val.is_finite() => vec.to_vec(),
        val => vec.iter().map(|&x| x / val).collect(),
    }
}

/// Signed percent change from `from` to `to`.
/// Returns `None` when the baseline is zero, either side is not finite,
/// or the result overflows.
pub fn pct_change(from: f64, to: f64) -> Option<f64> {
    if from == 0.0 || !from.is_finite() || !to.is_finite() {
        return None;
    }
    Some((to - from) / from * 100.0).filter(|pct| pct.is_finite())
}
