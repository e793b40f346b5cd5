/// Quantile of an ascending, non-empty, NaN-free slice with linear
/// interpolation between order statistics.
///
/// `q` is in `[0, 1]`. The position in the sorted values is `q * (n - 1)`;
/// when it falls between two order statistics the result is interpolated.
pub fn quantile_sorted(sorted: &[f64], q: f64) -> f64 {
    let n = sorted.len();
    if n == 1 {
        return sorted[0];
    }

    let idx = q.clamp(0.0, 1.0) * (n - 1) as f64;
    let lo = idx.floor() as usize;
    let hi = idx.ceil() as usize;

    if lo == hi {
        sorted[lo]
    } else {
        let w = idx - lo as f64;
        sorted[lo] + (sorted[hi] - sorted[lo]) * w
    }
}
