//! Decimal truncation helpers

/// Largest supported number of decimals. `usize::MAX * 10^18` still fits a
/// `u128`, and an `f64` carries no more significant digits than that anyway.
pub const MAX_DECIMALS: u32 = 18;

/// `numerator / denominator` truncated to `decimals` digits, computed exactly.
///
/// Returns 0 when `denominator` is 0. `decimals` above [`MAX_DECIMALS`] is
/// treated as [`MAX_DECIMALS`].
pub fn truncated_ratio(numerator: usize, denominator: usize, decimals: u32) -> f64 {
    if denominator == 0 {
        return 0.0;
    }
    let scale = 10u128.pow(decimals.min(MAX_DECIMALS));
    let scaled = numerator as u128 * scale / denominator as u128;
    scaled as f64 / scale as f64
}
