/// Percentage of `total` covered by `matched`, rounded half up.
///
/// For checked symptoms `total` is the number of *selected* symptoms, not
/// the size of the disease's own symptom set: a disease with one symptom
/// that matches one of five selected symptoms scores 20. For descriptions
/// `total` is the disease's own symptom count.
///
/// Integer arithmetic keeps the rounding exact: `round(100 * m / t)` equals
/// `(200 * m + t) / (2 * t)` for non-negative `m` and positive `t`.
///
/// Returns 0 when `total` is zero.
#[must_use]
pub fn match_percent(matched: usize, total: usize) -> u8 {
    if total == 0 {
        return 0;
    }
    let matched = matched.min(total);
    let percent = (200 * matched + total) / (2 * total);
    #[allow(clippy::cast_possible_truncation)] // matched <= total, so percent <= 100
    {
        percent as u8
    }
}
