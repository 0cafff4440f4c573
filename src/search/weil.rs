use super::SearchError;

/// Field size beyond which every genus-`g` curve has a rational point.
///
/// The Weil bound `#C(F_q) >= q + 1 - 2g*sqrt(q)` is positive once
/// `q > 2g^2 - 1 + 2g*sqrt(g^2 - 1)`, which is the value returned.
///
/// # Errors
///
/// Returns `SearchError::InvalidGenus` for `g = 0`.
///
/// # Example
///
/// ```
/// use pointless::search::weil::weil_bound;
///
/// let bound = weil_bound(2).unwrap();
/// assert!((bound - 13.928).abs() < 1e-3);
/// ```
pub fn weil_bound(g: u64) -> Result<f64, SearchError> {
    if g == 0 {
        return Err(SearchError::InvalidGenus(g));
    }
    let g = g as f64;
    Ok(2.0 * g * g - 1.0 + 2.0 * g * (g * g - 1.0).sqrt())
}

/// Largest field size worth searching for genus `g`: `floor(weil_bound(g))`.
pub fn field_cutoff(g: u64) -> Result<u64, SearchError> {
    weil_bound(g).map(|b| b.floor() as u64)
}
