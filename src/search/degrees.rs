use super::SearchError;
use crate::utils::gcd;

/// Genus of the smooth model of `y^n = f(x)` with `deg f = d` and `f` separable.
///
/// Riemann-Hurwitz gives `2g = (n-1)(d-2) + n - gcd(n, d)`. Returns `None`
/// when the right-hand side is negative or odd, or does not fit in `i128`.
///
/// # Example
///
/// ```
/// use pointless::search::degrees::genus;
///
/// assert_eq!(genus(2, 6), Some(2)); // y^2 = sextic
/// assert_eq!(genus(3, 4), Some(3)); // plane quartic y^3 = quartic
/// ```
pub fn genus(n: u64, d: u64) -> Option<u64> {
    let twice = (n as i128 - 1)
        .checked_mul(d as i128 - 2)?
        .checked_add(n as i128 - gcd(n, d) as i128)?;
    if twice < 0 || twice % 2 != 0 {
        return None;
    }
    u64::try_from(twice / 2).ok()
}

/// Polynomial degrees `d` for which `y^n = f(x)` has genus `g` and the
/// points above infinity are not a single totally ramified (hence rational)
/// point.
///
/// Candidates run over `1..=2 + floor(2g / (n-1))`; `d` is admitted iff
/// `gcd(d, n) > 1` and [`genus`] of `(n, d)` is exactly `g`. The result is
/// ascending.
///
/// # Errors
///
/// Returns `SearchError::InvalidExponent` if `n < 2` and
/// `SearchError::GenusOverflow` if the degree bound does not fit in a `u64`.
///
/// # Example
///
/// ```
/// use pointless::search::degrees::possible_degrees;
///
/// assert_eq!(possible_degrees(2, 2).unwrap(), vec![6]);
/// assert_eq!(possible_degrees(2, 3).unwrap(), vec![8]);
/// ```
pub fn possible_degrees(n: u64, g: u64) -> Result<Vec<u64>, SearchError> {
    if n < 2 {
        return Err(SearchError::InvalidExponent(n));
    }

    let max_degree = g
        .checked_mul(2)
        .map(|twice| twice / (n - 1))
        .and_then(|d| d.checked_add(2))
        .ok_or(SearchError::GenusOverflow(g))?;
    Ok((1..=max_degree)
        .filter(|&d| gcd(d, n) > 1 && genus(n, d) == Some(g))
        .collect())
}
