/// Check if `n` is a prime number.
///
/// Uses trial division up to sqrt(n). Suitable for validating
/// field orders at startup, not for high-performance primality testing.
pub const fn is_prime(n: u64) -> bool {
    if n < 2 {
        return false;
    }
    if n == 2 {
        return true;
    }
    if n % 2 == 0 {
        return false;
    }

    let mut i = 3;
    while i <= n / i {
        if n % i == 0 {
            return false;
        }
        i += 2;
    }
    true
}

/// Greatest common divisor of two integers.
///
/// `gcd(0, 0) == 0`.
pub const fn gcd(mut a: u64, mut b: u64) -> u64 {
    while b != 0 {
        let t = a % b;
        a = b;
        b = t;
    }
    a
}

/// Decompose `q` as `p^k` with `p` prime and `k >= 1`.
///
/// Returns `None` if `q` is not a prime power.
///
/// # Example
///
/// ```
/// use pointless::utils::prime_power;
///
/// assert_eq!(prime_power(9), Some((3, 2)));
/// assert_eq!(prime_power(13), Some((13, 1)));
/// assert_eq!(prime_power(12), None);
/// ```
pub fn prime_power(q: u64) -> Option<(u64, u32)> {
    if q < 2 {
        return None;
    }

    // The smallest divisor > 1 is the only candidate prime.
    let mut p = q;
    let mut d = 2u64;
    while d <= q / d {
        if q % d == 0 {
            p = d;
            break;
        }
        d += 1;
    }

    let mut rest = q;
    let mut k = 0u32;
    while rest % p == 0 {
        rest /= p;
        k += 1;
    }

    (rest == 1).then_some((p, k))
}

/// Check if `q` is a prime power `p^k` with `k >= 1`.
pub fn is_prime_power(q: u64) -> bool {
    prime_power(q).is_some()
}

/// Distinct prime divisors of `n`, in ascending order.
pub fn prime_divisors(mut n: u64) -> Vec<u64> {
    let mut primes = Vec::new();
    let mut d: u64 = 2;

    while d <= n / d {
        if n % d == 0 {
            primes.push(d);
            while n % d == 0 {
                n /= d;
            }
        }
        d += 1;
    }

    if n > 1 {
        primes.push(n);
    }

    primes
}
