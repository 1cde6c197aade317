//! Prime helpers used to size the table and derive the probe-step prime.
//!
//! All searches stay inside the positive `i32` range: the table stores at
//! most [`MAX_CAPACITY`](crate::MAX_CAPACITY) slots, which is the largest
//! prime below `i32::MAX`.

use crate::error::Error;
use crate::error::Result;

/// Returns `true` if `n` is prime. Every number below 2 is not prime.
///
/// # Examples
///
/// ```rust
/// # use double_hash_table::primes::is_prime;
/// assert!(is_prime(631));
/// assert!(!is_prime(630));
/// assert!(!is_prime(-7));
/// ```
pub fn is_prime(n: i32) -> bool {
    if n == 2 {
        return true;
    }
    if n < 2 || n % 2 == 0 {
        return false;
    }

    let n = n as u32;
    let mut divisor = 3u32;
    // `divisor <= n / divisor` is `divisor * divisor <= n` without overflow.
    while divisor <= n / divisor {
        if n % divisor == 0 {
            return false;
        }
        divisor += 2;
    }
    true
}

/// Returns the smallest prime strictly greater than `n`.
///
/// Only candidates strictly below `i32::MAX` are considered.
///
/// # Errors
///
/// - [`Error::InvalidArgument`] if `n` is negative.
/// - [`Error::SearchExhausted`] if no prime lies in `(n; i32::MAX)`.
///
/// # Examples
///
/// ```rust
/// # use double_hash_table::primes::next_prime;
/// assert_eq!(next_prime(8).unwrap(), 11);
/// assert_eq!(next_prime(178909).unwrap(), 178921);
/// assert!(next_prime(-1).is_err());
/// ```
pub fn next_prime(n: i32) -> Result<i32> {
    if n < 0 {
        return Err(Error::InvalidArgument {
            name: "number for next prime search",
            value: n as i128,
        });
    }
    if n < 2 {
        return Ok(2);
    }

    // Start at the first odd number above `n`. Widened so the step past
    // `i32::MAX - 1` cannot overflow.
    let mut candidate = n as i64 + 1 + (n as i64 % 2);
    while candidate < i32::MAX as i64 {
        let odd = candidate as i32;
        if is_prime(odd) {
            return Ok(odd);
        }
        candidate += 2;
    }

    Err(Error::SearchExhausted { from: n })
}

/// Returns the largest prime strictly less than `n`.
///
/// # Errors
///
/// [`Error::InvalidArgument`] if `n < 3`, since no prime lies below 2.
///
/// # Examples
///
/// ```rust
/// # use double_hash_table::primes::prev_prime;
/// assert_eq!(prev_prime(3).unwrap(), 2);
/// assert_eq!(prev_prime(178921).unwrap(), 178909);
/// assert!(prev_prime(2).is_err());
/// ```
pub fn prev_prime(n: i32) -> Result<i32> {
    if n < 3 {
        return Err(Error::InvalidArgument {
            name: "number for previous prime search",
            value: n as i128,
        });
    }

    let mut candidate = n - 1 - n % 2;
    while candidate >= 3 {
        if is_prime(candidate) {
            return Ok(candidate);
        }
        candidate -= 2;
    }

    Ok(2)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_prime_naive(n: i32) -> bool {
        n >= 2 && (2..n).take_while(|d| d * d <= n).all(|d| n % d != 0)
    }

    #[test]
    fn prime_values() {
        for n in [
            2, 3, 5, 7, 631, 4969, 64381, 129803, 213641, 254993, 973051,
        ] {
            assert!(is_prime(n), "{n} should be prime");
        }
    }

    #[test]
    fn non_prime_values() {
        for n in [
            0, 1, 4, 9, 630, 4971, 64379, 129801, 213639, 254995, 973027,
        ] {
            assert!(!is_prime(n), "{n} should not be prime");
        }
    }

    #[test]
    fn negative_numbers_are_not_prime() {
        for n in [-1, -2, -3, -7, i32::MIN] {
            assert!(!is_prime(n));
        }
    }

    #[test]
    fn agrees_with_trial_division() {
        for n in 0..10_000 {
            assert_eq!(is_prime(n), is_prime_naive(n), "disagreement at {n}");
        }
    }

    #[test]
    fn largest_representable_primes() {
        assert!(is_prime(i32::MAX));
        assert!(is_prime(crate::MAX_CAPACITY as i32));
        assert!(!is_prime(i32::MAX - 1));
        for n in (crate::MAX_CAPACITY as i32 + 1)..i32::MAX {
            assert!(!is_prime(n), "{n} should not be prime");
        }
    }

    #[test]
    fn next_prime_success() {
        for (n, expected) in [
            (0, 2),
            (1, 2),
            (2, 3),
            (8, 11),
            (31261, 31267),
            (970748, 970777),
            (178909, 178921),
        ] {
            assert_eq!(next_prime(n), Ok(expected), "starting with {n}");
        }
    }

    #[test]
    fn next_prime_rejects_negative() {
        for n in [-4971, -64379, -1] {
            assert!(matches!(
                next_prime(n),
                Err(Error::InvalidArgument { value, .. }) if value == n as i128
            ));
        }
    }

    #[test]
    fn next_prime_exhausts_below_max() {
        assert_eq!(
            next_prime(i32::MAX - 1),
            Err(Error::SearchExhausted { from: i32::MAX - 1 })
        );
        assert_eq!(
            next_prime(crate::MAX_CAPACITY as i32),
            Err(Error::SearchExhausted {
                from: crate::MAX_CAPACITY as i32
            })
        );
        assert_eq!(next_prime(i32::MAX), Err(Error::SearchExhausted { from: i32::MAX }));
    }

    #[test]
    fn prev_prime_success() {
        for (n, expected) in [
            (3, 2),
            (4, 3),
            (12, 11),
            (31305, 31277),
            (970775, 970747),
            (178921, 178909),
        ] {
            assert_eq!(prev_prime(n), Ok(expected), "starting with {n}");
        }
        assert_eq!(prev_prime(i32::MAX), Ok(crate::MAX_CAPACITY as i32));
    }

    #[test]
    fn prev_prime_rejects_small() {
        for n in [-4971, -10, 0, 1, 2] {
            assert!(matches!(prev_prime(n), Err(Error::InvalidArgument { .. })));
        }
    }

    #[test]
    fn adjacent_primes_invert() {
        for p in [3, 5, 11, 31267, 178909, 178921, 970747, 970777] {
            let next = next_prime(p).unwrap();
            assert_eq!(prev_prime(next), Ok(p));
            let prev = prev_prime(p).unwrap();
            assert_eq!(next_prime(prev), Ok(p));
        }
    }
}
