//! Prime generation and primality testing.

/// Generate all primes up to `limit` (inclusive) using the Sieve of
/// Eratosthenes.
pub fn sieve_primes(limit: u64) -> Vec<u64> {
    if limit < 2 {
        return Vec::new();
    }
    let size = (limit + 1) as usize;
    let mut is_prime = vec![true; size];
    is_prime[0] = false;
    is_prime[1] = false;
    let mut i = 2usize;
    while i * i < size {
        if is_prime[i] {
            let mut j = i * i;
            while j < size {
                is_prime[j] = false;
                j += i;
            }
        }
        i += 1;
    }
    is_prime
        .iter()
        .enumerate()
        .filter(|(_, &p)| p)
        .map(|(i, _)| i as u64)
        .collect()
}

/// Trial-division primality test (6k±1 wheel), O(sqrt(n)).
///
/// Used where a full sieve is overkill: candidate-window generation and
/// input validation.
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }
    let mut i = 5u64;
    while i * i <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sieve_small() {
        assert_eq!(sieve_primes(30), vec![2, 3, 5, 7, 11, 13, 17, 19, 23, 29]);
        assert_eq!(sieve_primes(1), Vec::<u64>::new());
        assert_eq!(sieve_primes(2), vec![2]);
    }

    #[test]
    fn test_sieve_count() {
        // pi(10^6) = 78498
        assert_eq!(sieve_primes(1_000_000).len(), 78498);
    }

    #[test]
    fn test_is_prime_agrees_with_sieve() {
        let primes = sieve_primes(10_000);
        for n in 0..=10_000u64 {
            assert_eq!(
                is_prime(n),
                primes.binary_search(&n).is_ok(),
                "disagreement at n={}",
                n
            );
        }
    }

    #[test]
    fn test_is_prime_larger() {
        assert!(is_prime(104_729)); // 10000th prime
        assert!(!is_prime(104_729 * 3));
        assert!(is_prime(2_147_483_647)); // 2^31 - 1
    }
}
