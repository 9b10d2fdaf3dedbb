/// Trial-division primality test, good enough for slot counts.
///
/// # Examples
/// ```
/// use hashslot::utils::is_prime;
///
/// assert!(is_prime(101));
/// assert!(!is_prime(100));
/// assert!(!is_prime(1));
/// ```
pub fn is_prime(n: u32) -> bool {
    if n < 2 {
        return false;
    }
    if n % 2 == 0 {
        return n == 2;
    }
    let n = n as u64;
    let mut d = 3u64;
    while d * d <= n {
        if n % d == 0 {
            return false;
        }
        d += 2;
    }
    true
}

/// Smallest prime `>= n`, or `None` if there is none below `u32::MAX`.
///
/// # Examples
/// ```
/// use hashslot::utils::next_prime;
///
/// assert_eq!(next_prime(100), Some(101));
/// assert_eq!(next_prime(101), Some(101));
/// assert_eq!(next_prime(0), Some(2));
/// ```
pub fn next_prime(n: u32) -> Option<u32> {
    (n.max(2)..=u32::MAX).find(|&candidate| is_prime(candidate))
}
