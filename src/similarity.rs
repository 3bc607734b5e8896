//! String overlap measures used by alignment.
//!
//! Both measures lower-case their inputs and work on Unicode scalar values,
//! so `"ÉLISE"` and `"élise"` overlap fully.

/// Length of the longest contiguous run shared by `a` and `b`.
///
/// Symmetric: `longest_common_substring(a, b) == longest_common_substring(b, a)`.
///
/// # Examples
///
/// ```
/// use castgender::similarity::longest_common_substring;
///
/// assert_eq!(longest_common_substring("mr john smith", "smithy"), 5);
/// assert_eq!(longest_common_substring("abc", "xyz"), 0);
/// ```
#[must_use]
pub fn longest_common_substring(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.to_lowercase().chars().collect();
    let b: Vec<char> = b.to_lowercase().chars().collect();
    if a.is_empty() || b.is_empty() {
        return 0;
    }

    // Rolling row of match lengths ending at (i, j).
    let mut prev = vec![0usize; b.len() + 1];
    let mut curr = vec![0usize; b.len() + 1];
    let mut best = 0;
    for &ca in &a {
        for (j, &cb) in b.iter().enumerate() {
            curr[j + 1] = if ca == cb { prev[j] + 1 } else { 0 };
            best = best.max(curr[j + 1]);
        }
        std::mem::swap(&mut prev, &mut curr);
    }
    best
}

/// True if `needle` occurs contiguously in `haystack`, ignoring case.
///
/// The empty needle is contained in every haystack.
#[must_use]
pub fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
