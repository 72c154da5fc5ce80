//! Permissive numeric parsing for quantity and stitch-count fields.
//!
//! Historical data files store counts as free-form strings ("12 pcs",
//! "1.200", "N/A"). Aggregation keeps only the digit characters and treats
//! anything unparsable as zero; malformed input is never an error.

/// Extract the digit characters from `raw` and parse them as a count.
///
/// `"12 pcs"` parses as 12, `"1.200"` as 1200, and a value with no digits
/// at all (including the empty string) as 0. Values whose digits overflow
/// a `u64` also fall back to 0 rather than failing.
pub fn digit_count(raw: &str) -> u64 {
    let digits: String = raw.chars().filter(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return 0;
    }
    digits.parse().unwrap_or(0)
}
