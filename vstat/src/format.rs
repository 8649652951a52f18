// src/format.rs
const BYTE_UNITS: [&str; 6] = ["bytes", "KB", "MB", "GB", "TB", "PB"];

/// Whole number with grouped thousands followed by `unit`.
///
/// ```
/// assert_eq!(vstat::format::decimal(1234567, "words"), "1,234,567 words");
/// ```
#[must_use]
pub fn decimal(value: u64, unit: &str) -> String {
    format!("{} {unit}", group_thousands(&value.to_string()))
}

/// Size scaled by 1024 while it exceeds 1024, with two fraction digits.
///
/// ```
/// assert_eq!(vstat::format::bytes(1536), "1.50 KB");
/// assert_eq!(vstat::format::bytes(1024), "1,024.00 bytes");
/// ```
#[must_use]
#[expect(clippy::as_conversions, reason = "Precision not critical")]
#[expect(clippy::cast_precision_loss, reason = "Precision not critical")]
pub fn bytes(value: u64) -> String {
    let mut scaled = value as f64;
    let mut unit = 0_usize;
    while scaled > 1024.0 && unit + 1 < BYTE_UNITS.len() {
        scaled /= 1024.0;
        unit += 1;
    }

    let fixed = format!("{scaled:.2}");
    let (whole, fraction) = fixed.split_once('.').unwrap_or((&fixed, "00"));
    format!(
        "{}.{fraction} {}",
        group_thousands(whole),
        BYTE_UNITS[unit]
    )
}

fn group_thousands(digits: &str) -> String {
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, digit) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(digit);
    }
    grouped
}
