//! Compact number formatting for KPI cards.

/// Formats `value` with a `K`/`M` suffix and at most one decimal, e.g.
/// `1500.0` → `"1.5K"`, `2_000_000.0` → `"2M"`. Values under 1000 are rounded
/// to an integer. Non-finite values format as `"0"`.
pub fn format_compact(value: f64) -> String {
    if !value.is_finite() || value == 0.0 {
        return "0".to_string();
    }

    let abs = value.abs();
    let formatted = if abs >= 1_000_000.0 {
        scaled(abs / 1_000_000.0, "M")
    } else if abs >= 1_000.0 {
        scaled(abs / 1_000.0, "K")
    } else {
        format!("{}", abs.round())
    };

    if value < 0.0 && formatted != "0" {
        format!("-{formatted}")
    } else {
        formatted
    }
}

pub fn format_with_affixes(value: f64, prefix: &str, suffix: &str) -> String {
    format!("{prefix}{}{suffix}", format_compact(value))
}

fn scaled(value: f64, unit: &str) -> String {
    if value.fract() == 0.0 {
        return format!("{value}{unit}");
    }
    let one_decimal = format!("{value:.1}");
    let trimmed = one_decimal.strip_suffix(".0").unwrap_or(&one_decimal);
    format!("{trimmed}{unit}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_values_round() {
        assert_eq!(format_compact(0.0), "0");
        assert_eq!(format_compact(12.4), "12");
        assert_eq!(format_compact(999.0), "999");
        assert_eq!(format_compact(-42.0), "-42");
        assert_eq!(format_compact(-0.2), "0");
    }

    #[test]
    fn test_thousands_and_millions() {
        assert_eq!(format_compact(1_000.0), "1K");
        assert_eq!(format_compact(1_500.0), "1.5K");
        assert_eq!(format_compact(12_340.0), "12.3K");
        assert_eq!(format_compact(2_000_000.0), "2M");
        assert_eq!(format_compact(2_460_000.0), "2.5M");
        assert_eq!(format_compact(-3_000.0), "-3K");
    }

    #[test]
    fn test_trailing_zero_decimal_dropped() {
        assert_eq!(format_compact(1_999_999.0), "2M");
        assert_eq!(format_compact(1_001.0), "1K");
    }

    #[test]
    fn test_non_finite() {
        assert_eq!(format_compact(f64::NAN), "0");
        assert_eq!(format_compact(f64::INFINITY), "0");
    }

    #[test]
    fn test_affixes() {
        assert_eq!(format_with_affixes(1_500.0, "$", ""), "$1.5K");
        assert_eq!(format_with_affixes(12.0, "", "%"), "12%");
    }
}
