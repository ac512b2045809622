/// "$12.50"; negative totals keep their sign in front.
#[inline]
pub fn format_total(total: f64) -> String {
    if !total.is_finite() {
        return "$0.00".to_string();
    }

    if total < 0.0 {
        format!("-${:.2}", -total)
    } else {
        format!("${:.2}", total)
    }
}

/// Clip a summary to `max_chars`, ending in an ellipsis when cut.
pub fn truncate_summary(summary: &str, max_chars: usize) -> String {
    if summary.chars().count() <= max_chars {
        return summary.to_string();
    }
    let kept: String = summary.chars().take(max_chars.saturating_sub(1)).collect();
    format!("{}…", kept.trim_end())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_total() {
        assert_eq!(format_total(0.0), "$0.00");
        assert_eq!(format_total(12.5), "$12.50");
        assert_eq!(format_total(89.999), "$90.00");
        assert_eq!(format_total(-3.0), "-$3.00");
        assert_eq!(format_total(f64::NAN), "$0.00");
    }

    #[test]
    fn test_truncate_summary() {
        assert_eq!(truncate_summary("2x Soup", 20), "2x Soup");
        assert_eq!(truncate_summary("2x Soup, 1x Bread", 8), "2x Soup…");
    }
}
