use cloudboard_types::MonthYear;

/// Format an amount as dollars: `1234.5 -> "$1,234.50"`
pub fn format_currency(amount: f64) -> String {
    format_currency_with("$", amount)
}

/// Format an amount with two decimals, thousands separators and `symbol`
/// prefixed (after the sign for negative amounts)
pub fn format_currency_with(symbol: &str, amount: f64) -> String {
    let cents = (amount.abs() * 100.0).round() as u64;
    let sign = if amount < 0.0 && cents > 0 { "-" } else { "" };
    format!(
        "{}{}{}.{:02}",
        sign,
        symbol,
        group_thousands(cents / 100),
        cents % 100
    )
}

/// `"2025-08" -> "August 2025"`
pub fn format_month_label(month: &MonthYear) -> String {
    month.first_day().format("%B %Y").to_string()
}

/// `80.0 -> "80.00%"`
pub fn format_percent(pct: f64) -> String {
    format!("{:.2}%", pct)
}

fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    grouped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_currency() {
        assert_eq!(format_currency(0.0), "$0.00");
        assert_eq!(format_currency(9.5), "$9.50");
        assert_eq!(format_currency(80.0), "$80.00");
        assert_eq!(format_currency(1234.567), "$1,234.57");
        assert_eq!(format_currency(1_000_000.0), "$1,000,000.00");
        assert_eq!(format_currency(-42.1), "-$42.10");
    }

    #[test]
    fn test_negative_zero_has_no_sign() {
        assert_eq!(format_currency(-0.001), "$0.00");
    }

    #[test]
    fn test_format_currency_with_symbol() {
        assert_eq!(format_currency_with("€", 12.0), "€12.00");
    }

    #[test]
    fn test_format_month_label() {
        let month = MonthYear::parse("2025-08").unwrap();
        assert_eq!(format_month_label(&month), "August 2025");

        let month = MonthYear::parse("2024-01").unwrap();
        assert_eq!(format_month_label(&month), "January 2024");

        let month = MonthYear::parse("2023-12").unwrap();
        assert_eq!(format_month_label(&month), "December 2023");
    }

    #[test]
    fn test_format_percent() {
        assert_eq!(format_percent(80.0), "80.00%");
        assert_eq!(format_percent(33.333), "33.33%");
    }
}
