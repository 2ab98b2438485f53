/// How a locale writes money.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NumberStyle {
    group_separator: &'static str,
    decimal_separator: &'static str,
    indian_grouping: bool,
    symbol_first: bool,
}

const ENGLISH: NumberStyle = NumberStyle {
    group_separator: ",",
    decimal_separator: ".",
    indian_grouping: false,
    symbol_first: true,
};

impl NumberStyle {
    fn for_locale(locale: &str) -> Self {
        let locale = locale.trim().to_ascii_lowercase().replace('_', "-");
        let language = locale.split('-').next().unwrap_or("");

        match (language, locale.as_str()) {
            (_, "en-in") | (_, "hi-in") => NumberStyle {
                indian_grouping: true,
                ..ENGLISH
            },
            ("de", _) => NumberStyle {
                group_separator: ".",
                decimal_separator: ",",
                indian_grouping: false,
                symbol_first: false,
            },
            ("fr", _) => NumberStyle {
                group_separator: " ",
                decimal_separator: ",",
                indian_grouping: false,
                symbol_first: false,
            },
            _ => ENGLISH,
        }
    }
}

/// Display symbol for an ISO 4217 code. Built-in PDF fonts only cover Latin-1,
/// so codes without an ASCII symbol print as the code itself.
pub fn currency_symbol(currency: &str) -> String {
    let code = currency.trim().to_ascii_uppercase();
    match code.as_str() {
        "USD" => "$".to_string(),
        "CAD" => "CA$".to_string(),
        "AUD" => "A$".to_string(),
        "INR" => "Rs.".to_string(),
        "" => "$".to_string(),
        _ => code,
    }
}

fn group_digits(digits: &str, separator: &str, indian: bool) -> String {
    let len = digits.len();
    let mut groups: Vec<&str> = Vec::new();
    let mut end = len;

    if indian && len > 3 {
        groups.push(&digits[len - 3..]);
        end = len - 3;
        while end > 2 {
            groups.push(&digits[end - 2..end]);
            end -= 2;
        }
    } else {
        while end > 3 {
            groups.push(&digits[end - 3..end]);
            end -= 3;
        }
    }
    groups.push(&digits[..end]);
    groups.reverse();
    groups.join(separator)
}

/// Format an amount with two decimals in the locale's style, e.g.
/// `$1,234.56`, `Rs. 1,23,456.00`, `1.234,56 $`.
pub fn format_currency(amount: f64, currency: &str, locale: &str) -> String {
    let style = NumberStyle::for_locale(locale);
    let symbol = currency_symbol(currency);

    let cents = (amount.abs() * 100.0).round();
    let negative = amount < 0.0 && cents > 0.0;
    let whole = format!("{:.0}", (cents / 100.0).trunc());
    let fraction = (cents % 100.0) as u32;

    let number = format!(
        "{}{}{:02}",
        group_digits(&whole, style.group_separator, style.indian_grouping),
        style.decimal_separator,
        fraction
    );
    let sign = if negative { "-" } else { "" };

    if style.symbol_first {
        let joiner = if symbol.ends_with(|c: char| c.is_ascii_alphabetic() || c == '.') {
            " "
        } else {
            ""
        };
        format!("{}{}{}{}", sign, symbol, joiner, number)
    } else {
        format!("{}{} {}", sign, number, symbol)
    }
}

/// `0.18` -> `18%`, `0.075` -> `7.5%`.
pub fn format_percent(rate: f64) -> String {
    let percent = (rate * 10_000.0).round() / 100.0;
    if percent.fract() == 0.0 {
        format!("{:.0}%", percent)
    } else {
        let text = format!("{:.2}", percent);
        format!("{}%", text.trim_end_matches('0'))
    }
}
