/// Scales a raw integer token amount down by `10^decimals` and renders it
/// for display: thousands-grouped integer part, fractional part trimmed of
/// trailing zeros. Pure integer arithmetic, so amounts far beyond f64
/// precision render exactly.
pub fn format_token_amount(raw: u128, decimals: u8) -> String {
    let divisor = 10u128.pow(decimals as u32);

    let whole = raw / divisor;
    let frac = raw % divisor;

    let whole_str = group_thousands(whole);

    if frac == 0 {
        return whole_str;
    }

    let frac_str = format!("{:0>width$}", frac, width = decimals as usize);
    let frac_str = frac_str.trim_end_matches('0');

    format!("{whole_str}.{frac_str}")
}

/// Parses a display amount back into a plain numeric value, stripping the
/// thousands separators. UI comparisons only; claim transactions always use
/// the raw integer amounts.
pub fn parse_display_amount(amount: &str) -> f64 {
    amount.replace(',', "").trim().parse::<f64>().unwrap_or(0.0)
}

fn group_thousands(value: u128) -> String {
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
