use ethers_core::types::U256;
use ethers_core::utils::format_units;

/// Truncates the fractional part of a formatted decimal string to at most
/// `decimals` digits. Always rounds toward zero.
pub fn round_to(value: &str, decimals: usize) -> String {
    match value.split_once('.') {
        None => value.to_string(),
        Some((int, _)) if decimals == 0 => int.to_string(),
        Some((int, frac)) => {
            let frac = &frac[..frac.len().min(decimals)];
            format!("{int}.{frac}")
        }
    }
}

/// Renders a wei amount in ether, truncated to `decimals` places.
pub fn eth_display(wei: U256, decimals: usize) -> String {
    unit_display(wei, "ether", decimals)
}

/// Renders a wei amount in gwei, truncated to `decimals` places.
pub fn gwei_display(wei: U256, decimals: usize) -> String {
    unit_display(wei, "gwei", decimals)
}

/// Fiat value of a wei-denominated fee total, rendered in dollars.
///
/// `price_cents * fees / 100` stays in integer arithmetic; the quotient
/// still carries 18 decimals and renders like an ether amount, so large
/// totals lose no precision on the way to display.
pub fn usd_display(fees_wei: U256, price_cents: U256, decimals: usize) -> String {
    let scaled = price_cents.saturating_mul(fees_wei) / U256::from(100u64);
    unit_display(scaled, "ether", decimals)
}

fn unit_display(wei: U256, unit: &str, decimals: usize) -> String {
    match format_units(wei, unit) {
        Ok(formatted) => round_to(&formatted, decimals),
        Err(_) => wei.to_string(),
    }
}
