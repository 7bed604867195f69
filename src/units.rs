// src/units.rs
use alloy_primitives::utils::{self, ParseUnits};
use alloy_primitives::U256;

/// Decimals of every token the dashboard supports
pub const TOKEN_DECIMALS: u8 = 18;

/// Convert a decimal amount such as "1.5" into a base-unit integer string
pub fn parse_units(amount: &str, decimals: u8) -> Result<String, String> {
    let amount = amount.trim();
    if amount.is_empty() || amount == "." {
        return Err(format!("Invalid amount: {:?}", amount));
    }
    let normalized = match amount.split_once('.') {
        Some((whole, fraction)) => {
            let whole = if whole.is_empty() { "0" } else { whole };
            let fraction = fraction.trim_end_matches('0');
            if fraction.len() > decimals as usize {
                return Err(format!("Too many decimal places (max {})", decimals));
            }
            if fraction.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, fraction)
            }
        }
        None => amount.to_string(),
    };

    match utils::parse_units(&normalized, decimals) {
        Ok(ParseUnits::U256(value)) => Ok(value.to_string()),
        Ok(ParseUnits::I256(_)) => Err(format!("Amount must not be negative: {}", amount)),
        Err(e) => Err(format!("Invalid amount {}: {}", amount, e)),
    }
}

/// Format a base-unit value as a decimal string with trailing zeros trimmed
pub fn format_units(value: U256, decimals: u8) -> Result<String, String> {
    let formatted = utils::format_units(value, decimals)
        .map_err(|e| format!("Cannot format amount: {}", e))?;
    if !formatted.contains('.') {
        return Ok(formatted);
    }
    Ok(formatted.trim_end_matches('0').trim_end_matches('.').to_string())
}

/// Format a balance for display, truncated to `max_fraction_digits`
pub fn format_token_amount(
    value: U256,
    decimals: u8,
    max_fraction_digits: usize,
) -> Result<String, String> {
    let full = format_units(value, decimals)?;
    let shown = match full.split_once('.') {
        Some((whole, fraction)) if fraction.len() > max_fraction_digits => {
            let truncated = fraction[..max_fraction_digits].trim_end_matches('0');
            if truncated.is_empty() {
                whole.to_string()
            } else {
                format!("{}.{}", whole, truncated)
            }
        }
        _ => full,
    };
    Ok(shown)
}
