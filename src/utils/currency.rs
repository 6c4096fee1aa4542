//! Brazilian real formatting

use rust_decimal::{Decimal, RoundingStrategy};

use crate::constants::NOT_AVAILABLE;

/// Format an amount as Brazilian reais (`R$ 1.234,56`)
///
/// Cents are rounded half away from zero. Missing amounts render as `N/A`.
pub fn format_currency(value: Option<Decimal>) -> String {
    let Some(value) = value else {
        return NOT_AVAILABLE.to_string();
    };

    let mut rounded = value.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero);
    let negative = rounded.is_sign_negative() && !rounded.is_zero();
    rounded.set_sign_positive(true);
    rounded.rescale(2);

    let text = rounded.to_string();
    let (units, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let mut grouped = String::with_capacity(units.len() + units.len() / 3);
    for (i, ch) in units.chars().enumerate() {
        if i > 0 && (units.len() - i) % 3 == 0 {
            grouped.push('.');
        }
        grouped.push(ch);
    }

    let sign = if negative { "-" } else { "" };
    format!("{sign}R$ {grouped},{fraction}")
}
