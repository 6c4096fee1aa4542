//! Creation-time checks for new requests
//!
//! The status calculator assumes end dates follow start dates; this is where
//! that gets enforced.

use rust_decimal::Decimal;

use super::RequestError;
use crate::models::{NewRequest, RequestDetails};
use crate::utils::date;

/// Number of digits in a CPF (Brazilian individual tax id)
const CPF_DIGITS: usize = 11;

fn require(value: &str, field: &str) -> Result<(), RequestError> {
    if value.trim().is_empty() {
        return Err(RequestError::Validation(format!("{} is required", field)));
    }
    Ok(())
}

/// Ensure `end` parses and falls strictly after `start`
fn require_range(start: &str, end: &str, end_field: &str) -> Result<(), RequestError> {
    let start_at = date::parse_datetime(start)
        .ok_or_else(|| RequestError::Validation(format!("start date '{}' is not a valid date", start)))?;
    let end_at = date::parse_datetime(end)
        .ok_or_else(|| RequestError::Validation(format!("{} '{}' is not a valid date", end_field, end)))?;

    if end_at <= start_at {
        return Err(RequestError::Validation(format!(
            "{} must be after the start date",
            end_field
        )));
    }
    Ok(())
}

/// Drop every non-digit and check eleven digits remain
pub fn is_valid_cpf(value: &str) -> bool {
    value.chars().filter(char::is_ascii_digit).count() == CPF_DIGITS
}

pub fn validate_new_request(request: &NewRequest) -> Result<(), RequestError> {
    require(&request.requester, "requester")?;
    require(&request.title, "title")?;
    require(&request.description, "description")?;
    require(&request.site, "site")?;

    match &request.details {
        RequestDetails::Purchase { needed_by, .. } => {
            require(needed_by, "needed-by date")?;
            if date::parse_datetime(needed_by).is_none() {
                return Err(RequestError::Validation(format!(
                    "needed-by date '{}' is not a valid date",
                    needed_by
                )));
            }
        }
        RequestDetails::Rental {
            start_date,
            expected_return_date,
            quantity,
        } => {
            if *quantity == 0 {
                return Err(RequestError::Validation("quantity must be at least 1".to_string()));
            }
            require_range(start_date, expected_return_date, "expected return date")?;
        }
        RequestDetails::Service {
            value,
            start_date,
            expected_end_date,
            supplier_name,
            supplier_tax_id,
            pix_key,
        } => {
            if *value <= Decimal::ZERO {
                return Err(RequestError::Validation("value must be greater than zero".to_string()));
            }
            require(supplier_name, "supplier name")?;
            require(pix_key, "PIX key")?;
            if !is_valid_cpf(supplier_tax_id) {
                return Err(RequestError::Validation(format!(
                    "supplier tax id '{}' must have {} digits",
                    supplier_tax_id, CPF_DIGITS
                )));
            }
            require_range(start_date, expected_end_date, "expected end date")?;
        }
    }

    Ok(())
}
