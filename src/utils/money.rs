use bigdecimal::{BigDecimal, Zero};
use std::borrow::Cow;
use validator::ValidationError;

/// Rounds a price to two decimal places and pins the scale so that
/// `5` and `5.001` are both stored as `5.00`.
pub fn round_price(price: &BigDecimal) -> BigDecimal {
    price.round(2).with_scale(2)
}

/// Validator hook for price-bearing request fields.
pub fn validate_price(price: &BigDecimal) -> Result<(), ValidationError> {
    if price > &BigDecimal::zero() {
        return Ok(());
    }

    Err(ValidationError::new("INVALID_PRICE")
        .with_message(Cow::from("Price must be greater than zero")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn decimal(raw: &str) -> BigDecimal {
        BigDecimal::from_str(raw).unwrap()
    }

    #[test]
    fn rounds_to_two_places() {
        assert_eq!(round_price(&decimal("3.14159")), decimal("3.14"));
        assert_eq!(round_price(&decimal("2.999")), decimal("3.00"));
        assert_eq!(round_price(&decimal("5")).to_string(), "5.00");
    }

    #[test]
    fn rounding_is_idempotent() {
        for raw in ["0.005", "1.234", "99.995", "12", "0.1", "1234.5678", "-7.456"] {
            let once = round_price(&decimal(raw));
            let twice = round_price(&once);

            assert_eq!(once, twice, "rounding {} twice changed the value", raw);
        }
    }

    #[test]
    fn only_positive_prices_are_valid() {
        assert!(validate_price(&decimal("0.01")).is_ok());
        assert!(validate_price(&decimal("0")).is_err());
        assert!(validate_price(&decimal("-3.50")).is_err());
    }
}
