//! Bounds and checked arithmetic for monetary amounts.
//!
//! A single commitment is capped at [`MAX_COMMITMENT_AMOUNT`] and an FX rate
//! at [`MAX_FX_RATE`]. Their product is at most 1e21, so an upload of at most
//! ten million rows sums to roughly 1e28, inside the `Decimal` range of
//! about 7.9e28. Totals over many merged uploads can still leave that range,
//! which is why every sum goes through [`checked_sum`].

use rust_decimal::Decimal;

use crate::error::{CoreError, CoreResult};

/// Largest accepted commitment amount (one quadrillion).
pub const MAX_COMMITMENT_AMOUNT: Decimal = Decimal::from_parts(2_764_472_320, 232_830, 0, false, 0);

/// Largest accepted USD conversion rate.
pub const MAX_FX_RATE: Decimal = Decimal::from_parts(1_000_000, 0, 0, false, 0);

/// Adds two amounts, failing instead of panicking on overflow.
pub fn checked_add(a: Decimal, b: Decimal, operation: &str) -> CoreResult<Decimal> {
    a.checked_add(b).ok_or_else(|| CoreError::overflow(operation))
}

/// Sums amounts, failing on the first overflow or the first error item.
pub fn checked_sum<I>(values: I, operation: &str) -> CoreResult<Decimal>
where
    I: IntoIterator<Item = CoreResult<Decimal>>,
{
    values
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, v| checked_add(acc, v?, operation))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bounds() {
        assert_eq!(MAX_COMMITMENT_AMOUNT, dec!(1_000_000_000_000_000));
        assert_eq!(MAX_FX_RATE, dec!(1_000_000));
        // Ten million maximal rows at the maximal rate still fit
        let per_row = MAX_COMMITMENT_AMOUNT * MAX_FX_RATE;
        assert!(per_row.checked_mul(dec!(10_000_000)).is_some());
    }

    #[test]
    fn test_checked_sum() {
        let total = checked_sum([Ok(dec!(1.5)), Ok(dec!(2.25))], "total").unwrap();
        assert_eq!(total, dec!(3.75));

        let err = checked_sum([Ok(Decimal::MAX), Ok(Decimal::ONE)], "total").unwrap_err();
        assert!(matches!(err, CoreError::Overflow { .. }));
        assert!(err.to_string().contains("total"));
    }
}
