use rust_decimal::Decimal;

use crate::decimal::Rate;
use crate::errors::Result;
use crate::growth::compound_factor;
use crate::types::Cadence;

/// convert an annual percentage into the per-period fraction for `cadence`
pub fn per_period_rate(annual_rate_percent: Decimal, cadence: Cadence) -> Rate {
    let per_period = match cadence {
        Cadence::Monthly => annual_rate_percent / Decimal::from(12) / Decimal::ONE_HUNDRED,
        Cadence::Annual => annual_rate_percent / Decimal::ONE_HUNDRED,
    };
    Rate::from_decimal(per_period)
}

/// effective annual yield of a nominal rate compounded at `cadence`
pub fn effective_annual_rate(annual_rate_percent: Decimal, cadence: Cadence) -> Result<Rate> {
    let rate = per_period_rate(annual_rate_percent, cadence);
    let factor = compound_factor(rate, cadence.periods_per_year())?;
    Ok(Rate::from_decimal(factor - Decimal::ONE))
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_monthly_rate() {
        let rate = per_period_rate(dec!(12), Cadence::Monthly);
        assert_eq!(rate.as_decimal(), dec!(0.01));
    }

    #[test]
    fn test_annual_rate() {
        let rate = per_period_rate(dec!(7.1), Cadence::Annual);
        assert_eq!(rate.as_decimal(), dec!(0.071));
    }

    #[test]
    fn test_zero_rate() {
        assert!(per_period_rate(Decimal::ZERO, Cadence::Monthly).is_zero());
        assert!(per_period_rate(Decimal::ZERO, Cadence::Annual).is_zero());
    }

    #[test]
    fn test_effective_annual_rate() {
        let monthly = effective_annual_rate(dec!(12), Cadence::Monthly).unwrap();
        assert!(monthly.as_percentage() > dec!(12.68));
        assert!(monthly.as_percentage() < dec!(12.69));

        let annual = effective_annual_rate(dec!(12), Cadence::Annual).unwrap();
        assert_eq!(annual.as_decimal(), dec!(0.12));
    }
}
