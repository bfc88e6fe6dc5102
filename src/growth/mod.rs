pub mod annuity;
pub mod rate;
pub mod schedule;

use rust_decimal::Decimal;

use crate::decimal::{Money, Rate};
use crate::errors::{in_range, Result};
use crate::types::{GrowthInput, GrowthResult};

pub use annuity::{
    annuity_due_future_value, compound_growth, maturity_value, simple_growth, simple_interest,
    SimpleInterestResult,
};
pub use rate::{effective_annual_rate, per_period_rate};
pub use schedule::{generate_schedule, ScheduleGenerator};

/// (1 + r)^n by repeated multiplication, rejected once it leaves the decimal range
pub fn compound_factor(rate: Rate, periods: u32) -> Result<Decimal> {
    let base = Decimal::ONE + rate.as_decimal();
    let mut factor = Decimal::ONE;
    for _ in 0..periods {
        factor = in_range(factor.checked_mul(base), "compound factor")?;
    }
    Ok(factor)
}

/// validate, then compute the maturity figure and the ledger independently
pub fn compute(input: &GrowthInput) -> Result<GrowthResult> {
    input.validate()?;

    let maturity_value = maturity_value(input)?;
    let schedule = generate_schedule(input)?;
    let total_contributed = input.total_contributed();
    let total_interest = (maturity_value - total_contributed).max(Money::ZERO);

    log::debug!(
        "{:?} of {} over {} {:?} periods at {}%: contributed {}, maturity {}, {} rows",
        input.mode,
        input.contribution_amount,
        input.periods,
        input.cadence,
        input.annual_rate_percent,
        total_contributed,
        maturity_value,
        schedule.len()
    );

    Ok(GrowthResult {
        total_contributed,
        maturity_value,
        total_interest,
        schedule,
    })
}
