use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{ensure_non_negative, ensure_rate, in_range, CalcError, Result};
use crate::growth::compound_factor;
use crate::growth::rate::per_period_rate;
use crate::types::{GrowthInput, GrowthMode};

/// future value of equal deposits made at the start of each period
pub fn annuity_due_future_value(contribution: Money, rate: Rate, periods: u32) -> Result<Money> {
    if rate.is_zero() {
        return in_range(contribution.checked_mul(Decimal::from(periods)), "total deposits");
    }

    // FV = C * ((1 + r)^n - 1) / r * (1 + r)
    let r = rate.as_decimal();
    let factor = compound_factor(rate, periods)?;
    let growth = in_range((factor - Decimal::ONE).checked_div(r), "annuity growth")?;
    let value = contribution
        .as_decimal()
        .checked_mul(growth)
        .and_then(|v| v.checked_mul(Decimal::ONE + r));

    in_range(value, "maturity value").map(Money::from_decimal)
}

/// single deposit compounding once per period
pub fn compound_growth(principal: Money, rate: Rate, periods: u32) -> Result<Money> {
    if rate.is_zero() {
        return Ok(principal);
    }
    let factor = compound_factor(rate, periods)?;
    in_range(principal.checked_mul(factor), "maturity value")
}

/// principal plus flat interest on the principal for every period
pub fn simple_growth(principal: Money, rate: Rate, periods: u32) -> Result<Money> {
    let interest = rate
        .as_decimal()
        .checked_mul(Decimal::from(periods))
        .and_then(|flat| principal.checked_mul(flat))
        .and_then(|interest| principal.checked_add(interest));
    in_range(interest, "maturity value")
}

/// maturity value of an already validated input
pub fn maturity_value(input: &GrowthInput) -> Result<Money> {
    let rate = per_period_rate(input.annual_rate_percent, input.cadence);
    match input.mode {
        GrowthMode::RecurringDeposit => {
            annuity_due_future_value(input.contribution_amount, rate, input.periods)
        }
        GrowthMode::LumpSum => compound_growth(input.contribution_amount, rate, input.periods),
        GrowthMode::SimpleInterest => simple_growth(input.contribution_amount, rate, input.periods),
    }
}

/// simple interest calculator result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimpleInterestResult {
    pub principal: Money,
    pub interest_amount: Money,
    pub maturity_amount: Money,
}

/// I = P * R * T / 100
pub fn simple_interest(
    principal: Money,
    annual_rate_percent: Decimal,
    years: Decimal,
) -> Result<SimpleInterestResult> {
    ensure_non_negative("principal", principal)?;
    ensure_rate(annual_rate_percent)?;
    if years < Decimal::ZERO {
        return Err(CalcError::NegativeAmount {
            field: "time in years",
            amount: Money::from_decimal(years),
        });
    }

    let fraction = annual_rate_percent
        .checked_mul(years)
        .map(|rt| rt / Decimal::ONE_HUNDRED);
    let interest_amount = in_range(
        fraction.and_then(|f| principal.checked_mul(f)),
        "simple interest",
    )?;
    let maturity_amount = in_range(principal.checked_add(interest_amount), "maturity amount")?;
    log::debug!(
        "simple interest on {principal} at {annual_rate_percent}% for {years}y: {interest_amount}"
    );

    Ok(SimpleInterestResult {
        principal,
        interest_amount,
        maturity_amount,
    })
}
