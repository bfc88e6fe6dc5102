use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::{Money, Rate};
use crate::errors::{ensure_non_negative, ensure_rate, in_range, CalcError, Result};
use crate::growth::{compound_factor, per_period_rate};
use crate::types::Cadence;

/// reducing-balance loan repaid in equal monthly instalments
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoanInput {
    pub principal: Money,
    pub annual_rate_percent: Decimal,
    pub tenure_months: u32,
}

impl LoanInput {
    pub fn new(principal: Money, annual_rate_percent: Decimal, tenure_months: u32) -> Self {
        Self {
            principal,
            annual_rate_percent,
            tenure_months,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("loan principal", self.principal)?;
        if self.tenure_months == 0 {
            return Err(CalcError::InvalidTenure { periods: 0 });
        }
        ensure_rate(self.annual_rate_percent)
    }

    pub fn monthly_rate(&self) -> Rate {
        per_period_rate(self.annual_rate_percent, Cadence::Monthly)
    }
}

/// one month of the repayment schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmortizationRow {
    pub month: u32,
    pub opening_balance: Money,
    pub emi: Money,
    pub principal_portion: Money,
    pub interest_portion: Money,
    pub closing_balance: Money,
}

/// instalment, totals and the month-by-month schedule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoanResult {
    pub emi: Money,
    pub total_interest: Money,
    pub total_payment: Money,
    pub schedule: Vec<AmortizationRow>,
}

/// EMI = P * r * (1 + r)^n / ((1 + r)^n - 1)
pub fn calculate_emi(principal: Money, monthly_rate: Rate, months: u32) -> Result<Money> {
    if months == 0 {
        return Ok(principal);
    }

    if monthly_rate.is_zero() {
        // no interest case
        return Ok(principal / Decimal::from(months));
    }

    let r = monthly_rate.as_decimal();
    let compound = compound_factor(monthly_rate, months)?;

    let numerator = principal
        .as_decimal()
        .checked_mul(r)
        .and_then(|v| v.checked_mul(compound));
    let denominator = compound - Decimal::ONE;

    let emi = numerator.and_then(|n| n.checked_div(denominator));
    in_range(emi, "instalment").map(Money::from_decimal)
}

/// full repayment schedule; the last month absorbs any rounding residue
pub fn amortize(input: &LoanInput) -> Result<LoanResult> {
    input.validate()?;

    let rate = input.monthly_rate();
    let emi = calculate_emi(input.principal, rate, input.tenure_months)?;

    let mut schedule = Vec::with_capacity(input.tenure_months as usize);
    let mut balance = input.principal;

    for month in 1..=input.tenure_months {
        let interest_portion = in_range(balance.checked_mul(rate.as_decimal()), "loan interest")?;
        let mut payment = emi;
        let mut principal_portion = emi - interest_portion;

        if month == input.tenure_months {
            principal_portion = balance;
            payment = in_range(balance.checked_add(interest_portion), "final instalment")?;
        }

        let closing_balance = (balance - principal_portion).max(Money::ZERO);
        schedule.push(AmortizationRow {
            month,
            opening_balance: balance,
            emi: payment,
            principal_portion,
            interest_portion,
            closing_balance,
        });
        balance = closing_balance;
    }

    let total_interest: Money = schedule.iter().map(|row| row.interest_portion).sum();
    let total_payment: Money = schedule.iter().map(|row| row.emi).sum();

    log::debug!(
        "loan of {} at {}% over {} months: emi {}, interest {}",
        input.principal,
        input.annual_rate_percent,
        input.tenure_months,
        emi,
        total_interest
    );

    Ok(LoanResult {
        emi,
        total_interest,
        total_payment,
        schedule,
    })
}
