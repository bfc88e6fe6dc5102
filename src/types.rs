use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{ensure_non_negative, ensure_rate, in_range, CalcError, Result};

/// contribution and compounding cadence
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Cadence {
    Monthly,
    Annual,
}

impl Cadence {
    /// get number of periods per year
    pub fn periods_per_year(&self) -> u32 {
        match self {
            Cadence::Monthly => 12,
            Cadence::Annual => 1,
        }
    }
}

/// how the amount grows over the tenure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GrowthMode {
    /// equal deposit at the start of every period (annuity-due)
    RecurringDeposit,
    /// single deposit compounding over the whole tenure
    LumpSum,
    /// single deposit, interest on the principal only
    SimpleInterest,
}

/// granularity of the reported ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduleGrid {
    /// one row per cadence period
    PerPeriod,
    /// one row per year, monthly steps folded in
    Yearly,
}

/// inputs of a savings or investment calculation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthInput {
    /// per-period deposit, or the principal for single-deposit modes
    pub contribution_amount: Money,
    pub cadence: Cadence,
    /// months for monthly cadence, years for annual
    pub periods: u32,
    pub annual_rate_percent: Decimal,
    pub mode: GrowthMode,
    pub grid: ScheduleGrid,
}

impl GrowthInput {
    /// recurring deposit reported on a yearly grid
    pub fn recurring(
        contribution_amount: Money,
        cadence: Cadence,
        periods: u32,
        annual_rate_percent: Decimal,
    ) -> Self {
        Self {
            contribution_amount,
            cadence,
            periods,
            annual_rate_percent,
            mode: GrowthMode::RecurringDeposit,
            grid: ScheduleGrid::Yearly,
        }
    }

    /// single deposit compounding once per cadence period
    pub fn lump_sum(
        principal: Money,
        cadence: Cadence,
        periods: u32,
        annual_rate_percent: Decimal,
    ) -> Self {
        Self {
            mode: GrowthMode::LumpSum,
            ..Self::recurring(principal, cadence, periods, annual_rate_percent)
        }
    }

    /// principal earning non-compounding interest for `years`
    pub fn simple_interest(principal: Money, years: u32, annual_rate_percent: Decimal) -> Self {
        Self {
            mode: GrowthMode::SimpleInterest,
            ..Self::recurring(principal, Cadence::Annual, years, annual_rate_percent)
        }
    }

    pub fn with_grid(mut self, grid: ScheduleGrid) -> Self {
        self.grid = grid;
        self
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("contribution amount", self.contribution_amount)?;
        if self.periods == 0 {
            return Err(CalcError::InvalidTenure { periods: self.periods });
        }
        ensure_rate(self.annual_rate_percent)?;
        if self.mode == GrowthMode::RecurringDeposit {
            let total = self.contribution_amount.checked_mul(Decimal::from(self.periods));
            in_range(total, "total contributed")?;
        }
        Ok(())
    }

    /// sum of all deposits over the tenure
    pub fn total_contributed(&self) -> Money {
        match self.mode {
            GrowthMode::RecurringDeposit => {
                self.contribution_amount * Decimal::from(self.periods)
            }
            GrowthMode::LumpSum | GrowthMode::SimpleInterest => self.contribution_amount,
        }
    }

    /// tenure expressed in years, possibly fractional
    pub fn tenure_years(&self) -> Decimal {
        Decimal::from(self.periods) / Decimal::from(self.cadence.periods_per_year())
    }
}

/// one reported line of the growth ledger
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleRow {
    /// 1-based
    pub period_index: u32,
    pub contributed_this_period: Money,
    pub interest_this_period: Money,
    pub balance_after_period: Money,
}

/// maturity figures plus the ledger that reproduces them
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GrowthResult {
    pub total_contributed: Money,
    pub maturity_value: Money,
    pub total_interest: Money,
    pub schedule: Vec<ScheduleRow>,
}

impl GrowthResult {
    /// balance reported by the last ledger row
    pub fn schedule_final_balance(&self) -> Money {
        self.schedule
            .last()
            .map(|row| row.balance_after_period)
            .unwrap_or(Money::ZERO)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_validation() {
        let ok = GrowthInput::recurring(Money::from_major(1_000), Cadence::Monthly, 180, dec!(7.1));
        assert!(ok.validate().is_ok());

        let zero_tenure = GrowthInput { periods: 0, ..ok.clone() };
        assert_eq!(zero_tenure.validate(), Err(CalcError::InvalidTenure { periods: 0 }));

        let negative_rate = GrowthInput { annual_rate_percent: dec!(-1), ..ok.clone() };
        assert!(negative_rate.validate().is_err());

        let negative_amount = GrowthInput { contribution_amount: Money::from_major(-5), ..ok.clone() };
        assert!(negative_amount.validate().is_err());

        let beyond_range = GrowthInput {
            contribution_amount: Money::from_decimal(Decimal::MAX),
            ..ok.clone()
        };
        assert_eq!(
            beyond_range.validate(),
            Err(CalcError::OutOfRange { quantity: "total contributed" })
        );

        // degenerate but valid
        let zero = GrowthInput { contribution_amount: Money::ZERO, annual_rate_percent: dec!(0), ..ok };
        assert!(zero.validate().is_ok());
    }

    #[test]
    fn test_total_contributed() {
        let rd = GrowthInput::recurring(Money::from_major(1_000), Cadence::Monthly, 180, dec!(7.1));
        assert_eq!(rd.total_contributed(), Money::from_major(180_000));

        let fd = GrowthInput::lump_sum(Money::from_major(50_000), Cadence::Annual, 5, dec!(7));
        assert_eq!(fd.total_contributed(), Money::from_major(50_000));
    }

    #[test]
    fn test_tenure_years() {
        let rd = GrowthInput::recurring(Money::from_major(1_000), Cadence::Monthly, 18, dec!(6));
        assert_eq!(rd.tenure_years(), dec!(1.5));
    }
}
