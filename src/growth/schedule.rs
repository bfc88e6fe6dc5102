use crate::decimal::{Money, Rate};
use crate::errors::{in_range, Result};
use crate::growth::rate::per_period_rate;
use crate::types::{Cadence, GrowthInput, GrowthMode, ScheduleGrid, ScheduleRow};

/// replays growth step by step into a reportable ledger
pub struct ScheduleGenerator {
    mode: GrowthMode,
    rate: Rate,
    contribution: Money,
    periods: u32,
    steps_per_row: u32,
}

impl ScheduleGenerator {
    pub fn new(input: &GrowthInput) -> Self {
        let steps_per_row = match (input.grid, input.cadence) {
            (ScheduleGrid::Yearly, Cadence::Monthly) => 12,
            _ => 1,
        };

        Self {
            mode: input.mode,
            rate: per_period_rate(input.annual_rate_percent, input.cadence),
            contribution: input.contribution_amount,
            periods: input.periods,
            steps_per_row,
        }
    }

    /// number of rows the ledger will contain
    pub fn row_count(&self) -> u32 {
        self.periods.div_ceil(self.steps_per_row)
    }

    /// outer loop emits one row per reported period, inner loop compounds each sub-period
    pub fn generate(&self) -> Result<Vec<ScheduleRow>> {
        let mut rows = Vec::with_capacity(self.row_count() as usize);
        let mut balance = Money::ZERO;
        let mut step = 0;

        for period_index in 1..=self.row_count() {
            let mut contributed = Money::ZERO;
            let mut interest = Money::ZERO;

            for _ in 0..self.steps_per_row {
                if step == self.periods {
                    // trailing partial year
                    break;
                }
                step += 1;

                let deposit = self.deposit_at(step);
                balance = in_range(balance.checked_add(deposit), "schedule balance")?;
                contributed += deposit;

                let accrued = in_range(self.interest_on(balance), "schedule interest")?;
                balance = in_range(balance.checked_add(accrued), "schedule balance")?;
                interest = in_range(interest.checked_add(accrued), "schedule interest")?;
            }

            let row = ScheduleRow {
                period_index,
                contributed_this_period: contributed,
                interest_this_period: interest,
                balance_after_period: balance,
            };
            log::trace!("schedule row {row:?}");
            rows.push(row);
        }

        Ok(rows)
    }

    /// deposit made at the start of the given 1-based step
    fn deposit_at(&self, step: u32) -> Money {
        match self.mode {
            GrowthMode::RecurringDeposit => self.contribution,
            GrowthMode::LumpSum | GrowthMode::SimpleInterest if step == 1 => self.contribution,
            GrowthMode::LumpSum | GrowthMode::SimpleInterest => Money::ZERO,
        }
    }

    fn interest_on(&self, balance: Money) -> Option<Money> {
        match self.mode {
            GrowthMode::RecurringDeposit | GrowthMode::LumpSum => {
                balance.checked_mul(self.rate.as_decimal())
            }
            GrowthMode::SimpleInterest => self.contribution.checked_mul(self.rate.as_decimal()),
        }
    }
}

/// ledger for an already validated input
pub fn generate_schedule(input: &GrowthInput) -> Result<Vec<ScheduleRow>> {
    ScheduleGenerator::new(input).generate()
}
