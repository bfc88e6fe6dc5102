//! text renderings of a growth schedule for download, print and clipboard

pub mod delimited;
pub mod print;

use csv::StringRecord;
use serde::{Deserialize, Serialize};

use crate::types::{Cadence, GrowthInput, GrowthMode, GrowthResult, ScheduleGrid};

pub use delimited::{parse_csv, to_csv};
pub use print::to_html_table;

/// what one schedule row spans
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PeriodUnit {
    Year,
    Month,
}

impl PeriodUnit {
    pub fn for_input(input: &GrowthInput) -> Self {
        match (input.cadence, input.grid) {
            (Cadence::Monthly, ScheduleGrid::PerPeriod) => PeriodUnit::Month,
            _ => PeriodUnit::Year,
        }
    }

    pub fn csv_header(&self) -> [&'static str; 4] {
        match self {
            PeriodUnit::Year => ["Year", "Contributed", "InterestThisYear", "Balance"],
            PeriodUnit::Month => ["Month", "Contributed", "InterestThisMonth", "Balance"],
        }
    }

    pub fn print_header(&self) -> [&'static str; 4] {
        match self {
            PeriodUnit::Year => ["Year", "Contributed", "Interest (this year)", "Balance"],
            PeriodUnit::Month => ["Month", "Contributed", "Interest (this month)", "Balance"],
        }
    }

    pub(crate) fn from_header(header: &StringRecord) -> Option<Self> {
        [PeriodUnit::Year, PeriodUnit::Month]
            .into_iter()
            .find(|unit| header.iter().map(str::trim).eq(unit.csv_header()))
    }
}

/// one-line human summary, e.g. `PPF ₹1,000/mo for 15y @ 7.1% ⇒ ₹3,21,624`
pub fn clipboard_summary(label: &str, input: &GrowthInput, result: &GrowthResult) -> String {
    let cadence = match (input.mode, input.cadence) {
        (GrowthMode::RecurringDeposit, Cadence::Monthly) => "/mo",
        (GrowthMode::RecurringDeposit, Cadence::Annual) => "/yr",
        _ => "",
    };

    let per_year = input.cadence.periods_per_year();
    let tenure = if input.periods % per_year == 0 {
        format!("{}y", input.periods / per_year)
    } else {
        format!("{}m", input.periods)
    };

    format!(
        "{label} {}{cadence} for {tenure} @ {}% ⇒ {}",
        input.contribution_amount.format_inr(),
        input.annual_rate_percent.normalize(),
        result.maturity_value.format_inr()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CalculatorPreset;
    use crate::decimal::Money;
    use crate::growth;
    use rust_decimal_macros::dec;

    #[test]
    fn test_ppf_clipboard_line() {
        let preset = CalculatorPreset::ppf();
        let input = preset.default_input(Money::from_major(1_000)).unwrap();
        let result = growth::compute(&input).unwrap();

        assert_eq!(
            clipboard_summary(preset.label(), &input, &result),
            "PPF ₹1,000/mo for 15y @ 7.1% ⇒ ₹3,21,624"
        );
    }

    #[test]
    fn test_lump_sum_clipboard_line() {
        let input = GrowthInput::lump_sum(Money::from_major(10_000), Cadence::Annual, 3, dec!(5.00));
        let result = growth::compute(&input).unwrap();
        assert_eq!(
            clipboard_summary("FD", &input, &result),
            "FD ₹10,000 for 3y @ 5% ⇒ ₹11,576"
        );
    }

    #[test]
    fn test_partial_year_tenure() {
        let input = GrowthInput::recurring(Money::from_major(500), Cadence::Monthly, 18, dec!(6));
        let result = growth::compute(&input).unwrap();
        let line = clipboard_summary("RD", &input, &result);
        assert!(line.starts_with("RD ₹500/mo for 18m @ 6% ⇒ ₹"));
    }

    #[test]
    fn test_period_unit() {
        let input = GrowthInput::recurring(Money::from_major(500), Cadence::Monthly, 18, dec!(6));
        assert_eq!(PeriodUnit::for_input(&input), PeriodUnit::Year);
        assert_eq!(
            PeriodUnit::for_input(&input.with_grid(ScheduleGrid::PerPeriod)),
            PeriodUnit::Month
        );
    }
}
