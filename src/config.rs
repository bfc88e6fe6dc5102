use chrono::NaiveDate;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{CalcError, Result};
use crate::tax::{RebateRule, RegimeKind, TaxEngine, TaxRegime, TaxSlab, TaxTable};
use crate::types::{Cadence, GrowthInput, GrowthMode, ScheduleGrid};

/// cess levied on income tax in every built-in regime
pub const HEALTH_AND_EDUCATION_CESS_PERCENT: Decimal = dec!(4);

/// declarative tax regime, validated into a [`TaxRegime`] before use
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaxRegimeConfig {
    pub name: String,
    pub kind: RegimeKind,
    pub financial_year: String,
    pub effective_from: NaiveDate,
    pub slabs: Vec<TaxSlab>,
    #[serde(default)]
    pub rebate: Option<RebateRule>,
    pub cess_percent: Decimal,
    #[serde(default)]
    pub standard_deduction: Money,
    #[serde(default)]
    pub allows_deductions: bool,
}

impl TaxRegimeConfig {
    /// old regime for individuals below 60, unchanged across recent years
    pub fn old_regime(start_year: i32) -> Result<Self> {
        Ok(Self {
            name: "Old regime".to_string(),
            kind: RegimeKind::Old,
            financial_year: financial_year_label(start_year),
            effective_from: financial_year_start(start_year)?,
            slabs: vec![
                TaxSlab::bounded(0, 250_000, dec!(0)),
                TaxSlab::bounded(250_000, 500_000, dec!(5)),
                TaxSlab::bounded(500_000, 1_000_000, dec!(20)),
                TaxSlab::above(1_000_000, dec!(30)),
            ],
            rebate: Some(RebateRule::new(Money::from_major(500_000), Money::from_major(12_500))),
            cess_percent: HEALTH_AND_EDUCATION_CESS_PERCENT,
            standard_deduction: Money::from_major(50_000),
            allows_deductions: true,
        })
    }

    /// section 115BAC regime for FY 2023-24
    pub fn new_regime_fy2023_24() -> Result<Self> {
        Ok(Self {
            name: "New regime".to_string(),
            kind: RegimeKind::New,
            financial_year: financial_year_label(2023),
            effective_from: financial_year_start(2023)?,
            slabs: vec![
                TaxSlab::bounded(0, 300_000, dec!(0)),
                TaxSlab::bounded(300_000, 600_000, dec!(5)),
                TaxSlab::bounded(600_000, 900_000, dec!(10)),
                TaxSlab::bounded(900_000, 1_200_000, dec!(15)),
                TaxSlab::bounded(1_200_000, 1_500_000, dec!(20)),
                TaxSlab::above(1_500_000, dec!(30)),
            ],
            rebate: Some(RebateRule::new(Money::from_major(700_000), Money::from_major(25_000))),
            cess_percent: HEALTH_AND_EDUCATION_CESS_PERCENT,
            standard_deduction: Money::from_major(50_000),
            allows_deductions: false,
        })
    }

    /// section 115BAC regime as revised for FY 2024-25
    pub fn new_regime_fy2024_25() -> Result<Self> {
        Ok(Self {
            name: "New regime".to_string(),
            kind: RegimeKind::New,
            financial_year: financial_year_label(2024),
            effective_from: financial_year_start(2024)?,
            slabs: vec![
                TaxSlab::bounded(0, 300_000, dec!(0)),
                TaxSlab::bounded(300_000, 700_000, dec!(5)),
                TaxSlab::bounded(700_000, 1_000_000, dec!(10)),
                TaxSlab::bounded(1_000_000, 1_200_000, dec!(15)),
                TaxSlab::bounded(1_200_000, 1_500_000, dec!(20)),
                TaxSlab::above(1_500_000, dec!(30)),
            ],
            rebate: Some(RebateRule::new(Money::from_major(700_000), Money::from_major(25_000))),
            cess_percent: HEALTH_AND_EDUCATION_CESS_PERCENT,
            standard_deduction: Money::from_major(75_000),
            allows_deductions: false,
        })
    }

    /// parse a regime from JSON and validate it
    pub fn from_json(json: &str) -> Result<TaxRegime> {
        let config: TaxRegimeConfig = serde_json::from_str(json)
            .map_err(|e| CalcError::config(format!("unreadable tax regime: {e}")))?;
        config.into_regime()
    }

    pub fn into_regime(self) -> Result<TaxRegime> {
        if self.standard_deduction.is_negative() {
            return Err(CalcError::config(format!(
                "{} {}: negative standard deduction {}",
                self.name, self.financial_year, self.standard_deduction
            )));
        }

        let table = TaxTable::try_from(self.slabs)?;
        let engine = TaxEngine::new(table, self.rebate, self.cess_percent)?;

        Ok(TaxRegime {
            name: self.name,
            kind: self.kind,
            financial_year: self.financial_year,
            effective_from: self.effective_from,
            engine,
            standard_deduction: self.standard_deduction,
            allows_deductions: self.allows_deductions,
        })
    }
}

/// indian financial years open on 1 April
/// `2024` -> `"2024-25"`
fn financial_year_label(start_year: i32) -> String {
    format!("{}-{:02}", start_year, (start_year + 1).rem_euclid(100))
}

fn financial_year_start(year: i32) -> Result<NaiveDate> {
    NaiveDate::from_ymd_opt(year, 4, 1)
        .ok_or_else(|| CalcError::config(format!("invalid financial year {year}")))
}

/// calculators offered on top of the growth engine
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CalculatorKind {
    Ppf,
    Sip,
    RecurringDeposit,
    FixedDeposit,
    SimpleInterest,
}

impl CalculatorKind {
    /// short name used in summaries
    pub fn label(&self) -> &'static str {
        match self {
            CalculatorKind::Ppf => "PPF",
            CalculatorKind::Sip => "SIP",
            CalculatorKind::RecurringDeposit => "RD",
            CalculatorKind::FixedDeposit => "FD",
            CalculatorKind::SimpleInterest => "Simple interest",
        }
    }
}

/// calculator defaults
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CalculatorPreset {
    pub kind: CalculatorKind,
    pub mode: GrowthMode,
    pub cadence: Cadence,
    pub grid: ScheduleGrid,
    pub default_rate_percent: Decimal,
    pub default_years: u32,
}

impl CalculatorPreset {
    /// public provident fund: monthly deposits, 15 year lock-in
    pub fn ppf() -> Self {
        Self {
            kind: CalculatorKind::Ppf,
            mode: GrowthMode::RecurringDeposit,
            cadence: Cadence::Monthly,
            grid: ScheduleGrid::Yearly,
            default_rate_percent: dec!(7.1),
            default_years: 15,
        }
    }

    /// systematic investment plan at an expected return
    pub fn sip() -> Self {
        Self {
            kind: CalculatorKind::Sip,
            default_rate_percent: dec!(12),
            default_years: 10,
            ..Self::ppf()
        }
    }

    pub fn recurring_deposit() -> Self {
        Self {
            kind: CalculatorKind::RecurringDeposit,
            default_rate_percent: dec!(6.5),
            default_years: 5,
            ..Self::ppf()
        }
    }

    /// single deposit compounded yearly
    pub fn fixed_deposit() -> Self {
        Self {
            kind: CalculatorKind::FixedDeposit,
            mode: GrowthMode::LumpSum,
            cadence: Cadence::Annual,
            grid: ScheduleGrid::Yearly,
            default_rate_percent: dec!(7),
            default_years: 5,
        }
    }

    pub fn simple_interest() -> Self {
        Self {
            kind: CalculatorKind::SimpleInterest,
            mode: GrowthMode::SimpleInterest,
            default_rate_percent: dec!(8),
            ..Self::fixed_deposit()
        }
    }

    pub fn label(&self) -> &'static str {
        self.kind.label()
    }

    /// build a validated input; `amount` is the per-period deposit or the principal
    pub fn input(&self, amount: Money, years: u32, annual_rate_percent: Decimal) -> Result<GrowthInput> {
        let input = GrowthInput {
            contribution_amount: amount,
            cadence: self.cadence,
            periods: years.saturating_mul(self.cadence.periods_per_year()),
            annual_rate_percent,
            mode: self.mode,
            grid: self.grid,
        };
        input.validate()?;
        Ok(input)
    }

    pub fn default_input(&self, amount: Money) -> Result<GrowthInput> {
        self.input(amount, self.default_years, self.default_rate_percent)
    }
}
