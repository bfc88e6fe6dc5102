use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::config::TaxRegimeConfig;
use crate::decimal::Money;
use crate::errors::{ensure_non_negative, CalcError, Result};
use crate::tax::engine::{TaxEngine, TaxResult};

/// the two alternative personal income-tax systems
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RegimeKind {
    /// higher slabs, chapter VI-A deductions allowed
    Old,
    /// lower slabs, no deductions; the default regime
    New,
}

/// income details of one taxpayer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TaxpayerProfile {
    pub gross_income: Money,
    /// deductions such as 80C and 80D, honoured by the old regime only
    pub deductions: Money,
}

impl TaxpayerProfile {
    pub fn new(gross_income: Money, deductions: Money) -> Self {
        Self {
            gross_income,
            deductions,
        }
    }

    pub fn validate(&self) -> Result<()> {
        ensure_non_negative("gross income", self.gross_income)?;
        ensure_non_negative("deductions", self.deductions)
    }
}

/// a validated tax regime for one financial year
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxRegime {
    pub name: String,
    pub kind: RegimeKind,
    pub financial_year: String,
    pub effective_from: NaiveDate,
    pub engine: TaxEngine,
    pub standard_deduction: Money,
    pub allows_deductions: bool,
}

impl TaxRegime {
    /// income left after the standard deduction and any allowed deductions
    pub fn taxable_income(&self, profile: &TaxpayerProfile) -> Result<Money> {
        profile.validate()?;

        let mut reductions = self.standard_deduction;
        if self.allows_deductions {
            reductions += profile.deductions;
        }
        Ok((profile.gross_income - reductions).max(Money::ZERO))
    }

    pub fn compute(&self, taxable_income: Money) -> Result<TaxResult> {
        self.engine.compute(taxable_income)
    }

    pub fn compute_for_profile(&self, profile: &TaxpayerProfile) -> Result<TaxResult> {
        let taxable = self.taxable_income(profile)?;
        log::debug!(
            "{} ({}): gross {} taxable {}",
            self.name,
            self.financial_year,
            profile.gross_income,
            taxable
        );
        self.compute(taxable)
    }
}

/// side-by-side outcome of both regimes for one profile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub old: TaxResult,
    pub new: TaxResult,
    pub recommended: RegimeKind,
    /// how much less the recommended regime costs
    pub savings: Money,
}

/// evaluate both regimes; ties go to the new regime
pub fn compare_regimes(
    old: &TaxRegime,
    new: &TaxRegime,
    profile: &TaxpayerProfile,
) -> Result<RegimeComparison> {
    let old_result = old.compute_for_profile(profile)?;
    let new_result = new.compute_for_profile(profile)?;

    let (recommended, savings) = if old_result.net_payable < new_result.net_payable {
        (RegimeKind::Old, new_result.net_payable - old_result.net_payable)
    } else {
        (RegimeKind::New, old_result.net_payable - new_result.net_payable)
    };

    Ok(RegimeComparison {
        old: old_result,
        new: new_result,
        recommended,
        savings,
    })
}

/// regimes keyed by kind and the date they took effect
#[derive(Debug, Clone, Default)]
pub struct TaxCatalogue {
    regimes: Vec<TaxRegime>,
}

impl TaxCatalogue {
    pub fn new(regimes: Vec<TaxRegime>) -> Self {
        Self { regimes }
    }

    /// regimes notified for FY 2023-24 and FY 2024-25
    pub fn builtin() -> Result<Self> {
        let regimes = [
            TaxRegimeConfig::old_regime(2023)?,
            TaxRegimeConfig::new_regime_fy2023_24()?,
            TaxRegimeConfig::old_regime(2024)?,
            TaxRegimeConfig::new_regime_fy2024_25()?,
        ]
        .into_iter()
        .map(TaxRegimeConfig::into_regime)
        .collect::<Result<Vec<_>>>()?;

        Ok(Self::new(regimes))
    }

    pub fn insert(&mut self, regime: TaxRegime) {
        self.regimes.push(regime);
    }

    pub fn regimes(&self) -> &[TaxRegime] {
        &self.regimes
    }

    /// latest regime of `kind` already in force on `date`
    pub fn regime_on(&self, kind: RegimeKind, date: NaiveDate) -> Option<&TaxRegime> {
        self.regimes
            .iter()
            .filter(|r| r.kind == kind && r.effective_from <= date)
            .max_by_key(|r| r.effective_from)
    }

    pub fn compare_on(&self, date: NaiveDate, profile: &TaxpayerProfile) -> Result<RegimeComparison> {
        let old = self.require(RegimeKind::Old, date)?;
        let new = self.require(RegimeKind::New, date)?;
        compare_regimes(old, new, profile)
    }

    fn require(&self, kind: RegimeKind, date: NaiveDate) -> Result<&TaxRegime> {
        self.regime_on(kind, date)
            .ok_or(CalcError::NoRegimeInForce { kind, date })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::ErrorKind;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_builtin_catalogue_is_valid() {
        let catalogue = TaxCatalogue::builtin().unwrap();
        assert_eq!(catalogue.regimes().len(), 4);
    }

    #[test]
    fn test_regime_selected_by_date() {
        let catalogue = TaxCatalogue::builtin().unwrap();

        let fy24 = catalogue.regime_on(RegimeKind::New, date(2024, 3, 31)).unwrap();
        assert_eq!(fy24.financial_year, "2023-24");

        let fy25 = catalogue.regime_on(RegimeKind::New, date(2024, 4, 1)).unwrap();
        assert_eq!(fy25.financial_year, "2024-25");
        assert_eq!(fy25.standard_deduction, Money::from_major(75_000));

        assert!(catalogue.regime_on(RegimeKind::Old, date(2020, 1, 1)).is_none());
    }

    #[test]
    fn test_date_outside_catalogue_is_input_error() {
        let profile = TaxpayerProfile::new(Money::from_major(900_000), Money::ZERO);

        let builtin = TaxCatalogue::builtin().unwrap();
        let err = builtin.compare_on(date(2019, 6, 1), &profile).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
        assert_eq!(
            err,
            CalcError::NoRegimeInForce { kind: RegimeKind::Old, date: date(2019, 6, 1) }
        );

        let empty = TaxCatalogue::default();
        let err = empty.compare_on(date(2024, 6, 1), &profile).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }

    #[test]
    fn test_standard_deduction_brings_income_under_rebate() {
        let catalogue = TaxCatalogue::builtin().unwrap();
        let regime = catalogue.regime_on(RegimeKind::New, date(2024, 6, 1)).unwrap();

        // 7,75,000 gross less 75,000 standard deduction sits exactly on the ceiling
        let profile = TaxpayerProfile::new(Money::from_major(775_000), Money::ZERO);
        let result = regime.compute_for_profile(&profile).unwrap();
        assert_eq!(result.taxable_income, Money::from_major(700_000));
        assert_eq!(result.gross_tax, Money::from_major(20_000));
        assert_eq!(result.net_payable, Money::ZERO);
    }

    #[test]
    fn test_new_regime_ignores_deductions() {
        let catalogue = TaxCatalogue::builtin().unwrap();
        let new = catalogue.regime_on(RegimeKind::New, date(2024, 6, 1)).unwrap();
        let old = catalogue.regime_on(RegimeKind::Old, date(2024, 6, 1)).unwrap();

        let profile = TaxpayerProfile::new(Money::from_major(1_000_000), Money::from_major(150_000));
        assert_eq!(new.taxable_income(&profile).unwrap(), Money::from_major(925_000));
        assert_eq!(old.taxable_income(&profile).unwrap(), Money::from_major(800_000));
    }

    #[test]
    fn test_compare_prefers_new_regime_without_deductions() {
        let catalogue = TaxCatalogue::builtin().unwrap();
        let profile = TaxpayerProfile::new(Money::from_major(1_200_000), Money::ZERO);

        let comparison = catalogue.compare_on(date(2024, 6, 1), &profile).unwrap();
        // new: taxable 11,25,000 -> 20,000 + 30,000 + 18,750 = 68,750, +4% cess
        assert_eq!(comparison.new.gross_tax, Money::from_major(68_750));
        assert_eq!(comparison.new.net_payable, Money::from_major(71_500));
        // old: taxable 11,50,000 -> 12,500 + 1,00,000 + 45,000 = 1,57,500, +4% cess
        assert_eq!(comparison.old.gross_tax, Money::from_major(157_500));
        assert_eq!(comparison.old.net_payable, Money::from_major(163_800));
        assert_eq!(comparison.recommended, RegimeKind::New);
        assert_eq!(comparison.savings, Money::from_major(92_300));
    }

    #[test]
    fn test_compare_prefers_old_regime_with_large_deductions() {
        let catalogue = TaxCatalogue::builtin().unwrap();
        // old: 7,00,000 - 50,000 - 2,00,000 = 4,50,000, under the 5L rebate ceiling
        let profile = TaxpayerProfile::new(Money::from_major(700_000), Money::from_major(200_000));

        let comparison = catalogue.compare_on(date(2023, 9, 1), &profile).unwrap();
        assert_eq!(comparison.old.net_payable, Money::ZERO);
        // new FY 2023-24: taxable 6,50,000 also under its 7L ceiling
        assert_eq!(comparison.new.net_payable, Money::ZERO);
        assert_eq!(comparison.recommended, RegimeKind::New);
        assert_eq!(comparison.savings, Money::ZERO);

        let richer = TaxpayerProfile::new(Money::from_major(900_000), Money::from_major(350_000));
        let comparison = catalogue.compare_on(date(2023, 9, 1), &richer).unwrap();
        // old: taxable 5,00,000 -> 12,500 fully rebated
        assert_eq!(comparison.old.net_payable, Money::ZERO);
        assert_eq!(comparison.recommended, RegimeKind::Old);
        assert!(comparison.savings > Money::ZERO);
    }

    #[test]
    fn test_negative_profile_rejected() {
        let catalogue = TaxCatalogue::builtin().unwrap();
        let profile = TaxpayerProfile::new(Money::from_major(-1), Money::ZERO);
        let err = catalogue.compare_on(date(2024, 6, 1), &profile).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::InvalidInput);
    }
}
