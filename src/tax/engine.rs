use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{CalcError, Result};
use crate::tax::slab::TaxTable;

/// full waiver of tax up to `rebate_cap` for incomes at or below the ceiling
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RebateRule {
    pub taxable_income_ceiling: Money,
    pub rebate_cap: Money,
}

impl RebateRule {
    pub fn new(taxable_income_ceiling: Money, rebate_cap: Money) -> Self {
        Self {
            taxable_income_ceiling,
            rebate_cap,
        }
    }

    /// rebate earned by `taxable_income` on `gross_tax`
    pub fn rebate_for(&self, taxable_income: Money, gross_tax: Money) -> Money {
        if taxable_income <= self.taxable_income_ceiling {
            gross_tax.min(self.rebate_cap)
        } else {
            Money::ZERO
        }
    }
}

/// tax breakdown for one taxable income
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxResult {
    pub taxable_income: Money,
    pub gross_tax: Money,
    pub rebate_applied: Money,
    pub tax_before_cess: Money,
    pub cess: Money,
    pub net_payable: Money,
}

/// slab table, rebate and cess applied in that order
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TaxEngine {
    table: TaxTable,
    rebate: Option<RebateRule>,
    cess_percent: Decimal,
}

impl TaxEngine {
    pub fn new(table: TaxTable, rebate: Option<RebateRule>, cess_percent: Decimal) -> Result<Self> {
        if cess_percent < Decimal::ZERO || cess_percent > Decimal::ONE_HUNDRED {
            return Err(CalcError::config(format!(
                "cess {cess_percent}% outside 0..=100"
            )));
        }
        if let Some(rule) = &rebate {
            if rule.taxable_income_ceiling.is_negative() || rule.rebate_cap.is_negative() {
                return Err(CalcError::config(format!(
                    "rebate ceiling {} and cap {} must be non-negative",
                    rule.taxable_income_ceiling, rule.rebate_cap
                )));
            }
        }

        Ok(Self {
            table,
            rebate,
            cess_percent,
        })
    }

    pub fn table(&self) -> &TaxTable {
        &self.table
    }

    pub fn rebate(&self) -> Option<&RebateRule> {
        self.rebate.as_ref()
    }

    pub fn cess_percent(&self) -> Decimal {
        self.cess_percent
    }

    /// tax payable on `taxable_income`
    pub fn compute(&self, taxable_income: Money) -> Result<TaxResult> {
        if taxable_income.is_negative() {
            return Err(CalcError::NegativeIncome {
                income: taxable_income,
            });
        }

        let gross_tax = self.table.gross_tax(taxable_income);
        let rebate_applied = self
            .rebate
            .map(|rule| rule.rebate_for(taxable_income, gross_tax))
            .unwrap_or(Money::ZERO);
        let tax_before_cess = (gross_tax - rebate_applied).max(Money::ZERO);
        let cess = tax_before_cess.percentage(self.cess_percent);
        let net_payable = tax_before_cess + cess;

        log::debug!(
            "tax on {taxable_income}: gross {gross_tax}, rebate {rebate_applied}, cess {cess}, net {net_payable}"
        );

        Ok(TaxResult {
            taxable_income,
            gross_tax,
            rebate_applied,
            tax_before_cess,
            cess,
            net_payable,
        })
    }
}
