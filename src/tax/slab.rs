use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::errors::{CalcError, Result};

/// contiguous income band taxed at one marginal rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    pub lower_bound: Money,
    /// `None` for the open-ended top slab
    pub upper_bound: Option<Money>,
    pub rate_percent: Decimal,
}

impl TaxSlab {
    pub fn new(lower_bound: Money, upper_bound: Option<Money>, rate_percent: Decimal) -> Self {
        Self {
            lower_bound,
            upper_bound,
            rate_percent,
        }
    }

    /// bounded slab from whole-rupee limits
    pub fn bounded(lower: i64, upper: i64, rate_percent: Decimal) -> Self {
        Self::new(Money::from_major(lower), Some(Money::from_major(upper)), rate_percent)
    }

    /// open-ended slab from a whole-rupee floor
    pub fn above(lower: i64, rate_percent: Decimal) -> Self {
        Self::new(Money::from_major(lower), None, rate_percent)
    }

    /// tax on the part of `income` that falls inside this slab
    pub fn tax_on(&self, income: Money) -> Money {
        if income <= self.lower_bound {
            return Money::ZERO;
        }
        let top = match self.upper_bound {
            Some(upper) => income.min(upper),
            None => income,
        };
        (top - self.lower_bound).percentage(self.rate_percent)
    }
}

/// ordered, gap-free slabs covering [0, ∞)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct TaxTable {
    slabs: Vec<TaxSlab>,
}

impl TaxTable {
    /// validate the slab layout; a malformed table never reaches computation
    pub fn new(slabs: Vec<TaxSlab>) -> Result<Self> {
        let first = slabs
            .first()
            .ok_or_else(|| CalcError::config("tax table has no slabs"))?;
        if !first.lower_bound.is_zero() {
            return Err(CalcError::config(format!(
                "first slab starts at {} instead of 0",
                first.lower_bound
            )));
        }

        let last_index = slabs.len() - 1;
        for (i, slab) in slabs.iter().enumerate() {
            if slab.rate_percent < Decimal::ZERO || slab.rate_percent > Decimal::ONE_HUNDRED {
                return Err(CalcError::config(format!(
                    "slab {} has rate {}% outside 0..=100",
                    i + 1,
                    slab.rate_percent
                )));
            }

            match slab.upper_bound {
                Some(upper) if upper <= slab.lower_bound => {
                    return Err(CalcError::config(format!(
                        "slab {} upper bound {} is not above its lower bound {}",
                        i + 1,
                        upper,
                        slab.lower_bound
                    )));
                }
                Some(_) if i == last_index => {
                    return Err(CalcError::config("last slab must be unbounded"));
                }
                None if i != last_index => {
                    return Err(CalcError::config(format!(
                        "slab {} is unbounded but is not the last slab",
                        i + 1
                    )));
                }
                _ => {}
            }

            if let (Some(upper), Some(next)) = (slab.upper_bound, slabs.get(i + 1)) {
                if next.lower_bound != upper {
                    let problem = if next.lower_bound > upper { "gap" } else { "overlap" };
                    return Err(CalcError::config(format!(
                        "{problem} between slab {} ending at {} and slab {} starting at {}",
                        i + 1,
                        upper,
                        i + 2,
                        next.lower_bound
                    )));
                }
            }
        }

        Ok(Self { slabs })
    }

    pub fn slabs(&self) -> &[TaxSlab] {
        &self.slabs
    }

    /// marginal tax before rebate and cess
    pub fn gross_tax(&self, income: Money) -> Money {
        let mut gross = Money::ZERO;
        for slab in &self.slabs {
            if income <= slab.lower_bound {
                break;
            }
            gross += slab.tax_on(income);
        }
        gross
    }
}

impl TryFrom<Vec<TaxSlab>> for TaxTable {
    type Error = CalcError;

    fn try_from(slabs: Vec<TaxSlab>) -> Result<Self> {
        TaxTable::new(slabs)
    }
}
