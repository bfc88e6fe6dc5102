use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::decimal::Money;
use crate::types::GrowthResult;

/// totals and principal/interest split for display
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryBreakdown {
    pub total_contributed: Money,
    pub total_interest: Money,
    pub maturity_value: Money,
    pub principal_share_percent: u32,
    pub interest_share_percent: u32,
}

impl SummaryBreakdown {
    pub fn from_result(result: &GrowthResult) -> Self {
        let (principal_share_percent, interest_share_percent) =
            share_split(result.total_contributed, result.maturity_value);

        Self {
            total_contributed: result.total_contributed,
            total_interest: result.total_interest,
            maturity_value: result.maturity_value,
            principal_share_percent,
            interest_share_percent,
        }
    }
}

/// whole-percent shares of principal and interest; zero maturity gives (0, 0)
pub fn share_split(total_contributed: Money, maturity_value: Money) -> (u32, u32) {
    if maturity_value <= Money::ZERO {
        return (0, 0);
    }

    let hundred = Decimal::ONE_HUNDRED;
    let principal = (total_contributed.as_decimal() / maturity_value.as_decimal() * hundred)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .clamp(Decimal::ZERO, hundred);
    let interest = hundred - principal;

    (principal.to_u32().unwrap_or(0), interest.to_u32().unwrap_or(0))
}
