use chrono::NaiveDate;
use rust_decimal::Decimal;
use thiserror::Error;

use crate::decimal::Money;
use crate::tax::RegimeKind;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum CalcError {
    #[error("invalid amount for {field}: {amount} is negative")]
    NegativeAmount {
        field: &'static str,
        amount: Money,
    },

    #[error("invalid tenure: {periods} periods, at least one required")]
    InvalidTenure {
        periods: u32,
    },

    #[error("invalid interest rate: {rate}% is negative")]
    NegativeRate {
        rate: Decimal,
    },

    #[error("invalid taxable income: {income} is negative")]
    NegativeIncome {
        income: Money,
    },

    #[error("out of range: {quantity} exceeds the representable amount")]
    OutOfRange {
        quantity: &'static str,
    },

    #[error("no {kind:?} regime in force on {date}")]
    NoRegimeInForce {
        kind: RegimeKind,
        date: NaiveDate,
    },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration {
        message: String,
    },

    #[error("export failed: {message}")]
    ExportFailed {
        message: String,
    },

    #[error("malformed schedule at line {line}: {message}")]
    MalformedSchedule {
        line: u64,
        message: String,
    },
}

/// broad classes of failure a caller reacts to differently
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// structurally wrong caller input, rejected before computing
    InvalidInput,
    /// malformed tax table or regime; a build-time defect
    Configuration,
    /// serialization to or from text failed
    Export,
}

impl CalcError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CalcError::NegativeAmount { .. }
            | CalcError::InvalidTenure { .. }
            | CalcError::NegativeRate { .. }
            | CalcError::NegativeIncome { .. }
            | CalcError::OutOfRange { .. }
            | CalcError::NoRegimeInForce { .. } => ErrorKind::InvalidInput,
            CalcError::InvalidConfiguration { .. } => ErrorKind::Configuration,
            CalcError::ExportFailed { .. } | CalcError::MalformedSchedule { .. } => {
                ErrorKind::Export
            }
        }
    }

    pub(crate) fn config(message: impl Into<String>) -> Self {
        let message = message.into();
        log::warn!("rejected configuration: {message}");
        CalcError::InvalidConfiguration { message }
    }
}

/// reject negative amounts before any computation runs
pub(crate) fn ensure_non_negative(field: &'static str, amount: Money) -> Result<()> {
    if amount.is_negative() {
        return Err(CalcError::NegativeAmount { field, amount });
    }
    Ok(())
}

/// map an overflowed checked operation to an input error
pub(crate) fn in_range<T>(value: Option<T>, quantity: &'static str) -> Result<T> {
    value.ok_or(CalcError::OutOfRange { quantity })
}

/// reject negative annual rates
pub(crate) fn ensure_rate(rate_percent: Decimal) -> Result<()> {
    if rate_percent < Decimal::ZERO {
        return Err(CalcError::NegativeRate { rate: rate_percent });
    }
    Ok(())
}

pub type Result<T> = std::result::Result<T, CalcError>;
