pub mod config;
pub mod decimal;
pub mod errors;
pub mod export;
pub mod growth;
pub mod loan;
pub mod summary;
pub mod tax;
pub mod types;

// re-export key types
pub use config::{CalculatorKind, CalculatorPreset, TaxRegimeConfig};
pub use decimal::{Money, Rate};
pub use errors::{CalcError, ErrorKind, Result};
pub use export::{clipboard_summary, parse_csv, to_csv, to_html_table, PeriodUnit};
pub use growth::{compute, maturity_value, per_period_rate, simple_interest, SimpleInterestResult};
pub use loan::{amortize, AmortizationRow, LoanInput, LoanResult};
pub use summary::SummaryBreakdown;
pub use tax::{
    compare_regimes, RebateRule, RegimeComparison, RegimeKind, TaxCatalogue, TaxEngine,
    TaxRegime, TaxResult, TaxSlab, TaxTable, TaxpayerProfile,
};
pub use types::{Cadence, GrowthInput, GrowthMode, GrowthResult, ScheduleGrid, ScheduleRow};

// re-export external dependencies that users will need
pub use chrono;
pub use rust_decimal::Decimal;
