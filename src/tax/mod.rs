//! income tax: slab tables, rebate and cess, and regime comparison

pub mod engine;
pub mod regime;
pub mod slab;

pub use engine::{RebateRule, TaxEngine, TaxResult};
pub use regime::{compare_regimes, RegimeComparison, RegimeKind, TaxCatalogue, TaxRegime, TaxpayerProfile};
pub use slab::{TaxSlab, TaxTable};
