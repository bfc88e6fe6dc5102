pub mod amortization;

pub use amortization::{amortize, calculate_emi, AmortizationRow, LoanInput, LoanResult};
