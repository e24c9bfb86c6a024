//! Cleaning engine: row filters, median imputation and summary percentages.

mod engine;
mod policy;

pub use engine::{Cleaner, CleaningDiagnostics, CleaningOutcome, Imputation, clean};
pub use policy::{CleaningPolicy, TextMissingPolicy};
