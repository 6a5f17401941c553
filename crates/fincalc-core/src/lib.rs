pub mod error;
pub mod math;
pub mod types;

#[cfg(feature = "growth")]
pub mod growth;

#[cfg(feature = "loan")]
pub mod loan;

#[cfg(feature = "charges")]
pub mod charges;

#[cfg(feature = "options")]
pub mod options;

#[cfg(feature = "margin")]
pub mod margin;

pub use error::FinCalcError;
pub use types::*;

/// Standard result type for all fincalc operations
pub type FinCalcResult<T> = Result<T, FinCalcError>;
