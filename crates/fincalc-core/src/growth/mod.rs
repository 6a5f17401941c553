//! Monthly-compounding growth calculators: SIP, step-up SIP, lumpsum,
//! NPS accumulation/annuitization, SWP drawdown, and STP fund transfer.

pub mod lumpsum;
pub mod nps;
pub mod sip;
pub mod stp;
pub mod swp;
