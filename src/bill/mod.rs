//! Bill data: provider payloads, open bill selection, and the posted transaction set

pub mod detail;
pub mod selection;
pub mod transactions;

pub use detail::*;
pub use selection::*;
pub use transactions::*;
