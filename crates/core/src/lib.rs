pub mod chain;
pub mod field;

pub use chain::ChainFamily;
pub use field::{Field, FocusState};
