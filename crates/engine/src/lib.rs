//! Send amount engine: fiat↔asset conversion, authority, mirroring.
//!
//! The engine is rendering-agnostic: it operates on plain state in and
//! out, and the driving layer (CLI session, GUI adapter) translates its
//! events into whatever surface it renders. Amounts cross module
//! boundaries as strings; only `amount` turns them into numbers.

pub mod address;
pub mod amount;
pub mod display;
pub mod events;
pub mod input;
pub mod state;
pub mod sync;
