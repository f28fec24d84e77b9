//! Core domain types.

mod date;
mod symbol;

pub use date::Date;
pub use symbol::Symbol;
