//! Logic modules: the selection resolver and comparison manager.
//!
//! Everything here is pure state manipulation. No I/O happens in this layer;
//! network work is described as [`cascade::Effect`] values and executed by
//! the application's dispatcher.
//!
//! # Modules
//!
//! - `options`: `OptionList<T>` with validity and feedback
//! - `sizes`: size-tier parsing, rank ordering, best-size match
//! - `family`: default family selection and category grouping
//! - `pricing`: money formatting and price-change percentage
//! - `comparison`: bounded, deduplicated comparison list
//! - `cascade`: the session reducer tying the above together

pub mod cascade;
pub mod comparison;
pub mod family;
pub mod options;
pub mod pricing;
pub mod sizes;
