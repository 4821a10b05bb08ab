//! Domain model types

pub mod fleet;
pub mod raw_row;
pub mod vehicle;

pub use fleet::Fleet;
pub use raw_row::{Cell, RawRow};
pub use vehicle::{Efficiency, Vehicle};
