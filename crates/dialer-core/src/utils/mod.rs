//! Small shared helpers.

pub mod flex;
pub mod timestamp;

pub use flex::FlexValue;
