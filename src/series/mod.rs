//! The instrument log: an ordered time/value series and its nearest-sample cursor.

pub mod cursor;
pub mod log;
