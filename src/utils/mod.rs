pub mod currency;
pub mod format;
pub mod math;
pub mod time;
