// Small shared helpers: time formatting, maths, platform clocks
pub mod app_time;
pub mod maths_utils;
pub mod time_utils;

pub use time_utils::TimeUtils;
