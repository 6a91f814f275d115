//! Domain logic - calendar arithmetic and version fields, independent of git

pub mod day;
pub mod version;

pub use day::CalendarDay;
pub use version::VersionFields;
