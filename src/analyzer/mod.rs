//! Version derivation engine: baseline year, same-day ordinal and inversion

pub mod baseline;
pub mod inverse;
pub mod order;
pub mod version_analyzer;

pub use order::ScanMode;
pub use version_analyzer::CalverAnalyzer;
