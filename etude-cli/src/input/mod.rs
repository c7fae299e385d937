//! Input handling module

pub mod corpus;
pub mod profile_source;

pub use corpus::CorpusDirs;
pub use profile_source::ProfileSource;
