//! Theme stylesheet sources

mod fs;

pub use fs::FsStylesheetSource;
