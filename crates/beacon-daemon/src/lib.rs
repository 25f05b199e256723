//! Library half of `beacond`, kept separate from `main` so integration
//! tests can drive the same wiring.

pub mod app;
pub mod catalog_file;
pub mod cli;

pub use app::Daemon;
pub use catalog_file::CatalogFile;
pub use cli::Cli;
