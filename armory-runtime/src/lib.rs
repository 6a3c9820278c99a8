//! Armory Runtime
//!
//! Drives the retrieval half of the pipeline:
//! - **Probe**: classifies, explores and downloads one link, holding its page
//!   only until released
//! - **Crawler**: two-layer discovery from a seed article, bounded parallel
//!   classification, article download
//! - **Checkpoint**: confirmed links and downloaded articles on disk, so a
//!   later run can resume without the network

pub mod probe;
pub mod checkpoint;
pub mod crawl;

pub use probe::*;
pub use checkpoint::*;
pub use crawl::*;
