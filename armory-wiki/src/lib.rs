//! Armory Wiki Layer
//!
//! Provides the document service used by the crawl:
//! - HTTP client configuration and user agent rotation
//! - Round-robin slot admission capping concurrent fetches
//! - Page parsing into main-content links, paragraphs and categories
//! - In-memory document service for offline replay

pub mod client;
pub mod slots;
pub mod page;
pub mod service;

pub use client::*;
pub use slots::*;
pub use page::*;
pub use service::*;
