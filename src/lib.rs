mod common;
pub use self::common::*;
mod error;
pub use self::error::*;
pub mod graph;
pub use self::graph::{Corpus, LinkGraph};
pub mod crawl;
pub use self::crawl::crawl;

pub mod page_rank;
pub mod report;
