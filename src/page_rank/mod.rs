//! The two PageRank algorithms and the transition model they share.

mod traits;
pub use self::traits::*;
pub mod iterated;
pub mod sampled;
pub mod transition;
