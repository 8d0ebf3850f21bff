mod cache;
pub use cache::*;
mod candidate;
pub use candidate::*;
mod generate;
pub use generate::*;
mod graph;
pub use graph::*;
mod solution;
pub use solution::*;
