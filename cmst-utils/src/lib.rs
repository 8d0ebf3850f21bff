mod export;
pub use export::*;
mod loader;
pub use loader::*;
mod random;
pub use random::*;
mod results;
pub use results::*;
