mod constructive;
pub use constructive::*;
mod reactive;
pub use reactive::*;
