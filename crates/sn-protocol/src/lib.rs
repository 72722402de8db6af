pub mod invocation;
pub mod tools;

pub use invocation::*;
pub use tools::*;
