pub mod config;
pub mod extract;
pub mod pipeline;
pub mod processor;

pub use config::*;
pub use extract::*;
pub use pipeline::*;
pub use processor::*;
