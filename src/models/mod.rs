pub mod config;
pub mod line;
pub mod result;

pub use config::*;
pub use line::*;
pub use result::*;
