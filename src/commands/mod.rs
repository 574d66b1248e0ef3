pub mod init;
pub mod process;

pub use init::*;
pub use process::*;
