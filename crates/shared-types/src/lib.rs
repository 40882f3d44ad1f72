pub mod config;
pub mod error;
pub mod requests;
pub mod reset;
pub mod validation;

pub use config::*;
pub use error::*;
pub use requests::*;
pub use reset::*;
pub use validation::*;
