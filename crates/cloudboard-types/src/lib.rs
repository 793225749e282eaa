pub mod cost;
pub mod domain;
pub mod error;
pub mod status;
pub mod wire;

pub use cost::*;
pub use domain::*;
pub use error::{Error, Result};
pub use status::*;
pub use wire::*;
