pub mod cloud;
pub mod month;
pub mod region;

pub use cloud::*;
pub use month::*;
pub use region::*;
