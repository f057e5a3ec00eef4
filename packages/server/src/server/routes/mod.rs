// HTTP routes
pub mod departments;
pub mod employees;
pub mod health;

pub use departments::*;
pub use employees::*;
pub use health::*;
