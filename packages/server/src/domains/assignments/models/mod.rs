pub mod assignment;

pub use assignment::Assignment;
