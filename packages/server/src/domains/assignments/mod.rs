//! Assignment domain - employee/department history and the membership query
//!
//! Architecture:
//!   route → ServerDeps.membership → department / assignment / employee stores

pub mod boundary;
pub mod membership;
pub mod models;

// Re-export commonly used types
pub use boundary::BoundaryPolicy;
pub use membership::MembershipQueryEngine;
pub use models::Assignment;
