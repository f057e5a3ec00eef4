//! Typed ID definitions for domain entities with integer keys.
//!
//! # Example
//!
//! ```rust
//! use personnel_core::common::EmployeeId;
//!
//! let id = EmployeeId::from_raw(10001);
//! assert_eq!(id.into_inner(), 10001);
//! ```

pub use super::id::Id;

// ============================================================================
// Entity marker types
// ============================================================================

/// Marker type for employee records.
pub struct EmployeeEntity;

// ============================================================================
// Type aliases - the primary API
// ============================================================================

/// Typed ID for employees (the externally assigned `emp_no`).
pub type EmployeeId = Id<EmployeeEntity>;
