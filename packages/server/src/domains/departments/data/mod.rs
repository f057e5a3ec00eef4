pub mod department;

pub use department::DepartmentData;
