pub mod department;

pub use department::Department;
