pub mod compare;
pub mod error;
pub mod mapping;
pub mod sort;
pub mod transform;
pub mod types;
