pub mod merit;
pub mod students;
