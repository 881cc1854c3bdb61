// handlers/mod.rs - one module per resource
//
// Public reads and admin writes for the same resource live together; the
// router decides which routes sit behind `require_admin`.

pub mod admin;
pub mod dashboard;
pub mod gallery;
pub mod multipart;
pub mod notices;
pub mod results;
pub mod root;
pub mod students;
pub mod teachers;
pub mod visitors;
