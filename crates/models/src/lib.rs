//! Student record data model shared by the service and HTTP layers.

pub mod errors;
pub mod db;
pub mod student;

pub use student::{Address, NewAddress, NewStudent, SimplifiedStudent, Student, StudentFilter, StudentId, StudentPatch};
