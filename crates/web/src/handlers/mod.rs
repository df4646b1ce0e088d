pub mod absences;
pub mod employees;
pub mod pages;
