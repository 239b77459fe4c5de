pub mod classroom;
pub mod enrollment;
pub mod roster;
pub mod school;
pub mod student;
pub mod teacher;
