pub mod doctor;
pub mod last;
pub mod list;
pub mod pick;
pub mod resume;
