pub mod lecturers;
pub mod rooms;
pub mod schedules;
pub mod semesters;
pub mod subjects;
