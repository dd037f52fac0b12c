pub mod reference;
pub mod schedule;
