pub mod compare;
pub mod loan;
pub mod schedule;
