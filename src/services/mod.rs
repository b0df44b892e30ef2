pub mod ratings;
pub mod recommendations;
