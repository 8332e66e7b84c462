pub mod cell;
pub mod neighborhood;
