pub mod stat;
pub mod vec;
