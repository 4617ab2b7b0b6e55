pub mod admission;
pub mod lifecycle;
pub mod slots;
