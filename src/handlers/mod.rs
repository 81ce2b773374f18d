pub mod dates;
pub mod slots;
