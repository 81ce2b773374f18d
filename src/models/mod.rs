pub mod calcom;
pub mod responses;
pub mod slot;
