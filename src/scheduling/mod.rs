pub mod categorizer;
pub mod constants;
pub mod date_parser;
pub mod fetcher;
pub mod rotator;
