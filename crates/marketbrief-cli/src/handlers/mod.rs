pub mod download;
pub mod research;
pub mod volume;
