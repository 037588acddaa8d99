pub(crate) mod alloc_track;
pub mod core;
pub mod error;
