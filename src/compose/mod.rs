pub mod compositor;
pub mod profile;
