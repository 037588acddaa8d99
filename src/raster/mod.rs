pub mod composite;
pub mod frame;
pub mod mask;
pub mod text;
