pub mod campaign;
pub mod projection;
pub mod resource;
