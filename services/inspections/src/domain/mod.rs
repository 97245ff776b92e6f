pub mod agency;
pub mod campaign;
pub mod catalog;
pub mod leak;
pub mod record;
pub mod repository;
pub mod user;
pub mod view;
