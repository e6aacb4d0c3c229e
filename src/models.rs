pub mod alert;
pub mod auth;
pub mod customer;
pub mod invoice;
pub mod job;
pub mod portal;
pub mod quote;
pub mod reports;
pub mod route;
pub mod technician;
