pub mod reservation_repository;
pub mod resource_repository;
pub mod waitlist_repository;
