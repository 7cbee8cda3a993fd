pub mod availability_service;
pub mod booking_service;
pub mod resource_service;
pub mod suggestion_service;
pub mod waitlist_service;

pub use availability_service::*;
pub use booking_service::*;
pub use resource_service::*;
pub use suggestion_service::*;
pub use waitlist_service::*;
