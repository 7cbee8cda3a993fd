pub mod availability;
pub mod reservation;
pub mod resource;
pub mod suggestion;
pub mod waitlist;

pub use availability::*;
pub use reservation::*;
pub use resource::*;
pub use suggestion::*;
pub use waitlist::*;
