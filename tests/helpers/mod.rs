#![allow(unused_imports)]
pub mod booking_helpers;
pub mod test_db;

pub use booking_helpers::*;
pub use test_db::*;
