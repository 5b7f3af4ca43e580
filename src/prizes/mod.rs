pub mod calculator;
pub mod handlers;
pub mod service;

pub use calculator::{allocate, PrizeAllocation, PAID_POSITIONS};
pub use service::{PrizeService, MIN_PARTICIPANTS};
