//! Domain services

pub mod dispatch;
pub mod loading;

pub use dispatch::{decide_departure, Departure};
pub use loading::{admit_head, Admission};
