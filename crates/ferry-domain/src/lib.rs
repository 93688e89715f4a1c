//! Ferry domain: the hold, the head-of-queue loading pass and the
//! travel/stay decision. Everything here is synchronous and lock-free;
//! the async runtime in `ferry-app` wraps it in the harbor's locks.

pub mod model;
pub mod service;
