//! Simulation runtime - harbor resources, ferry loop, vehicle tasks, config

pub mod config;
pub mod ferry;
pub mod harbor;
pub mod journal;
pub mod simulation;
pub mod vehicle;
