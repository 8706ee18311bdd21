//! Core utilities shared by every layer of the scheduler

pub mod time;
