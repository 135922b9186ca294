// Service module exports

pub mod advice;
pub mod board;
pub mod daily;
pub mod holiday;
pub mod interval;
pub mod pattern;
pub mod schedule;
pub mod settings;
