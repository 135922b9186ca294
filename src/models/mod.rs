// Module exports for models

pub mod pattern;
pub mod settings;
pub mod shift;
pub mod staff;
pub mod timeline;
