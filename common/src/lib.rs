pub mod defaults;
pub mod game;
pub mod identifiers;
pub mod logger;
pub mod models;
pub mod protocol;

pub use identifiers::*;
