pub mod tactics;
pub mod team;

pub use tactics::*;
pub use team::*;
