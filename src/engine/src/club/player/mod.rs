pub mod injury;
pub mod player;
pub mod skills;

pub use injury::*;
pub use player::*;
pub use skills::*;
