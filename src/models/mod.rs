pub mod admin;
pub mod match_model;
pub mod player;
pub mod team;
pub mod tournament;

pub use admin::*;
pub use match_model::*;
pub use player::*;
pub use team::*;
pub use tournament::*;
