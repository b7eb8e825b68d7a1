pub mod advisor;
pub mod board;
pub mod link;
pub mod rules;
pub mod web;

pub use advisor::*;
pub use board::*;
pub use link::*;
pub use rules::*;
