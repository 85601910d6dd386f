pub mod index;
pub mod results;
pub mod sessions;
pub mod vote;
