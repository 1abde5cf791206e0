pub mod contributor_handler;

pub use contributor_handler::*;
