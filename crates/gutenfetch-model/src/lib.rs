pub mod book;
pub mod outcome;

pub use book::*;
pub use outcome::*;
