pub mod dates;
pub mod normalize;

pub use dates::*;
pub use normalize::*;
