pub mod analyze;
pub mod encode;
pub mod extract;
pub mod hide;
pub mod input;
pub mod sign;

pub use analyze::*;
pub use encode::*;
pub use extract::*;
pub use hide::*;
pub use input::*;
pub use sign::*;
