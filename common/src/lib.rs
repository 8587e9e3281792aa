mod constants;
mod score;
mod standings;

pub use constants::*;
pub use score::*;
pub use standings::*;
