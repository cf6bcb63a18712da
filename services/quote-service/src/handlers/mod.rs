pub mod health;
pub mod imports;
pub mod quotes;

pub use health::*;
pub use imports::*;
pub use quotes::*;
