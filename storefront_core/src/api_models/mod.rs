mod categories;
mod error_reason;
mod health;
mod products;

pub use categories::*;
pub use error_reason::*;
pub use health::*;
pub use products::*;
