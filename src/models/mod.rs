pub mod analytics;
pub mod compatibility;
pub mod culture;
pub mod product;
pub mod treatment;

pub use analytics::*;
pub use compatibility::*;
pub use culture::*;
pub use product::*;
pub use treatment::*;
