pub mod group;
pub mod price;
pub mod product;

pub use group::*;
pub use price::*;
pub use product::*;
