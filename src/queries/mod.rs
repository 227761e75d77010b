//! Query modules for the tracker SDK.
//!
//! Each module provides a query struct that borrows from a
//! [`Connection`](crate::connection::Connection) and exposes methods
//! returning `Result<T>` with typed model payloads.

pub mod movers;
pub mod prices;
pub mod products;

pub use movers::MoverQuery;
pub use prices::PriceQuery;
pub use products::ProductQuery;
