pub mod health;
pub mod movers;
pub mod products;
