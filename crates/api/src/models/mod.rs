//! Domain models for the shop.
//!
//! Typed records for every entity in the `shop` schema, replacing the
//! dynamically-shaped rows a query layer would otherwise hand around.

pub mod cart;
pub mod catalog;
pub mod order;
pub mod session;
pub mod user;

pub use cart::{Cart, CartItem, CartItemView, PricedCartLine};
pub use catalog::Product;
pub use order::{Order, OrderItem, OrderSummary};
pub use session::{CurrentUser, session_keys};
pub use user::User;
