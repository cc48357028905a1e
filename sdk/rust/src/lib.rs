//! Client SDK for the GraphQL relay.

pub mod cart;
pub mod client;
pub mod error;
pub mod token;

pub use cart::{merge_guest_cart, GuestCartId};
pub use client::{GraphqlResponse, RelayClient};
pub use error::ClientError;
pub use token::{NoToken, StaticToken, TokenProvider};
