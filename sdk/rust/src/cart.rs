//! Guest carts.
//!
//! A guest cart is keyed by an identifier the client generates before the
//! user signs in. After sign-in the caller passes that identifier to
//! [`merge_guest_cart`] explicitly; nothing here reads ambient storage.

use std::fmt;

use serde_json::{json, Value};
use uuid::Uuid;

use crate::client::RelayClient;
use crate::error::ClientError;
use crate::token::TokenProvider;

pub const MERGE_GUEST_CART_MUTATION: &str =
    "mutation MergeGuestCart($guestCartId: ID!) { mergeGuestCart(guestCartId: $guestCartId) { id } }";

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GuestCartId(String);

impl GuestCartId {
    /// A fresh identifier for a new guest session.
    pub fn generate() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Accept a previously stored identifier.
    pub fn parse(raw: &str) -> Result<Self, ClientError> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(ClientError::InvalidGuestCartId(raw.to_string()));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for GuestCartId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Merge a guest cart into the signed-in user's account.
///
/// Returns the `mergeGuestCart` field of the response.
pub async fn merge_guest_cart<P: TokenProvider>(
    client: &RelayClient<P>,
    guest_cart_id: &GuestCartId,
) -> Result<Value, ClientError> {
    if client.current_token().is_none() {
        return Err(ClientError::Unauthenticated);
    }

    let variables = json!({ "guestCartId": guest_cart_id.as_str() });
    let data = client
        .execute(MERGE_GUEST_CART_MUTATION, Some(variables))
        .await?
        .into_data()?;

    Ok(data.get("mergeGuestCart").cloned().unwrap_or(Value::Null))
}
