use reqwest::{header::AUTHORIZATION, Client};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ClientError;
use crate::token::TokenProvider;

#[derive(Debug, Serialize)]
struct GraphqlRequest<'a> {
    query: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    variables: Option<&'a Value>,
}

/// A relayed GraphQL response, whatever the HTTP status.
#[derive(Debug, Clone, Deserialize)]
pub struct GraphqlResponse {
    #[serde(skip)]
    pub status: u16,
    #[serde(default)]
    pub data: Option<Value>,
    #[serde(default)]
    pub errors: Vec<Value>,
}

impl GraphqlResponse {
    /// `data`, or the error messages if the response carries any errors.
    pub fn into_data(self) -> Result<Value, ClientError> {
        if !self.errors.is_empty() {
            let messages = self
                .errors
                .iter()
                .map(|e| {
                    e.get("message")
                        .and_then(Value::as_str)
                        .unwrap_or("unknown error")
                        .to_string()
                })
                .collect();
            return Err(ClientError::Graphql { status: self.status, messages });
        }
        Ok(self.data.unwrap_or(Value::Null))
    }
}

pub struct RelayClient<P> {
    client: Client,
    relay_url: String,
    tokens: P,
}

impl<P: TokenProvider> RelayClient<P> {
    /// `relay_url` is the relay's base URL, e.g. `http://localhost:8081`.
    pub fn new(relay_url: &str, tokens: P) -> Self {
        Self::with_client(Client::new(), relay_url, tokens)
    }

    pub fn with_client(client: Client, relay_url: &str, tokens: P) -> Self {
        Self {
            client,
            relay_url: relay_url.trim_end_matches('/').to_string(),
            tokens,
        }
    }

    pub fn current_token(&self) -> Option<String> {
        self.tokens.current_token()
    }

    /// Send one GraphQL operation through the relay.
    ///
    /// Adds `Authorization: Bearer <token>` only when the provider has a token.
    pub async fn execute(
        &self,
        query: &str,
        variables: Option<Value>,
    ) -> Result<GraphqlResponse, ClientError> {
        let body = GraphqlRequest { query, variables: variables.as_ref() };

        let mut request = self
            .client
            .post(format!("{}/query", self.relay_url))
            .json(&body);
        if let Some(token) = self.tokens.current_token() {
            request = request.header(AUTHORIZATION, format!("Bearer {}", token));
        }

        let resp = request.send().await?;
        let status = resp.status().as_u16();
        let text = resp.text().await?;

        let mut response: GraphqlResponse = serde_json::from_str(&text)?;
        response.status = status;
        Ok(response)
    }

    /// Fetch the relay's `/health` document.
    pub async fn health(&self) -> Result<Value, ClientError> {
        let resp = self
            .client
            .get(format!("{}/health", self.relay_url))
            .send()
            .await?
            .error_for_status()?;
        Ok(resp.json().await?)
    }
}
