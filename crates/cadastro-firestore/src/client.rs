//! Firestore REST client.

use serde::{Serialize, de::DeserializeOwned};
use tracing::{debug, instrument, trace};
use url::Url;

use cadastro_core::Result;
use cadastro_core::error::{Error, InvalidInputError, RejectedError, StoreError, TransportError};

use crate::config::{ApiKey, FirestoreConfig};
use crate::document::ErrorEnvelope;

fn transport(err: reqwest::Error) -> Error {
    if err.is_decode() {
        StoreError::MalformedResponse {
            message: err.to_string(),
        }
        .into()
    } else if err.is_timeout() {
        TransportError::Timeout.into()
    } else if err.is_connect() {
        TransportError::Connection {
            message: err.to_string(),
        }
        .into()
    } else {
        TransportError::Http {
            message: err.to_string(),
        }
        .into()
    }
}

/// HTTP client bound to one database's documents root.
#[derive(Debug, Clone)]
pub(crate) struct FirestoreClient {
    client: reqwest::Client,
    documents_url: Url,
    api_key: ApiKey,
}

impl FirestoreClient {
    /// Create a client for the given configuration.
    pub(crate) fn new(config: &FirestoreConfig) -> Result<Self> {
        config.validate()?;

        let client = reqwest::Client::builder()
            .user_agent(concat!("cadastro/", env!("CARGO_PKG_VERSION")))
            .timeout(config.timeout)
            .build()
            .map_err(transport)?;

        let documents_url = config.documents_url();
        let documents_url = match Url::parse(&documents_url) {
            Ok(url) if !url.cannot_be_a_base() => url,
            _ => {
                return Err(InvalidInputError::StoreUrl {
                    value: documents_url,
                    reason: "cannot hold document paths".to_string(),
                }
                .into());
            }
        };

        Ok(Self {
            client,
            documents_url,
            api_key: config.api_key.clone(),
        })
    }

    /// Append path segments to the documents root. Each segment is
    /// percent-encoded, so ids may hold spaces, `?` or `%`.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.documents_url.clone();
        url.path_segments_mut()
            .map_err(|()| InvalidInputError::StoreUrl {
                value: self.documents_url.to_string(),
                reason: "cannot hold document paths".to_string(),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET a document path with extra query parameters.
    #[instrument(skip(self))]
    pub(crate) async fn get<R>(&self, path: &[&str], query: &[(&str, &str)]) -> Result<R>
    where
        R: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!(%url, "Firestore GET");

        let response = self
            .client
            .get(url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// POST a JSON body to a document path.
    #[instrument(skip(self, body))]
    pub(crate) async fn post<B, R>(&self, path: &[&str], body: &B) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!(%url, "Firestore POST");

        let response = self
            .client
            .post(url)
            .query(&[("key", self.api_key.as_str())])
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// PATCH a document with extra query parameters.
    #[instrument(skip(self, body))]
    pub(crate) async fn patch<B, R>(
        &self,
        path: &[&str],
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<R>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = self.url(path)?;
        debug!(%url, "Firestore PATCH");

        let response = self
            .client
            .patch(url)
            .query(&[("key", self.api_key.as_str())])
            .query(query)
            .json(body)
            .send()
            .await
            .map_err(transport)?;

        self.handle_response(response).await
    }

    /// DELETE a document path. The response body is ignored.
    #[instrument(skip(self))]
    pub(crate) async fn delete(&self, path: &[&str]) -> Result<()> {
        let url = self.url(path)?;
        debug!(%url, "Firestore DELETE");

        let response = self
            .client
            .delete(url)
            .query(&[("key", self.api_key.as_str())])
            .send()
            .await
            .map_err(transport)?;

        let status = response.status();
        if status.is_success() {
            Ok(())
        } else {
            Err(Self::parse_error_response(response).await.into())
        }
    }

    /// Handle a response, parsing the body or error.
    async fn handle_response<R: DeserializeOwned>(&self, response: reqwest::Response) -> Result<R> {
        let status = response.status();
        trace!(status = %status, "Firestore response");

        if status.is_success() {
            response.json::<R>().await.map_err(transport)
        } else {
            Err(Self::parse_error_response(response).await.into())
        }
    }

    /// Parse a Google API error body.
    async fn parse_error_response(response: reqwest::Response) -> RejectedError {
        let status = response.status().as_u16();

        match response.json::<ErrorEnvelope>().await {
            Ok(envelope) => {
                RejectedError::new(status, envelope.error.status, envelope.error.message)
            }
            Err(_) => RejectedError::new(status, None, None),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> FirestoreClient {
        FirestoreClient::new(&FirestoreConfig::new("demo", ApiKey::new("k"))).unwrap()
    }

    #[test]
    fn client_creation() {
        assert_eq!(
            client().url(&["usuarios"]).unwrap().as_str(),
            "https://firestore.googleapis.com/v1/projects/demo/databases/(default)/documents/usuarios"
        );
    }

    #[test]
    fn document_ids_are_percent_encoded() {
        let url = client().url(&["usuarios", "ana maria?50%#1"]).unwrap();
        assert_eq!(
            url.path(),
            "/v1/projects/demo/databases/(default)/documents/usuarios/ana%20maria%3F50%25%231"
        );
        assert!(url.query().is_none());
    }

    #[test]
    fn client_rejects_invalid_config() {
        let config = FirestoreConfig::new("", ApiKey::new("k"));
        assert!(FirestoreClient::new(&config).is_err());
    }
}
