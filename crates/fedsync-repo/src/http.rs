//! HTTP repository backend

use async_trait::async_trait;
use reqwest::header::{ACCEPT, CONTENT_TYPE, LOCATION};
use reqwest::{Client, Response};

use crate::error::{RepoError, RepoResult};
use crate::prefer::Prefer;
use crate::traits::{Repository, ResourceUri};

const TURTLE: &str = "text/turtle";
const SPARQL_UPDATE: &str = "application/sparql-update";

/// Repository client over HTTP
///
/// All URIs passed to trait methods are absolute. Timeouts and TLS are the
/// underlying `reqwest::Client`'s concern; pass a configured client via
/// [`HttpRepository::with_client`] to override the defaults.
pub struct HttpRepository {
    client: Client,
}

impl HttpRepository {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }

    pub fn with_client(client: Client) -> Self {
        Self { client }
    }
}

impl Default for HttpRepository {
    fn default() -> Self {
        Self::new()
    }
}

/// Convert a non-success response into a protocol error carrying status + body
async fn check(uri: &str, response: Response) -> RepoResult<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(RepoError::Protocol {
        uri: uri.to_string(),
        status: status.as_u16(),
        body,
    })
}

#[async_trait]
impl Repository for HttpRepository {
    async fn get(&self, uri: &str, prefer: &Prefer) -> RepoResult<String> {
        let response = self
            .client
            .get(uri)
            .header(ACCEPT, TURTLE)
            .header("Prefer", prefer.header_value())
            .send()
            .await?;

        Ok(check(uri, response).await?.text().await?)
    }

    async fn post(&self, container: &str, body: &str) -> RepoResult<ResourceUri> {
        let response = self
            .client
            .post(container)
            .header(CONTENT_TYPE, TURTLE)
            .body(body.to_string())
            .send()
            .await?;

        let response = check(container, response).await?;
        let status = response.status().as_u16();

        response
            .headers()
            .get(LOCATION)
            .and_then(|v| v.to_str().ok())
            .map(String::from)
            .ok_or_else(|| RepoError::Protocol {
                uri: container.to_string(),
                status,
                body: "create response carried no Location header".to_string(),
            })
    }

    async fn put(&self, uri: &str, body: &str) -> RepoResult<()> {
        let response = self
            .client
            .put(uri)
            .header(CONTENT_TYPE, TURTLE)
            .body(body.to_string())
            .send()
            .await?;

        check(uri, response).await?;
        Ok(())
    }

    async fn patch(&self, uri: &str, update: &str) -> RepoResult<()> {
        let response = self
            .client
            .patch(uri)
            .header(CONTENT_TYPE, SPARQL_UPDATE)
            .body(update.to_string())
            .send()
            .await?;

        check(uri, response).await?;
        Ok(())
    }

    async fn delete(&self, uri: &str) -> RepoResult<()> {
        let response = self.client.delete(uri).send().await?;
        check(uri, response).await?;
        Ok(())
    }

    async fn exists(&self, uri: &str) -> RepoResult<bool> {
        let response = self.client.head(uri).send().await?;
        let status = response.status();

        if status.is_success() {
            Ok(true)
        } else if status.as_u16() == 404 {
            Ok(false)
        } else {
            Err(RepoError::status(uri, status.as_u16()))
        }
    }
}
