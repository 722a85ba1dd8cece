use log::{debug, trace};
use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::CONTENT_TYPE;
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::ScenarioError;
use crate::models::BookId;

/// Blocking client for the `/books` resource
pub struct BooksClient {
    client: Client,
    base_url: String,
}

impl BooksClient {
    pub fn new(base_url: &str) -> anyhow::Result<BooksClient> {
        let client = Client::builder().build()?;

        Ok(BooksClient {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// `POST /books`
    pub fn create<T: Serialize + ?Sized>(&self, payload: &T) -> Result<Reply, reqwest::Error> {
        trace!("BooksClient::create()");
        let path = String::from("/books");
        let request = self.client.post(self.url(&path)).json(payload);

        self.send(Method::POST, path, request)
    }

    /// `GET /books`
    pub fn list(&self) -> Result<Reply, reqwest::Error> {
        trace!("BooksClient::list()");
        let path = String::from("/books");
        let request = self.client.get(self.url(&path));

        self.send(Method::GET, path, request)
    }

    /// `GET /books/{id}`
    pub fn get(&self, id: &BookId) -> Result<Reply, reqwest::Error> {
        trace!("BooksClient::get()");
        let path = format!("/books/{}", id);
        let request = self.client.get(self.url(&path));

        self.send(Method::GET, path, request)
    }

    /// `DELETE /books/{id}`
    pub fn delete(&self, id: &BookId) -> Result<Reply, reqwest::Error> {
        trace!("BooksClient::delete()");
        let path = format!("/books/{}", id);
        let request = self.client.delete(self.url(&path));

        self.send(Method::DELETE, path, request)
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    fn send(
        &self,
        method: Method,
        path: String,
        request: RequestBuilder,
    ) -> Result<Reply, reqwest::Error> {
        let response = request.send()?;

        let status = response.status();
        let content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text()?;

        debug!("{} {} -> {}: {}", method, path, status, body);

        Ok(Reply::new(method, path, status, content_type, body))
    }
}

/// Snapshot of one response, kept only for the scenario that made the call
#[derive(Debug, Clone)]
pub struct Reply {
    pub method: Method,
    pub path: String,
    pub status: StatusCode,
    pub content_type: Option<String>,
    pub body: String,
}

impl Reply {
    pub fn new(
        method: Method,
        path: String,
        status: StatusCode,
        content_type: Option<String>,
        body: String,
    ) -> Reply {
        Reply {
            method,
            path,
            status,
            content_type,
            body,
        }
    }

    /// `METHOD /path`, for messages
    pub fn request_line(&self) -> String {
        format!("{} {}", self.method, self.path)
    }

    /// Whether the service labelled the body as JSON (`application/json` or `*+json`)
    pub fn is_json(&self) -> bool {
        let essence = match self.content_type {
            Some(ref content_type) => content_type
                .split(';')
                .next()
                .unwrap_or_default()
                .trim()
                .to_ascii_lowercase(),
            None => return false,
        };

        essence == "application/json" || essence.ends_with("+json")
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ScenarioError> {
        serde_json::from_str::<T>(&self.body).map_err(|_| ScenarioError::NotJson {
            context: self.request_line(),
            body: self.body.clone(),
        })
    }
}
