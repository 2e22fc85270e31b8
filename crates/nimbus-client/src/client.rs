use crate::error::{Error, Result};
use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use std::io::Read;
use std::time::Duration;

/// Blocking HTTP client bound to one API target.
///
/// Injects the bearer token on every request when one is present; error
/// mapping is uniform so command handlers never inspect status codes.
pub struct ApiClient {
    base_url: String,
    token: Option<String>,
    http: Client,
}

impl ApiClient {
    pub fn new(base_url: &str, token: Option<String>) -> Result<Self> {
        let http = Client::builder()
            .connect_timeout(Duration::from_secs(10))
            .build()?;
        Ok(ApiClient {
            base_url: base_url.trim_end_matches('/').to_string(),
            token,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path.trim_start_matches('/'));
        let mut builder = self.http.request(method, url);
        if let Some(token) = &self.token {
            builder = builder.bearer_auth(token);
        }
        builder
    }

    fn check(response: Response) -> Result<Response> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED {
            return Err(Error::Unauthorized);
        }
        if !status.is_success() {
            let message = api_message(response);
            return Err(Error::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }

    /// GET a json document. An empty body (e.g. 204) decodes as null.
    pub fn get_json(&self, path: &str) -> Result<serde_json::Value> {
        let response = Self::check(self.request(Method::GET, path).send()?)?;
        decode_json(response)
    }

    /// GET and deserialize into a concrete type.
    pub fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        let value = self.get_json(path)?;
        serde_json::from_value(value).map_err(|err| Error::Decode(err.to_string()))
    }

    /// POST a json body, returning the response document (null when empty).
    pub fn post_json(&self, path: &str, body: &serde_json::Value) -> Result<serde_json::Value> {
        let response = Self::check(self.request(Method::POST, path).json(body).send()?)?;
        decode_json(response)
    }

    pub fn delete(&self, path: &str) -> Result<()> {
        Self::check(self.request(Method::DELETE, path).send()?)?;
        Ok(())
    }

    /// GET the raw response body as a byte stream, for passthrough output
    /// such as application logs.
    pub fn get_stream(&self, path: &str) -> Result<impl Read + 'static> {
        let response = Self::check(self.request(Method::GET, path).send()?)?;
        Ok(response)
    }
}

fn decode_json(response: Response) -> Result<serde_json::Value> {
    let body = response.text()?;
    if body.trim().is_empty() {
        return Ok(serde_json::Value::Null);
    }
    serde_json::from_str(&body).map_err(|err| Error::Decode(err.to_string()))
}

// Prefer the API's own "message" field, fall back to the raw body.
fn api_message(response: Response) -> String {
    let body = response.text().unwrap_or_default();
    if let Ok(document) = serde_json::from_str::<serde_json::Value>(&body) {
        if let Some(message) = document.get("message").and_then(|m| m.as_str()) {
            return message.to_string();
        }
    }
    let body = body.trim();
    if body.is_empty() {
        "no error detail".to_string()
    } else {
        body.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn base_url_is_normalized() {
        let client = ApiClient::new("https://api.example.com///", None).unwrap();
        assert_eq!(client.base_url(), "https://api.example.com");
    }

    #[test]
    fn client_builds_without_a_token() {
        assert!(ApiClient::new("https://api.example.com", None).is_ok());
    }
}
