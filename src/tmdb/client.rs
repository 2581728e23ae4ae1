use async_trait::async_trait;
use reqwest::{header, Client, Url};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::TmdbConfig;
use crate::error::TmdbError;

use super::dto::{ApiErrorBody, GenreDto, GenreListDto, MovieDto, Page, TvShowDto};
use super::{TimeWindow, TmdbApi};

/// HTTP client for the remote catalog API.
///
/// One `reqwest::Client` is built per instance with the configured
/// timeouts; every attempt of every call re-applies the auth and content
/// headers before it is sent, so a retried request is adapted exactly like
/// a fresh one.
#[derive(Debug, Clone)]
pub struct TmdbClient {
    http: Client,
    config: TmdbConfig,
}

impl TmdbClient {
    pub fn new(config: TmdbConfig) -> Result<Self, TmdbError> {
        let http = Client::builder()
            .connect_timeout(config.request_timeout)
            .timeout(config.resource_timeout)
            .build()
            .map_err(|_| TmdbError::Unknown)?;
        Ok(Self { http, config })
    }

    pub fn from_env() -> crate::Result<Self> {
        let config = TmdbConfig::from_env()?;
        Ok(Self::new(config)?)
    }

    fn endpoint(&self, path: &str) -> Result<Url, TmdbError> {
        let raw = format!("{}{}", self.config.base_url.trim_end_matches('/'), path);
        Url::parse(&raw).map_err(|_| TmdbError::InvalidUrl)
    }

    /// Issues `GET {base}{path}` with the retry policy applied: transient
    /// failures (transport errors, 5xx) are re-attempted up to
    /// `max_attempts` total, spaced by `retry_delay`; everything else
    /// surfaces immediately.
    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        let url = self.endpoint(path)?;
        let mut attempt = 1;
        loop {
            match self.send_once(url.clone(), query).await {
                Ok(payload) => return Ok(payload),
                Err(err) if attempt < self.config.max_attempts && err.is_transient() => {
                    warn!(path, attempt, "request failed ({err}), retrying");
                    tokio::time::sleep(self.config.retry_delay).await;
                    attempt += 1;
                }
                Err(err) => return Err(err),
            }
        }
    }

    /// One attempt: adapt headers, send, classify the outcome.
    async fn send_once<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &[(&str, String)],
    ) -> Result<T, TmdbError> {
        let response = self
            .http
            .get(url.clone())
            // language first, caller parameters after
            .query(&[("language", self.config.language.as_str())])
            .query(query)
            .bearer_auth(&self.config.access_token)
            .header(header::ACCEPT, "application/json")
            .header(header::CONTENT_TYPE, "application/json")
            .send()
            .await
            .map_err(TmdbError::Network)?;

        let status = response.status();
        let body = response.bytes().await.map_err(TmdbError::Network)?;
        debug!(%url, status = status.as_u16(), bytes = body.len(), "response");

        if status.is_success() {
            serde_json::from_slice(&body).map_err(TmdbError::Decoding)
        } else {
            let message = serde_json::from_slice::<ApiErrorBody>(&body)
                .ok()
                .and_then(|envelope| envelope.status_message);
            Err(TmdbError::Api {
                status_code: status.as_u16(),
                message,
            })
        }
    }
}

#[async_trait]
impl TmdbApi for TmdbClient {
    async fn movies(&self, category: &str, page: i64) -> Result<Page<MovieDto>, TmdbError> {
        self.get_json(&format!("/movie/{category}"), &[("page", page.to_string())])
            .await
    }

    async fn tv_shows(&self, category: &str, page: i64) -> Result<Page<TvShowDto>, TmdbError> {
        self.get_json(&format!("/tv/{category}"), &[("page", page.to_string())])
            .await
    }

    async fn trending_movies(
        &self,
        window: TimeWindow,
        page: i64,
    ) -> Result<Page<MovieDto>, TmdbError> {
        self.get_json(
            &format!("/trending/movie/{}", window.as_str()),
            &[("page", page.to_string())],
        )
        .await
    }

    async fn trending_tv_shows(
        &self,
        window: TimeWindow,
        page: i64,
    ) -> Result<Page<TvShowDto>, TmdbError> {
        self.get_json(
            &format!("/trending/tv/{}", window.as_str()),
            &[("page", page.to_string())],
        )
        .await
    }

    async fn movie_details(&self, id: i32) -> Result<MovieDto, TmdbError> {
        self.get_json(&format!("/movie/{id}"), &[]).await
    }

    async fn tv_show_details(&self, id: i32) -> Result<TvShowDto, TmdbError> {
        self.get_json(&format!("/tv/{id}"), &[]).await
    }

    async fn search_movies(&self, query: &str, page: i64) -> Result<Page<MovieDto>, TmdbError> {
        self.get_json(
            "/search/movie",
            &[("query", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    async fn search_tv_shows(
        &self,
        query: &str,
        page: i64,
    ) -> Result<Page<TvShowDto>, TmdbError> {
        self.get_json(
            "/search/tv",
            &[("query", query.to_string()), ("page", page.to_string())],
        )
        .await
    }

    async fn movie_genres(&self) -> Result<Vec<GenreDto>, TmdbError> {
        let payload: GenreListDto = self.get_json("/genre/movie/list", &[]).await?;
        Ok(payload.genres)
    }

    async fn tv_show_genres(&self) -> Result<Vec<GenreDto>, TmdbError> {
        let payload: GenreListDto = self.get_json("/genre/tv/list", &[]).await?;
        Ok(payload.genres)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn endpoint_appends_path_to_base() {
        let client =
            TmdbClient::new(TmdbConfig::new("https://api.themoviedb.org/3/", "t")).unwrap();
        let url = client.endpoint("/movie/popular").unwrap();
        assert_eq!(url.as_str(), "https://api.themoviedb.org/3/movie/popular");
    }

    #[test]
    fn malformed_base_url_is_rejected_before_sending() {
        let client = TmdbClient::new(TmdbConfig::new("not a base url", "t")).unwrap();
        assert!(matches!(
            client.endpoint("/movie/popular"),
            Err(TmdbError::InvalidUrl)
        ));
    }
}
