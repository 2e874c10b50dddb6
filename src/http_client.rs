// Copyright (c) 2026 Bountyy Oy. All rights reserved.
// This software is proprietary and confidential.

use anyhow::{anyhow, Context, Result};
use moka::future::Cache;
use reqwest::header::SET_COOKIE;
use reqwest::{Client, Method, RequestBuilder};
use std::collections::HashMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tracing::debug;

use crate::config::HttpConfig;
use crate::request::{FuzzableRequest, RequestBody};

/// Browser User-Agents, rotated per client
const BROWSER_USER_AGENTS: &[&str] = &[
    // Chrome on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36",
    // Firefox on Windows
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64; rv:121.0) Gecko/20100101 Firefox/121.0",
    // Safari on macOS
    "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/605.1.15 (KHTML, like Gecko) Version/17.2 Safari/605.1.15",
];

/// Next User-Agent in the rotation
fn get_browser_user_agent() -> &'static str {
    use std::sync::atomic::AtomicUsize;
    static COUNTER: AtomicUsize = AtomicUsize::new(0);

    let index = COUNTER.fetch_add(1, Ordering::Relaxed) % BROWSER_USER_AGENTS.len();
    BROWSER_USER_AGENTS[index]
}

/// Maximum response body size (10MB)
const MAX_BODY_SIZE: usize = 10 * 1024 * 1024;

const DEFAULT_POOL_IDLE_PER_HOST: usize = 32;
const DEFAULT_POOL_MAX_IDLE_TIMEOUT: u64 = 90;

/// Multipart boundary used when a form body carries uploads
const MULTIPART_BOUNDARY: &str = "----LonkeroMutatorBoundary7MA4YWxkTrZu0gW";

static NEXT_RESPONSE_ID: AtomicU64 = AtomicU64::new(1);

#[derive(Clone)]
pub struct HttpClient {
    client: Arc<Client>,
    max_retries: u32,
    cache: Option<Arc<Cache<String, HttpResponse>>>,
}

impl HttpClient {
    pub fn new(timeout_secs: u64, max_retries: u32) -> Result<Self> {
        // ACCEPT_INVALID_CERTS=true is for dev/testing against self-signed certificates only
        let accept_invalid_certs = std::env::var("ACCEPT_INVALID_CERTS")
            .unwrap_or_else(|_| "false".to_string())
            .parse::<bool>()
            .unwrap_or(false);

        if accept_invalid_certs {
            eprintln!("WARNING: certificate validation is DISABLED (ACCEPT_INVALID_CERTS=true)");
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .danger_accept_invalid_certs(accept_invalid_certs)
            .redirect(reqwest::redirect::Policy::none())
            .user_agent(get_browser_user_agent())
            .pool_max_idle_per_host(DEFAULT_POOL_IDLE_PER_HOST)
            .pool_idle_timeout(Duration::from_secs(DEFAULT_POOL_MAX_IDLE_TIMEOUT))
            .tcp_nodelay(true)
            .build()
            .context("Failed to create HTTP client")?;

        Ok(Self {
            client: Arc::new(client),
            max_retries,
            cache: None,
        })
    }

    /// Build a client from the `http` config section
    pub fn from_config(config: &HttpConfig) -> Result<Self> {
        let client = Self::new(config.request_timeout_secs, config.max_retries)?;
        Ok(if config.cache_enabled {
            client.with_cache(config.cache_max_capacity, config.cache_ttl_secs)
        } else {
            client
        })
    }

    /// Enable response caching
    pub fn with_cache(mut self, max_capacity: u64, ttl_secs: u64) -> Self {
        let cache = Cache::builder()
            .max_capacity(max_capacity)
            .time_to_live(Duration::from_secs(ttl_secs))
            .build();
        self.cache = Some(Arc::new(cache));
        self
    }

    /// Send GET request
    pub async fn get(&self, url: &str) -> Result<HttpResponse> {
        self.get_with_headers(url, Vec::new()).await
    }

    /// Send GET request with custom headers
    pub async fn get_with_headers(
        &self,
        url: &str,
        headers: Vec<(String, String)>,
    ) -> Result<HttpResponse> {
        self.execute(url, || {
            let mut request_builder = self.client.get(url);
            for (key, value) in &headers {
                request_builder = request_builder.header(key, value);
            }
            request_builder
        })
        .await
    }

    /// GET through the response cache, keyed by URL and request headers.
    /// Falls back to a plain request when caching is disabled.
    pub async fn get_cached(
        &self,
        url: &str,
        headers: Vec<(String, String)>,
    ) -> Result<HttpResponse> {
        let Some(cache) = &self.cache else {
            return self.get_with_headers(url, headers).await;
        };

        let key = cache_key(url, &headers);
        if let Some(cached_response) = cache.get(&key).await {
            debug!("Cache hit for {}", url);
            return Ok(cached_response);
        }

        let response = self.get_with_headers(url, headers).await?;
        cache.insert(key, response.clone()).await;
        Ok(response)
    }

    /// Send a fuzzable request (typically a mutant) as-is.
    ///
    /// reqwest parses the URI again, so `.`/`..` path segments are resolved on the wire.
    pub async fn send(&self, request: &FuzzableRequest) -> Result<HttpResponse> {
        let method = Method::from_bytes(request.method().as_bytes())
            .with_context(|| format!("Invalid HTTP method {}", request.method()))?;
        let url = request.uri();

        let (content_type, body) = match request.body() {
            RequestBody::Empty => (None, None),
            RequestBody::UrlEncoded(container) => (
                Some("application/x-www-form-urlencoded".to_string()),
                Some(container.to_urlencoded()),
            ),
            RequestBody::Form(form) if form.is_multipart() => (
                Some(format!("multipart/form-data; boundary={}", MULTIPART_BOUNDARY)),
                Some(form.to_multipart(MULTIPART_BOUNDARY)),
            ),
            RequestBody::Form(form) => (
                Some("application/x-www-form-urlencoded".to_string()),
                Some(form.fields().to_urlencoded()),
            ),
            RequestBody::Json(node) => (
                Some("application/json".to_string()),
                Some(node.to_value().to_string()),
            ),
            RequestBody::Raw(raw) => (None, Some(raw.clone())),
        };

        self.execute(&url, || {
            let mut request_builder = self.client.request(method.clone(), &url);
            for (key, value) in request.headers().iter() {
                request_builder = request_builder.header(key, value);
            }
            if let Some(cookie) = request.cookie().filter(|c| !c.is_empty()) {
                request_builder = request_builder.header("Cookie", cookie.to_header_value());
            }
            if let Some(content_type) = &content_type {
                if !request.headers().contains("content-type") {
                    request_builder = request_builder.header("Content-Type", content_type);
                }
            }
            if let Some(body) = &body {
                request_builder = request_builder.body(body.clone());
            }
            request_builder
        })
        .await
    }

    /// Send with bounded retries and linear back-off
    async fn execute<F>(&self, url: &str, build: F) -> Result<HttpResponse>
    where
        F: Fn() -> RequestBuilder,
    {
        let mut attempts = 0;
        let mut last_error = None;

        while attempts <= self.max_retries {
            let started = Instant::now();
            match build().send().await {
                Ok(response) => {
                    let status_code = response.status().as_u16();

                    let mut headers = HashMap::with_capacity(response.headers().len());
                    let mut set_cookies = Vec::new();
                    for (k, v) in response.headers().iter() {
                        if let Ok(value_str) = v.to_str() {
                            if *k == SET_COOKIE {
                                set_cookies.push(value_str.to_string());
                            }
                            headers.insert(k.as_str().to_string(), value_str.to_string());
                        }
                    }

                    // Read body with size limit
                    let body_bytes = response.bytes().await.unwrap_or_default();
                    let body = if body_bytes.len() > MAX_BODY_SIZE {
                        String::from_utf8_lossy(&body_bytes[..MAX_BODY_SIZE]).to_string()
                    } else {
                        String::from_utf8_lossy(&body_bytes).to_string()
                    };

                    let mut http_response = HttpResponse::new(status_code, body, headers);
                    http_response.set_cookies = set_cookies;
                    http_response.duration_ms = started.elapsed().as_millis() as u64;

                    debug!(
                        "{} -> {} (response id {}, {}ms)",
                        url, status_code, http_response.id, http_response.duration_ms
                    );
                    return Ok(http_response);
                }
                Err(e) => {
                    debug!("Request to {} failed (attempt {}): {}", url, attempts + 1, e);
                    last_error = Some(e);
                    attempts += 1;
                    if attempts <= self.max_retries {
                        tokio::time::sleep(Duration::from_millis(100 * attempts as u64)).await;
                    }
                }
            }
        }

        Err(match last_error {
            Some(e) => anyhow::Error::new(e).context(format!("Request to {} failed", url)),
            None => anyhow!("Request to {} was never attempted", url),
        })
    }
}

fn cache_key(url: &str, headers: &[(String, String)]) -> String {
    let mut sorted: Vec<String> = headers
        .iter()
        .map(|(k, v)| format!("{}:{}", k.to_ascii_lowercase(), v))
        .collect();
    sorted.sort();
    format!("{}|{}", url, sorted.join("|"))
}

#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Process-wide unique id, referenced by findings
    pub id: u64,
    pub status_code: u16,
    pub body: String,
    pub headers: HashMap<String, String>,
    /// Every `Set-Cookie` value (the header map keeps only one)
    pub set_cookies: Vec<String>,
    pub duration_ms: u64,
}

impl HttpResponse {
    pub fn new(status_code: u16, body: impl Into<String>, headers: HashMap<String, String>) -> Self {
        Self {
            id: NEXT_RESPONSE_ID.fetch_add(1, Ordering::Relaxed),
            status_code,
            body: body.into(),
            headers,
            set_cookies: Vec::new(),
            duration_ms: 0,
        }
    }

    pub fn contains(&self, pattern: &str) -> bool {
        self.body.contains(pattern)
    }

    /// Case-insensitive header lookup
    pub fn header(&self, name: &str) -> Option<String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.clone())
    }
}
