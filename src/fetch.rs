//! Page fetching with bounded retries

use crate::config::FetchConfig;
use crate::error::{PbpError, Result};
use std::thread;

/// Anything that can hand back the HTML of a URL
pub trait PageSource: Sync {
    fn fetch(&self, url: &str) -> Result<String>;
}

/// Blocking HTTP fetcher for the stats site
pub struct PageFetcher {
    client: reqwest::blocking::Client,
    config: FetchConfig,
}

impl PageFetcher {
    /// Create a fetcher with default settings
    pub fn new() -> Result<Self> {
        Self::with_config(FetchConfig::default())
    }

    pub fn with_config(config: FetchConfig) -> Result<Self> {
        let client = reqwest::blocking::Client::builder()
            .timeout(config.timeout)
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| PbpError::Network {
                url: String::new(),
                attempts: 0,
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self { client, config })
    }

    /// One request, no retry
    fn fetch_once(&self, url: &str) -> std::result::Result<String, String> {
        let response = self
            .client
            .get(url)
            .header("Accept", "text/html,application/xhtml+xml")
            .send()
            .map_err(|e| format!("Request failed: {}", e))?;

        let status = response.status();
        if !status.is_success() {
            return Err(format!(
                "HTTP error: {} {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown")
            ));
        }

        response
            .text()
            .map_err(|e| format!("Failed to read response: {}", e))
    }
}

impl PageSource for PageFetcher {
    /// Fetch a page, backing off between failed attempts.
    ///
    /// Any failure (transport or non-success status) is retried until the
    /// policy's attempt budget runs out.
    fn fetch(&self, url: &str) -> Result<String> {
        let retry = self.config.retry;
        let max_attempts = retry.max_attempts.max(1);
        let mut last_error = String::new();

        for attempt in 1..=max_attempts {
            if !self.config.delay.is_zero() {
                thread::sleep(self.config.delay);
            }

            match self.fetch_once(url) {
                Ok(body) => {
                    log::debug!("Fetched {} ({} bytes)", url, body.len());
                    return Ok(body);
                }
                Err(e) => {
                    last_error = e;
                    if attempt < max_attempts {
                        let wait = retry.backoff(attempt);
                        log::warn!(
                            "{} failed ({}), retrying in {:?} [{}/{}]",
                            url,
                            last_error,
                            wait,
                            attempt,
                            max_attempts
                        );
                        thread::sleep(wait);
                    }
                }
            }
        }

        Err(PbpError::Network {
            url: url.to_string(),
            attempts: max_attempts,
            message: last_error,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RetryPolicy;
    use std::io::{Read, Write};
    use std::net::TcpListener;
    use std::time::Duration;

    fn quick_retry(max_attempts: u32) -> FetchConfig {
        FetchConfig {
            retry: RetryPolicy {
                max_attempts,
                initial_backoff: Duration::from_millis(1),
                max_backoff: Duration::from_millis(1),
            },
            timeout: Duration::from_secs(5),
            ..FetchConfig::default()
        }
    }

    /// Answer one connection per status, in order, then stop listening
    fn serve_statuses(statuses: &'static [u16]) -> (String, std::thread::JoinHandle<()>) {
        let listener = TcpListener::bind("127.0.0.1:0").unwrap();
        let url = format!("http://{}/page.html", listener.local_addr().unwrap());

        let handle = std::thread::spawn(move || {
            for status in statuses {
                let (mut stream, _) = listener.accept().unwrap();
                let mut request = Vec::new();
                let mut buf = [0u8; 1024];
                while !request.windows(4).any(|w| w == b"\r\n\r\n") {
                    let n = stream.read(&mut buf).unwrap();
                    if n == 0 {
                        break;
                    }
                    request.extend_from_slice(&buf[..n]);
                }

                let body = if *status == 200 { "ok" } else { "busy" };
                let response = format!(
                    "HTTP/1.1 {} X\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                    status,
                    body.len(),
                    body
                );
                stream.write_all(response.as_bytes()).unwrap();
            }
        });

        (url, handle)
    }

    #[test]
    fn test_error_status_is_retried() {
        let (url, server) = serve_statuses(&[503, 503, 200]);
        let fetcher = PageFetcher::with_config(quick_retry(3)).unwrap();

        assert_eq!(fetcher.fetch(&url).unwrap(), "ok");
        server.join().unwrap();
    }

    #[test]
    fn test_error_status_gives_up_after_budget() {
        let (url, server) = serve_statuses(&[503, 503]);
        let fetcher = PageFetcher::with_config(quick_retry(2)).unwrap();

        match fetcher.fetch(&url).unwrap_err() {
            PbpError::Network { attempts, message, .. } => {
                assert_eq!(attempts, 2);
                assert!(message.contains("503"), "{}", message);
            }
            other => panic!("Unexpected error: {}", other),
        }
        server.join().unwrap();
    }

    #[test]
    fn test_unreachable_host_gives_up() {
        let config = FetchConfig {
            retry: RetryPolicy {
                max_attempts: 2,
                initial_backoff: Duration::from_millis(1),
                max_backoff: Duration::from_millis(1),
            },
            timeout: Duration::from_secs(2),
            ..FetchConfig::default()
        };
        let fetcher = PageFetcher::with_config(config).unwrap();

        // Port 9 on localhost is the discard port; nothing should be listening
        let err = fetcher.fetch("http://127.0.0.1:9/").unwrap_err();
        assert!(err.is_retryable());
        match err {
            PbpError::Network { attempts, url, .. } => {
                assert_eq!(attempts, 2);
                assert_eq!(url, "http://127.0.0.1:9/");
            }
            other => panic!("Unexpected error: {}", other),
        }
    }

    #[test]
    #[ignore] // Requires network access
    fn test_fetch_player_page() {
        let fetcher = PageFetcher::new().unwrap();
        let html = fetcher
            .fetch("https://www.basketball-reference.com/players/b/bryanko01.html")
            .unwrap();
        assert!(html.contains("Kobe Bryant"));
    }
}
