use reqwest::blocking::Client;
use reqwest::header::{ACCEPT_LANGUAGE, USER_AGENT};
use tracing::debug;

use crate::config::TrackerConfig;

/// Where page markup comes from.
pub trait PageSource {
    fn fetch(&self, url: &str) -> Result<String, reqwest::Error>;
}

/// Blocking HTTP fetcher sending the configured browser headers.
pub struct HttpFetcher {
    client: Client,
    user_agent: String,
    accept_language: String,
}

impl HttpFetcher {
    pub fn new(config: &TrackerConfig) -> Result<Self, reqwest::Error> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()?;

        Ok(Self {
            client,
            user_agent: config.user_agent.clone(),
            accept_language: config.accept_language.clone(),
        })
    }
}

impl PageSource for HttpFetcher {
    fn fetch(&self, url: &str) -> Result<String, reqwest::Error> {
        debug!(url, "GET");
        let resp = self.client.get(url)
            .header(USER_AGENT, self.user_agent.as_str())
            .header(ACCEPT_LANGUAGE, self.accept_language.as_str())
            .send()?
            .error_for_status()?;
        resp.text()
    }
}
