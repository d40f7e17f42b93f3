use dictionary_api::{entry_url, get_definition, DICTIONARY_API_URL};

mod dictionary;
mod dictionary_api;

pub use dictionary::{Definition, Entry, License, LookupResult, Meaning, Phonetic};
pub use dictionary_api::NotFoundError;
pub use reqwest::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum DictionaryError {
    #[error("Word not found")]
    NotFound(NotFoundError),
    #[error("Failed to fetch definition")]
    Status(StatusCode),
    #[error("{0}")]
    Fetch(reqwest::Error),
    #[error("{0}")]
    Deserialize(reqwest::Error),
}

impl DictionaryError {
    /// The service replied with a status. Anything else never got a usable reply.
    pub fn is_service_answer(&self) -> bool {
        matches!(self, Self::NotFound(_) | Self::Status(_))
    }
}

#[derive(Debug, Clone)]
pub struct Dictionary {
    client: reqwest::Client,
    base_url: String,
}

impl Dictionary {
    pub fn new() -> Self {
        Self::with_base_url(DICTIONARY_API_URL)
    }

    /// Points the client at another deployment of the entries endpoint.
    pub fn with_base_url(base_url: impl Into<String>) -> Self {
        let mut base_url = base_url.into();
        if !base_url.ends_with('/') {
            base_url.push('/');
        }
        Self {
            client: reqwest::Client::new(),
            base_url,
        }
    }

    pub fn entry_url(&self, word: &str) -> String {
        entry_url(&self.base_url, word)
    }

    pub async fn get_definition(&self, word: &str) -> Result<LookupResult, DictionaryError> {
        get_definition(&self.client, &self.base_url, word).await
    }
}

impl Default for Dictionary {
    fn default() -> Self {
        Self::new()
    }
}
