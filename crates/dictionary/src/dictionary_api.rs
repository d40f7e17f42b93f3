// https://dictionaryapi.dev/ - GET /api/v2/entries/en/<word>, 200 with an array of entries or 404

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use reqwest::StatusCode;
use serde::Deserialize;

use crate::{DictionaryError, LookupResult};

pub(crate) const DICTIONARY_API_URL: &str = "https://api.dictionaryapi.dev/api/v2/entries/en/";

/// Characters `encodeURIComponent` leaves untouched.
const URI_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'_')
    .remove(b'.')
    .remove(b'!')
    .remove(b'~')
    .remove(b'*')
    .remove(b'\'')
    .remove(b'(')
    .remove(b')');

/// Body the service sends along with a 404.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NotFoundError {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub resolution: String,
}

pub(crate) fn entry_url(base_url: &str, word: &str) -> String {
    format!("{base_url}{}", utf8_percent_encode(word, URI_COMPONENT))
}

pub(crate) async fn get_definition(
    client: &reqwest::Client,
    base_url: &str,
    word: &str,
) -> Result<LookupResult, DictionaryError> {
    let url = entry_url(base_url, word);
    tracing::debug!(%url, "requesting definition");
    let res: reqwest::Response = client
        .get(&url)
        .send()
        .await
        .map_err(DictionaryError::Fetch)?;

    let status = res.status();
    tracing::debug!(%status, "dictionary responded");
    if status == StatusCode::NOT_FOUND {
        // the body only carries a friendlier explanation, a missing or odd one is fine
        let details = res.json::<NotFoundError>().await.unwrap_or_default();
        tracing::debug!(title = %details.title, message = %details.message, "no definitions");
        return Err(DictionaryError::NotFound(details));
    }
    if !status.is_success() {
        return Err(DictionaryError::Status(status));
    }

    res.json::<LookupResult>()
        .await
        .map_err(DictionaryError::Deserialize)
}
