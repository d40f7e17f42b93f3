use std::{any::Any, panic::AssertUnwindSafe, sync::Arc};

use async_trait::async_trait;
use dictionary::{Dictionary, DictionaryError, LookupResult};
use futures::FutureExt;
use tokio::sync::RwLock;

const FALLBACK_ERROR: &str = "An error occurred";

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DefinitionSource: Send + Sync {
    async fn get_definition(&self, word: &str) -> Result<LookupResult, DictionaryError>;
}

#[async_trait]
impl DefinitionSource for Dictionary {
    async fn get_definition(&self, word: &str) -> Result<LookupResult, DictionaryError> {
        Dictionary::get_definition(self, word).await
    }
}

/// What is shown below the input. Only one of these can be on screen.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Outcome {
    #[default]
    Idle,
    Error(String),
    Found(LookupResult),
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub query: String,
    pub is_loading: bool,
    pub outcome: Outcome,
}

impl ViewState {
    pub fn submit_control(&self) -> SubmitControl {
        SubmitControl {
            enabled: !self.is_loading && !self.query.trim().is_empty(),
            label: if self.is_loading { "Searching..." } else { "Search" },
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SubmitControl {
    pub enabled: bool,
    pub label: &'static str,
}

pub struct LookupView<S> {
    source: Arc<S>,
    state: Arc<RwLock<ViewState>>,
}

impl<S> Clone for LookupView<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
            state: Arc::clone(&self.state),
        }
    }
}

impl<S: DefinitionSource> LookupView<S> {
    pub fn new(source: S) -> Self {
        Self {
            source: Arc::new(source),
            state: Arc::new(RwLock::new(ViewState::default())),
        }
    }

    pub async fn set_query(&self, query: impl Into<String>) {
        self.state.write().await.query = query.into();
    }

    pub async fn snapshot(&self) -> ViewState {
        self.state.read().await.clone()
    }

    pub async fn submit_control(&self) -> SubmitControl {
        self.state.read().await.submit_control()
    }

    /// Looks up the trimmed `query`, replacing whatever was displayed before.
    ///
    /// Returns `false` without touching the state when there is nothing to look up.
    /// Overlapping calls are not serialized: each one writes its outcome when it
    /// settles, so the last response to arrive is the one left on screen.
    pub async fn submit(&self, query: &str) -> bool {
        let word = query.trim();
        if word.is_empty() {
            return false;
        }

        {
            let mut state = self.state.write().await;
            state.is_loading = true;
            state.outcome = Outcome::Idle;
        }

        let lookup = AssertUnwindSafe(async { self.source.get_definition(word).await });
        let outcome = match lookup.catch_unwind().await {
            Ok(Ok(result)) => {
                tracing::debug!(%word, entries = result.len(), "lookup succeeded");
                Outcome::Found(result)
            }
            Ok(Err(error)) => {
                if error.is_service_answer() {
                    tracing::debug!(%word, %error, "lookup answered without definitions");
                } else {
                    tracing::warn!(%word, %error, "lookup failed");
                }
                Outcome::Error(error_message(&error))
            }
            Err(panic) => {
                tracing::warn!(%word, "lookup panicked");
                Outcome::Error(panic_message(&*panic))
            }
        };

        let mut state = self.state.write().await;
        state.outcome = outcome;
        state.is_loading = false;
        true
    }
}

fn error_message(error: &DictionaryError) -> String {
    let message = error.to_string();
    if message.trim().is_empty() {
        FALLBACK_ERROR.to_owned()
    } else {
        message
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> String {
    panic
        .downcast_ref::<&str>()
        .map(|message| message.to_string())
        .or_else(|| panic.downcast_ref::<String>().cloned())
        .filter(|message| !message.trim().is_empty())
        .unwrap_or_else(|| FALLBACK_ERROR.to_owned())
}
