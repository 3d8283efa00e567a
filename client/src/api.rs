//! HTTP proxy for the notes server endpoints.

use futures_util::future::join_all;
use notes_core::{ErrorBody, NoteDraft, NoteReadDto, NoteTitleDto};
use reqwest::{Response, StatusCode, Url};
use std::time::Duration;

use crate::error::{ClientError, Result};

const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Clone)]
pub struct NotesApiClient {
    client: reqwest::Client,
    base_url: Url
}

impl NotesApiClient {
    pub fn new(base_url: &str) -> Result<Self> {
        Self::with_timeout(base_url, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self> {
        let parsed = Url::parse(base_url)
            .map_err(|e| ClientError::InvalidBaseUrl(format!("{base_url}: {e}")))?;
        if parsed.cannot_be_a_base() || !matches!(parsed.scheme(), "http" | "https") {
            return Err(ClientError::InvalidBaseUrl(base_url.to_string()));
        }

        let client = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            client,
            base_url: parsed
        })
    }

    pub fn from_config(config: &config::ClientConfig) -> Result<Self> {
        Self::with_timeout(
            &config.base_url,
            Duration::from_secs(config.timeout_seconds)
        )
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Appends `segments` to the base URL, percent-encoding each one.
    fn url(&self, segments: &[&str]) -> Result<Url> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ClientError::InvalidBaseUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// POST /note
    pub async fn create_note(&self, draft: &NoteDraft) -> Result<NoteReadDto> {
        let response = self
            .client
            .post(self.url(&["note"])?)
            .json(draft)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    /// GET /note?title=
    ///
    /// A 204 answer is read as no matches.
    pub async fn search_notes_by_title(&self, fragment: &str) -> Result<Vec<NoteTitleDto>> {
        let mut url = self.url(&["note"])?;
        url.query_pairs_mut().append_pair("title", fragment);

        let response = check(self.client.get(url).send().await?).await?;
        if response.status() == StatusCode::NO_CONTENT {
            return Ok(Vec::new());
        }
        Ok(response.json().await?)
    }

    /// GET /note/content/{title}
    pub async fn get_note_content(&self, title: &str) -> Result<NoteReadDto> {
        let response = self
            .client
            .get(self.url(&["note", "content", title])?)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    /// PUT /note/{old_title}
    pub async fn update_note(&self, old_title: &str, draft: &NoteDraft) -> Result<NoteReadDto> {
        let response = self
            .client
            .put(self.url(&["note", old_title])?)
            .json(draft)
            .send()
            .await?;

        Ok(check(response).await?.json().await?)
    }

    /// DELETE /note/{title}
    pub async fn delete_note(&self, title: &str) -> Result<()> {
        let response = self
            .client
            .delete(self.url(&["note", title])?)
            .send()
            .await?;

        check(response).await?;
        Ok(())
    }

    /// Full notes for every title matching `fragment`.
    ///
    /// Bodies are fetched concurrently. A body that fails to load (for
    /// instance deleted in between) is logged and left out; the search
    /// itself failing is an error.
    pub async fn get_notes_matching(&self, fragment: &str) -> Result<Vec<NoteReadDto>> {
        let titles = self.search_notes_by_title(fragment).await?;
        if titles.is_empty() {
            return Ok(Vec::new());
        }

        let fetches = titles.iter().map(|t| self.get_note_content(&t.title));
        let results = join_all(fetches).await;

        let notes = titles
            .iter()
            .zip(results)
            .filter_map(|(title, result)| match result {
                Ok(note) => Some(note),
                Err(e) => {
                    tracing::warn!(title = %title.title, error = %e, "Skipping note that failed to load");
                    None
                }
            })
            .collect();
        Ok(notes)
    }

    pub async fn get_all_notes(&self) -> Result<Vec<NoteReadDto>> {
        self.get_notes_matching("").await
    }
}

async fn check(response: Response) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body: Option<ErrorBody> = response.json().await.ok();
    tracing::debug!(status = status.as_u16(), ?body, "Request failed");
    let (message, details) = match body {
        Some(body) => (Some(body.message), body.details),
        None => (None, None)
    };
    Err(ClientError::from_status(status, message, details))
}
