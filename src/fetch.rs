use anyhow::{Context, Result};
use reqwest::StatusCode;
use tracing::{debug, info};

/// Substitute the word into a source's URL pattern.
pub fn build_url(pattern: &str, word: &str) -> String {
    pattern.replace("%s", word)
}

/// Fetch the page for a word from a source. `Ok(None)` means the source has
/// no page for this word; other non-success statuses are transport errors.
pub async fn fetch_document(
    client: &reqwest::Client,
    pattern: &str,
    word: &str,
) -> Result<Option<String>> {
    let url = build_url(pattern, word);
    debug!(%url, "fetching page");

    let response = client
        .get(&url)
        .send()
        .await
        .with_context(|| format!("failed to fetch {}", url))?;

    if response.status() == StatusCode::NOT_FOUND {
        info!(%url, "page not found");
        return Ok(None);
    }
    if !response.status().is_success() {
        anyhow::bail!("unexpected status {} for {}", response.status(), url);
    }

    let html = response
        .text()
        .await
        .with_context(|| format!("failed to read body of {}", url))?;
    Ok(Some(html))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn url_pattern_substitution() {
        assert_eq!(
            build_url("https://en.wiktionary.org/wiki/%s", "gibi"),
            "https://en.wiktionary.org/wiki/gibi"
        );
    }
}
