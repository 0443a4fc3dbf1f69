//! Filter list retrieval
//!
//! URLs are downloaded concurrently, local paths are read from disk. Results
//! come back in source order so rule order stays stable across runs.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Semaphore;
use tracing::debug;

use cf_compiler::ListSource;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(60);

pub struct FetchedList {
    pub source: ListSource,
    pub text: String,
}

pub async fn fetch_all(
    sources: &[ListSource],
    concurrency: usize,
) -> Result<Vec<FetchedList>, String> {
    let client = reqwest::Client::builder()
        .timeout(REQUEST_TIMEOUT)
        .build()
        .map_err(|e| format!("Failed to build HTTP client: {}", e))?;
    let semaphore = Arc::new(Semaphore::new(concurrency.max(1)));

    let mut handles = Vec::with_capacity(sources.len());
    for source in sources {
        let source = source.clone();
        let client = client.clone();
        let semaphore = semaphore.clone();
        handles.push(tokio::spawn(async move {
            let _permit = semaphore
                .acquire_owned()
                .await
                .map_err(|e| format!("Download queue closed: {}", e))?;
            let text = fetch_one(&client, &source).await?;
            debug!(source = %source, bytes = text.len(), "fetched filter list");
            Ok::<_, String>(FetchedList { source, text })
        }));
    }

    let mut lists = Vec::with_capacity(handles.len());
    for handle in handles {
        let list = handle
            .await
            .map_err(|e| format!("Download task failed: {}", e))??;
        lists.push(list);
    }

    Ok(lists)
}

async fn fetch_one(client: &reqwest::Client, source: &ListSource) -> Result<String, String> {
    match source {
        ListSource::Url(url) => {
            let response = client
                .get(url)
                .send()
                .await
                .and_then(|r| r.error_for_status())
                .map_err(|e| format!("Failed to download '{}': {}", url, e))?;
            response
                .text()
                .await
                .map_err(|e| format!("Failed to read body of '{}': {}", url, e))
        }
        // Decoded lossily like response bodies; a bad byte only spoils its own line.
        ListSource::Path(path) => tokio::fs::read(path)
            .await
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
            .map_err(|e| format!("Failed to read '{}': {}", path, e)),
    }
}
