use reqwest::header::HeaderMap;
use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use crate::error::{Result, SyllabotError};

/// Hard cap on accumulated items per drain. Stops runaway pagination against
/// a collaborator that keeps handing out `next` links.
pub const PAGE_ITEM_CAP: usize = 500;

/// Drain a cursor-paginated collection into one ordered list.
///
/// The initial request carries `params`; every later page follows the
/// server-supplied `Link: <...>; rel="next"` URL verbatim, with no extra
/// parameters. A page that is not a JSON array is appended as a single item
/// and ends the drain. Any transport error or non-2xx status fails the whole
/// fetch; partial results are never returned.
pub async fn fetch_all<T: DeserializeOwned>(
    http: &reqwest::Client,
    token: &str,
    url: &str,
    params: &[(&str, &str)],
) -> Result<Vec<T>> {
    let mut items: Vec<Value> = Vec::new();

    let mut request = http.get(url).query(params).bearer_auth(token);
    loop {
        let response = request
            .send()
            .await
            .map_err(|e| SyllabotError::Fetch(format!("Request to {url} failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SyllabotError::Fetch(format!(
                "Request to {url} returned {status}"
            )));
        }

        let next = next_link(response.headers());
        let page: Value = response
            .json()
            .await
            .map_err(|e| SyllabotError::Fetch(format!("Invalid page from {url}: {e}")))?;

        match page {
            Value::Array(batch) => items.extend(batch),
            single => {
                // Not a collection endpoint after all; keep the one payload
                // and stop following links.
                items.push(single);
                break;
            }
        }

        if items.len() >= PAGE_ITEM_CAP {
            tracing::warn!(
                "pagination cap of {} items reached for {}; truncating drain",
                PAGE_ITEM_CAP,
                url
            );
            break;
        }

        match next {
            Some(next_url) => request = http.get(next_url).bearer_auth(token),
            None => break,
        }
    }

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(SyllabotError::Json))
        .collect()
}

/// Extract the `rel="next"` target from an RFC 5988 `Link` header, if any.
pub fn next_link(headers: &HeaderMap) -> Option<Url> {
    let link = headers.get(reqwest::header::LINK)?.to_str().ok()?;

    for part in link.split(',') {
        let mut segments = part.split(';');
        let target = segments.next()?.trim();
        let is_next = segments
            .any(|attr| attr.trim().eq_ignore_ascii_case(r#"rel="next""#));
        if is_next {
            let url = target.strip_prefix('<')?.strip_suffix('>')?;
            return Url::parse(url).ok();
        }
    }

    None
}
