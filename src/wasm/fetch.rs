use wasm_bindgen::JsCast;
use wasm_bindgen_futures::JsFuture;
use web_sys::{Response, Window};

use crate::error::SetupError;

/// GETs `url` and returns the body as text. Any failure, including a non-2xx
/// status, is a [`SetupError::Fetch`].
pub async fn fetch_text(window: &Window, url: &str) -> Result<String, SetupError> {
    let fail = |reason: String| SetupError::Fetch {
        url: url.to_string(),
        reason,
    };

    let response = JsFuture::from(window.fetch_with_str(url))
        .await
        .map_err(|e| fail(format!("{e:?}")))?
        .dyn_into::<Response>()
        .map_err(|_| fail("not a Response".to_string()))?;

    if !response.ok() {
        return Err(fail(format!(
            "HTTP {} {}",
            response.status(),
            response.status_text()
        )));
    }

    let body = response.text().map_err(|e| fail(format!("{e:?}")))?;
    JsFuture::from(body)
        .await
        .map_err(|e| fail(format!("{e:?}")))?
        .as_string()
        .ok_or_else(|| fail("body is not text".to_string()))
}
