//! URL construction for both generation endpoints. Everything here is pure:
//! the same inputs always give the same URL and nothing touches the network.

use crate::models::{ImageGenerationRequest, TextGenerationRequest};

/// Characters `encodeURIComponent` leaves alone that `urlencoding` escapes.
const KEPT_PUNCTUATION: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encodes a prompt for use as a single path segment, using the
/// same reserved set as a browser's `encodeURIComponent`.
pub fn encode_component(input: &str) -> String {
    let mut encoded = urlencoding::encode(input).into_owned();
    for (escaped, literal) in KEPT_PUNCTUATION {
        if encoded.contains(escaped) {
            encoded = encoded.replace(escaped, literal);
        }
    }
    encoded
}

pub fn image_url(base_url: &str, request: &ImageGenerationRequest) -> String {
    format!(
        "{}/prompt/{}?width={}&height={}&seed={}&model={}&nologo=true",
        base_url.trim_end_matches('/'),
        encode_component(&request.prompt),
        request.width,
        request.height,
        request.seed,
        request.model.as_str()
    )
}

pub fn text_url(base_url: &str, request: &TextGenerationRequest) -> String {
    format!(
        "{}/{}?model={}",
        base_url.trim_end_matches('/'),
        encode_component(&request.prompt),
        request.model.as_str()
    )
}
