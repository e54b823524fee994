use std::collections::HashMap;

use axum::response::Response;
use http_body_util::BodyExt;

/// Parse response body to JSON
pub async fn parse_response_body(response: Response) -> serde_json::Value {
    let body = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&body).unwrap()
}

/// Query of a signed URL as a map, first value per key
pub fn signed_url_query(signed_url: &str) -> HashMap<String, String> {
    let url = url::Url::parse(signed_url).unwrap();
    let mut query = HashMap::new();
    for (k, v) in url.query_pairs() {
        query.entry(k.into_owned()).or_insert_with(|| v.into_owned());
    }
    query
}

/// Route for the signed URL endpoint with a raw query string
pub fn signed_url_route(query: &str) -> String {
    format!("/?{query}")
}
