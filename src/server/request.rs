//! Request construction for the fetch and post-back calls.
//!
//! Nothing here touches the network; callers `send()` the returned
//! builders.

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::header::AUTHORIZATION;
use serde_json::{Map, Value};

use crate::auth::Credentials;
use crate::config::PayloadEncoding;
use crate::error::TopicError;
use crate::variables::TopicVariables;

/// GET `url`, with basic auth when credentials are configured.
pub fn build_get(client: &Client, url: &str, credentials: Option<&Credentials>) -> RequestBuilder {
    with_auth(client.get(url), credentials)
}

/// POST `url` with an optional JSON body.
///
/// The body, when present, is sent as `application/json`.
pub fn build_post(
    client: &Client,
    url: &str,
    body: Option<&Value>,
    credentials: Option<&Credentials>,
) -> RequestBuilder {
    let builder = with_auth(client.post(url), credentials);
    match body {
        Some(body) => builder.json(body),
        None => builder,
    }
}

fn with_auth(builder: RequestBuilder, credentials: Option<&Credentials>) -> RequestBuilder {
    match credentials {
        Some(creds) => builder.header(AUTHORIZATION, creds.header_value()),
        None => builder,
    }
}

/// Encode handler output as the post-back body.
pub fn encode_payload(
    variables: &TopicVariables,
    encoding: PayloadEncoding,
) -> Result<Value, TopicError> {
    match encoding {
        PayloadEncoding::Values => Ok(serde_json::to_value(variables)?),
        PayloadEncoding::KeysOnly => Ok(Value::Object(
            variables
                .names()
                .map(|name| (name.to_string(), Value::String(String::new())))
                .collect::<Map<String, Value>>(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn client() -> Client {
        Client::new()
    }

    #[test]
    fn test_get_without_credentials_has_no_auth_header() {
        let request = build_get(&client(), "http://localhost/x", None).build().unwrap();
        assert_eq!(request.method(), reqwest::Method::GET);
        assert!(request.headers().get(AUTHORIZATION).is_none());
    }

    #[test]
    fn test_get_and_post_share_auth_header() {
        let creds = Credentials::new("admin", "admin");
        let get = build_get(&client(), "http://localhost/x", Some(&creds))
            .build()
            .unwrap();
        let post = build_post(&client(), "http://localhost/x&id=1", None, Some(&creds))
            .build()
            .unwrap();

        let expected = "Basic YWRtaW46YWRtaW4=";
        assert_eq!(get.headers().get(AUTHORIZATION).unwrap(), expected);
        assert_eq!(post.headers().get(AUTHORIZATION).unwrap(), expected);
    }

    #[test]
    fn test_post_body_is_json() {
        let body = json!({ "status": "done" });
        let request = build_post(&client(), "http://localhost/x", Some(&body), None)
            .build()
            .unwrap();

        assert_eq!(request.method(), reqwest::Method::POST);
        assert_eq!(
            request.headers().get(reqwest::header::CONTENT_TYPE).unwrap(),
            "application/json"
        );
        let bytes = request.body().and_then(|b| b.as_bytes()).unwrap();
        let sent: Value = serde_json::from_slice(bytes).unwrap();
        assert_eq!(sent, body);
    }

    #[test]
    fn test_post_without_body() {
        let request = build_post(&client(), "http://localhost/x", None, None)
            .build()
            .unwrap();
        assert!(request.body().is_none());
    }

    #[test]
    fn test_encode_values() {
        let vars = TopicVariables::new().with("status", "done").with("note", "ok");
        let body = encode_payload(&vars, PayloadEncoding::Values).unwrap();
        assert_eq!(body, json!({ "status": "done", "note": "ok" }));
    }

    #[test]
    fn test_encode_keys_only_drops_values() {
        let vars = TopicVariables::new().with("status", "done");
        let body = encode_payload(&vars, PayloadEncoding::KeysOnly).unwrap();
        assert_eq!(body, json!({ "status": "" }));
    }

    #[test]
    fn test_encode_empty_map() {
        let body = encode_payload(&TopicVariables::new(), PayloadEncoding::Values).unwrap();
        assert_eq!(body, json!({}));
    }
}
