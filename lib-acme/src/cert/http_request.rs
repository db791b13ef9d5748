use reqwest::{header, Client, Response, StatusCode};
use url::Url;

use super::errors::AcmeErrors;
use super::types::Problem;

const JOSE_JSON: &str = "application/jose+json";

pub(crate) async fn post(client: &Client, url: &Url, body: String) -> Result<Response, AcmeErrors> {
    tracing::trace!("POST {}", url);
    let response = client
        .post(url.clone())
        .header(header::CONTENT_TYPE, JOSE_JSON)
        .body(body)
        .send()
        .await?;
    if response.status().is_success() {
        return Ok(response);
    }
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    Err(problem(status, &body))
}

/// Reads an error body as a problem document, or keeps it as plain detail text.
fn problem(status: StatusCode, body: &str) -> AcmeErrors {
    let problem = serde_json::from_str::<Problem>(body).unwrap_or_else(|_| Problem {
        kind: String::new(),
        detail: body.trim().to_string(),
    });
    AcmeErrors::Problem {
        status,
        kind: problem.kind,
        detail: problem.detail,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_problem_document() {
        let err = problem(
            StatusCode::BAD_REQUEST,
            r#"{"type":"urn:ietf:params:acme:error:accountDoesNotExist","detail":"No account exists with the provided key","status":400}"#,
        );
        assert_eq!(
            err.to_string(),
            "ACME server returned 400 Bad Request: urn:ietf:params:acme:error:accountDoesNotExist: No account exists with the provided key"
        );
    }

    #[test]
    fn test_plain_text_body() {
        let err = problem(StatusCode::BAD_GATEWAY, "upstream unavailable\n");
        assert_eq!(
            err.to_string(),
            "ACME server returned 502 Bad Gateway: upstream unavailable"
        );
    }

    #[test]
    fn test_empty_body() {
        let err = problem(StatusCode::INTERNAL_SERVER_ERROR, "");
        assert_eq!(
            err.to_string(),
            "ACME server returned 500 Internal Server Error"
        );
    }
}
