use std::time::Duration;

use civic_config::report_backend_error;
use civic_result::{create_backend_error, Result};
use reqwest::{header::HeaderValue, Client, RequestBuilder, Response, StatusCode};
use serde::{de::DeserializeOwned, Serialize};

database_derived!(
    /// PostgREST implementation
    pub struct RestDb {
        pub client: Client,
        /// Base URL of the backend
        pub url: String,
        /// Public API key
        pub api_key: String,
        /// Access token of the signed in user
        pub access_token: Option<String>,
    }
);

/// Error body returned by PostgREST and the auth endpoint
#[derive(Deserialize)]
struct ErrorBody {
    #[serde(alias = "msg", alias = "error_description")]
    message: String,
}

/// Message to surface for a failed request
///
/// Uses the backend's own message when the body carries one.
pub fn error_message(status: StatusCode, body: &str) -> String {
    serde_json::from_str::<ErrorBody>(body)
        .map(|body| body.message)
        .unwrap_or_else(|_| {
            status
                .canonical_reason()
                .unwrap_or("Request failed")
                .to_string()
        })
}

/// Filter matching a column equal to the value
pub fn eq(value: &str) -> String {
    format!("eq.{value}")
}

/// Filter matching a column against any of the values
pub fn any_of(values: &[String]) -> String {
    let quoted: Vec<String> = values
        .iter()
        .map(|value| format!("\"{}\"", value.replace('\\', "\\\\").replace('"', "\\\"")))
        .collect();

    format!("in.({})", quoted.join(","))
}

impl RestDb {
    /// Create a client for the backend at the given URL
    pub fn new(
        url: String,
        api_key: String,
        access_token: Option<String>,
    ) -> Result<RestDb, String> {
        let client = Client::builder()
            .user_agent(concat!("civic/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(5))
            .build()
            .map_err(|err| format!("Failed to build HTTP client: {err}"))?;

        Ok(RestDb {
            client,
            url: url.trim_end_matches('/').to_string(),
            api_key,
            access_token,
        })
    }

    /// Endpoint of a table
    pub fn table(&self, table: &str) -> String {
        format!("{}/rest/v1/{table}", self.url)
    }

    /// Endpoint of the auth service
    pub fn auth(&self, path: &str) -> String {
        format!("{}/auth/v1/{path}", self.url)
    }

    /// Attach the API key and bearer token to a request
    pub fn authorise(&self, request: RequestBuilder) -> RequestBuilder {
        request
            .header("apikey", &self.api_key)
            .bearer_auth(self.access_token.as_deref().unwrap_or(&self.api_key))
    }

    /// Send a request, converting transport and HTTP failures into errors
    pub async fn send(
        &self,
        operation: &str,
        collection: &str,
        request: RequestBuilder,
    ) -> Result<Response> {
        let response = report_backend_error!(
            operation,
            collection,
            self.authorise(request).send().await
        )?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = error_message(status, &body);

        error!("{operation} {collection} returned {status}: {body}");
        Err(create_backend_error!(operation, collection, message))
    }

    /// Find rows in a table
    pub async fn find<T: DeserializeOwned>(
        &self,
        table: &'static str,
        query: &[(&str, String)],
    ) -> Result<Vec<T>> {
        let response = self
            .send(
                "find",
                table,
                self.client.get(self.table(table)).query(query),
            )
            .await?;

        report_backend_error!("find", table, response.json::<Vec<T>>().await)
    }

    /// Find at most one row in a table
    pub async fn find_one<T: DeserializeOwned>(
        &self,
        table: &'static str,
        query: &[(&str, String)],
    ) -> Result<Option<T>> {
        let mut query = query.to_vec();
        query.push(("limit", "1".to_string()));

        Ok(self.find(table, &query).await?.into_iter().next())
    }

    /// Insert one row into a table, returning the stored row
    pub async fn insert_one<T: Serialize + ?Sized, R: DeserializeOwned>(
        &self,
        table: &'static str,
        row: &T,
    ) -> Result<R> {
        let response = self
            .send(
                "insert",
                table,
                self.client
                    .post(self.table(table))
                    .header("Prefer", HeaderValue::from_static("return=representation"))
                    .json(row),
            )
            .await?;

        report_backend_error!("insert", table, response.json::<Vec<R>>().await)?
            .into_iter()
            .next()
            .ok_or_else(|| create_backend_error!("insert", table, "No row was returned"))
    }

    /// Insert one row into a table without reading it back
    pub async fn insert_minimal<T: Serialize + ?Sized>(
        &self,
        table: &'static str,
        row: &T,
    ) -> Result<()> {
        self.send(
            "insert",
            table,
            self.client
                .post(self.table(table))
                .header("Prefer", HeaderValue::from_static("return=minimal"))
                .json(row),
        )
        .await
        .map(|_| ())
    }

    /// Update rows matching a filter with a partial row
    pub async fn update<T: Serialize + ?Sized>(
        &self,
        table: &'static str,
        filter: &[(&str, String)],
        partial: &T,
    ) -> Result<()> {
        self.send(
            "update",
            table,
            self.client
                .patch(self.table(table))
                .query(filter)
                .json(partial),
        )
        .await
        .map(|_| ())
    }

    /// Delete rows matching a filter
    pub async fn delete(&self, table: &'static str, filter: &[(&str, String)]) -> Result<()> {
        self.send(
            "delete",
            table,
            self.client.delete(self.table(table)).query(filter),
        )
        .await
        .map(|_| ())
    }

    /// Fetch the user the access token belongs to
    pub async fn fetch_auth_user<T: DeserializeOwned>(&self) -> Result<Option<T>> {
        if self.access_token.is_none() {
            return Ok(None);
        }

        let response = report_backend_error!(
            "fetch",
            "user",
            self.authorise(self.client.get(self.auth("user"))).send().await
        )?;

        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                warn!("Access token was rejected, continuing anonymously.");
                Ok(None)
            }
            status if status.is_success() => {
                report_backend_error!("fetch", "user", response.json::<T>().await).map(Some)
            }
            status => Err(create_backend_error!(
                "fetch",
                "user",
                status.canonical_reason().unwrap_or("Request failed")
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use civic_result::ErrorType;
    use futures::lock::Mutex;
    use reqwest::StatusCode;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::{TcpListener, TcpStream};

    use super::{any_of, eq, error_message, RestDb};
    use crate::{Database, DatabaseInfo, Report, Session, Vote};

    /// Backend answering each connection with the next canned response
    struct Backend {
        db: Database,
        requests: Arc<Mutex<Vec<String>>>,
    }

    async fn read_request(stream: &mut TcpStream) -> String {
        let mut buffer = Vec::new();
        let mut chunk = [0u8; 4096];

        loop {
            let read = stream.read(&mut chunk).await.unwrap();
            if read == 0 {
                break;
            }
            buffer.extend_from_slice(&chunk[..read]);

            let text = String::from_utf8_lossy(&buffer).to_lowercase();
            if let Some(end) = text.find("\r\n\r\n") {
                let length = text[..end]
                    .lines()
                    .find_map(|line| line.strip_prefix("content-length:"))
                    .map(|value| value.trim().parse::<usize>().unwrap())
                    .unwrap_or(0);

                if buffer.len() >= end + 4 + length {
                    break;
                }
            }
        }

        String::from_utf8_lossy(&buffer).to_string()
    }

    async fn backend(access_token: Option<&str>, responses: Vec<(u16, &'static str)>) -> Backend {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}", listener.local_addr().unwrap());
        let requests = Arc::new(Mutex::new(vec![]));

        let log = requests.clone();
        tokio::spawn(async move {
            for (status, body) in responses {
                let (mut stream, _) = listener.accept().await.unwrap();
                let request = read_request(&mut stream).await;
                log.lock().await.push(request);

                let response = format!(
                    "HTTP/1.1 {status} Backend\r\ncontent-type: application/json\r\ncontent-length: {}\r\nconnection: close\r\n\r\n{body}",
                    body.len()
                );
                stream.write_all(response.as_bytes()).await.unwrap();
                stream.shutdown().await.ok();
            }
        });

        let db = DatabaseInfo::Rest {
            url,
            api_key: "anon-key".to_string(),
            access_token: access_token.map(str::to_string),
        }
        .connect()
        .await
        .unwrap();

        Backend { db, requests }
    }

    impl Backend {
        async fn request_lines(&self) -> Vec<String> {
            self.requests
                .lock()
                .await
                .iter()
                .map(|request| request.lines().next().unwrap_or_default().to_string())
                .collect()
        }
    }

    #[test]
    fn build_filters() {
        assert_eq!(eq("abc"), "eq.abc");
        assert_eq!(
            any_of(&["a".to_string(), "b\"c".to_string()]),
            "in.(\"a\",\"b\\\"c\")"
        );
    }

    #[test]
    fn build_endpoints() {
        let db = RestDb::new(
            "https://project.example.org/".to_string(),
            "key".to_string(),
            None,
        )
        .unwrap();

        assert_eq!(
            db.table("reports"),
            "https://project.example.org/rest/v1/reports"
        );
        assert_eq!(db.auth("user"), "https://project.example.org/auth/v1/user");
    }

    #[test]
    fn error_messages_come_from_the_body() {
        assert_eq!(
            error_message(
                StatusCode::CONFLICT,
                r#"{"code":"23505","message":"duplicate key value violates unique constraint \"votes_pkey\""}"#
            ),
            "duplicate key value violates unique constraint \"votes_pkey\""
        );
        assert_eq!(
            error_message(StatusCode::UNAUTHORIZED, r#"{"msg":"invalid JWT"}"#),
            "invalid JWT"
        );
        assert_eq!(
            error_message(
                StatusCode::BAD_REQUEST,
                r#"{"error":"invalid_grant","error_description":"Token has expired"}"#
            ),
            "Token has expired"
        );
        assert_eq!(
            error_message(StatusCode::BAD_GATEWAY, "<html>upstream</html>"),
            "Bad Gateway"
        );
    }

    #[tokio::test]
    async fn rejected_token_is_signed_out() {
        let backend = backend(
            Some("expired-token"),
            vec![(401, r#"{"msg":"invalid JWT"}"#)],
        )
        .await;

        let session = Session::fetch(&backend.db).await.unwrap();
        assert_eq!(session, Session::anonymous());

        let requests = backend.requests.lock().await;
        assert_eq!(requests.len(), 1);
        assert!(requests[0].starts_with("GET /auth/v1/user HTTP/1.1"));

        let request = requests[0].to_lowercase();
        assert!(request.contains("apikey: anon-key"));
        assert!(request.contains("authorization: bearer expired-token"));
    }

    #[tokio::test]
    async fn no_token_skips_the_auth_endpoint() {
        let backend = backend(None, vec![]).await;

        let session = Session::fetch(&backend.db).await.unwrap();
        assert!(!session.is_authenticated());
        assert!(backend.requests.lock().await.is_empty());
    }

    #[tokio::test]
    async fn backend_message_is_surfaced() {
        let backend = backend(
            Some("token"),
            vec![(
                409,
                r#"{"code":"23505","details":null,"hint":null,"message":"duplicate key value violates unique constraint \"votes_pkey\""}"#,
            )],
        )
        .await;

        let error = backend
            .db
            .insert_vote(&Vote {
                user_id: "u1".to_string(),
                report_id: "r1".to_string(),
                is_true_vote: true,
            })
            .await
            .unwrap_err();

        assert_eq!(
            error.to_string(),
            "duplicate key value violates unique constraint \"votes_pkey\""
        );
        assert!(matches!(
            error.error_type,
            ErrorType::BackendFailure { ref operation, ref collection, .. }
                if operation == "insert" && collection == "votes"
        ));

        let requests = backend.requests.lock().await;
        assert!(requests[0].starts_with("POST /rest/v1/votes HTTP/1.1"));
        assert!(requests[0].to_lowercase().contains("prefer: return=minimal"));
        assert!(requests[0].contains(r#""is_true_vote":true"#));
    }

    #[tokio::test]
    async fn list_queries() {
        let backend = backend(
            Some("token"),
            vec![
                (
                    200,
                    r#"[{"id":"r1","title":"Pothole","description":"Deep","location":"Mill Lane","category":"Road Damage","image_url":null,"user_id":"u1","created_at":"2024-05-01T08:00:00.000Z","true_votes":2,"false_votes":0,"is_disputed":false}]"#,
                ),
                (200, r#"[{"id":"u1","full_name":"Asha Rao"}]"#),
            ],
        )
        .await;

        let reports = Report::fetch_with_authors(&backend.db).await.unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports[0].author_name(), "Asha Rao");
        assert_eq!(reports[0].true_votes, 2);

        assert_eq!(
            backend.request_lines().await,
            vec![
                "GET /rest/v1/reports?select=*&order=created_at.desc HTTP/1.1".to_string(),
                "GET /rest/v1/profiles?select=id%2Cfull_name&id=in.%28%22u1%22%29 HTTP/1.1"
                    .to_string(),
            ]
        );
    }
}
