use crate::{
    CustomerId, OrderId, ProjectId, UserId, VoucherStatus, requests, responses,
};
use reqwest::{Method, StatusCode, header};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

#[cfg(not(target_arch = "wasm32"))]
use std::time::Duration;

/// Fixed timeout for outbound calls on native targets. The wasm fetch
/// backend has no per-request timeout; the browser's defaults apply there.
#[cfg(not(target_arch = "wasm32"))]
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

type ReqwestResult = Result<reqwest::Response, reqwest::Error>;

/// An API client for interfacing with the voucher backend.
#[derive(Clone)]
pub struct APIClient {
    pub address: String,
    /// Attached as `Authorization: Bearer <token>` when present; requests
    /// proceed unauthenticated otherwise.
    pub token: Option<String>,
    pub inner_client: reqwest::Client,
}

/// Helper methods for http actions
impl APIClient {
    pub fn new(address: impl Into<String>) -> Self {
        Self {
            address: address.into(),
            token: None,
            inner_client: reqwest::Client::new(),
        }
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    fn format_url(&self, path: &str) -> String {
        format!("{}/api/{path}", &self.address)
    }

    fn request(&self, method: Method, path: &str) -> reqwest::RequestBuilder {
        let mut request =
            self.inner_client.request(method, self.format_url(path));

        if let Some(token) = &self.token {
            request = request.bearer_auth(token);
        }

        #[cfg(not(target_arch = "wasm32"))]
        let request = request.timeout(REQUEST_TIMEOUT);

        request
    }

    async fn get(
        &self,
        path: &str,
        params: &impl Serialize,
    ) -> ReqwestResult {
        self.request(Method::GET, path).query(params).send().await
    }

    async fn empty_get(&self, path: &str) -> ReqwestResult {
        self.request(Method::GET, path).send().await
    }

    async fn post(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.request(Method::POST, path).json(body).send().await
    }

    async fn put(&self, path: &str, body: &impl Serialize) -> ReqwestResult {
        self.request(Method::PUT, path).json(body).send().await
    }

    async fn delete(&self, path: &str) -> ReqwestResult {
        self.request(Method::DELETE, path).send().await
    }
}

/// Methods on the backend API
impl APIClient {
    pub async fn health_check(&self) -> Result<(), ClientError> {
        let response = self.empty_get("health_check").await?;
        ok_empty(response).await
    }

    pub async fn login(
        &self,
        details: &requests::LoginCredentials,
    ) -> Result<responses::TokenResponse, ClientError> {
        let response = self.post("auth/login", details).await?;
        ok_body(response).await
    }

    /// Profile of the user the current token belongs to.
    pub async fn current_user(&self) -> Result<responses::User, ClientError> {
        let response = self.empty_get("users/me").await?;
        ok_body(response).await
    }

    // Customers

    pub async fn list_customers(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::Customer>, ClientError> {
        let response = self.get("voucher/customers", params).await?;
        ok_list(response).await
    }

    pub async fn create_customer(
        &self,
        details: &requests::CreateCustomer,
    ) -> Result<responses::Customer, ClientError> {
        let response = self.post("voucher/customers", details).await?;
        ok_body(response).await
    }

    pub async fn get_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<responses::Customer, ClientError> {
        let response = self
            .empty_get(&format!("voucher/customers/{customer_id}"))
            .await?;
        ok_body(response).await
    }

    pub async fn update_customer(
        &self,
        customer_id: &CustomerId,
        details: &requests::UpdateCustomer,
    ) -> Result<responses::Customer, ClientError> {
        let response = self
            .put(&format!("voucher/customers/{customer_id}"), details)
            .await?;
        ok_body(response).await
    }

    pub async fn customer_vouchers(
        &self,
        customer_id: &CustomerId,
    ) -> Result<responses::Paginated<responses::Voucher>, ClientError> {
        let response = self
            .empty_get(&format!("voucher/customers/{customer_id}/vouchers"))
            .await?;
        ok_list(response).await
    }

    pub async fn search_customers(
        &self,
        q: &str,
    ) -> Result<Vec<responses::Customer>, ClientError> {
        let response =
            self.get("voucher/customers/search", &[("q", q)]).await?;
        ok_body(response).await
    }

    pub async fn customer_stats(
        &self,
        customer_id: &CustomerId,
    ) -> Result<responses::CustomerStats, ClientError> {
        let response = self
            .empty_get(&format!("voucher/customers/{customer_id}/stats"))
            .await?;
        ok_body(response).await
    }

    // Vouchers

    pub async fn list_vouchers(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::Voucher>, ClientError> {
        let response = self.get("voucher/vouchers", params).await?;
        ok_list(response).await
    }

    pub async fn create_voucher(
        &self,
        details: &requests::CreateVoucher,
    ) -> Result<responses::Voucher, ClientError> {
        let response = self.post("voucher/vouchers", details).await?;
        ok_body(response).await
    }

    pub async fn bulk_create_vouchers(
        &self,
        details: &requests::BulkCreateVouchers,
    ) -> Result<Vec<responses::Voucher>, ClientError> {
        let response = self.post("voucher/vouchers/bulk", details).await?;
        ok_body(response).await
    }

    /// Export the voucher table as a file download (CSV on the current
    /// backend).
    pub async fn export_vouchers(
        &self,
        params: &requests::ListParams,
    ) -> Result<FileDownload, ClientError> {
        let response = self.get("voucher/vouchers/export", params).await?;
        ok_file(response, "csv").await
    }

    /// Request a printable QR sheet for the given codes.
    ///
    /// The backend normally responds with a PDF. Some deployments answer
    /// with the QR payload as JSON while still labeling the body as binary;
    /// that case is detected here and returned as
    /// [`PrintQrOutcome::Payload`] so the caller can render the PDF
    /// locally instead of failing to decode.
    pub async fn print_voucher_qr(
        &self,
        details: &requests::PrintQr,
    ) -> Result<PrintQrOutcome, ClientError> {
        let response = self.post("voucher/vouchers/print_qr", details).await?;
        if !response.status().is_success() {
            return Err(api_error(response).await);
        }

        let content_type = content_type_of(&response);
        let filename = filename_of(&response, "pdf");
        let bytes = response.bytes().await?.to_vec();

        if is_json_payload(&content_type, &bytes) {
            let payload: responses::QrPrintPayload =
                serde_json::from_slice(&bytes)
                    .map_err(|e| ClientError::Decode(e.to_string()))?;
            return Ok(PrintQrOutcome::Payload(payload.qr_codes));
        }

        Ok(PrintQrOutcome::Pdf(FileDownload {
            filename,
            content_type,
            bytes,
        }))
    }

    pub async fn get_voucher(
        &self,
        code: &str,
    ) -> Result<responses::Voucher, ClientError> {
        let response =
            self.empty_get(&format!("voucher/vouchers/{code}")).await?;
        ok_body(response).await
    }

    /// Redeem a voucher against an order.
    pub async fn use_voucher(
        &self,
        code: &str,
        order_id: &str,
    ) -> Result<responses::Voucher, ClientError> {
        let response = self
            .request(Method::POST, &format!("voucher/vouchers/{code}/use"))
            .query(&[("order_id", order_id)])
            .send()
            .await?;
        ok_body(response).await
    }

    pub async fn update_voucher_status(
        &self,
        code: &str,
        new_status: VoucherStatus,
    ) -> Result<responses::Voucher, ClientError> {
        let response = self
            .request(Method::PATCH, &format!("voucher/vouchers/{code}/status"))
            .query(&[("new_status", new_status.as_str())])
            .send()
            .await?;
        ok_body(response).await
    }

    // Usage logs

    pub async fn list_logs(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::UsageLog>, ClientError> {
        let response = self.get("voucher/logs", params).await?;
        ok_list(response).await
    }

    pub async fn create_log(
        &self,
        details: &requests::CreateLog,
    ) -> Result<responses::UsageLog, ClientError> {
        let response = self.post("voucher/logs", details).await?;
        ok_body(response).await
    }

    pub async fn search_logs(
        &self,
        q: &str,
    ) -> Result<Vec<responses::UsageLog>, ClientError> {
        let response = self.get("voucher/logs/search", &[("q", q)]).await?;
        ok_body(response).await
    }

    // Reports

    pub async fn summary_report(
        &self,
    ) -> Result<responses::SummaryReport, ClientError> {
        let response = self.empty_get("voucher/reports/summary").await?;
        ok_body(response).await
    }

    pub async fn top_customers_report(
        &self,
    ) -> Result<Vec<responses::TopCustomer>, ClientError> {
        let response = self.empty_get("voucher/reports/top_customers").await?;
        ok_body(response).await
    }

    pub async fn revenue_report(
        &self,
    ) -> Result<Vec<responses::RevenuePoint>, ClientError> {
        let response = self.empty_get("voucher/reports/revenue").await?;
        ok_body(response).await
    }

    pub async fn zalo_stats_report(
        &self,
    ) -> Result<responses::ZaloStats, ClientError> {
        let response = self.empty_get("voucher/reports/zalo_stats").await?;
        ok_body(response).await
    }

    // Users

    pub async fn list_users(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::User>, ClientError> {
        let response = self.get("users", params).await?;
        ok_list(response).await
    }

    pub async fn create_user(
        &self,
        details: &requests::CreateUser,
    ) -> Result<responses::User, ClientError> {
        let response = self.post("users", details).await?;
        ok_body(response).await
    }

    pub async fn get_user(
        &self,
        user_id: &UserId,
    ) -> Result<responses::User, ClientError> {
        let response = self.empty_get(&format!("users/{user_id}")).await?;
        ok_body(response).await
    }

    pub async fn update_user(
        &self,
        user_id: &UserId,
        details: &requests::UpdateUser,
    ) -> Result<responses::User, ClientError> {
        let response = self.put(&format!("users/{user_id}"), details).await?;
        ok_body(response).await
    }

    pub async fn delete_user(
        &self,
        user_id: &UserId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("users/{user_id}")).await?;
        ok_empty(response).await
    }

    // Projects

    pub async fn list_projects(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::Project>, ClientError> {
        let response = self.get("projects", params).await?;
        ok_list(response).await
    }

    pub async fn create_project(
        &self,
        details: &requests::CreateProject,
    ) -> Result<responses::Project, ClientError> {
        let response = self.post("projects", details).await?;
        ok_body(response).await
    }

    pub async fn get_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<responses::Project, ClientError> {
        let response =
            self.empty_get(&format!("projects/{project_id}")).await?;
        ok_body(response).await
    }

    pub async fn update_project(
        &self,
        project_id: &ProjectId,
        details: &requests::UpdateProject,
    ) -> Result<responses::Project, ClientError> {
        let response =
            self.put(&format!("projects/{project_id}"), details).await?;
        ok_body(response).await
    }

    pub async fn delete_project(
        &self,
        project_id: &ProjectId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("projects/{project_id}")).await?;
        ok_empty(response).await
    }

    // Orders

    pub async fn list_orders(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::Order>, ClientError> {
        let response = self.get("orders", params).await?;
        ok_list(response).await
    }

    pub async fn create_order(
        &self,
        details: &requests::CreateOrder,
    ) -> Result<responses::Order, ClientError> {
        let response = self.post("orders", details).await?;
        ok_body(response).await
    }

    pub async fn get_order(
        &self,
        order_id: &OrderId,
    ) -> Result<responses::Order, ClientError> {
        let response = self.empty_get(&format!("orders/{order_id}")).await?;
        ok_body(response).await
    }

    pub async fn update_order(
        &self,
        order_id: &OrderId,
        details: &requests::UpdateOrder,
    ) -> Result<responses::Order, ClientError> {
        let response =
            self.put(&format!("orders/{order_id}"), details).await?;
        ok_body(response).await
    }

    pub async fn delete_order(
        &self,
        order_id: &OrderId,
    ) -> Result<(), ClientError> {
        let response = self.delete(&format!("orders/{order_id}")).await?;
        ok_empty(response).await
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// Normalized backend error: extracted message, status, and the raw
    /// JSON body when there was one.
    #[error("{message}")]
    Api {
        status: StatusCode,
        message: String,
        data: Option<Value>,
    },
    #[error("Network error. Please check your connection.")]
    Network(#[from] reqwest::Error),
    /// The response body did not match the expected shape.
    #[error("Unexpected response format: {0}")]
    Decode(String),
}

impl ClientError {
    pub fn status(&self) -> Option<StatusCode> {
        match self {
            Self::Api { status, .. } => Some(*status),
            Self::Network(e) => e.status(),
            Self::Decode(_) => None,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        self.status() == Some(StatusCode::UNAUTHORIZED)
    }

    /// Transport-class failures (connection refused, timeout). Mutations
    /// may be retried once on these; nothing reached the backend with
    /// certainty.
    pub fn is_transport(&self) -> bool {
        matches!(self, Self::Network(e) if e.status().is_none())
    }

    /// Whether a read may be retried: transport failures and server
    /// errors, but never 4xx.
    pub fn is_retryable_read(&self) -> bool {
        match self.status() {
            Some(status) => status.is_server_error(),
            None => matches!(self, Self::Network(_)),
        }
    }
}

/// A file returned by the backend, with its server-provided filename or a
/// timestamped fallback.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileDownload {
    pub filename: String,
    pub content_type: String,
    pub bytes: Vec<u8>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PrintQrOutcome {
    /// The backend produced a ready PDF.
    Pdf(FileDownload),
    /// JSON payload delivered under a binary content type; render locally.
    Payload(Vec<responses::QrCodeEntry>),
}

/// Extract a display message from an error body.
///
/// Precedence: `detail` string, joined `msg`/`message`/`detail` fields of
/// a `detail` array, then a top-level `message` field.
pub fn error_message_from_body(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;

    match value.get("detail") {
        Some(Value::String(detail)) => return Some(detail.clone()),
        Some(Value::Array(items)) => {
            let parts: Vec<&str> = items
                .iter()
                .filter_map(|item| {
                    item.get("msg")
                        .or_else(|| item.get("message"))
                        .or_else(|| item.get("detail"))
                        .and_then(Value::as_str)
                })
                .collect();
            if !parts.is_empty() {
                return Some(parts.join("; "));
            }
        }
        _ => {}
    }

    value
        .get("message")
        .and_then(Value::as_str)
        .map(str::to_string)
}

async fn api_error(response: reqwest::Response) -> ClientError {
    let status = response.status();
    let body = response.text().await.unwrap_or_default();
    let data: Option<Value> = serde_json::from_str(&body).ok();
    let message = error_message_from_body(&body).unwrap_or_else(|| {
        let trimmed = body.trim();
        if trimmed.is_empty() || data.is_some() {
            format!("Request failed with status {status}")
        } else {
            trimmed.to_string()
        }
    });
    ClientError::Api {
        status,
        message,
        data,
    }
}

/// Deserialize a successful request into the desired type, or return an
/// appropriate error.
pub async fn ok_body<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<T, ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    let bytes = response.bytes().await?;
    serde_json::from_slice(&bytes)
        .map_err(|e| ClientError::Decode(e.to_string()))
}

/// Check that an empty response is OK, returning a ClientError if not.
pub async fn ok_empty(response: reqwest::Response) -> Result<(), ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    Ok(())
}

async fn ok_list<T: DeserializeOwned>(
    response: reqwest::Response,
) -> Result<responses::Paginated<T>, ClientError> {
    ok_body::<responses::ListBody<T>>(response)
        .await
        .map(Into::into)
}

async fn ok_file(
    response: reqwest::Response,
    default_ext: &str,
) -> Result<FileDownload, ClientError> {
    if !response.status().is_success() {
        return Err(api_error(response).await);
    }
    let content_type = content_type_of(&response);
    let filename = filename_of(&response, default_ext);
    let bytes = response.bytes().await?.to_vec();
    Ok(FileDownload {
        filename,
        content_type,
        bytes,
    })
}

fn content_type_of(response: &reqwest::Response) -> String {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream")
        .to_string()
}

fn filename_of(response: &reqwest::Response, default_ext: &str) -> String {
    response
        .headers()
        .get(header::CONTENT_DISPOSITION)
        .and_then(|v| v.to_str().ok())
        .and_then(content_disposition_filename)
        .unwrap_or_else(|| default_filename(default_ext))
}

/// Parse the filename out of a `Content-Disposition` header value.
pub fn content_disposition_filename(header: &str) -> Option<String> {
    header
        .split(';')
        .map(str::trim)
        .find_map(|part| part.strip_prefix("filename="))
        .map(|name| name.trim_matches('"').to_string())
        .filter(|name| !name.is_empty())
}

fn default_filename(ext: &str) -> String {
    format!("vouchers_{}.{ext}", jiff::Timestamp::now().as_second())
}

/// A JSON body mistakenly delivered under a binary content type still
/// starts with a JSON token; checking the media type alone is not enough.
pub fn is_json_payload(content_type: &str, bytes: &[u8]) -> bool {
    if content_type.contains("application/json") {
        return true;
    }
    matches!(bytes.first(), Some(b'{') | Some(b'['))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detail_string_takes_precedence() {
        let body = r#"{"detail": "Voucher not found", "message": "other"}"#;
        assert_eq!(
            error_message_from_body(body).as_deref(),
            Some("Voucher not found")
        );
    }

    #[test]
    fn detail_array_entries_are_joined() {
        let body = r#"{"detail": [
            {"msg": "field required", "loc": ["body", "name"]},
            {"message": "value too long"},
            {"detail": "third"}
        ]}"#;
        assert_eq!(
            error_message_from_body(body).as_deref(),
            Some("field required; value too long; third")
        );
    }

    #[test]
    fn message_field_is_the_fallback() {
        let body = r#"{"message": "Internal error"}"#;
        assert_eq!(
            error_message_from_body(body).as_deref(),
            Some("Internal error")
        );
    }

    #[test]
    fn non_json_body_yields_none() {
        assert_eq!(error_message_from_body("<html>nope</html>"), None);
        assert_eq!(error_message_from_body(""), None);
    }

    #[test]
    fn content_disposition_quoted_and_bare() {
        assert_eq!(
            content_disposition_filename(
                r#"attachment; filename="vouchers.csv""#
            )
            .as_deref(),
            Some("vouchers.csv")
        );
        assert_eq!(
            content_disposition_filename("attachment; filename=qr.pdf")
                .as_deref(),
            Some("qr.pdf")
        );
        assert_eq!(content_disposition_filename("attachment"), None);
    }

    #[test]
    fn list_body_decodes_envelope_and_bare_array() {
        let enveloped: responses::ListBody<i32> =
            serde_json::from_str(r#"{"data": [1, 2, 3], "total": 30}"#)
                .unwrap();
        let paged: responses::Paginated<i32> = enveloped.into();
        assert_eq!(paged.total, 30);
        assert_eq!(paged.data, vec![1, 2, 3]);

        let bare: responses::ListBody<i32> =
            serde_json::from_str("[4, 5]").unwrap();
        let paged: responses::Paginated<i32> = bare.into();
        assert_eq!(paged.total, 2);
        assert_eq!(paged.data, vec![4, 5]);
    }

    #[test]
    fn json_payload_detection() {
        assert!(is_json_payload("application/json", b"{}"));
        assert!(is_json_payload("application/pdf", b"{\"qr_codes\": []}"));
        assert!(!is_json_payload("application/pdf", b"%PDF-1.7"));
    }
}
