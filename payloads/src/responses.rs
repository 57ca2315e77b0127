use crate::{
    CustomerId, CustomerStatus, LogAction, LogId, OrderId, ProjectId, UserId,
    VoucherId, VoucherStatus,
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// List responses from the backend, normalized.
///
/// Some list endpoints return `{data, total}` (server-side pagination),
/// others a bare array; both decode into this shape. For bare arrays the
/// total is the array length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paginated<T> {
    pub data: Vec<T>,
    pub total: i64,
}

impl<T> From<Vec<T>> for Paginated<T> {
    fn from(data: Vec<T>) -> Self {
        let total = data.len() as i64;
        Self { data, total }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub(crate) enum ListBody<T> {
    Paged(Paginated<T>),
    Bare(Vec<T>),
}

impl<T> From<ListBody<T>> for Paginated<T> {
    fn from(body: ListBody<T>) -> Self {
        match body {
            ListBody::Paged(paged) => paged,
            ListBody::Bare(data) => data.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub name: String,
    pub phone: String,
    pub email: Option<String>,
    pub address: Option<String>,
    #[serde(default)]
    pub tags: Vec<String>,
    pub status: CustomerStatus,
    pub zalo_id: Option<String>,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Voucher {
    pub id: VoucherId,
    pub code: String,
    pub customer_id: Option<CustomerId>,
    pub campaign: Option<String>,
    pub discount_amount: Decimal,
    pub status: VoucherStatus,
    pub issued_at: Timestamp,
    pub expires_at: Option<Timestamp>,
    pub used_at: Option<Timestamp>,
    /// Order the voucher was redeemed against, if any.
    pub order_id: Option<String>,
    pub qr_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UsageLog {
    pub id: LogId,
    pub voucher_code: String,
    pub customer_name: Option<String>,
    pub order_id: Option<String>,
    pub action: LogAction,
    pub note: Option<String>,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: OrderId,
    pub code: String,
    pub customer_id: CustomerId,
    pub amount: Decimal,
    pub status: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub username: String,
    pub email: String,
    pub role: String,
    pub created_at: Timestamp,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Project {
    pub id: ProjectId,
    pub name: String,
    pub description: Option<String>,
    pub status: String,
    pub created_at: Timestamp,
}

/// Per-customer voucher aggregates for the customer detail view.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CustomerStats {
    pub total_vouchers: i64,
    pub active_vouchers: i64,
    pub used_vouchers: i64,
    pub total_discount: Decimal,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total_customers: i64,
    pub total_vouchers: i64,
    pub used_vouchers: i64,
    pub total_discount: Decimal,
    /// used / issued, in [0, 1].
    pub usage_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TopCustomer {
    pub customer_id: CustomerId,
    pub name: String,
    pub voucher_count: i64,
    pub used_count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RevenuePoint {
    /// Calendar month in `YYYY-MM` form.
    pub month: String,
    pub total: Decimal,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZaloStats {
    pub sent: i64,
    pub delivered: i64,
    pub read: i64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    pub token_type: String,
}

/// One printable QR entry from the print_qr endpoint's JSON fallback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrCodeEntry {
    pub code: String,
    pub qr_url: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QrPrintPayload {
    pub qr_codes: Vec<QrCodeEntry>,
}
