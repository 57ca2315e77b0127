//! Actix stub of the voucher backend.
//!
//! Mirrors the real backend's routes, list envelopes, and FastAPI-shaped
//! error bodies (`detail` string or array) so the client's normalization
//! paths are exercised for real over HTTP.

use actix_web::dev::Payload;
use actix_web::error::InternalError;
use actix_web::http::header;
use actix_web::{FromRequest, HttpRequest, HttpResponse, web};
use jiff::Timestamp;
use payloads::{
    CustomerId, CustomerStatus, LogAction, LogId, OrderId, ProjectId, UserId,
    VoucherId, VoucherStatus, requests, responses,
};
use rust_decimal::Decimal;
use serde::Deserialize;
use serde_json::json;
use std::future::{Ready, ready};
use std::sync::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};
use uuid::Uuid;

use crate::{TEST_PASSWORD, TEST_TOKEN, TEST_USERNAME};

pub struct StubDb {
    pub customers: Mutex<Vec<responses::Customer>>,
    pub vouchers: Mutex<Vec<responses::Voucher>>,
    pub logs: Mutex<Vec<responses::UsageLog>>,
    pub orders: Mutex<Vec<responses::Order>>,
    pub users: Mutex<Vec<responses::User>>,
    pub projects: Mutex<Vec<responses::Project>>,
    /// When set, print_qr answers with PDF bytes; otherwise it reproduces
    /// the JSON-payload-under-binary-content-type quirk of some
    /// deployments.
    qr_returns_pdf: AtomicBool,
}

impl StubDb {
    pub fn seeded() -> Self {
        let now: Timestamp = "2025-06-01T08:00:00Z".parse().unwrap();
        let customers = vec![
            customer("Tran Minh Khoa", "0901234567", &["vip"], now),
            customer("Le Thi Hanh", "0912345678", &["retail"], now),
            customer("Pham Quang Duy", "0923456789", &[], now),
        ];
        let vouchers = vec![
            voucher("VC00001", Some(customers[0].id), "summer-freight", 50_000, VoucherStatus::Active, now),
            voucher("VC00002", Some(customers[0].id), "summer-freight", 50_000, VoucherStatus::Used, now),
            voucher("VC00003", Some(customers[1].id), "tet-2025", 100_000, VoucherStatus::Active, now),
            voucher("VC00004", None, "tet-2025", 100_000, VoucherStatus::Disabled, now),
        ];
        let users = vec![responses::User {
            id: UserId(Uuid::new_v4()),
            username: TEST_USERNAME.to_string(),
            email: "admin@voucher-console.local".to_string(),
            role: "admin".to_string(),
            created_at: now,
        }];
        let orders = vec![responses::Order {
            id: OrderId(Uuid::new_v4()),
            code: "ORD-1001".to_string(),
            customer_id: customers[0].id,
            amount: Decimal::new(480_000, 0),
            status: "delivered".to_string(),
            created_at: now,
        }];
        Self {
            customers: Mutex::new(customers),
            vouchers: Mutex::new(vouchers),
            logs: Mutex::new(Vec::new()),
            orders: Mutex::new(orders),
            users: Mutex::new(users),
            projects: Mutex::new(Vec::new()),
            qr_returns_pdf: AtomicBool::new(false),
        }
    }

    pub fn set_qr_returns_pdf(&self, enabled: bool) {
        self.qr_returns_pdf.store(enabled, Ordering::SeqCst);
    }
}

fn customer(
    name: &str,
    phone: &str,
    tags: &[&str],
    now: Timestamp,
) -> responses::Customer {
    responses::Customer {
        id: CustomerId(Uuid::new_v4()),
        name: name.to_string(),
        phone: phone.to_string(),
        email: None,
        address: None,
        tags: tags.iter().map(|t| t.to_string()).collect(),
        status: CustomerStatus::Active,
        zalo_id: None,
        created_at: now,
        updated_at: now,
    }
}

fn voucher(
    code: &str,
    customer_id: Option<CustomerId>,
    campaign: &str,
    amount: i64,
    status: VoucherStatus,
    now: Timestamp,
) -> responses::Voucher {
    responses::Voucher {
        id: VoucherId(Uuid::new_v4()),
        code: code.to_string(),
        customer_id,
        campaign: Some(campaign.to_string()),
        discount_amount: Decimal::new(amount, 0),
        status,
        issued_at: now,
        expires_at: None,
        used_at: (status == VoucherStatus::Used).then_some(now),
        order_id: (status == VoucherStatus::Used)
            .then(|| format!("ORD-{code}")),
        qr_url: Some(format!("https://example.com/qr/{code}")),
    }
}

/// Request guard: the stub accepts exactly [`TEST_TOKEN`].
pub struct Authed;

impl FromRequest for Authed {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let authorized = req
            .headers()
            .get(header::AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .is_some_and(|token| token == TEST_TOKEN);
        if authorized {
            ready(Ok(Authed))
        } else {
            ready(Err(unauthorized()))
        }
    }
}

fn unauthorized() -> actix_web::Error {
    InternalError::from_response(
        "not authenticated",
        HttpResponse::Unauthorized()
            .json(json!({"detail": "Not authenticated"})),
    )
    .into()
}

fn not_found(message: &str) -> HttpResponse {
    HttpResponse::NotFound().json(json!({ "detail": message }))
}

/// FastAPI-style validation error body.
fn field_required(field: &str) -> HttpResponse {
    HttpResponse::UnprocessableEntity().json(json!({
        "detail": [{
            "loc": ["body", field],
            "msg": "field required",
            "type": "value_error.missing",
        }]
    }))
}

fn now() -> Timestamp {
    Timestamp::now()
}

/// q/status filtering plus (page, page_size) slicing; the total reflects
/// the filtered count. Sorting is left to the real backend.
fn apply_params<T: Clone>(
    items: &[T],
    params: &requests::ListParams,
    haystack: impl Fn(&T) -> String,
    status_of: impl Fn(&T) -> String,
) -> responses::Paginated<T> {
    let filtered: Vec<T> = items
        .iter()
        .filter(|item| {
            if let Some(q) = params.q.as_deref().filter(|q| !q.is_empty()) {
                if !haystack(item).to_lowercase().contains(&q.to_lowercase())
                {
                    return false;
                }
            }
            if let Some(status) =
                params.status.as_deref().filter(|s| !s.is_empty())
            {
                if status_of(item) != status {
                    return false;
                }
            }
            true
        })
        .cloned()
        .collect();

    let total = filtered.len() as i64;
    let data = match (params.page, params.page_size) {
        (Some(page), Some(page_size)) if page_size > 0 => filtered
            .into_iter()
            .skip((page.max(1) as usize - 1) * page_size as usize)
            .take(page_size as usize)
            .collect(),
        _ => filtered,
    };
    responses::Paginated { data, total }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api")
            .route("/health_check", web::get().to(health_check))
            .route("/auth/login", web::post().to(login))
            .route("/users/me", web::get().to(current_user))
            .service(
                web::scope("/voucher")
                    .route("/customers", web::get().to(list_customers))
                    .route("/customers", web::post().to(create_customer))
                    .route(
                        "/customers/search",
                        web::get().to(search_customers),
                    )
                    .route("/customers/{id}", web::get().to(get_customer))
                    .route("/customers/{id}", web::put().to(update_customer))
                    .route(
                        "/customers/{id}/vouchers",
                        web::get().to(customer_vouchers),
                    )
                    .route(
                        "/customers/{id}/stats",
                        web::get().to(customer_stats),
                    )
                    .route("/vouchers", web::get().to(list_vouchers))
                    .route("/vouchers", web::post().to(create_voucher))
                    .route("/vouchers/bulk", web::post().to(bulk_create))
                    .route("/vouchers/export", web::get().to(export_vouchers))
                    .route("/vouchers/print_qr", web::post().to(print_qr))
                    .route("/vouchers/{code}", web::get().to(get_voucher))
                    .route("/vouchers/{code}/use", web::post().to(use_voucher))
                    .route(
                        "/vouchers/{code}/status",
                        web::patch().to(update_voucher_status),
                    )
                    .route("/logs", web::get().to(list_logs))
                    .route("/logs", web::post().to(create_log))
                    .route("/logs/search", web::get().to(search_logs))
                    .route(
                        "/reports/summary",
                        web::get().to(summary_report),
                    )
                    .route(
                        "/reports/top_customers",
                        web::get().to(top_customers_report),
                    )
                    .route("/reports/revenue", web::get().to(revenue_report))
                    .route(
                        "/reports/zalo_stats",
                        web::get().to(zalo_stats_report),
                    ),
            )
            .route("/orders", web::get().to(list_orders))
            .route("/orders", web::post().to(create_order))
            .route("/orders/{id}", web::get().to(get_order))
            .route("/orders/{id}", web::put().to(update_order))
            .route("/orders/{id}", web::delete().to(delete_order))
            .route("/users", web::get().to(list_users))
            .route("/users", web::post().to(create_user))
            .route("/users/{id}", web::get().to(get_user))
            .route("/users/{id}", web::put().to(update_user))
            .route("/users/{id}", web::delete().to(delete_user))
            .route("/projects", web::get().to(list_projects))
            .route("/projects", web::post().to(create_project))
            .route("/projects/{id}", web::get().to(get_project))
            .route("/projects/{id}", web::put().to(update_project))
            .route("/projects/{id}", web::delete().to(delete_project)),
    );
}

async fn health_check() -> HttpResponse {
    HttpResponse::Ok().finish()
}

async fn login(
    details: web::Json<requests::LoginCredentials>,
) -> HttpResponse {
    if details.username == TEST_USERNAME && details.password == TEST_PASSWORD
    {
        HttpResponse::Ok().json(responses::TokenResponse {
            access_token: TEST_TOKEN.to_string(),
            token_type: "bearer".to_string(),
        })
    } else {
        HttpResponse::Unauthorized()
            .json(json!({"detail": "Invalid username or password"}))
    }
}

async fn current_user(db: web::Data<StubDb>, _auth: Authed) -> HttpResponse {
    let users = db.users.lock().unwrap();
    HttpResponse::Ok().json(&users[0])
}

// Customers

async fn list_customers(
    db: web::Data<StubDb>,
    _auth: Authed,
    params: web::Query<requests::ListParams>,
) -> HttpResponse {
    let customers = db.customers.lock().unwrap();
    let page = apply_params(
        &customers,
        &params,
        |c| format!("{} {} {}", c.name, c.phone, c.email.as_deref().unwrap_or("")),
        |c| c.status.to_string(),
    );
    HttpResponse::Ok().json(page)
}

async fn create_customer(
    db: web::Data<StubDb>,
    _auth: Authed,
    details: web::Json<requests::CreateCustomer>,
) -> HttpResponse {
    if details.name.trim().is_empty() {
        return field_required("name");
    }
    if details.phone.trim().is_empty() {
        return field_required("phone");
    }
    let created = now();
    let customer = responses::Customer {
        id: CustomerId(Uuid::new_v4()),
        name: details.name.clone(),
        phone: details.phone.clone(),
        email: details.email.clone(),
        address: details.address.clone(),
        tags: details.tags.clone(),
        status: CustomerStatus::Active,
        zalo_id: details.zalo_id.clone(),
        created_at: created,
        updated_at: created,
    };
    db.customers.lock().unwrap().insert(0, customer.clone());
    HttpResponse::Ok().json(customer)
}

async fn search_customers(
    db: web::Data<StubDb>,
    _auth: Authed,
    params: web::Query<requests::ListParams>,
) -> HttpResponse {
    let customers = db.customers.lock().unwrap();
    let q = params.q.as_deref().unwrap_or("").to_lowercase();
    // Search endpoints return bare arrays, not the list envelope.
    let hits: Vec<&responses::Customer> = customers
        .iter()
        .filter(|c| {
            c.name.to_lowercase().contains(&q) || c.phone.contains(&q)
        })
        .collect();
    HttpResponse::Ok().json(hits)
}

async fn get_customer(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let id = CustomerId(path.into_inner());
    let customers = db.customers.lock().unwrap();
    match customers.iter().find(|c| c.id == id) {
        Some(customer) => HttpResponse::Ok().json(customer),
        None => not_found("Customer not found"),
    }
}

async fn update_customer(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<Uuid>,
    details: web::Json<requests::UpdateCustomer>,
) -> HttpResponse {
    let id = CustomerId(path.into_inner());
    let mut customers = db.customers.lock().unwrap();
    let Some(customer) = customers.iter_mut().find(|c| c.id == id) else {
        return not_found("Customer not found");
    };
    if let Some(name) = &details.name {
        customer.name = name.clone();
    }
    if let Some(phone) = &details.phone {
        customer.phone = phone.clone();
    }
    if let Some(email) = &details.email {
        customer.email = Some(email.clone());
    }
    if let Some(address) = &details.address {
        customer.address = Some(address.clone());
    }
    if let Some(tags) = &details.tags {
        customer.tags = tags.clone();
    }
    if let Some(status) = details.status {
        customer.status = status;
    }
    if let Some(zalo_id) = &details.zalo_id {
        customer.zalo_id = Some(zalo_id.clone());
    }
    customer.updated_at = now();
    HttpResponse::Ok().json(customer.clone())
}

async fn customer_vouchers(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let id = CustomerId(path.into_inner());
    let vouchers = db.vouchers.lock().unwrap();
    // Bare array: the client normalizes it into the paginated shape.
    let owned: Vec<&responses::Voucher> = vouchers
        .iter()
        .filter(|v| v.customer_id == Some(id))
        .collect();
    HttpResponse::Ok().json(owned)
}

async fn customer_stats(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let id = CustomerId(path.into_inner());
    let vouchers = db.vouchers.lock().unwrap();
    let owned: Vec<&responses::Voucher> = vouchers
        .iter()
        .filter(|v| v.customer_id == Some(id))
        .collect();
    HttpResponse::Ok().json(responses::CustomerStats {
        total_vouchers: owned.len() as i64,
        active_vouchers: owned
            .iter()
            .filter(|v| v.status == VoucherStatus::Active)
            .count() as i64,
        used_vouchers: owned
            .iter()
            .filter(|v| v.status == VoucherStatus::Used)
            .count() as i64,
        total_discount: owned
            .iter()
            .filter(|v| v.status == VoucherStatus::Used)
            .map(|v| v.discount_amount)
            .sum(),
    })
}

// Vouchers

async fn list_vouchers(
    db: web::Data<StubDb>,
    _auth: Authed,
    params: web::Query<requests::ListParams>,
) -> HttpResponse {
    let vouchers = db.vouchers.lock().unwrap();
    let page = apply_params(
        &vouchers,
        &params,
        |v| {
            format!("{} {}", v.code, v.campaign.as_deref().unwrap_or(""))
        },
        |v| v.status.to_string(),
    );
    HttpResponse::Ok().json(page)
}

async fn create_voucher(
    db: web::Data<StubDb>,
    _auth: Authed,
    details: web::Json<requests::CreateVoucher>,
) -> HttpResponse {
    let count = db.vouchers.lock().unwrap().len();
    let code = details
        .code
        .clone()
        .unwrap_or_else(|| format!("VC{:05}", count + 1));
    let new = voucher(
        &code,
        details.customer_id,
        details.campaign.as_deref().unwrap_or(""),
        0,
        VoucherStatus::Active,
        now(),
    );
    let new = responses::Voucher {
        discount_amount: details.discount_amount,
        expires_at: details.expires_at,
        ..new
    };
    db.vouchers.lock().unwrap().insert(0, new.clone());
    HttpResponse::Ok().json(new)
}

async fn bulk_create(
    db: web::Data<StubDb>,
    _auth: Authed,
    details: web::Json<requests::BulkCreateVouchers>,
) -> HttpResponse {
    if details.quantity == 0 {
        return HttpResponse::BadRequest()
            .json(json!({"detail": "Quantity must be positive"}));
    }
    let prefix = details.prefix.as_deref().unwrap_or("VC");
    let mut vouchers = db.vouchers.lock().unwrap();
    let start = vouchers.len();
    let created: Vec<responses::Voucher> = (0..details.quantity as usize)
        .map(|i| {
            let new = voucher(
                &format!("{prefix}{:05}", start + i + 1),
                (!details.customer_ids.is_empty()).then(|| {
                    details.customer_ids[i % details.customer_ids.len()]
                }),
                details.campaign.as_deref().unwrap_or(""),
                0,
                VoucherStatus::Active,
                now(),
            );
            responses::Voucher {
                discount_amount: details.discount_amount,
                expires_at: details.expires_at,
                ..new
            }
        })
        .collect();
    for v in created.iter().rev() {
        vouchers.insert(0, v.clone());
    }
    HttpResponse::Ok().json(created)
}

async fn export_vouchers(
    db: web::Data<StubDb>,
    _auth: Authed,
    params: web::Query<requests::ListParams>,
) -> HttpResponse {
    let vouchers = db.vouchers.lock().unwrap();
    let page = apply_params(
        &vouchers,
        &params,
        |v| format!("{} {}", v.code, v.campaign.as_deref().unwrap_or("")),
        |v| v.status.to_string(),
    );
    let mut csv = String::from("code,campaign,discount_amount,status\n");
    for v in &page.data {
        csv.push_str(&format!(
            "{},{},{},{}\n",
            v.code,
            v.campaign.as_deref().unwrap_or(""),
            v.discount_amount,
            v.status
        ));
    }
    let mut body = vec![0xEF, 0xBB, 0xBF];
    body.extend_from_slice(csv.as_bytes());
    HttpResponse::Ok()
        .content_type("text/csv; charset=utf-8")
        .insert_header((
            header::CONTENT_DISPOSITION,
            r#"attachment; filename="vouchers.csv""#,
        ))
        .body(body)
}

async fn print_qr(
    db: web::Data<StubDb>,
    _auth: Authed,
    details: web::Json<requests::PrintQr>,
) -> HttpResponse {
    let vouchers = db.vouchers.lock().unwrap();
    let entries: Vec<responses::QrCodeEntry> = vouchers
        .iter()
        .filter(|v| details.codes.contains(&v.code))
        .map(|v| responses::QrCodeEntry {
            code: v.code.clone(),
            qr_url: v.qr_url.clone().unwrap_or_default(),
        })
        .collect();
    if entries.is_empty() {
        return not_found("No matching vouchers");
    }

    if db.qr_returns_pdf.load(Ordering::SeqCst) {
        return HttpResponse::Ok()
            .content_type("application/pdf")
            .insert_header((
                header::CONTENT_DISPOSITION,
                r#"attachment; filename="qr_codes.pdf""#,
            ))
            .body(&b"%PDF-1.4\n%stub\n%%EOF\n"[..]);
    }

    // The quirk under test: a JSON payload labeled as a PDF.
    let body = serde_json::to_vec(&responses::QrPrintPayload {
        qr_codes: entries,
    })
    .unwrap();
    HttpResponse::Ok()
        .content_type("application/pdf")
        .insert_header((
            header::CONTENT_DISPOSITION,
            r#"attachment; filename="qr_codes.pdf""#,
        ))
        .body(body)
}

async fn get_voucher(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<String>,
) -> HttpResponse {
    let code = path.into_inner();
    let vouchers = db.vouchers.lock().unwrap();
    match vouchers.iter().find(|v| v.code == code) {
        Some(voucher) => HttpResponse::Ok().json(voucher),
        None => not_found("Voucher not found"),
    }
}

#[derive(Deserialize)]
struct UseVoucherQuery {
    order_id: String,
}

async fn use_voucher(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<String>,
    query: web::Query<UseVoucherQuery>,
) -> HttpResponse {
    let code = path.into_inner();
    let mut vouchers = db.vouchers.lock().unwrap();
    let Some(voucher) = vouchers.iter_mut().find(|v| v.code == code) else {
        return not_found("Voucher not found");
    };
    if voucher.status != VoucherStatus::Active {
        return HttpResponse::BadRequest()
            .json(json!({"detail": "Voucher is not active"}));
    }
    voucher.status = VoucherStatus::Used;
    voucher.used_at = Some(now());
    voucher.order_id = Some(query.order_id.clone());
    let updated = voucher.clone();
    drop(vouchers);

    db.logs.lock().unwrap().insert(
        0,
        responses::UsageLog {
            id: LogId(Uuid::new_v4()),
            voucher_code: updated.code.clone(),
            customer_name: None,
            order_id: updated.order_id.clone(),
            action: LogAction::Used,
            note: None,
            created_at: now(),
        },
    );
    HttpResponse::Ok().json(updated)
}

#[derive(Deserialize)]
struct StatusQuery {
    new_status: VoucherStatus,
}

async fn update_voucher_status(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<String>,
    query: web::Query<StatusQuery>,
) -> HttpResponse {
    let code = path.into_inner();
    let mut vouchers = db.vouchers.lock().unwrap();
    let Some(voucher) = vouchers.iter_mut().find(|v| v.code == code) else {
        return not_found("Voucher not found");
    };
    voucher.status = query.new_status;
    HttpResponse::Ok().json(voucher.clone())
}

// Usage logs

async fn list_logs(
    db: web::Data<StubDb>,
    _auth: Authed,
    params: web::Query<requests::ListParams>,
) -> HttpResponse {
    let logs = db.logs.lock().unwrap();
    let page = apply_params(
        &logs,
        &params,
        |l| {
            format!(
                "{} {}",
                l.voucher_code,
                l.order_id.as_deref().unwrap_or("")
            )
        },
        |_| String::new(),
    );
    HttpResponse::Ok().json(page)
}

async fn create_log(
    db: web::Data<StubDb>,
    _auth: Authed,
    details: web::Json<requests::CreateLog>,
) -> HttpResponse {
    let log = responses::UsageLog {
        id: LogId(Uuid::new_v4()),
        voucher_code: details.voucher_code.clone(),
        customer_name: None,
        order_id: details.order_id.clone(),
        action: details.action,
        note: details.note.clone(),
        created_at: now(),
    };
    db.logs.lock().unwrap().insert(0, log.clone());
    HttpResponse::Ok().json(log)
}

async fn search_logs(
    db: web::Data<StubDb>,
    _auth: Authed,
    params: web::Query<requests::ListParams>,
) -> HttpResponse {
    let logs = db.logs.lock().unwrap();
    let q = params.q.as_deref().unwrap_or("").to_lowercase();
    let hits: Vec<&responses::UsageLog> = logs
        .iter()
        .filter(|l| l.voucher_code.to_lowercase().contains(&q))
        .collect();
    HttpResponse::Ok().json(hits)
}

// Reports

async fn summary_report(
    db: web::Data<StubDb>,
    _auth: Authed,
) -> HttpResponse {
    let total_customers = db.customers.lock().unwrap().len() as i64;
    let vouchers = db.vouchers.lock().unwrap();
    let used: Vec<&responses::Voucher> = vouchers
        .iter()
        .filter(|v| v.status == VoucherStatus::Used)
        .collect();
    let total_vouchers = vouchers.len() as i64;
    HttpResponse::Ok().json(responses::SummaryReport {
        total_customers,
        total_vouchers,
        used_vouchers: used.len() as i64,
        total_discount: used.iter().map(|v| v.discount_amount).sum(),
        usage_rate: if total_vouchers > 0 {
            used.len() as f64 / total_vouchers as f64
        } else {
            0.0
        },
    })
}

async fn top_customers_report(
    db: web::Data<StubDb>,
    _auth: Authed,
) -> HttpResponse {
    let customers = db.customers.lock().unwrap();
    let vouchers = db.vouchers.lock().unwrap();
    let mut top: Vec<responses::TopCustomer> = customers
        .iter()
        .map(|customer| {
            let owned: Vec<&responses::Voucher> = vouchers
                .iter()
                .filter(|v| v.customer_id == Some(customer.id))
                .collect();
            responses::TopCustomer {
                customer_id: customer.id,
                name: customer.name.clone(),
                voucher_count: owned.len() as i64,
                used_count: owned
                    .iter()
                    .filter(|v| v.status == VoucherStatus::Used)
                    .count() as i64,
            }
        })
        .collect();
    top.sort_by(|a, b| b.voucher_count.cmp(&a.voucher_count));
    HttpResponse::Ok().json(top)
}

async fn revenue_report(
    db: web::Data<StubDb>,
    _auth: Authed,
) -> HttpResponse {
    let vouchers = db.vouchers.lock().unwrap();
    let mut by_month: Vec<responses::RevenuePoint> = Vec::new();
    for voucher in vouchers.iter() {
        let Some(used_at) = voucher.used_at else {
            continue;
        };
        let month = used_at.to_string()[..7].to_string();
        match by_month.iter_mut().find(|p| p.month == month) {
            Some(point) => point.total += voucher.discount_amount,
            None => by_month.push(responses::RevenuePoint {
                month,
                total: voucher.discount_amount,
            }),
        }
    }
    by_month.sort_by(|a, b| a.month.cmp(&b.month));
    HttpResponse::Ok().json(by_month)
}

async fn zalo_stats_report(
    db: web::Data<StubDb>,
    _auth: Authed,
) -> HttpResponse {
    let vouchers = db.vouchers.lock().unwrap();
    let sent = vouchers.iter().filter(|v| v.customer_id.is_some()).count()
        as i64;
    HttpResponse::Ok().json(responses::ZaloStats {
        sent,
        delivered: sent,
        read: vouchers
            .iter()
            .filter(|v| {
                v.customer_id.is_some() && v.status == VoucherStatus::Used
            })
            .count() as i64,
    })
}

// Orders

async fn list_orders(
    db: web::Data<StubDb>,
    _auth: Authed,
    params: web::Query<requests::ListParams>,
) -> HttpResponse {
    let orders = db.orders.lock().unwrap();
    let page = apply_params(
        &orders,
        &params,
        |o| o.code.clone(),
        |o| o.status.clone(),
    );
    HttpResponse::Ok().json(page)
}

async fn create_order(
    db: web::Data<StubDb>,
    _auth: Authed,
    details: web::Json<requests::CreateOrder>,
) -> HttpResponse {
    let order = responses::Order {
        id: OrderId(Uuid::new_v4()),
        code: details.code.clone(),
        customer_id: details.customer_id,
        amount: details.amount,
        status: "pending".to_string(),
        created_at: now(),
    };
    db.orders.lock().unwrap().insert(0, order.clone());
    HttpResponse::Ok().json(order)
}

async fn get_order(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let id = OrderId(path.into_inner());
    let orders = db.orders.lock().unwrap();
    match orders.iter().find(|o| o.id == id) {
        Some(order) => HttpResponse::Ok().json(order),
        // This backend reports missing orders with a `message` field.
        None => HttpResponse::NotFound()
            .json(json!({"message": "Order not found"})),
    }
}

async fn update_order(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<Uuid>,
    details: web::Json<requests::UpdateOrder>,
) -> HttpResponse {
    let id = OrderId(path.into_inner());
    let mut orders = db.orders.lock().unwrap();
    let Some(order) = orders.iter_mut().find(|o| o.id == id) else {
        return HttpResponse::NotFound()
            .json(json!({"message": "Order not found"}));
    };
    if let Some(amount) = details.amount {
        order.amount = amount;
    }
    if let Some(status) = &details.status {
        order.status = status.clone();
    }
    HttpResponse::Ok().json(order.clone())
}

async fn delete_order(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let id = OrderId(path.into_inner());
    let mut orders = db.orders.lock().unwrap();
    let before = orders.len();
    orders.retain(|o| o.id != id);
    if orders.len() == before {
        return HttpResponse::NotFound()
            .json(json!({"message": "Order not found"}));
    }
    HttpResponse::Ok().finish()
}

// Users

async fn list_users(
    db: web::Data<StubDb>,
    _auth: Authed,
    params: web::Query<requests::ListParams>,
) -> HttpResponse {
    let users = db.users.lock().unwrap();
    let page = apply_params(
        &users,
        &params,
        |u| format!("{} {}", u.username, u.email),
        |u| u.role.clone(),
    );
    HttpResponse::Ok().json(page)
}

async fn create_user(
    db: web::Data<StubDb>,
    _auth: Authed,
    details: web::Json<requests::CreateUser>,
) -> HttpResponse {
    if details.username.trim().is_empty() {
        return field_required("username");
    }
    let user = responses::User {
        id: UserId(Uuid::new_v4()),
        username: details.username.clone(),
        email: details.email.clone(),
        role: details.role.clone(),
        created_at: now(),
    };
    db.users.lock().unwrap().push(user.clone());
    HttpResponse::Ok().json(user)
}

async fn get_user(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let id = UserId(path.into_inner());
    let users = db.users.lock().unwrap();
    match users.iter().find(|u| u.id == id) {
        Some(user) => HttpResponse::Ok().json(user),
        None => not_found("User not found"),
    }
}

async fn update_user(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<Uuid>,
    details: web::Json<requests::UpdateUser>,
) -> HttpResponse {
    let id = UserId(path.into_inner());
    let mut users = db.users.lock().unwrap();
    let Some(user) = users.iter_mut().find(|u| u.id == id) else {
        return not_found("User not found");
    };
    if let Some(email) = &details.email {
        user.email = email.clone();
    }
    if let Some(role) = &details.role {
        user.role = role.clone();
    }
    HttpResponse::Ok().json(user.clone())
}

async fn delete_user(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let id = UserId(path.into_inner());
    let mut users = db.users.lock().unwrap();
    let before = users.len();
    users.retain(|u| u.id != id);
    if users.len() == before {
        return not_found("User not found");
    }
    HttpResponse::Ok().finish()
}

// Projects

async fn list_projects(
    db: web::Data<StubDb>,
    _auth: Authed,
    params: web::Query<requests::ListParams>,
) -> HttpResponse {
    let projects = db.projects.lock().unwrap();
    let page = apply_params(
        &projects,
        &params,
        |p| p.name.clone(),
        |p| p.status.clone(),
    );
    HttpResponse::Ok().json(page)
}

async fn create_project(
    db: web::Data<StubDb>,
    _auth: Authed,
    details: web::Json<requests::CreateProject>,
) -> HttpResponse {
    if details.name.trim().is_empty() {
        return field_required("name");
    }
    let project = responses::Project {
        id: ProjectId(Uuid::new_v4()),
        name: details.name.clone(),
        description: details.description.clone(),
        status: "active".to_string(),
        created_at: now(),
    };
    db.projects.lock().unwrap().push(project.clone());
    HttpResponse::Ok().json(project)
}

async fn get_project(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let id = ProjectId(path.into_inner());
    let projects = db.projects.lock().unwrap();
    match projects.iter().find(|p| p.id == id) {
        Some(project) => HttpResponse::Ok().json(project),
        None => not_found("Project not found"),
    }
}

async fn update_project(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<Uuid>,
    details: web::Json<requests::UpdateProject>,
) -> HttpResponse {
    let id = ProjectId(path.into_inner());
    let mut projects = db.projects.lock().unwrap();
    let Some(project) = projects.iter_mut().find(|p| p.id == id) else {
        return not_found("Project not found");
    };
    if let Some(name) = &details.name {
        project.name = name.clone();
    }
    if let Some(description) = &details.description {
        project.description = Some(description.clone());
    }
    if let Some(status) = &details.status {
        project.status = status.clone();
    }
    HttpResponse::Ok().json(project.clone())
}

async fn delete_project(
    db: web::Data<StubDb>,
    _auth: Authed,
    path: web::Path<Uuid>,
) -> HttpResponse {
    let id = ProjectId(path.into_inner());
    let mut projects = db.projects.lock().unwrap();
    let before = projects.len();
    projects.retain(|p| p.id != id);
    if projects.len() == before {
        return not_found("Project not found");
    }
    HttpResponse::Ok().finish()
}
