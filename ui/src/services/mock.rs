//! In-memory stand-in for the voucher backend.
//!
//! Enabled by building with `USE_MOCK_DATA=1`. Collections live for the
//! lifetime of the page; a reload reseeds them. List semantics (search,
//! status filter, sort, pagination) match what the real backend provides
//! so the UI behaves identically against either strategy.

use jiff::Timestamp;
use payloads::api_client::{FileDownload, PrintQrOutcome};
use payloads::{
    ClientError, CustomerId, CustomerStatus, LogAction, LogId, OrderId,
    SortDir, VoucherId, VoucherStatus, requests, responses,
};
use reqwest::StatusCode;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::cell::RefCell;
use uuid::Uuid;

use crate::export;

#[derive(Clone, Copy, Default, PartialEq)]
pub struct MockApi;

thread_local! {
    static CUSTOMERS: RefCell<Vec<responses::Customer>> =
        RefCell::new(seed_customers());
    static VOUCHERS: RefCell<Vec<responses::Voucher>> =
        RefCell::new(seed_vouchers());
    static LOGS: RefCell<Vec<responses::UsageLog>> = RefCell::new(seed_logs());
    static ORDERS: RefCell<Vec<responses::Order>> = RefCell::new(seed_orders());
}

/// Emulated network latency so loading states are exercised in mock mode
/// exactly like against the real backend.
async fn latency() {
    #[cfg(target_arch = "wasm32")]
    {
        let ms = 100 + (js_sys::Math::random() * 200.0) as u32;
        gloo_timers::future::TimeoutFuture::new(ms).await;
    }
}

fn not_found(message: &str) -> ClientError {
    ClientError::Api {
        status: StatusCode::NOT_FOUND,
        message: message.to_string(),
        data: None,
    }
}

fn bad_request(message: &str) -> ClientError {
    ClientError::Api {
        status: StatusCode::BAD_REQUEST,
        message: message.to_string(),
        data: None,
    }
}

fn now() -> Timestamp {
    Timestamp::now()
}

/// Search/filter/sort/paginate a collection the way the backend's list
/// endpoints do: case-insensitive substring search across the designated
/// fields, equality on the status field, lexicographic sort on the
/// stringified sort key, then `(page, page_size)` slicing. The reported
/// total is the filtered count, not the slice length.
pub fn apply_list_params<T: Clone + Serialize>(
    items: &[T],
    params: &requests::ListParams,
    search_fields: &[&str],
    status_field: &str,
) -> responses::Paginated<T> {
    let mut filtered: Vec<(Value, T)> = items
        .iter()
        .map(|item| {
            (
                serde_json::to_value(item).unwrap_or(Value::Null),
                item.clone(),
            )
        })
        .filter(|(value, _)| {
            if let Some(q) = params.q.as_deref().filter(|q| !q.is_empty()) {
                let needle = q.to_lowercase();
                let hit = search_fields.iter().any(|field| {
                    field_text(value, field).to_lowercase().contains(&needle)
                });
                if !hit {
                    return false;
                }
            }
            if let Some(status) =
                params.status.as_deref().filter(|s| !s.is_empty())
            {
                if field_text(value, status_field) != status {
                    return false;
                }
            }
            true
        })
        .collect();

    if let Some(sort_by) = params.sort_by.as_deref() {
        filtered.sort_by(|a, b| {
            field_text(&a.0, sort_by).cmp(&field_text(&b.0, sort_by))
        });
        if params.sort_dir == Some(SortDir::Desc) {
            filtered.reverse();
        }
    }

    let total = filtered.len() as i64;
    let data: Vec<T> = match (params.page, params.page_size) {
        (Some(page), Some(page_size)) if page_size > 0 => {
            let start = (page.max(1) as usize - 1) * page_size as usize;
            filtered
                .into_iter()
                .skip(start)
                .take(page_size as usize)
                .map(|(_, item)| item)
                .collect()
        }
        _ => filtered.into_iter().map(|(_, item)| item).collect(),
    };

    responses::Paginated { data, total }
}

fn field_text(value: &Value, field: &str) -> String {
    match value.get(field) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Null) | None => String::new(),
        Some(other) => other.to_string(),
    }
}

impl MockApi {
    // Customers

    pub async fn list_customers(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::Customer>, ClientError> {
        latency().await;
        Ok(CUSTOMERS.with_borrow(|customers| {
            apply_list_params(
                customers,
                params,
                &["name", "phone", "email"],
                "status",
            )
        }))
    }

    pub async fn get_customer(
        &self,
        customer_id: &CustomerId,
    ) -> Result<responses::Customer, ClientError> {
        latency().await;
        CUSTOMERS
            .with_borrow(|customers| {
                customers.iter().find(|c| c.id == *customer_id).cloned()
            })
            .ok_or_else(|| not_found("Customer not found"))
    }

    pub async fn create_customer(
        &self,
        details: &requests::CreateCustomer,
    ) -> Result<responses::Customer, ClientError> {
        latency().await;
        if details.name.trim().is_empty() || details.phone.trim().is_empty() {
            return Err(bad_request("Name and phone are required"));
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
        CUSTOMERS
            .with_borrow_mut(|customers| customers.insert(0, customer.clone()));
        Ok(customer)
    }

    pub async fn update_customer(
        &self,
        customer_id: &CustomerId,
        details: &requests::UpdateCustomer,
    ) -> Result<responses::Customer, ClientError> {
        latency().await;
        CUSTOMERS.with_borrow_mut(|customers| {
            let customer = customers
                .iter_mut()
                .find(|c| c.id == *customer_id)
                .ok_or_else(|| not_found("Customer not found"))?;
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
            Ok(customer.clone())
        })
    }

    pub async fn customer_vouchers(
        &self,
        customer_id: &CustomerId,
    ) -> Result<responses::Paginated<responses::Voucher>, ClientError> {
        latency().await;
        let vouchers: Vec<responses::Voucher> =
            VOUCHERS.with_borrow(|vouchers| {
                vouchers
                    .iter()
                    .filter(|v| v.customer_id == Some(*customer_id))
                    .cloned()
                    .collect()
            });
        Ok(vouchers.into())
    }

    pub async fn customer_stats(
        &self,
        customer_id: &CustomerId,
    ) -> Result<responses::CustomerStats, ClientError> {
        latency().await;
        Ok(VOUCHERS.with_borrow(|vouchers| {
            let owned: Vec<&responses::Voucher> = vouchers
                .iter()
                .filter(|v| v.customer_id == Some(*customer_id))
                .collect();
            responses::CustomerStats {
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
            }
        }))
    }

    // Vouchers

    pub async fn list_vouchers(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::Voucher>, ClientError> {
        latency().await;
        Ok(VOUCHERS.with_borrow(|vouchers| {
            apply_list_params(
                vouchers,
                params,
                &["code", "campaign"],
                "status",
            )
        }))
    }

    pub async fn create_voucher(
        &self,
        details: &requests::CreateVoucher,
    ) -> Result<responses::Voucher, ClientError> {
        latency().await;
        let code = details
            .code
            .clone()
            .unwrap_or_else(|| next_code("VC", 1)[0].clone());
        let voucher = responses::Voucher {
            id: VoucherId(Uuid::new_v4()),
            code: code.clone(),
            customer_id: details.customer_id,
            campaign: details.campaign.clone(),
            discount_amount: details.discount_amount,
            status: VoucherStatus::Active,
            issued_at: now(),
            expires_at: details.expires_at,
            used_at: None,
            order_id: None,
            qr_url: Some(qr_url_for(&code)),
        };
        VOUCHERS.with_borrow_mut(|vouchers| vouchers.insert(0, voucher.clone()));
        push_log(&code, LogAction::Issued, None, None);
        Ok(voucher)
    }

    pub async fn bulk_create_vouchers(
        &self,
        details: &requests::BulkCreateVouchers,
    ) -> Result<Vec<responses::Voucher>, ClientError> {
        latency().await;
        if details.quantity == 0 {
            return Err(bad_request("Quantity must be positive"));
        }
        let prefix = details.prefix.as_deref().unwrap_or("VC");
        let codes = next_code(prefix, details.quantity as usize);
        let issued = now();
        let vouchers: Vec<responses::Voucher> = codes
            .iter()
            .enumerate()
            .map(|(i, code)| responses::Voucher {
                id: VoucherId(Uuid::new_v4()),
                code: code.clone(),
                customer_id: (!details.customer_ids.is_empty())
                    .then(|| details.customer_ids[i % details.customer_ids.len()]),
                campaign: details.campaign.clone(),
                discount_amount: details.discount_amount,
                status: VoucherStatus::Active,
                issued_at: issued,
                expires_at: details.expires_at,
                used_at: None,
                order_id: None,
                qr_url: Some(qr_url_for(code)),
            })
            .collect();
        VOUCHERS.with_borrow_mut(|all| {
            for voucher in vouchers.iter().rev() {
                all.insert(0, voucher.clone());
            }
        });
        for code in &codes {
            push_log(code, LogAction::Issued, None, None);
        }
        Ok(vouchers)
    }

    pub async fn export_vouchers(
        &self,
        params: &requests::ListParams,
    ) -> Result<FileDownload, ClientError> {
        latency().await;
        let page = self.list_vouchers(params).await?;
        let bytes = export::csv::vouchers_to_csv(&page.data)
            .map_err(|e| ClientError::Decode(e.to_string()))?;
        Ok(FileDownload {
            filename: format!("vouchers_{}.csv", now().as_second()),
            content_type: "text/csv; charset=utf-8".to_string(),
            bytes,
        })
    }

    /// The mock always takes the JSON-payload path, so the local PDF
    /// renderer gets exercised during development.
    pub async fn print_voucher_qr(
        &self,
        details: &requests::PrintQr,
    ) -> Result<PrintQrOutcome, ClientError> {
        latency().await;
        let entries: Vec<responses::QrCodeEntry> =
            VOUCHERS.with_borrow(|vouchers| {
                vouchers
                    .iter()
                    .filter(|v| details.codes.contains(&v.code))
                    .map(|v| responses::QrCodeEntry {
                        code: v.code.clone(),
                        qr_url: v
                            .qr_url
                            .clone()
                            .unwrap_or_else(|| qr_url_for(&v.code)),
                    })
                    .collect()
            });
        if entries.is_empty() {
            return Err(not_found("No matching vouchers"));
        }
        for entry in &entries {
            push_log(&entry.code, LogAction::Printed, None, None);
        }
        Ok(PrintQrOutcome::Payload(entries))
    }

    pub async fn get_voucher(
        &self,
        code: &str,
    ) -> Result<responses::Voucher, ClientError> {
        latency().await;
        VOUCHERS
            .with_borrow(|vouchers| {
                vouchers.iter().find(|v| v.code == code).cloned()
            })
            .ok_or_else(|| not_found("Voucher not found"))
    }

    pub async fn use_voucher(
        &self,
        code: &str,
        order_id: &str,
    ) -> Result<responses::Voucher, ClientError> {
        latency().await;
        let voucher = VOUCHERS.with_borrow_mut(|vouchers| {
            let voucher = vouchers
                .iter_mut()
                .find(|v| v.code == code)
                .ok_or_else(|| not_found("Voucher not found"))?;
            if voucher.status != VoucherStatus::Active {
                return Err(bad_request("Voucher is not active"));
            }
            voucher.status = VoucherStatus::Used;
            voucher.used_at = Some(now());
            voucher.order_id = Some(order_id.to_string());
            Ok(voucher.clone())
        })?;
        push_log(code, LogAction::Used, Some(order_id), None);
        Ok(voucher)
    }

    pub async fn update_voucher_status(
        &self,
        code: &str,
        new_status: VoucherStatus,
    ) -> Result<responses::Voucher, ClientError> {
        latency().await;
        let voucher = VOUCHERS.with_borrow_mut(|vouchers| {
            let voucher = vouchers
                .iter_mut()
                .find(|v| v.code == code)
                .ok_or_else(|| not_found("Voucher not found"))?;
            voucher.status = new_status;
            Ok::<_, ClientError>(voucher.clone())
        })?;
        push_log(
            code,
            LogAction::StatusChanged,
            None,
            Some(new_status.as_str()),
        );
        Ok(voucher)
    }

    // Usage logs

    pub async fn list_logs(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::UsageLog>, ClientError> {
        latency().await;
        Ok(LOGS.with_borrow(|logs| {
            apply_list_params(
                logs,
                params,
                &["voucher_code", "customer_name", "order_id"],
                "action",
            )
        }))
    }

    // Reports

    pub async fn summary_report(
        &self,
    ) -> Result<responses::SummaryReport, ClientError> {
        latency().await;
        let total_customers =
            CUSTOMERS.with_borrow(|customers| customers.len() as i64);
        Ok(VOUCHERS.with_borrow(|vouchers| {
            let total_vouchers = vouchers.len() as i64;
            let used: Vec<&responses::Voucher> = vouchers
                .iter()
                .filter(|v| v.status == VoucherStatus::Used)
                .collect();
            let usage_rate = if total_vouchers > 0 {
                used.len() as f64 / total_vouchers as f64
            } else {
                0.0
            };
            responses::SummaryReport {
                total_customers,
                total_vouchers,
                used_vouchers: used.len() as i64,
                total_discount: used.iter().map(|v| v.discount_amount).sum(),
                usage_rate,
            }
        }))
    }

    pub async fn top_customers_report(
        &self,
    ) -> Result<Vec<responses::TopCustomer>, ClientError> {
        latency().await;
        let mut top: Vec<responses::TopCustomer> =
            CUSTOMERS.with_borrow(|customers| {
                VOUCHERS.with_borrow(|vouchers| {
                    customers
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
                                    .filter(|v| {
                                        v.status == VoucherStatus::Used
                                    })
                                    .count()
                                    as i64,
                            }
                        })
                        .collect()
                })
            });
        top.sort_by(|a, b| b.voucher_count.cmp(&a.voucher_count));
        top.truncate(5);
        Ok(top)
    }

    pub async fn revenue_report(
        &self,
    ) -> Result<Vec<responses::RevenuePoint>, ClientError> {
        latency().await;
        let mut by_month: Vec<(String, Decimal)> = Vec::new();
        VOUCHERS.with_borrow(|vouchers| {
            for voucher in vouchers {
                let Some(used_at) = voucher.used_at else {
                    continue;
                };
                // RFC 3339 prefix "YYYY-MM".
                let month = used_at.to_string()[..7].to_string();
                match by_month.iter_mut().find(|(m, _)| *m == month) {
                    Some((_, total)) => *total += voucher.discount_amount,
                    None => by_month.push((month, voucher.discount_amount)),
                }
            }
        });
        by_month.sort_by(|a, b| a.0.cmp(&b.0));
        Ok(by_month
            .into_iter()
            .map(|(month, total)| responses::RevenuePoint { month, total })
            .collect())
    }

    pub async fn zalo_stats_report(
        &self,
    ) -> Result<responses::ZaloStats, ClientError> {
        latency().await;
        let linked: Vec<CustomerId> = CUSTOMERS.with_borrow(|customers| {
            customers
                .iter()
                .filter(|c| c.zalo_id.is_some())
                .map(|c| c.id)
                .collect()
        });
        Ok(VOUCHERS.with_borrow(|vouchers| {
            let delivered_to_zalo: Vec<&responses::Voucher> = vouchers
                .iter()
                .filter(|v| {
                    v.customer_id.is_some_and(|id| linked.contains(&id))
                })
                .collect();
            let sent = delivered_to_zalo.len() as i64;
            responses::ZaloStats {
                sent,
                delivered: sent - sent / 10,
                read: delivered_to_zalo
                    .iter()
                    .filter(|v| v.status == VoucherStatus::Used)
                    .count() as i64,
            }
        }))
    }

    // Orders

    pub async fn list_orders(
        &self,
        params: &requests::ListParams,
    ) -> Result<responses::Paginated<responses::Order>, ClientError> {
        latency().await;
        Ok(ORDERS.with_borrow(|orders| {
            apply_list_params(orders, params, &["code"], "status")
        }))
    }

    pub async fn get_order(
        &self,
        order_id: &OrderId,
    ) -> Result<responses::Order, ClientError> {
        latency().await;
        ORDERS
            .with_borrow(|orders| {
                orders.iter().find(|o| o.id == *order_id).cloned()
            })
            .ok_or_else(|| not_found("Order not found"))
    }

    pub async fn create_order(
        &self,
        details: &requests::CreateOrder,
    ) -> Result<responses::Order, ClientError> {
        latency().await;
        let order = responses::Order {
            id: OrderId(Uuid::new_v4()),
            code: details.code.clone(),
            customer_id: details.customer_id,
            amount: details.amount,
            status: "pending".to_string(),
            created_at: now(),
        };
        ORDERS.with_borrow_mut(|orders| orders.insert(0, order.clone()));
        Ok(order)
    }

    pub async fn update_order(
        &self,
        order_id: &OrderId,
        details: &requests::UpdateOrder,
    ) -> Result<responses::Order, ClientError> {
        latency().await;
        ORDERS.with_borrow_mut(|orders| {
            let order = orders
                .iter_mut()
                .find(|o| o.id == *order_id)
                .ok_or_else(|| not_found("Order not found"))?;
            if let Some(amount) = details.amount {
                order.amount = amount;
            }
            if let Some(status) = &details.status {
                order.status = status.clone();
            }
            Ok(order.clone())
        })
    }

    pub async fn delete_order(
        &self,
        order_id: &OrderId,
    ) -> Result<(), ClientError> {
        latency().await;
        ORDERS.with_borrow_mut(|orders| {
            let before = orders.len();
            orders.retain(|o| o.id != *order_id);
            if orders.len() == before {
                return Err(not_found("Order not found"));
            }
            Ok(())
        })
    }
}

fn qr_url_for(code: &str) -> String {
    format!("/api/voucher/vouchers/{code}/qr")
}

/// Session stand-in for mock mode, where no auth backend exists.
pub fn demo_user() -> responses::User {
    responses::User {
        id: payloads::UserId(Uuid::new_v4()),
        username: "demo".to_string(),
        email: "demo@voucher-console.local".to_string(),
        role: "admin".to_string(),
        created_at: ts("2025-01-06T00:00:00Z"),
    }
}

fn push_log(
    code: &str,
    action: LogAction,
    order_id: Option<&str>,
    note: Option<&str>,
) {
    let customer_name = VOUCHERS.with_borrow(|vouchers| {
        vouchers
            .iter()
            .find(|v| v.code == code)
            .and_then(|v| v.customer_id)
            .and_then(|id| {
                CUSTOMERS.with_borrow(|customers| {
                    customers
                        .iter()
                        .find(|c| c.id == id)
                        .map(|c| c.name.clone())
                })
            })
    });
    let log = responses::UsageLog {
        id: LogId(Uuid::new_v4()),
        voucher_code: code.to_string(),
        customer_name,
        order_id: order_id.map(str::to_string),
        action,
        note: note.map(str::to_string),
        created_at: now(),
    };
    LOGS.with_borrow_mut(|logs| logs.insert(0, log));
}

fn next_code(prefix: &str, count: usize) -> Vec<String> {
    let existing = VOUCHERS.with_borrow(|vouchers| vouchers.len());
    (0..count)
        .map(|i| format!("{prefix}{:05}", existing + i + 1))
        .collect()
}

// Seed data. Timestamps are fixed so the dataset reads the same on every
// reload.

fn ts(text: &str) -> Timestamp {
    text.parse().expect("seed timestamp")
}

fn dec(units: i64) -> Decimal {
    Decimal::new(units, 0)
}

fn seed_customers() -> Vec<responses::Customer> {
    let specs: [(&str, &str, Option<&str>, &[&str], Option<&str>); 6] = [
        (
            "Tran Minh Khoa",
            "0901234567",
            Some("khoa.tran@logimail.vn"),
            &["vip", "wholesale"],
            Some("zl-8821"),
        ),
        (
            "Le Thi Hanh",
            "0912345678",
            Some("hanh.le@logimail.vn"),
            &["retail"],
            Some("zl-4410"),
        ),
        ("Pham Quang Duy", "0923456789", None, &["wholesale"], None),
        (
            "Nguyen Thu Trang",
            "0934567890",
            Some("trang.nguyen@logimail.vn"),
            &["vip"],
            Some("zl-1102"),
        ),
        ("Hoang Van Nam", "0945678901", None, &["new"], None),
        ("Vu Thi Mai", "0956789012", None, &["retail", "new"], None),
    ];
    specs
        .iter()
        .enumerate()
        .map(|(i, (name, phone, email, tags, zalo))| responses::Customer {
            id: CustomerId(Uuid::new_v4()),
            name: name.to_string(),
            phone: phone.to_string(),
            email: email.map(str::to_string),
            address: Some(format!("{} Nguyen Trai, District {}", 12 + i, 1 + i)),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            status: if i == 4 {
                CustomerStatus::Inactive
            } else {
                CustomerStatus::Active
            },
            zalo_id: zalo.map(str::to_string),
            created_at: ts("2025-03-10T02:00:00Z"),
            updated_at: ts("2025-06-20T09:30:00Z"),
        })
        .collect()
}

fn seed_vouchers() -> Vec<responses::Voucher> {
    let customers = seed_customer_ids();
    let specs: [(&str, Option<usize>, &str, i64, VoucherStatus, Option<&str>);
        8] = [
        ("VC00001", Some(0), "summer-freight", 50_000, VoucherStatus::Used, Some("2025-06-02T04:10:00Z")),
        ("VC00002", Some(0), "summer-freight", 50_000, VoucherStatus::Active, None),
        ("VC00003", Some(1), "summer-freight", 50_000, VoucherStatus::Used, Some("2025-06-15T07:45:00Z")),
        ("VC00004", Some(2), "new-branch", 75_000, VoucherStatus::Active, None),
        ("VC00005", Some(3), "new-branch", 75_000, VoucherStatus::Expired, None),
        ("VC00006", None, "new-branch", 75_000, VoucherStatus::Active, None),
        ("VC00007", Some(3), "tet-2025", 100_000, VoucherStatus::Used, Some("2025-07-01T10:20:00Z")),
        ("VC00008", Some(5), "tet-2025", 100_000, VoucherStatus::Disabled, None),
    ];
    specs
        .iter()
        .map(|(code, customer, campaign, amount, status, used_at)| {
            responses::Voucher {
                id: VoucherId(Uuid::new_v4()),
                code: code.to_string(),
                customer_id: customer.map(|i| customers[i]),
                campaign: Some(campaign.to_string()),
                discount_amount: dec(*amount),
                status: *status,
                issued_at: ts("2025-05-01T01:00:00Z"),
                expires_at: Some(ts("2025-12-31T17:00:00Z")),
                used_at: used_at.map(ts),
                order_id: used_at.map(|_| format!("ORD-{code}")),
                qr_url: Some(qr_url_for(code)),
            }
        })
        .collect()
}

// Customer ids must line up between the two seeds; they are generated once
// per thread on first access, so vouchers read them through the seeded
// customer list.
fn seed_customer_ids() -> Vec<CustomerId> {
    CUSTOMERS.with_borrow(|customers| customers.iter().map(|c| c.id).collect())
}

fn seed_logs() -> Vec<responses::UsageLog> {
    vec![
        responses::UsageLog {
            id: LogId(Uuid::new_v4()),
            voucher_code: "VC00001".to_string(),
            customer_name: Some("Tran Minh Khoa".to_string()),
            order_id: Some("ORD-VC00001".to_string()),
            action: LogAction::Used,
            note: None,
            created_at: ts("2025-06-02T04:10:00Z"),
        },
        responses::UsageLog {
            id: LogId(Uuid::new_v4()),
            voucher_code: "VC00003".to_string(),
            customer_name: Some("Le Thi Hanh".to_string()),
            order_id: Some("ORD-VC00003".to_string()),
            action: LogAction::Used,
            note: None,
            created_at: ts("2025-06-15T07:45:00Z"),
        },
        responses::UsageLog {
            id: LogId(Uuid::new_v4()),
            voucher_code: "VC00008".to_string(),
            customer_name: Some("Vu Thi Mai".to_string()),
            order_id: None,
            action: LogAction::StatusChanged,
            note: Some("disabled".to_string()),
            created_at: ts("2025-07-03T03:00:00Z"),
        },
    ]
}

fn seed_orders() -> Vec<responses::Order> {
    let customers = seed_customer_ids();
    [
        ("ORD-VC00001", 0, 480_000, "delivered"),
        ("ORD-VC00003", 1, 1_250_000, "delivered"),
        ("ORD-1044", 3, 310_000, "pending"),
    ]
    .iter()
    .map(|(code, customer, amount, status)| responses::Order {
        id: OrderId(Uuid::new_v4()),
        code: code.to_string(),
        customer_id: customers[*customer],
        amount: dec(*amount),
        status: status.to_string(),
        created_at: ts("2025-06-01T08:00:00Z"),
    })
    .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn params(q: Option<&str>, status: Option<&str>) -> requests::ListParams {
        requests::ListParams {
            q: q.map(str::to_string),
            status: status.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn search_is_case_insensitive_across_fields() {
        let customers = seed_customers();
        let by_name =
            apply_list_params(&customers, &params(Some("TRAN"), None), &[
                "name", "phone", "email",
            ], "status");
        // "Tran Minh Khoa" and "Nguyen Thu Trang" both match on name.
        assert_eq!(by_name.total, 2);

        let by_phone =
            apply_list_params(&customers, &params(Some("0923"), None), &[
                "name", "phone", "email",
            ], "status");
        assert_eq!(by_phone.total, 1);
        assert_eq!(by_phone.data[0].name, "Pham Quang Duy");
    }

    #[test]
    fn status_filter_is_exact_equality() {
        let customers = seed_customers();
        let inactive =
            apply_list_params(&customers, &params(None, Some("inactive")), &[
                "name",
            ], "status");
        assert_eq!(inactive.total, 1);
        assert_eq!(inactive.data[0].name, "Hoang Van Nam");
    }

    #[test]
    fn filtering_is_idempotent() {
        let vouchers = seed_vouchers();
        let query = params(Some("summer"), Some("used"));
        let once = apply_list_params(
            &vouchers,
            &query,
            &["code", "campaign"],
            "status",
        );
        let twice = apply_list_params(
            &once.data,
            &query,
            &["code", "campaign"],
            "status",
        );
        assert_eq!(once.data, twice.data);
        assert_eq!(once.total, twice.total);
    }

    #[test]
    fn pagination_reports_filtered_total() {
        let vouchers = seed_vouchers();
        let query = requests::ListParams {
            page: Some(2),
            page_size: Some(3),
            ..Default::default()
        };
        let page = apply_list_params(
            &vouchers,
            &query,
            &["code", "campaign"],
            "status",
        );
        assert_eq!(page.data.len(), 3);
        assert_eq!(page.total, 8);

        let past_end = requests::ListParams {
            page: Some(9),
            page_size: Some(3),
            ..Default::default()
        };
        let empty = apply_list_params(
            &vouchers,
            &past_end,
            &["code", "campaign"],
            "status",
        );
        assert!(empty.data.is_empty());
        assert_eq!(empty.total, 8);
    }

    #[test]
    fn sort_is_lexicographic_with_direction() {
        let vouchers = seed_vouchers();
        let asc = requests::ListParams {
            sort_by: Some("code".to_string()),
            sort_dir: Some(SortDir::Asc),
            ..Default::default()
        };
        let sorted = apply_list_params(
            &vouchers,
            &asc,
            &["code", "campaign"],
            "status",
        );
        assert_eq!(sorted.data.first().map(|v| v.code.as_str()), Some("VC00001"));

        let desc = requests::ListParams {
            sort_dir: Some(SortDir::Desc),
            ..asc
        };
        let sorted = apply_list_params(
            &vouchers,
            &desc,
            &["code", "campaign"],
            "status",
        );
        assert_eq!(sorted.data.first().map(|v| v.code.as_str()), Some("VC00008"));
    }
}
