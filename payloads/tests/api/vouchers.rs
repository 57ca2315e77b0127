use payloads::api_client::PrintQrOutcome;
use payloads::requests::{BulkCreateVouchers, ListParams, PrintQr};
use payloads::{VoucherStatus, requests::CreateVoucher};
use rust_decimal::Decimal;
use test_helpers::spawn_app;

#[tokio::test]
async fn list_vouchers_filters_by_search_and_status() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let summer = app
        .client
        .list_vouchers(&ListParams::search("summer"))
        .await?;
    assert_eq!(summer.total, 2);

    let used = app
        .client
        .list_vouchers(&ListParams {
            status: Some("used".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(used.total, 1);
    assert_eq!(used.data[0].code, "VC00002");
    Ok(())
}

#[tokio::test]
async fn create_voucher_with_explicit_code() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let voucher = app
        .client
        .create_voucher(&CreateVoucher {
            code: Some("PROMO99".to_string()),
            customer_id: None,
            campaign: Some("spring".to_string()),
            discount_amount: Decimal::new(25_000, 0),
            expires_at: None,
        })
        .await?;

    assert_eq!(voucher.code, "PROMO99");
    assert_eq!(voucher.status, VoucherStatus::Active);

    let fetched = app.client.get_voucher("PROMO99").await?;
    assert_eq!(fetched.id, voucher.id);
    Ok(())
}

#[tokio::test]
async fn bulk_create_assigns_prefixed_codes() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let created = app
        .client
        .bulk_create_vouchers(&BulkCreateVouchers {
            quantity: 5,
            prefix: Some("TET".to_string()),
            campaign: Some("tet-2026".to_string()),
            discount_amount: Decimal::new(80_000, 0),
            customer_ids: Vec::new(),
            expires_at: None,
        })
        .await?;

    assert_eq!(created.len(), 5);
    assert!(created.iter().all(|v| v.code.starts_with("TET")));

    let all = app.client.list_vouchers(&ListParams::default()).await?;
    assert_eq!(all.total, 9);
    Ok(())
}

#[tokio::test]
async fn export_is_utf8_csv_with_bom_and_filename() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let file = app.client.export_vouchers(&ListParams::default()).await?;

    assert_eq!(file.filename, "vouchers.csv");
    assert!(file.content_type.starts_with("text/csv"));
    assert_eq!(&file.bytes[..3], &[0xEF, 0xBB, 0xBF]);
    let text = std::str::from_utf8(&file.bytes[3..])?;
    assert!(text.starts_with("code,campaign,discount_amount,status"));
    assert!(text.contains("VC00001"));
    Ok(())
}

#[tokio::test]
async fn print_qr_detects_json_delivered_as_binary() -> anyhow::Result<()> {
    let app = spawn_app().await;

    // Default stub behavior: JSON payload under application/pdf.
    let outcome = app
        .client
        .print_voucher_qr(&PrintQr {
            codes: vec!["VC00001".to_string(), "VC00003".to_string()],
        })
        .await?;

    match outcome {
        PrintQrOutcome::Payload(entries) => {
            assert_eq!(entries.len(), 2);
            assert!(entries.iter().any(|e| e.code == "VC00001"));
            assert!(entries.iter().all(|e| !e.qr_url.is_empty()));
        }
        PrintQrOutcome::Pdf(_) => panic!("expected the JSON payload path"),
    }
    Ok(())
}

#[tokio::test]
async fn print_qr_passes_real_pdfs_through() -> anyhow::Result<()> {
    let app = spawn_app().await;
    app.db.set_qr_returns_pdf(true);

    let outcome = app
        .client
        .print_voucher_qr(&PrintQr {
            codes: vec!["VC00001".to_string()],
        })
        .await?;

    match outcome {
        PrintQrOutcome::Pdf(file) => {
            assert_eq!(file.filename, "qr_codes.pdf");
            assert!(file.bytes.starts_with(b"%PDF"));
        }
        PrintQrOutcome::Payload(_) => panic!("expected a PDF download"),
    }
    Ok(())
}

#[tokio::test]
async fn redeeming_marks_the_voucher_used() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let used = app.client.use_voucher("VC00001", "ORD-2001").await?;
    assert_eq!(used.status, VoucherStatus::Used);
    assert_eq!(used.order_id.as_deref(), Some("ORD-2001"));
    assert!(used.used_at.is_some());

    // A second redemption must be rejected.
    let again = app.client.use_voucher("VC00001", "ORD-2002").await;
    let error = again.expect_err("double redemption should fail");
    assert_eq!(error.to_string(), "Voucher is not active");
    Ok(())
}

#[tokio::test]
async fn status_patch_reactivates_a_disabled_voucher() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let voucher = app
        .client
        .update_voucher_status("VC00004", VoucherStatus::Active)
        .await?;

    assert_eq!(voucher.status, VoucherStatus::Active);
    Ok(())
}
