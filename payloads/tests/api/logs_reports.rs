use payloads::LogAction;
use payloads::requests::{CreateLog, ListParams};
use test_helpers::spawn_app;

#[tokio::test]
async fn redeeming_writes_a_usage_log() -> anyhow::Result<()> {
    let app = spawn_app().await;

    app.client.use_voucher("VC00003", "ORD-3001").await?;

    let logs = app.client.list_logs(&ListParams::default()).await?;
    assert_eq!(logs.total, 1);
    assert_eq!(logs.data[0].voucher_code, "VC00003");
    assert_eq!(logs.data[0].action, LogAction::Used);
    assert_eq!(logs.data[0].order_id.as_deref(), Some("ORD-3001"));

    let hits = app.client.search_logs("vc00003").await?;
    assert_eq!(hits.len(), 1);
    Ok(())
}

#[tokio::test]
async fn manual_log_entries_can_be_created() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let log = app
        .client
        .create_log(&CreateLog {
            voucher_code: "VC00001".to_string(),
            order_id: None,
            action: LogAction::Exported,
            note: Some("monthly report".to_string()),
        })
        .await?;

    assert_eq!(log.action, LogAction::Exported);
    assert_eq!(log.note.as_deref(), Some("monthly report"));
    Ok(())
}

#[tokio::test]
async fn summary_report_aggregates_the_dataset() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let summary = app.client.summary_report().await?;

    assert_eq!(summary.total_customers, 3);
    assert_eq!(summary.total_vouchers, 4);
    assert_eq!(summary.used_vouchers, 1);
    assert!((summary.usage_rate - 0.25).abs() < f64::EPSILON);
    Ok(())
}

#[tokio::test]
async fn top_customers_are_ranked_by_voucher_count() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let top = app.client.top_customers_report().await?;

    assert_eq!(top[0].name, "Tran Minh Khoa");
    assert_eq!(top[0].voucher_count, 2);
    assert!(top.windows(2).all(|w| w[0].voucher_count >= w[1].voucher_count));
    Ok(())
}

#[tokio::test]
async fn revenue_groups_used_vouchers_by_month() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let revenue = app.client.revenue_report().await?;

    // One seeded voucher is used, in the seed month.
    assert_eq!(revenue.len(), 1);
    assert_eq!(revenue[0].month, "2025-06");
    Ok(())
}

#[tokio::test]
async fn zalo_stats_are_exposed() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let stats = app.client.zalo_stats_report().await?;

    assert_eq!(stats.sent, 3);
    assert_eq!(stats.read, 1);
    Ok(())
}
