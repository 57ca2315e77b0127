use payloads::requests::{
    CreateCustomer, ListParams, UpdateCustomer,
};
use test_helpers::spawn_app;

#[tokio::test]
async fn list_customers_unwraps_the_envelope() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let page = app.client.list_customers(&ListParams::default()).await?;

    assert_eq!(page.total, 3);
    assert_eq!(page.data.len(), 3);
    Ok(())
}

#[tokio::test]
async fn list_customers_paginates_with_filtered_total() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let page = app.client.list_customers(&ListParams::page(1, 2)).await?;
    assert_eq!(page.data.len(), 2);
    assert_eq!(page.total, 3);

    let rest = app.client.list_customers(&ListParams::page(2, 2)).await?;
    assert_eq!(rest.data.len(), 1);
    assert_eq!(rest.total, 3);
    Ok(())
}

#[tokio::test]
async fn search_matches_name_case_insensitively() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let page = app
        .client
        .list_customers(&ListParams::search("KHOA"))
        .await?;

    assert_eq!(page.total, 1);
    assert_eq!(page.data[0].name, "Tran Minh Khoa");
    Ok(())
}

#[tokio::test]
async fn create_get_update_round_trip() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let created = app
        .client
        .create_customer(&CreateCustomer {
            name: "Dang Hoai Bac".to_string(),
            phone: "0987654321".to_string(),
            email: Some("bac.dang@logimail.vn".to_string()),
            address: None,
            tags: vec!["new".to_string()],
            zalo_id: None,
        })
        .await?;

    let fetched = app.client.get_customer(&created.id).await?;
    assert_eq!(fetched.name, "Dang Hoai Bac");
    assert_eq!(fetched.tags, vec!["new".to_string()]);

    let updated = app
        .client
        .update_customer(
            &created.id,
            &UpdateCustomer {
                phone: Some("0111222333".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.phone, "0111222333");
    assert_eq!(updated.name, "Dang Hoai Bac");
    Ok(())
}

#[tokio::test]
async fn search_endpoint_returns_a_bare_array() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let hits = app.client.search_customers("tran").await?;

    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0].name, "Tran Minh Khoa");
    Ok(())
}

#[tokio::test]
async fn customer_vouchers_decode_from_a_bare_array() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let customers =
        app.client.list_customers(&ListParams::default()).await?;
    let khoa = customers
        .data
        .iter()
        .find(|c| c.name == "Tran Minh Khoa")
        .expect("seeded customer");

    // The endpoint responds with a plain JSON array; the client reports
    // it as a page whose total is the array length.
    let vouchers = app.client.customer_vouchers(&khoa.id).await?;
    assert_eq!(vouchers.total, 2);
    assert_eq!(vouchers.data.len(), 2);
    Ok(())
}

#[tokio::test]
async fn customer_stats_aggregate_vouchers() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let customers =
        app.client.list_customers(&ListParams::default()).await?;
    let khoa = customers
        .data
        .iter()
        .find(|c| c.name == "Tran Minh Khoa")
        .expect("seeded customer");

    let stats = app.client.customer_stats(&khoa.id).await?;
    assert_eq!(stats.total_vouchers, 2);
    assert_eq!(stats.active_vouchers, 1);
    assert_eq!(stats.used_vouchers, 1);
    Ok(())
}
