//! The generic /orders, /users, /projects CRUD surfaces.

use payloads::requests::{
    CreateOrder, CreateProject, CreateUser, ListParams, UpdateOrder,
    UpdateProject, UpdateUser,
};
use rust_decimal::Decimal;
use test_helpers::spawn_app;

#[tokio::test]
async fn orders_crud_round_trip() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let customers =
        app.client.list_customers(&ListParams::default()).await?;
    let customer_id = customers.data[0].id;

    let order = app
        .client
        .create_order(&CreateOrder {
            code: "ORD-9000".to_string(),
            customer_id,
            amount: Decimal::new(150_000, 0),
        })
        .await?;
    assert_eq!(order.status, "pending");

    let updated = app
        .client
        .update_order(
            &order.id,
            &UpdateOrder {
                status: Some("delivered".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.status, "delivered");

    app.client.delete_order(&order.id).await?;
    let error = app.client.get_order(&order.id).await.expect_err("deleted");
    assert_eq!(error.to_string(), "Order not found");

    let remaining = app.client.list_orders(&ListParams::default()).await?;
    assert_eq!(remaining.total, 1);
    Ok(())
}

#[tokio::test]
async fn users_crud_round_trip() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let user = app
        .client
        .create_user(&CreateUser {
            username: "staff1".to_string(),
            email: "staff1@voucher-console.local".to_string(),
            password: "changeme".to_string(),
            role: "staff".to_string(),
        })
        .await?;

    let updated = app
        .client
        .update_user(
            &user.id,
            &UpdateUser {
                role: Some("manager".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.role, "manager");

    let fetched = app.client.get_user(&user.id).await?;
    assert_eq!(fetched.username, "staff1");

    app.client.delete_user(&user.id).await?;
    let users = app.client.list_users(&ListParams::default()).await?;
    assert!(users.data.iter().all(|u| u.id != user.id));
    Ok(())
}

#[tokio::test]
async fn projects_crud_round_trip() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let project = app
        .client
        .create_project(&CreateProject {
            name: "Q3 retention push".to_string(),
            description: None,
        })
        .await?;
    assert_eq!(project.status, "active");

    let updated = app
        .client
        .update_project(
            &project.id,
            &UpdateProject {
                status: Some("archived".to_string()),
                ..Default::default()
            },
        )
        .await?;
    assert_eq!(updated.status, "archived");

    let fetched = app.client.get_project(&project.id).await?;
    assert_eq!(fetched.name, "Q3 retention push");

    app.client.delete_project(&project.id).await?;
    let projects = app.client.list_projects(&ListParams::default()).await?;
    assert_eq!(projects.total, 0);
    Ok(())
}
