use payloads::ClientError;
use payloads::requests::{CreateCustomer, ListParams, LoginCredentials};
use reqwest::StatusCode;
use test_helpers::{TEST_PASSWORD, TEST_TOKEN, TEST_USERNAME, spawn_app};

#[tokio::test]
async fn missing_token_is_a_normalized_401() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let anonymous = app.anonymous_client();

    let error = anonymous
        .list_customers(&ListParams::default())
        .await
        .expect_err("anonymous requests must be rejected");

    assert!(error.is_unauthorized());
    assert_eq!(error.status(), Some(StatusCode::UNAUTHORIZED));
    // The FastAPI-style `detail` string becomes the message.
    assert_eq!(error.to_string(), "Not authenticated");
    Ok(())
}

#[tokio::test]
async fn validation_detail_array_is_joined() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let error = app
        .client
        .create_customer(&CreateCustomer {
            name: String::new(),
            phone: "0900000000".to_string(),
            email: None,
            address: None,
            tags: Vec::new(),
            zalo_id: None,
        })
        .await
        .expect_err("empty name must fail validation");

    assert_eq!(error.status(), Some(StatusCode::UNPROCESSABLE_ENTITY));
    assert_eq!(error.to_string(), "field required");

    // Validation errors are not retryable; the raw body stays available.
    assert!(!error.is_retryable_read());
    match &error {
        ClientError::Api { data, .. } => assert!(data.is_some()),
        other => panic!("expected Api error, got {other:?}"),
    }
    Ok(())
}

#[tokio::test]
async fn message_field_is_used_when_detail_is_absent() -> anyhow::Result<()> {
    let app = spawn_app().await;

    let missing = payloads::OrderId(uuid::Uuid::new_v4());
    let error = app
        .client
        .get_order(&missing)
        .await
        .expect_err("unknown order");

    assert_eq!(error.status(), Some(StatusCode::NOT_FOUND));
    assert_eq!(error.to_string(), "Order not found");
    Ok(())
}

#[tokio::test]
async fn login_issues_a_usable_token() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let anonymous = app.anonymous_client();

    let token = anonymous
        .login(&LoginCredentials {
            username: TEST_USERNAME.to_string(),
            password: TEST_PASSWORD.to_string(),
        })
        .await?;
    assert_eq!(token.access_token, TEST_TOKEN);

    let authed = anonymous.with_token(token.access_token);
    let me = authed.current_user().await?;
    assert_eq!(me.username, TEST_USERNAME);
    Ok(())
}

#[tokio::test]
async fn bad_credentials_are_rejected_with_detail() -> anyhow::Result<()> {
    let app = spawn_app().await;
    let anonymous = app.anonymous_client();

    let error = anonymous
        .login(&LoginCredentials {
            username: TEST_USERNAME.to_string(),
            password: "wrong".to_string(),
        })
        .await
        .expect_err("wrong password");

    assert!(error.is_unauthorized());
    assert_eq!(error.to_string(), "Invalid username or password");
    Ok(())
}
