use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_check_token() {
    let mut app = helper::setup_test_app();

    let template = helper::create_template(&mut app, "Demo", "https://x.test/r?token=").await;
    let link = helper::issue_link(&mut app, &template.id).await.link;

    // fresh link
    let (status_code, body) = helper::check_token(&mut app, &format!("?token={}", link.token)).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(true), body["data"]["valid"].as_bool());
    assert_eq!(Some(link.token.as_str()), body["data"]["token"].as_str());

    // unknown token
    let (status_code, body) = helper::check_token(&mut app, "?token=unknown").await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(false), body["data"]["valid"].as_bool());

    // used link
    let (status_code, _, _) = helper::maybe_update_link_status(&mut app, &link.id, "used").await;
    assert_eq!(StatusCode::OK, status_code);

    let (status_code, body) = helper::check_token(&mut app, &format!("?token={}", link.token)).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(false), body["data"]["valid"].as_bool());
}

#[tokio::test]
async fn test_check_token_missing() {
    let mut app = helper::setup_test_app();

    let (status_code, body) = helper::check_token(&mut app, "").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!(Some("`token` is required"), body["error"].as_str());

    let (status_code, _) = helper::check_token(&mut app, "?token=").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
}

#[tokio::test]
async fn test_check_token_by_link() {
    let mut app = helper::setup_test_app();

    let template = helper::create_template(&mut app, "Demo", "https://x.test/r?token=").await;
    let link = helper::issue_link(&mut app, &template.id).await.link;

    let query = format!(
        "?link=https%3A%2F%2Fx.test%2Fr%3Ftoken%3D{}",
        link.token
    );
    let (status_code, body) = helper::check_token(&mut app, &query).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(true), body["data"]["valid"].as_bool());
    assert_eq!(Some(link.token.as_str()), body["data"]["token"].as_str());

    // link without a token
    let (status_code, _) = helper::check_token(&mut app, "?link=https%3A%2F%2Fx.test%2Fr").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
}

#[tokio::test]
async fn test_check_token_empty_token_with_link() {
    let mut app = helper::setup_test_app();

    let template = helper::create_template(&mut app, "Demo", "https://x.test/r?token=").await;
    let link = helper::issue_link(&mut app, &template.id).await.link;

    let query = format!(
        "?token=&link=https%3A%2F%2Fx.test%2Fr%3Ftoken%3D{}",
        link.token
    );
    let (status_code, body) = helper::check_token(&mut app, &query).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(Some(true), body["data"]["valid"].as_bool());
    assert_eq!(Some(link.token.as_str()), body["data"]["token"].as_str());
}
