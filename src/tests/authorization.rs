use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_authorization() {
    let mut app = helper::setup_test_app();

    // no token
    let (status_code, template, error) = helper::maybe_create_template_with_authorization(
        &mut app,
        None,
        "Demo",
        "https://x.test/r?token=",
    )
    .await;
    assert_eq!(StatusCode::FORBIDDEN, status_code);
    assert!(template.is_none());
    assert_eq!("Missing API token", error.unwrap().error);

    // wrong token
    let (status_code, _, error) = helper::maybe_create_template_with_authorization(
        &mut app,
        Some("Bearer notsosecret"),
        "Demo",
        "https://x.test/r?token=",
    )
    .await;
    assert_eq!(StatusCode::FORBIDDEN, status_code);
    assert_eq!("Invalid API token", error.unwrap().error);

    // nothing was created
    let (_, templates) = helper::list_templates(&mut app).await;
    assert!(templates.unwrap().is_empty());
}
