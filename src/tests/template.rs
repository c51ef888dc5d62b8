use axum::http::StatusCode;

use crate::tests::helper;

#[tokio::test]
async fn test_template() {
    let mut app = helper::setup_test_app();

    // nothing yet
    let (status_code, templates) = helper::list_templates(&mut app).await;
    assert_eq!(StatusCode::OK, status_code);
    assert!(templates.unwrap().is_empty());

    // create template
    let (status_code, template, error) =
        helper::maybe_create_template(&mut app, "Demo", "https://x.test/r?token=").await;
    assert_eq!(StatusCode::CREATED, status_code);
    assert!(error.is_none());
    let template = template.unwrap();
    assert_eq!("Demo", template.name);
    assert_eq!("https://x.test/r?token=", template.base_url);
    assert!(!template.has_script);
    assert_eq!(16, template.created_at.len()); // YYYY-MM-DD HH:MM

    // fetch it again
    let (status_code, single) = helper::single_template(&mut app, &template.id.to_string()).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(template.id, single.unwrap().id);

    // newest first
    let other = helper::create_template(&mut app, "Other", "https://y.test/r?token=").await;
    assert_ne!(template.id, other.id);

    let (_, templates) = helper::list_templates(&mut app).await;
    let ids = templates
        .unwrap()
        .iter()
        .map(|template| template.id)
        .collect::<Vec<_>>();
    assert_eq!(vec![other.id, template.id], ids);
}

#[tokio::test]
async fn test_template_required_fields() {
    let mut app = helper::setup_test_app();

    let (status_code, template, error) =
        helper::maybe_create_template(&mut app, "", "https://x.test/r?token=").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(template.is_none());
    assert_eq!("`name` is required", error.unwrap().error);

    let (status_code, template, error) = helper::maybe_create_template(&mut app, "Demo", "").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(template.is_none());
    assert_eq!("`baseUrl` is required", error.unwrap().error);

    // whitespace only counts as empty
    let (status_code, _, _) = helper::maybe_create_template(&mut app, "   ", "   ").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);

    // nothing was stored
    let (_, templates) = helper::list_templates(&mut app).await;
    assert!(templates.unwrap().is_empty());
}

#[tokio::test]
async fn test_template_keeps_input() {
    let mut app = helper::setup_test_app();

    let name = " Cafe\u{0301} ";
    let base_url = "https://x.test/r?token= ";

    let template = helper::create_template(&mut app, name, base_url).await;
    assert_eq!(name, template.name);
    assert_eq!(base_url, template.base_url);

    let (status_code, single) = helper::single_template(&mut app, &template.id.to_string()).await;
    assert_eq!(StatusCode::OK, status_code);

    let single = single.unwrap();
    assert_eq!(name, single.name);
    assert_eq!(base_url, single.base_url);
}

#[tokio::test]
async fn test_template_not_found() {
    let mut app = helper::setup_test_app();

    let (status_code, template) =
        helper::single_template(&mut app, &uuid::Uuid::new_v4().to_string()).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert!(template.is_none());

    let (status_code, template) = helper::single_template(&mut app, "not-a-uuid").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(template.is_none());
}
