use axum::http::StatusCode;
use uuid::Uuid;

use crate::tests::helper;
use crate::token::is_token_shaped;

#[tokio::test]
async fn test_link_issue() {
    let mut app = helper::setup_test_app();

    let template = helper::create_template(&mut app, "Demo", "https://x.test/r?token=").await;

    let issued = helper::issue_link(&mut app, &template.id).await;
    assert_eq!("skipped", issued.sync_status);

    let link = issued.link;
    assert_eq!(template.id, link.template_id);
    assert_eq!("Demo", link.template_name);
    assert_eq!("new", link.status);
    assert_eq!(16, link.created_at.len());

    let suffix = link.full_url.strip_prefix("https://x.test/r?token=").unwrap();
    assert_eq!(36, suffix.len());
    assert_eq!(suffix, link.token);
    assert!(is_token_shaped(suffix), "unexpected token: {suffix}");

    let (status_code, single) = helper::single_link(&mut app, &link.id).await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!(link.full_url, single.unwrap().full_url);
}

#[tokio::test]
async fn test_link_issue_many() {
    let mut app = helper::setup_test_app();

    let template = helper::create_template(&mut app, "Demo", "https://x.test/r?token=").await;

    let mut issued_ids = Vec::new();
    for _ in 0..5 {
        issued_ids.push(helper::issue_link(&mut app, &template.id).await.link.id);
    }

    let (status_code, links) = helper::list_links(&mut app, None).await;
    assert_eq!(StatusCode::OK, status_code);
    let links = links.unwrap();
    assert_eq!(5, links.len());
    assert!(links.iter().all(|link| link.status == "new"));

    // most recent first
    issued_ids.reverse();
    let ids = links.iter().map(|link| link.id).collect::<Vec<_>>();
    assert_eq!(issued_ids, ids);

    let stats = helper::stats(&mut app).await;
    assert_eq!(
        helper::Stats {
            total: 5,
            new: 5,
            used: 0
        },
        stats
    );
}

#[tokio::test]
async fn test_link_issue_distinct() {
    let mut app = helper::setup_test_app();

    let template = helper::create_template(&mut app, "Demo", "https://x.test/r?token=").await;

    let first = helper::issue_link(&mut app, &template.id).await.link;
    let second = helper::issue_link(&mut app, &template.id).await.link;

    assert_ne!(first.id, second.id);
    assert_ne!(first.token, second.token);
    assert_ne!(first.full_url, second.full_url);
}

#[tokio::test]
async fn test_link_issue_unknown_template() {
    let mut app = helper::setup_test_app();

    let (status_code, issued) = helper::maybe_issue_link(&mut app, &Uuid::new_v4()).await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert!(issued.is_none());

    let stats = helper::stats(&mut app).await;
    assert_eq!(0, stats.total);
}
