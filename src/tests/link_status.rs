use axum::http::StatusCode;
use uuid::Uuid;

use crate::tests::helper;

#[tokio::test]
async fn test_link_status() {
    let mut app = helper::setup_test_app();

    let template = helper::create_template(&mut app, "Demo", "https://x.test/r?token=").await;

    let first = helper::issue_link(&mut app, &template.id).await.link;
    let second = helper::issue_link(&mut app, &template.id).await.link;

    // mark as used
    let (status_code, link, _) = helper::maybe_update_link_status(&mut app, &first.id, "used").await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("used", link.unwrap().status);

    let stats = helper::stats(&mut app).await;
    assert_eq!(
        helper::Stats {
            total: 2,
            new: 1,
            used: 1
        },
        stats
    );
    assert_eq!(stats.total, stats.new + stats.used);

    // filter by status
    let (_, used) = helper::list_links(&mut app, Some("used")).await;
    let used = used.unwrap();
    assert_eq!(1, used.len());
    assert_eq!(first.id, used[0].id);

    let (_, new) = helper::list_links(&mut app, Some("new")).await;
    let new = new.unwrap();
    assert_eq!(1, new.len());
    assert_eq!(second.id, new[0].id);

    // `active` is the same as `new`
    let (status_code, link, _) =
        helper::maybe_update_link_status(&mut app, &first.id, "active").await;
    assert_eq!(StatusCode::OK, status_code);
    assert_eq!("new", link.unwrap().status);

    let stats = helper::stats(&mut app).await;
    assert_eq!(2, stats.new);
}

#[tokio::test]
async fn test_link_status_invalid() {
    let mut app = helper::setup_test_app();

    let template = helper::create_template(&mut app, "Demo", "https://x.test/r?token=").await;
    let link = helper::issue_link(&mut app, &template.id).await.link;

    let (status_code, _, error) =
        helper::maybe_update_link_status(&mut app, &link.id, "expired").await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert_eq!("Data error", error.unwrap().error);

    let (status_code, _, error) =
        helper::maybe_update_link_status(&mut app, &Uuid::new_v4(), "used").await;
    assert_eq!(StatusCode::NOT_FOUND, status_code);
    assert_eq!("Link not found", error.unwrap().error);

    let (status_code, links) = helper::list_links(&mut app, Some("expired")).await;
    assert_eq!(StatusCode::BAD_REQUEST, status_code);
    assert!(links.is_none());
}
