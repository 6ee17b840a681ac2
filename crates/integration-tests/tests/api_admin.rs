//! Admin-only surface: the admin gallery, image deletion, and the
//! breadth of the admin grant on the board.

use axum::http::StatusCode;
use integration_tests::*;
use serde_json::json;

#[tokio::test]
async fn admin_holds_every_board_grant() {
    let app = TestApp::spawn().await;
    let cookie = app.login(ADMIN_CODE).await;

    let posted = app
        .post_json("/api/messages", Some(&cookie), json!({ "text": "from admin" }))
        .await;
    assert_eq!(posted.status(), StatusCode::NO_CONTENT);

    let listed = body_json(app.get("/api/messages", Some(&cookie)).await).await;
    let id = listed[0]["id"].as_str().expect("id").to_string();

    let deleted = app
        .post_json("/api/messages/delete", Some(&cookie), json!({ "id": id }))
        .await;
    assert_eq!(deleted.status(), StatusCode::NO_CONTENT);

    let cleared = app
        .post_json("/api/messages/clear", Some(&cookie), json!({}))
        .await;
    assert_eq!(cleared.status(), StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn the_admin_gallery_is_admin_only() {
    let app = TestApp::spawn().await;
    let admin_cookie = app.login(ADMIN_CODE).await;
    assert_eq!(
        app.get("/admin", Some(&admin_cookie)).await.status(),
        StatusCode::OK
    );

    for code in [USER_CODE, GUEST_CODE, CHAT_CODE, MOD_CODE] {
        let cookie = app.login(code).await;
        let denied = app.get("/admin", Some(&cookie)).await;
        assert_eq!(denied.status(), StatusCode::SEE_OTHER, "{code}");
        assert_eq!(location(&denied), "/", "{code}");
    }
}

#[tokio::test]
async fn admin_does_not_hold_the_user_upload_grant() {
    // The grant table is exclusive, not hierarchical: the upload
    // gallery belongs to User alone.
    let app = TestApp::spawn().await;
    let cookie = app.login(ADMIN_CODE).await;

    let page = app.get("/gallery", Some(&cookie)).await;
    assert_eq!(page.status(), StatusCode::SEE_OTHER);

    let upload = app.upload(&cookie, &[("pic.png", b"bytes")]).await;
    assert_eq!(upload.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&upload), "/");
}

#[tokio::test]
async fn admin_deletes_an_uploaded_image() {
    let app = TestApp::spawn().await;
    let user_cookie = app.login(USER_CODE).await;
    app.upload(&user_cookie, &[("doomed.png", b"pixels")]).await;

    let admin_cookie = app.login(ADMIN_CODE).await;
    assert_eq!(
        app.get("/images/doomed.png", Some(&admin_cookie))
            .await
            .status(),
        StatusCode::OK
    );

    let response = app
        .post_form("/delete_image", Some(&admin_cookie), "filename=doomed.png")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin?msg=Image%20deleted");

    assert_eq!(
        app.get("/images/doomed.png", Some(&admin_cookie))
            .await
            .status(),
        StatusCode::NOT_FOUND
    );
}

#[tokio::test]
async fn deleting_a_missing_image_flashes_not_found() {
    let app = TestApp::spawn().await;
    let cookie = app.login(ADMIN_CODE).await;
    let response = app
        .post_form("/delete_image", Some(&cookie), "filename=ghost.png")
        .await;
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&response), "/admin?msg=Image%20not%20found");
}

#[tokio::test]
async fn only_admin_may_delete_images() {
    let app = TestApp::spawn().await;
    let user_cookie = app.login(USER_CODE).await;
    app.upload(&user_cookie, &[("keep.png", b"pixels")]).await;

    for code in [USER_CODE, GUEST_CODE, CHAT_CODE, MOD_CODE] {
        let cookie = app.login(code).await;
        let denied = app
            .post_form("/delete_image", Some(&cookie), "filename=keep.png")
            .await;
        assert_eq!(denied.status(), StatusCode::SEE_OTHER, "{code}");
        assert_eq!(location(&denied), "/", "{code}");
    }

    // The image survived every denied attempt.
    assert_eq!(
        app.get("/images/keep.png", Some(&user_cookie)).await.status(),
        StatusCode::OK
    );
}
