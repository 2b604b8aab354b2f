use serde_json::json;

use crate::common::{TestApp, routes};

mod access {
    use super::*;

    #[tokio::test]
    async fn members_can_list_and_view_users() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let bob = app.create_authenticated_user("bob").await;
        let bob_id = app.user_id(&bob).await;

        let list = app.get_with_token(routes::USERS, &alice).await;
        assert_eq!(list.status, 200);
        assert_eq!(list.body.as_array().map(Vec::len), Some(2));

        let one = app.get_with_token(&routes::user(bob_id), &alice).await;
        assert_eq!(one.status, 200);
        assert_eq!(one.body["username"], "bob");
    }

    #[tokio::test]
    async fn only_admins_create_users_directly() {
        let app = TestApp::spawn().await;
        let member = app.create_authenticated_user("alice").await;
        let admin = app.create_admin("root").await;

        let denied = app
            .post_with_token(routes::USERS, &TestApp::registration_body("carol"), &member)
            .await;
        assert_eq!(denied.status, 403);
        assert_eq!(denied.body["code"], "PERMISSION_DENIED");

        let mut body = TestApp::registration_body("carol");
        body["role"] = json!("ADMIN");
        let created = app.post_with_token(routes::USERS, &body, &admin).await;
        assert_eq!(created.status, 201, "{}", created.text);
        assert_eq!(created.body["role"], "ADMIN");
    }

    #[tokio::test]
    async fn list_can_be_filtered_by_role() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        app.create_authenticated_user("alice").await;

        let res = app
            .get_with_token(&format!("{}?role=ADMIN", routes::USERS), &admin)
            .await;

        assert_eq!(res.status, 200);
        let users = res.body.as_array().unwrap();
        assert_eq!(users.len(), 1);
        assert_eq!(users[0]["username"], "root");
    }

    #[tokio::test]
    async fn unknown_role_filter_is_a_validation_error() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;

        let res = app
            .get_with_token(&format!("{}?role=OWNER", routes::USERS), &token)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod update {
    use super::*;

    #[tokio::test]
    async fn members_can_edit_their_own_profile() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;
        let id = app.user_id(&token).await;

        let res = app
            .patch_with_token(
                &routes::user(id),
                &json!({"first_name": "Alice", "instagram": "@alice"}),
                &token,
            )
            .await;

        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["first_name"], "Alice");
        assert_eq!(res.body["instagram"], "@alice");
        assert_eq!(res.body["username"], "alice");

        let cleared = app
            .patch_with_token(&routes::user(id), &json!({"instagram": null}), &token)
            .await;
        assert_eq!(cleared.status, 200);
        assert!(cleared.body["instagram"].is_null());
    }

    #[tokio::test]
    async fn members_cannot_edit_others() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let bob = app.create_authenticated_user("bob").await;
        let bob_id = app.user_id(&bob).await;

        let res = app
            .patch_with_token(&routes::user(bob_id), &json!({"first_name": "Mallory"}), &alice)
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn members_cannot_promote_themselves() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;
        let id = app.user_id(&token).await;

        let res = app
            .patch_with_token(&routes::user(id), &json!({"role": "ADMIN"}), &token)
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn admins_can_change_roles() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let member = app.create_authenticated_user("alice").await;
        let id = app.user_id(&member).await;

        let res = app
            .patch_with_token(&routes::user(id), &json!({"role": "ADMIN"}), &admin)
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["role"], "ADMIN");

        // The new role applies to the existing token immediately.
        let promoted = app
            .post_with_token(routes::USERS, &TestApp::registration_body("carol"), &member)
            .await;
        assert_eq!(promoted.status, 201, "{}", promoted.text);
    }

    #[tokio::test]
    async fn renaming_to_a_taken_username_is_rejected() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        app.create_authenticated_user("bob").await;
        let id = app.user_id(&alice).await;

        let res = app
            .patch_with_token(&routes::user(id), &json!({"username": "bob"}), &alice)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "username");
    }

    #[tokio::test]
    async fn updating_a_missing_user_is_not_found() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;

        let res = app
            .patch_with_token(&routes::user(9999), &json!({"first_name": "X"}), &admin)
            .await;

        assert_eq!(res.status, 404);
        assert_eq!(res.body["code"], "NOT_FOUND");
    }
}

mod delete {
    use super::*;

    #[tokio::test]
    async fn deleting_an_account_revokes_its_token() {
        let app = TestApp::spawn().await;
        let token = app.create_authenticated_user("alice").await;
        let id = app.user_id(&token).await;

        let res = app.delete_with_token(&routes::user(id), &token).await;
        assert_eq!(res.status, 204);

        let me = app.get_with_token(routes::ME, &token).await;
        assert_eq!(me.status, 401);
        assert_eq!(me.body["code"], "TOKEN_INVALID");
    }

    #[tokio::test]
    async fn second_delete_is_not_found() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let member = app.create_authenticated_user("alice").await;
        let id = app.user_id(&member).await;

        let first = app.delete_with_token(&routes::user(id), &admin).await;
        assert_eq!(first.status, 204);

        let second = app.delete_with_token(&routes::user(id), &admin).await;
        assert_eq!(second.status, 404);
    }

    #[tokio::test]
    async fn members_cannot_delete_others() {
        let app = TestApp::spawn().await;
        let alice = app.create_authenticated_user("alice").await;
        let bob = app.create_authenticated_user("bob").await;
        let bob_id = app.user_id(&bob).await;

        let res = app.delete_with_token(&routes::user(bob_id), &alice).await;

        assert_eq!(res.status, 403);
    }
}
