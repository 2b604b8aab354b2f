use serde_json::json;

use crate::common::{TestApp, routes};

mod crud {
    use super::*;

    #[tokio::test]
    async fn admin_can_create_a_competition_with_defaults() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;

        let res = app
            .post_with_token(
                routes::COMPETITIONS,
                &json!({
                    "title": "Night Lights",
                    "description": "Shoot the city after dark.",
                    "theme": "Night",
                    "startDate": "2026-03-01T00:00:00Z",
                    "endDate": "2026-03-31T23:59:59Z",
                }),
                &admin,
            )
            .await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["status"], "UPCOMING");
        assert_eq!(res.body["isPaid"], false);
        assert_eq!(res.body["price"], 0.0);
    }

    #[tokio::test]
    async fn sub_cent_prices_are_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let mut body = json!({
            "title": "Night Lights",
            "description": "Shoot the city after dark.",
            "theme": "Night",
            "startDate": "2026-03-01T00:00:00Z",
            "endDate": "2026-03-31T23:59:59Z",
            "isPaid": true,
            "price": 0.1234567,
        });

        let res = app.post_with_token(routes::COMPETITIONS, &body, &admin).await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "price");

        body["price"] = json!(250.5);
        let res = app.post_with_token(routes::COMPETITIONS, &body, &admin).await;
        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["price"], 250.5);
    }

    #[tokio::test]
    async fn non_numeric_ids_are_a_validation_error() {
        let app = TestApp::spawn().await;
        let member = app.create_authenticated_user("alice").await;

        let res = app
            .get_with_token(&format!("{}/abc", routes::COMPETITIONS), &member)
            .await;

        assert_eq!(res.status, 400, "{}", res.text);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
        assert_eq!(res.body["field"], "id");
    }

    #[tokio::test]
    async fn members_can_read_but_not_write() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let member = app.create_authenticated_user("alice").await;
        let id = app.create_competition(&admin, "Night Lights").await;

        let read = app.get_with_token(&routes::competition(id), &member).await;
        assert_eq!(read.status, 200);
        assert_eq!(read.body["title"], "Night Lights");

        let create = app
            .post_with_token(
                routes::COMPETITIONS,
                &json!({
                    "title": "Member Cup",
                    "description": "d",
                    "theme": "t",
                    "startDate": "2026-03-01T00:00:00Z",
                    "endDate": "2026-03-31T00:00:00Z",
                }),
                &member,
            )
            .await;
        assert_eq!(create.status, 403);

        let update = app
            .patch_with_token(&routes::competition(id), &json!({"title": "Hijacked"}), &member)
            .await;
        assert_eq!(update.status, 403);

        let delete = app.delete_with_token(&routes::competition(id), &member).await;
        assert_eq!(delete.status, 403);
    }

    #[tokio::test]
    async fn list_can_be_filtered_by_status() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let first = app.create_competition(&admin, "Night Lights").await;
        app.create_competition(&admin, "Golden Hour").await;
        app.patch_with_token(&routes::competition(first), &json!({"status": "ONGOING"}), &admin)
            .await;

        let res = app
            .get_with_token(&format!("{}?status=ONGOING", routes::COMPETITIONS), &admin)
            .await;

        assert_eq!(res.status, 200);
        let items = res.body.as_array().unwrap();
        assert_eq!(items.len(), 1);
        assert_eq!(items[0]["id"], first);
    }

    #[tokio::test]
    async fn empty_patch_returns_the_record_unchanged() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let id = app.create_competition(&admin, "Night Lights").await;

        let res = app
            .patch_with_token(&routes::competition(id), &json!({}), &admin)
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body["title"], "Night Lights");
    }

    #[tokio::test]
    async fn update_and_delete_of_missing_records_are_not_found() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let id = app.create_competition(&admin, "Night Lights").await;

        let missing = app
            .patch_with_token(&routes::competition(9999), &json!({"title": "x"}), &admin)
            .await;
        assert_eq!(missing.status, 404);

        let first = app.delete_with_token(&routes::competition(id), &admin).await;
        assert_eq!(first.status, 204);
        let second = app.delete_with_token(&routes::competition(id), &admin).await;
        assert_eq!(second.status, 404);
    }
}

mod validation {
    use super::*;

    #[tokio::test]
    async fn end_date_cannot_precede_start_date() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;

        let res = app
            .post_with_token(
                routes::COMPETITIONS,
                &json!({
                    "title": "Backwards",
                    "description": "d",
                    "theme": "t",
                    "startDate": "2026-03-31T00:00:00Z",
                    "endDate": "2026-03-01T00:00:00Z",
                }),
                &admin,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "endDate");
    }

    #[tokio::test]
    async fn partial_date_update_is_checked_against_stored_dates() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let id = app.create_competition(&admin, "Night Lights").await;

        let res = app
            .patch_with_token(
                &routes::competition(id),
                &json!({"endDate": "2026-02-01T00:00:00Z"}),
                &admin,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "endDate");
    }

    #[tokio::test]
    async fn free_competitions_cannot_carry_a_price() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let id = app.create_competition(&admin, "Night Lights").await;

        let res = app
            .patch_with_token(&routes::competition(id), &json!({"price": 10.0}), &admin)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "price");

        let paid = app
            .patch_with_token(
                &routes::competition(id),
                &json!({"isPaid": true, "price": 10.0}),
                &admin,
            )
            .await;
        assert_eq!(paid.status, 200, "{}", paid.text);
        assert_eq!(paid.body["price"], 10.0);
    }

    #[tokio::test]
    async fn unknown_status_is_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let id = app.create_competition(&admin, "Night Lights").await;

        let res = app
            .patch_with_token(&routes::competition(id), &json!({"status": "CANCELLED"}), &admin)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "VALIDATION_ERROR");
    }
}

mod registrations {
    use super::*;

    #[tokio::test]
    async fn members_can_submit_entries() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let member = app.create_authenticated_user("alice").await;
        let competition = app.create_competition(&admin, "Night Lights").await;

        let res = app.register_for_competition(competition, &member).await;

        assert_eq!(res.status, 201, "{}", res.text);
        assert_eq!(res.body["competition"], competition);
        assert_eq!(res.body["status"], "SUBMITTED");
        assert!(res.body["instagram"].is_null());
    }

    #[tokio::test]
    async fn members_cannot_crown_themselves() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let member = app.create_authenticated_user("alice").await;
        let competition = app.create_competition(&admin, "Night Lights").await;

        let res = app
            .post_with_token(
                routes::COMPETITION_REGISTRATIONS,
                &json!({
                    "competition": competition,
                    "name": "Alice Lens",
                    "email": "alice@example.com",
                    "college": "City College",
                    "submissionUrl": "https://drive.example.com/alice-entry",
                    "status": "WINNER",
                }),
                &member,
            )
            .await;

        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn unknown_competition_is_a_field_error() {
        let app = TestApp::spawn().await;
        let member = app.create_authenticated_user("alice").await;

        let res = app.register_for_competition(9999, &member).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "competition");
    }

    #[tokio::test]
    async fn invalid_submission_url_is_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let competition = app.create_competition(&admin, "Night Lights").await;

        let res = app
            .post_with_token(
                routes::COMPETITION_REGISTRATIONS,
                &json!({
                    "competition": competition,
                    "name": "Alice Lens",
                    "email": "alice@example.com",
                    "college": "City College",
                    "submissionUrl": "not a url",
                }),
                &admin,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "submissionUrl");
    }

    #[tokio::test]
    async fn admins_shortlist_entries_and_members_cannot() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let member = app.create_authenticated_user("alice").await;
        let competition = app.create_competition(&admin, "Night Lights").await;
        let entry = app.register_for_competition(competition, &member).await.id();

        let denied = app
            .patch_with_token(
                &routes::competition_registration(entry),
                &json!({"status": "SHORTLISTED"}),
                &member,
            )
            .await;
        assert_eq!(denied.status, 403);

        let res = app
            .patch_with_token(
                &routes::competition_registration(entry),
                &json!({"status": "SHORTLISTED"}),
                &admin,
            )
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["status"], "SHORTLISTED");
    }

    #[tokio::test]
    async fn list_can_be_filtered_by_competition() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let first = app.create_competition(&admin, "Night Lights").await;
        let second = app.create_competition(&admin, "Golden Hour").await;
        app.register_for_competition(first, &admin).await;
        app.register_for_competition(second, &admin).await;
        app.register_for_competition(second, &admin).await;

        let res = app
            .get_with_token(
                &format!("{}?competition={second}", routes::COMPETITION_REGISTRATIONS),
                &admin,
            )
            .await;

        assert_eq!(res.status, 200);
        assert_eq!(res.body.as_array().map(Vec::len), Some(2));
    }

    #[tokio::test]
    async fn deleting_a_competition_deletes_its_registrations() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let doomed = app.create_competition(&admin, "Night Lights").await;
        let survivor = app.create_competition(&admin, "Golden Hour").await;
        let doomed_entry = app.register_for_competition(doomed, &admin).await.id();
        let surviving_entry = app.register_for_competition(survivor, &admin).await.id();

        let res = app.delete_with_token(&routes::competition(doomed), &admin).await;
        assert_eq!(res.status, 204);

        let gone = app
            .get_with_token(&routes::competition_registration(doomed_entry), &admin)
            .await;
        assert_eq!(gone.status, 404);

        let kept = app
            .get_with_token(&routes::competition_registration(surviving_entry), &admin)
            .await;
        assert_eq!(kept.status, 200);
    }

    #[tokio::test]
    async fn second_delete_of_an_entry_is_not_found() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let competition = app.create_competition(&admin, "Night Lights").await;
        let entry = app.register_for_competition(competition, &admin).await.id();

        let first = app
            .delete_with_token(&routes::competition_registration(entry), &admin)
            .await;
        assert_eq!(first.status, 204);
        let second = app
            .delete_with_token(&routes::competition_registration(entry), &admin)
            .await;
        assert_eq!(second.status, 404);
    }
}
