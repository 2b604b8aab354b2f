use serde_json::json;

use crate::common::{TestApp, routes};

mod crud {
    use super::*;

    #[tokio::test]
    async fn offline_workshops_need_a_venue() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let body = json!({
            "title": "Street Walk",
            "description": "Photo walk through the old town.",
            "level": "Intermediate",
            "startDate": "2026-05-01T07:00:00Z",
            "endDate": "2026-05-01T10:00:00Z",
            "mode": "OFFLINE",
            "price": 0.0,
            "capacity": 12,
        });

        let missing = app.post_with_token(routes::WORKSHOPS, &body, &admin).await;
        assert_eq!(missing.status, 400);
        assert_eq!(missing.body["field"], "venue");

        let mut with_venue = body.clone();
        with_venue["venue"] = json!("Clock Tower");
        let created = app.post_with_token(routes::WORKSHOPS, &with_venue, &admin).await;
        assert_eq!(created.status, 201, "{}", created.text);
        assert_eq!(created.body["venue"], "Clock Tower");

        // Switching an online workshop to offline without a venue fails too.
        let online = app.create_workshop(&admin, 10).await;
        let res = app
            .patch_with_token(&routes::workshop(online), &json!({"mode": "OFFLINE"}), &admin)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "venue");
    }

    #[tokio::test]
    async fn online_workshops_never_keep_a_venue() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let body = json!({
            "title": "Editing Basics",
            "description": "Colour grading from home.",
            "level": "Beginner",
            "startDate": "2026-05-02T07:00:00Z",
            "endDate": "2026-05-02T10:00:00Z",
            "mode": "ONLINE",
            "venue": "Studio 9",
            "price": 0.0,
            "capacity": 12,
        });

        let created = app.post_with_token(routes::WORKSHOPS, &body, &admin).await;
        assert_eq!(created.status, 201, "{}", created.text);
        assert!(created.body["venue"].is_null());

        let mut offline = body.clone();
        offline["mode"] = json!("OFFLINE");
        offline["venue"] = json!("Studio 4");
        let offline = app.post_with_token(routes::WORKSHOPS, &offline, &admin).await;
        assert_eq!(offline.status, 201, "{}", offline.text);
        assert_eq!(offline.body["venue"], "Studio 4");

        let moved = app
            .patch_with_token(
                &routes::workshop(offline.id()),
                &json!({"mode": "ONLINE"}),
                &admin,
            )
            .await;
        assert_eq!(moved.status, 200, "{}", moved.text);
        assert!(moved.body["venue"].is_null());

        let stored = app.get_with_token(&routes::workshop(offline.id()), &admin).await;
        assert!(stored.body["venue"].is_null());
    }

    #[tokio::test]
    async fn prices_are_kept_to_the_cent() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let id = app.create_workshop(&admin, 5).await;

        let res = app
            .patch_with_token(&routes::workshop(id), &json!({"price": 0.1234567}), &admin)
            .await;
        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "price");

        let res = app
            .patch_with_token(&routes::workshop(id), &json!({"price": 19.99}), &admin)
            .await;
        assert_eq!(res.status, 200, "{}", res.text);
        assert_eq!(res.body["price"], 19.99);

        let stored = app.get_with_token(&routes::workshop(id), &admin).await;
        assert_eq!(stored.body["price"], 19.99);
    }

    #[tokio::test]
    async fn capacity_must_be_positive() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let id = app.create_workshop(&admin, 5).await;

        let res = app
            .patch_with_token(&routes::workshop(id), &json!({"capacity": 0}), &admin)
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "capacity");
    }

    #[tokio::test]
    async fn members_cannot_manage_workshops() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let member = app.create_authenticated_user("alice").await;
        let id = app.create_workshop(&admin, 5).await;

        let read = app.get_with_token(&routes::workshop(id), &member).await;
        assert_eq!(read.status, 200);

        let res = app
            .patch_with_token(&routes::workshop(id), &json!({"price": 0.0}), &member)
            .await;
        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn list_can_be_filtered_by_mode() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        app.create_workshop(&admin, 5).await;

        let offline = app
            .get_with_token(&format!("{}?mode=OFFLINE", routes::WORKSHOPS), &admin)
            .await;
        let online = app
            .get_with_token(&format!("{}?mode=ONLINE", routes::WORKSHOPS), &admin)
            .await;

        assert_eq!(offline.body.as_array().map(Vec::len), Some(0));
        assert_eq!(online.body.as_array().map(Vec::len), Some(1));
    }
}

mod capacity {
    use super::*;

    #[tokio::test]
    async fn registrations_stop_when_the_workshop_is_full() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let member = app.create_authenticated_user("alice").await;
        let id = app.create_workshop(&admin, 2).await;

        let first = app.register_for_workshop(id, &member).await;
        assert_eq!(first.status, 201, "{}", first.text);
        assert_eq!(first.body["paymentStatus"], "PENDING");
        assert_eq!(app.register_for_workshop(id, &member).await.status, 201);

        let third = app.register_for_workshop(id, &member).await;
        assert_eq!(third.status, 400);
        assert_eq!(third.body["code"], "CONSTRAINT_VIOLATION");
    }

    #[tokio::test]
    async fn freed_seats_can_be_taken_again() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let id = app.create_workshop(&admin, 1).await;
        let seat = app.register_for_workshop(id, &admin).await.id();

        assert_eq!(app.register_for_workshop(id, &admin).await.status, 400);

        let res = app
            .delete_with_token(&routes::workshop_registration(seat), &admin)
            .await;
        assert_eq!(res.status, 204);

        assert_eq!(app.register_for_workshop(id, &admin).await.status, 201);
    }

    #[tokio::test]
    async fn capacity_cannot_drop_below_existing_registrations() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let id = app.create_workshop(&admin, 5).await;
        app.register_for_workshop(id, &admin).await;
        app.register_for_workshop(id, &admin).await;

        let too_low = app
            .patch_with_token(&routes::workshop(id), &json!({"capacity": 1}), &admin)
            .await;
        assert_eq!(too_low.status, 400);
        assert_eq!(too_low.body["field"], "capacity");

        let exact = app
            .patch_with_token(&routes::workshop(id), &json!({"capacity": 2}), &admin)
            .await;
        assert_eq!(exact.status, 200);
        assert_eq!(exact.body["capacity"], 2);
    }

    #[tokio::test]
    async fn moving_a_registration_needs_a_free_seat() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let full = app.create_workshop(&admin, 1).await;
        let other = app.create_workshop(&admin, 3).await;
        app.register_for_workshop(full, &admin).await;
        let seat = app.register_for_workshop(other, &admin).await.id();

        let res = app
            .patch_with_token(
                &routes::workshop_registration(seat),
                &json!({"workshop": full}),
                &admin,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["code"], "CONSTRAINT_VIOLATION");
    }
}

mod registrations {
    use super::*;

    #[tokio::test]
    async fn unknown_workshop_is_a_field_error() {
        let app = TestApp::spawn().await;
        let member = app.create_authenticated_user("alice").await;

        let res = app.register_for_workshop(9999, &member).await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "workshop");
    }

    #[tokio::test]
    async fn members_cannot_mark_themselves_paid() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let member = app.create_authenticated_user("alice").await;
        let id = app.create_workshop(&admin, 5).await;

        let res = app
            .post_with_token(
                routes::WORKSHOP_REGISTRATIONS,
                &json!({
                    "workshop": id,
                    "name": "Alice",
                    "email": "alice@example.com",
                    "phone": "555-0100",
                    "paymentStatus": "PAID",
                }),
                &member,
            )
            .await;
        assert_eq!(res.status, 403);
    }

    #[tokio::test]
    async fn admins_record_payments() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let id = app.create_workshop(&admin, 5).await;
        let seat = app.register_for_workshop(id, &admin).await.id();

        let res = app
            .patch_with_token(
                &routes::workshop_registration(seat),
                &json!({"paymentStatus": "PAID"}),
                &admin,
            )
            .await;
        assert_eq!(res.status, 200);
        assert_eq!(res.body["paymentStatus"], "PAID");

        let paid = app
            .get_with_token(
                &format!("{}?payment_status=PAID", routes::WORKSHOP_REGISTRATIONS),
                &admin,
            )
            .await;
        assert_eq!(paid.body.as_array().map(Vec::len), Some(1));
    }

    #[tokio::test]
    async fn invalid_phone_is_rejected() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let id = app.create_workshop(&admin, 5).await;

        let res = app
            .post_with_token(
                routes::WORKSHOP_REGISTRATIONS,
                &json!({
                    "workshop": id,
                    "name": "Alice",
                    "email": "alice@example.com",
                    "phone": "call me maybe",
                }),
                &admin,
            )
            .await;

        assert_eq!(res.status, 400);
        assert_eq!(res.body["field"], "phone");
    }

    #[tokio::test]
    async fn deleting_a_workshop_deletes_its_registrations() {
        let app = TestApp::spawn().await;
        let admin = app.create_admin("root").await;
        let id = app.create_workshop(&admin, 5).await;
        let seat = app.register_for_workshop(id, &admin).await.id();

        let res = app.delete_with_token(&routes::workshop(id), &admin).await;
        assert_eq!(res.status, 204);

        let gone = app
            .get_with_token(&routes::workshop_registration(seat), &admin)
            .await;
        assert_eq!(gone.status, 404);

        let again = app.delete_with_token(&routes::workshop(id), &admin).await;
        assert_eq!(again.status, 404);
    }
}
