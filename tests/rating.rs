mod common;

use serde_json::{json, Value};
use tour_ratings::db::RatingRepository;

async fn post_rating(client: &reqwest::Client, address: &str, body: &Value) -> reqwest::Response {
    client
        .post(&format!("{}/rating", address))
        .json(body)
        .send()
        .await
        .expect("Failed to execute request.")
}

// test me: cargo t --test rating -- --nocapture --show-output
#[tokio::test]
async fn add_returns_stored_rating_with_defaults() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let mut body = common::rating_body("pkg-42", 5);
    body["review"] = json!("Loved it");

    let response = post_rating(&client, &app.address, &body).await;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);

    let body: Value = response.json().await.unwrap();
    let item = &body["item"];
    assert_eq!(body["id"], item["id"]);
    assert_eq!(item["packageId"], "pkg-42");
    assert_eq!(item["rating"], 5);
    assert_eq!(item["isApproved"], true);
    assert_eq!(item["isVerified"], false);
    assert!(item["createdAt"].is_string());
    assert!(item.get("adminResponse").is_none());
}

#[tokio::test]
async fn add_trims_review() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let mut body = common::rating_body("pkg-1", 4);
    body["review"] = json!("  Great trip!  ");

    let response = post_rating(&client, &app.address, &body).await;
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["item"]["review"], "Great trip!");
}

#[tokio::test]
async fn add_rejects_invalid_input_without_saving() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let mut too_long = common::rating_body("pkg-1", 4);
    too_long["review"] = json!("x".repeat(1001));

    let mut bad_experience = common::rating_body("pkg-1", 4);
    bad_experience["travelExperience"] = json!({ "value": 9 });

    let cases = [
        (common::rating_body("pkg-1", 0), "rating below range"),
        (common::rating_body("pkg-1", 6), "rating above range"),
        (common::rating_body("", 3), "empty package"),
        (too_long, "review too long"),
        (bad_experience, "sub-rating out of range"),
        (json!({ "packageId": "pkg-1" }), "missing fields"),
    ];

    for (body, case) in cases.iter() {
        let response = post_rating(&client, &app.address, body).await;
        assert_eq!(
            response.status(),
            reqwest::StatusCode::BAD_REQUEST,
            "expected 400 for {}",
            case
        );
    }

    let stored = app
        .repository
        .list_by_package("pkg-1", Default::default())
        .await
        .unwrap();
    assert!(stored.is_empty());
}

#[tokio::test]
async fn exactly_max_length_review_is_accepted() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let mut body = common::rating_body("pkg-1", 3);
    body["review"] = json!("x".repeat(1000));

    let response = post_rating(&client, &app.address, &body).await;
    assert_eq!(response.status(), reqwest::StatusCode::CREATED);
}

#[tokio::test]
async fn public_listing_hides_unapproved_and_orders_by_score() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let mut ids = Vec::new();
    for score in [3, 5, 1] {
        let response = post_rating(&client, &app.address, &common::rating_body("pkg-1", score)).await;
        let body: Value = response.json().await.unwrap();
        ids.push(body["id"].as_str().unwrap().to_string());
    }

    let response = client
        .put(&format!("{}/admin/rating/{}/approval", &app.address, ids[1]))
        .json(&json!({ "isApproved": false, "adminResponse": "  Under review  " }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["item"]["isApproved"], false);
    assert_eq!(body["item"]["adminResponse"], "Under review");

    let public: Value = client
        .get(&format!("{}/rating/package/pkg-1", &app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let scores: Vec<i64> = public["list"]
        .as_array()
        .unwrap()
        .iter()
        .map(|r| r["rating"].as_i64().unwrap())
        .collect();
    assert_eq!(scores, [3, 1]);

    let admin: Value = client
        .get(&format!("{}/admin/rating/package/pkg-1", &app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(admin["list"].as_array().unwrap().len(), 3);

    let hidden = client
        .get(&format!("{}/rating/{}", &app.address, ids[1]))
        .send()
        .await
        .unwrap();
    assert_eq!(hidden.status(), reqwest::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn public_view_does_not_expose_contact_details() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = post_rating(&client, &app.address, &common::rating_body("pkg-1", 4)).await;
    let id = response.json::<Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let body: Value = client
        .get(&format!("{}/rating/{}", &app.address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["item"]["userName"], "Ann");
    assert!(body["item"].get("userEmail").is_none());
    assert!(body["item"].get("userId").is_none());
}

#[tokio::test]
async fn moderating_unknown_rating_is_not_found() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    for path in ["approval", "verification"] {
        let body = if path == "approval" {
            json!({ "isApproved": true })
        } else {
            json!({ "isVerified": true })
        };
        let response = client
            .put(&format!("{}/admin/rating/nonexistent-id/{}", &app.address, path))
            .json(&body)
            .send()
            .await
            .unwrap();
        assert_eq!(response.status(), reqwest::StatusCode::NOT_FOUND);
    }
}

#[tokio::test]
async fn verification_is_reflected_in_public_view() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = post_rating(&client, &app.address, &common::rating_body("pkg-1", 4)).await;
    let id = response.json::<Value>().await.unwrap()["id"]
        .as_str()
        .unwrap()
        .to_string();

    let response = client
        .put(&format!("{}/admin/rating/{}/verification", &app.address, id))
        .json(&json!({ "isVerified": true }))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());

    let body: Value = client
        .get(&format!("{}/rating/{}", &app.address, id))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["item"]["isVerified"], true);
}

#[tokio::test]
async fn summary_aggregates_approved_ratings() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    for score in [5, 4, 4] {
        post_rating(&client, &app.address, &common::rating_body("pkg-7", score)).await;
    }

    let body: Value = client
        .get(&format!("{}/rating/package/pkg-7/summary", &app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let summary = &body["item"];
    assert_eq!(summary["totalRatings"], 3);
    assert_eq!(summary["averageRating"], 4.3);
    assert_eq!(summary["distribution"][0]["stars"], 5);
    assert_eq!(summary["distribution"][0]["count"], 1);
    assert_eq!(summary["distribution"][1]["count"], 2);
}

#[tokio::test]
async fn recent_and_user_listings() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    post_rating(&client, &app.address, &common::rating_body("pkg-1", 4)).await;
    let mut other = common::rating_body("pkg-2", 5);
    other["userId"] = json!("u2");
    post_rating(&client, &app.address, &other).await;

    let recent: Value = client
        .get(&format!("{}/rating/recent?limit=1", &app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(recent["list"].as_array().unwrap().len(), 1);

    let mine: Value = client
        .get(&format!("{}/rating/user/u2", &app.address))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    let list = mine["list"].as_array().unwrap();
    assert_eq!(list.len(), 1);
    assert_eq!(list[0]["packageId"], "pkg-2");
}

#[tokio::test]
async fn unknown_package_lists_nothing() {
    let app = common::spawn_app().await;
    let client = reqwest::Client::new();

    let response = client
        .get(&format!("{}/rating/package/nothing-here", &app.address))
        .send()
        .await
        .unwrap();
    assert!(response.status().is_success());
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["list"], json!([]));
}
