use std::net::TcpListener;
use std::sync::Arc;
use tour_ratings::db::{InMemoryRatingRepository, RatingRepository};

pub struct TestApp {
    pub address: String,
    pub repository: Arc<dyn RatingRepository>,
}

// the server runs on its own task, bound to a random port
pub async fn spawn_app() -> TestApp {
    let listener = TcpListener::bind("127.0.0.1:0").expect("Failed to bind random port");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let repository: Arc<dyn RatingRepository> = Arc::new(InMemoryRatingRepository::new());
    let server = tour_ratings::startup::run(listener, repository.clone())
        .expect("Failed to bind address.");

    let _ = tokio::spawn(server);
    println!("Used Port: {}", port);

    TestApp {
        address,
        repository,
    }
}

pub fn rating_body(package_id: &str, rating: i32) -> serde_json::Value {
    serde_json::json!({
        "packageId": package_id,
        "userId": "u1",
        "userEmail": "a@b.com",
        "userName": "Ann",
        "rating": rating,
    })
}
