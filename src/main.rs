use std::net::TcpListener;
use std::sync::Arc;
use tour_ratings::configuration::{get_configuration, DatabaseBackend};
use tour_ratings::connection::{ConnectionManager, MongoConnector};
use tour_ratings::db::{InMemoryRatingRepository, MongoRatingRepository, RatingRepository};
use tour_ratings::startup::run;
use tour_ratings::telemetry::{get_subscriber, init_subscriber};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    let subscriber = get_subscriber("tour-ratings".into(), "info".into(), std::io::stdout);
    init_subscriber(subscriber);

    let settings = get_configuration().expect("Failed to read configuration.");

    let repository: Arc<dyn RatingRepository> = match settings.database.backend {
        DatabaseBackend::Mongo => {
            let connection = Arc::new(ConnectionManager::new(MongoConnector::new(
                &settings.database,
            )));
            connection
                .ensure_connected()
                .await
                .expect("Failed to connect to database.");

            let repository = MongoRatingRepository::new(connection);
            repository
                .ensure_indexes()
                .await
                .expect("Failed to create rating indexes.");
            Arc::new(repository)
        }
        DatabaseBackend::Memory => {
            tracing::warn!("Using in-memory rating storage, data is lost on restart");
            Arc::new(InMemoryRatingRepository::new())
        }
    };

    let address = format!("{}:{}", settings.app_host, settings.app_port);
    tracing::info!("Start server at {:?}", &address);
    let listener =
        TcpListener::bind(&address).expect(&format!("failed to bind to {}", address));

    run(listener, repository)?.await
}
