use std::env;
use std::error::Error;
use std::sync::Arc;

use monitoring::{ApiClient, MemorySession};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let session = Arc::new(MemorySession::new());
    let client = ApiClient::from_env(Arc::clone(&session));

    let username =
        env::var("MONITORING_USER").unwrap_or_else(|_| "admin".to_owned());
    let password =
        env::var("MONITORING_PASSWORD").unwrap_or_else(|_| "admin".to_owned());
    client.login(&username, &password).await?;

    for entry in client.dashboard().await? {
        let location = entry.current_location;
        println!(
            "{} [{}] at ({}, {}), last seen {}",
            entry.name,
            entry.status,
            location.latitude,
            location.longitude,
            entry.last_seen
        );
    }

    client.logout();
    Ok(())
}
