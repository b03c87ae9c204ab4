use configs::DatabaseConfig;
use mongodb::{bson::doc, options::ClientOptions, Client, Collection};
use tracing::info;

use crate::student::Student;

/// Open the process-wide client, ping the deployment and hand back the students collection.
///
/// The returned handle is cheap to clone and shares the client's connection pool.
pub async fn connect(cfg: &DatabaseConfig) -> anyhow::Result<Collection<Student>> {
    let mut options = ClientOptions::parse(cfg.uri.as_str()).await?;
    options.app_name = Some("student-records".to_string());
    let client = Client::with_options(options)?;
    client.database("admin").run_command(doc! { "ping": 1 }, None).await?;
    info!(event = "db_connected", database = %cfg.name, collection = %cfg.collection, "connected to mongodb");
    Ok(client.database(&cfg.name).collection::<Student>(&cfg.collection))
}
