use migration::{Migrator, MigratorTrait};
use sea_orm::{Database, DatabaseConnection};

mod settings;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;
    let mut tasks = tokio::task::JoinSet::new();

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "homestash={level},server={level},engine={level},assistant={level}",
            level = settings.app.level
        ))
        .init();

    let assistant = settings.assistant.map(|chat| {
        assistant::Assistant::new(
            reqwest::Client::new(),
            chat.api_url
                .unwrap_or_else(|| assistant::DEFAULT_API_URL.to_string()),
            chat.token,
        )
    });

    if let Some(server) = settings.server {
        tasks.spawn(async move {
            tracing::info!("Found server settings...");
            let db = match connect_database(&server.database).await {
                Ok(db) => db,
                Err(err) => {
                    tracing::error!("failed to initialize database: {err}");
                    return;
                }
            };

            let store = match engine::Store::builder().database(db).build().await {
                Ok(store) => store,
                Err(err) => {
                    tracing::error!("failed to build store from database: {err}");
                    return;
                }
            };
            let bind = server.bind.unwrap_or_else(|| "127.0.0.1".to_string());
            let addr = format!("{}:{}", bind, server.port);
            let listener = match tokio::net::TcpListener::bind(addr).await {
                Ok(listener) => listener,
                Err(err) => {
                    tracing::error!("failed to bind server listener: {err}");
                    return;
                }
            };
            if let Err(err) = server::run_with_listener(store, assistant, listener).await {
                tracing::error!("server failed: {err}");
            }
        });
    }

    while let Some(task) = tasks.join_next().await {
        task?;
    }

    Ok(())
}

async fn connect_database(
    url: &str,
) -> Result<DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let db = Database::connect(url).await?;
    Migrator::up(&db, None).await?;
    Ok(db)
}
