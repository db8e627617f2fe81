use quarry_core::{Connection, ConnectionConfig, Database, DatabaseError, ErrorKind};
use std::{
    collections::HashMap,
    sync::{Arc, LazyLock, Mutex, MutexGuard, PoisonError},
};

static CONNECTIONS: LazyLock<Mutex<HashMap<String, Arc<Database>>>> =
    LazyLock::new(Default::default);

fn connections() -> MutexGuard<'static, HashMap<String, Arc<Database>>> {
    CONNECTIONS.lock().unwrap_or_else(PoisonError::into_inner)
}

#[cfg(any(feature = "mysql", feature = "sqlite"))]
async fn open<C: Connection + 'static>(
    identifier: &str,
    config: &ConnectionConfig,
) -> Result<Database, DatabaseError> {
    let connection = C::connect_with(config).await?;
    Ok(Database::new(identifier, connection))
}

async fn open_provider(
    identifier: &str,
    provider: &str,
    config: &ConnectionConfig,
) -> Result<Database, DatabaseError> {
    match provider.trim().to_ascii_lowercase().as_str() {
        #[cfg(feature = "sqlite")]
        "sqlite" => open::<quarry_sqlite::SqliteConnection>(identifier, config).await,
        #[cfg(feature = "mysql")]
        "mysql" | "mariadb" => open::<quarry_mysql::MySqlConnection>(identifier, config).await,
        _ => {
            let error = DatabaseError::new(
                ErrorKind::Config,
                format!("Unknown or disabled database provider `{}`", provider),
            );
            log::error!("{}", error);
            Err(error)
        }
    }
}

/// Open a connection that is not registered, its identifier is the provider
/// name.
pub async fn connect(provider: &str, config: &ConnectionConfig) -> Result<Database, DatabaseError> {
    open_provider(&provider.trim().to_ascii_lowercase(), provider, config).await
}

/// The connection registered as `identifier`, opening and registering it
/// with `provider` and `config` the first time.
///
/// Once registered, `provider` and `config` are ignored.
pub async fn get_connection(
    identifier: &str,
    provider: &str,
    config: &ConnectionConfig,
) -> Result<Arc<Database>, DatabaseError> {
    if let Some(database) = connection(identifier) {
        return Ok(database);
    }
    let database = Arc::new(open_provider(identifier, provider, config).await?);
    log::debug!(
        "Registered the {} connection `{}`",
        database.provider(),
        identifier
    );
    // Two callers may race to open it, the first one registered wins.
    Ok(connections()
        .entry(identifier.to_string())
        .or_insert(database)
        .clone())
}

/// The connection registered as `identifier`, if any.
pub fn connection(identifier: &str) -> Option<Arc<Database>> {
    connections().get(identifier).cloned()
}

/// Forget the connection registered as `identifier`. It closes once the last
/// handle to it is dropped. Returns whether it was registered.
pub fn disconnect(identifier: &str) -> bool {
    connections().remove(identifier).is_some()
}
