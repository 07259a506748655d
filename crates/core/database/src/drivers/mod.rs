#[cfg(feature = "mongodb")]
mod mongodb;
mod reference;

use rand::Rng;

use murmur_config::config;

#[cfg(feature = "mongodb")]
pub use self::mongodb::*;
pub use self::reference::*;

/// Database information to use to create a client
pub enum DatabaseInfo {
    /// Auto-detect the database in use
    Auto,
    /// Auto-detect the database in use and create an empty testing database
    Test(String),
    /// Use the mock database
    Reference,
    /// Connect to MongoDB
    #[cfg(feature = "mongodb")]
    MongoDb { uri: String, database_name: String },
    /// Use existing MongoDB connection
    #[cfg(feature = "mongodb")]
    MongoDbFromClient(::mongodb::Client, String),
}

/// Database
#[derive(Clone)]
pub enum Database {
    /// Mock database
    Reference(ReferenceDb),
    /// MongoDB database
    #[cfg(feature = "mongodb")]
    MongoDb(MongoDb),
}

impl DatabaseInfo {
    /// Create a database client from the given database information
    pub async fn connect(self) -> Result<Database, String> {
        let config = config().await;

        let info = match self {
            DatabaseInfo::Auto => {
                if std::env::var("TEST_DB").is_ok() {
                    DatabaseInfo::Test(format!(
                        "murmur_test_{}",
                        rand::thread_rng().gen_range(1_000_000..10_000_000)
                    ))
                } else if !config.database.mongodb.is_empty() {
                    #[cfg(feature = "mongodb")]
                    {
                        DatabaseInfo::MongoDb {
                            uri: config.database.mongodb.clone(),
                            database_name: "murmur".to_string(),
                        }
                    }

                    #[cfg(not(feature = "mongodb"))]
                    return Err("MongoDB not enabled.".to_string());
                } else {
                    DatabaseInfo::Reference
                }
            }
            info => info,
        };

        // Tests run against the driver named by TEST_DB and fall back
        // to the in-memory reference implementation.
        let info = match info {
            DatabaseInfo::Test(database_name) => match std::env::var("TEST_DB").as_deref() {
                Ok("MONGODB") => {
                    #[cfg(feature = "mongodb")]
                    {
                        DatabaseInfo::MongoDb {
                            uri: config.database.mongodb,
                            database_name,
                        }
                    }

                    #[cfg(not(feature = "mongodb"))]
                    return Err("MongoDB not enabled.".to_string());
                }
                _ => DatabaseInfo::Reference,
            },
            info => info,
        };

        match info {
            DatabaseInfo::Reference => Ok(Database::Reference(Default::default())),
            #[cfg(feature = "mongodb")]
            DatabaseInfo::MongoDb { uri, database_name } => {
                info!("Connecting to MongoDB...");
                let client = ::mongodb::Client::with_uri_str(uri)
                    .await
                    .map_err(|_| "Failed to init db connection.".to_string())?;

                Ok(Database::MongoDb(MongoDb(client, database_name)))
            }
            #[cfg(feature = "mongodb")]
            DatabaseInfo::MongoDbFromClient(client, database_name) => {
                Ok(Database::MongoDb(MongoDb(client, database_name)))
            }
            _ => unreachable!("connection target already resolved"),
        }
    }
}

impl Database {
    /// Drop all stored data, used by the test harness
    pub async fn drop_database(&self) {
        match self {
            Database::Reference(db) => {
                db.reports.lock().await.clear();
                db.ratelimit_events.lock().await.clear();
            }
            #[cfg(feature = "mongodb")]
            Database::MongoDb(db) => {
                db.db().drop().await.ok();
            }
        }
    }
}
