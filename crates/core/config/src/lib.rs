use cached::proc_macro::cached;
use config::{Config, File, FileFormat};
use futures_locks::RwLock;
use once_cell::sync::Lazy;
use serde::Deserialize;

pub use tracing;
pub use tracing_subscriber;

static CONFIG_BUILDER: Lazy<RwLock<Config>> = Lazy::new(|| {
    RwLock::new({
        let mut builder = Config::builder().add_source(File::from_str(
            include_str!("../Murmur.toml"),
            FileFormat::Toml,
        ));

        if std::path::Path::new("Murmur.toml").exists() {
            builder = builder.add_source(File::new("Murmur.toml", FileFormat::Toml));
        }

        builder.build().unwrap()
    })
});

#[derive(Deserialize, Debug, Clone)]
pub struct Database {
    pub mongodb: String,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Api {
    pub host: String,
    pub port: u16,
}

#[derive(Deserialize, Debug, Clone)]
pub struct FeaturesLimits {
    pub content_max: usize,
    pub name_max: usize,
    pub period_max: usize,

    pub duplicate_window_seconds: u64,

    pub recent_reports: usize,
}

/// Sliding window over ratelimit events for one source address
#[derive(Deserialize, Debug, Clone)]
pub struct RatelimitWindow {
    pub window_seconds: u64,
    pub limit: usize,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Features {
    pub limits: FeaturesLimits,
    pub ratelimits: Vec<RatelimitWindow>,
}

#[derive(Deserialize, Debug, Clone)]
pub struct Settings {
    pub database: Database,
    pub api: Api,
    pub features: Features,
}

pub async fn init() {
    println!(
        ":: Murmur Configuration ::\n\x1b[32m{:?}\x1b[0m",
        config().await
    );
}

pub async fn read() -> Config {
    CONFIG_BUILDER.read().await.clone()
}

#[cached(time = 30)]
pub async fn config() -> Settings {
    read().await.try_deserialize::<Settings>().unwrap()
}

/// Configure logging and load environment for a service binary
#[macro_export]
macro_rules! configure {
    ( $service: ident ) => {
        $crate::tracing_subscriber::fmt()
            .with_env_filter(
                $crate::tracing_subscriber::EnvFilter::try_from_default_env()
                    .unwrap_or_else(|_| $crate::tracing_subscriber::EnvFilter::new("info")),
            )
            .init();

        $crate::tracing::info!("Starting {} [version {}]", stringify!($service), env!("CARGO_PKG_VERSION"));
        $crate::init().await;
    };
}

#[cfg(test)]
mod tests {
    use crate::config;

    #[async_std::test]
    async fn it_loads_defaults() {
        let settings = config().await;
        assert_eq!(settings.features.limits.content_max, 2000);
        assert_eq!(settings.features.ratelimits.len(), 2);
    }
}
