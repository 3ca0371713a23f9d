//! Application wiring: catalog, cache store, market client, loop.

use tracing::info;

use crate::cache::CacheStore;
use crate::catalog::Catalog;
use crate::config::Config;
use crate::error::Result;
use crate::fetcher::MarketApi;
use crate::repl;

pub struct App;

impl App {
    pub async fn run(config: Config) -> Result<()> {
        let catalog = Catalog::load(&config.catalog.path)?;
        info!(
            relics = catalog.relics.len(),
            catalog = %config.catalog.path.display(),
            "catalog loaded"
        );

        let mut cache = CacheStore::open(&config.cache.dir)?;
        let mut source = MarketApi::new(config.network.api_url.clone());

        repl::run(&catalog, &mut cache, &mut source).await
    }
}
