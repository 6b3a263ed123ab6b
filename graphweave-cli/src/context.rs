use graphweave::config::{ConfigLoader, GraphweaveConfig};
use graphweave::extraction::{ExtractionOrchestrator, PromptComposer};
use graphweave::strategy::StrategyStore;
use std::path::PathBuf;
use std::sync::Arc;

pub struct GraphweaveCliContext {
    pub config: GraphweaveConfig,
    pub orchestrator: ExtractionOrchestrator,
}

impl GraphweaveCliContext {
    pub fn new(
        config_file: Option<PathBuf>,
        definitions: Option<PathBuf>,
    ) -> graphweave::Result<Self> {
        let mut loader = ConfigLoader::new();
        match config_file {
            Some(path) => {
                loader.load_file(path)?;
            }
            None => {
                loader.load_default_files();
            }
        }
        let mut config = loader.load_env().extract()?;

        if let Some(dir) = definitions {
            config.definitions.dir = dir;
        }

        Ok(Self::from_config(config))
    }

    pub fn from_config(config: GraphweaveConfig) -> Self {
        let store = StrategyStore::open(&config.definitions.dir);
        let composer =
            PromptComposer::with_schemas(config.definitions.templates_dir(), store.schemas().clone());
        let orchestrator = ExtractionOrchestrator::new(Arc::new(store), composer);

        Self {
            config,
            orchestrator,
        }
    }

    pub fn store(&self) -> &StrategyStore {
        self.orchestrator.store()
    }
}
