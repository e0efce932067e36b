use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{anyhow, Context, Result};
use clap::Parser;
use taskapi_core::{FileTaskStore, InMemoryTaskStore, TaskStore};

#[derive(Parser, Debug, Clone)]
#[command(name = "taskapi")]
#[command(about = "A small JSON task-tracking HTTP service", long_about = None)]
pub struct ServerConfig {
    /// File holding the task collection [default: ~/.taskapi/tasks.json]
    #[arg(long, env = "TASKAPI_DATA_FILE")]
    pub data_file: Option<PathBuf>,

    /// Address to listen on
    #[arg(long, env = "TASKAPI_HOST", default_value = "127.0.0.1")]
    pub host: String,

    /// Port to listen on
    #[arg(long, env = "TASKAPI_PORT", default_value_t = 3000)]
    pub port: u16,

    /// Keep tasks in memory only; nothing is written to disk
    #[arg(long, conflicts_with = "data_file")]
    pub in_memory: bool,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .with_context(|| format!("invalid listen address {}:{}", self.host, self.port))
    }

    pub fn data_path(&self) -> Result<PathBuf> {
        match &self.data_file {
            Some(path) => Ok(path.clone()),
            None => FileTaskStore::default_path()
                .ok_or_else(|| anyhow!("Could not determine home directory; pass --data-file")),
        }
    }

    pub fn build_store(&self) -> Result<Arc<dyn TaskStore>> {
        if self.in_memory {
            tracing::info!("using in-memory task store");
            return Ok(Arc::new(InMemoryTaskStore::new()));
        }

        let path = self.data_path()?;
        let store = FileTaskStore::new(&path)
            .with_context(|| format!("could not prepare task file {}", path.display()))?;
        tracing::info!(path = %store.path().display(), "using file task store");
        Ok(Arc::new(store))
    }
}
