use std::{fs, path::Path, path::PathBuf};

use serde::Deserialize;
use shared::TrackedRepository;

use crate::{consts, render::OutputFormat};

/// Process environment, read with the `DASHBOARD_` prefix.
#[derive(Debug, Deserialize)]
pub struct Env {
    pub config: Option<PathBuf>,
    #[serde(default)]
    pub format: OutputFormat,
    pub output: Option<PathBuf>,
}

impl Env {
    pub fn load() -> anyhow::Result<Self> {
        Ok(envy::prefixed("DASHBOARD_").from_env::<Self>()?)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub heading: String,
    pub marker: String,
    pub api_base_url: String,
    pub repositories: Vec<TrackedRepository>,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            heading: consts::DEFAULT_HEADING.to_string(),
            marker: consts::DEFAULT_MARKER.to_string(),
            api_base_url: consts::GITHUB_API_URL.to_string(),
            repositories: consts::DEFAULT_REPOSITORIES
                .iter()
                .map(|(owner, repo)| TrackedRepository::new(*owner, *repo))
                .collect(),
        }
    }
}

impl DashboardConfig {
    pub fn load_from_file(file_path: &Path) -> anyhow::Result<Self> {
        let file_content = fs::read_to_string(file_path)?;
        let result = Self::from_toml(&file_content)?;
        tracing::trace!("Loaded dashboard config: {:#?}", result);
        Ok(result)
    }

    pub fn from_toml(content: &str) -> anyhow::Result<Self> {
        let result: Self = toml::from_str(content)?;
        result.validate()?;
        Ok(result)
    }

    pub fn validate(&self) -> anyhow::Result<()> {
        if self.marker.is_empty() {
            anyhow::bail!("marker must not be empty");
        }
        if self.repositories.is_empty() {
            anyhow::bail!("at least one repository has to be tracked");
        }
        if let Some(repository) = self
            .repositories
            .iter()
            .find(|r| r.owner.trim().is_empty() || r.repo.trim().is_empty())
        {
            anyhow::bail!("owner and repo are required, got {:?}", repository);
        }
        Ok(())
    }
}
