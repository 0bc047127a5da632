use std::sync::Arc;

use crate::api::HttpRankingClient;
use crate::cli::Cli;
use crate::config::Config;
use crate::error::Result;
use crate::session::SessionSettings;

pub struct AppContext {
    pub config: Config,
    pub client: Arc<HttpRankingClient>,
    pub settings: SessionSettings,
    pub robot_mode: bool,
}

impl AppContext {
    pub fn from_cli(cli: &Cli) -> Result<Self> {
        let config = Config::load(cli.config.as_deref())?;
        Self::from_config(config, cli.robot)
    }

    pub fn from_config(config: Config, robot_mode: bool) -> Result<Self> {
        let client = Arc::new(HttpRankingClient::from_config(&config)?);
        let settings = SessionSettings::from_config(&config);
        Ok(Self {
            config,
            client,
            settings,
            robot_mode,
        })
    }
}
