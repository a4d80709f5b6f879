use crate::clients::{BusinessSpecClient, DataListClient, RequirementsClient, TestimonialClient};
use crate::config::AppConfig;
use crate::error::AppError;
use crate::navigation::History;
use resource_controller::Transport;
use std::sync::Arc;
use tracing::info;

/// Holds one client per page, all sharing a single transport.
///
/// # Example
///
/// ```ignore
/// let system = EcoMindSystem::new(&AppConfig::load()?)?;
///
/// system.business_spec.load().settled().await?;
/// println!("{}", system.business_spec.render());
/// ```
pub struct EcoMindSystem {
    pub business_spec: BusinessSpecClient,
    pub requirements: RequirementsClient,
    pub testimonials: TestimonialClient,
    pub data_list: DataListClient,

    /// Routes pushed by the pages.
    pub history: Arc<History>,
}

impl EcoMindSystem {
    /// Wires every page to an HTTP transport built from `config`.
    pub fn new(config: &AppConfig) -> Result<Self, AppError> {
        let transport: Arc<dyn Transport> = Arc::new(config.http_transport()?);
        info!(base_url = %config.base_url, "Transport ready");
        Ok(Self::with_transport(transport, config))
    }

    /// Wires every page to `transport`.
    pub fn with_transport(transport: Arc<dyn Transport>, config: &AppConfig) -> Self {
        let history = Arc::new(History::new());
        Self {
            business_spec: BusinessSpecClient::new(transport.clone()),
            requirements: RequirementsClient::new(transport.clone(), history.clone()),
            testimonials: TestimonialClient::new(transport.clone()),
            data_list: DataListClient::new(transport, &config.data_endpoint),
            history,
        }
    }
}
