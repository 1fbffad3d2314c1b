use std::sync::Arc;

use catalog::{Catalog, load_catalog};
use tracing::info;

use super::{
    config::Config,
    contact::SubmissionLog,
    mailer::{LogMailer, Mailer, SmtpMailer},
};

pub struct AppState {
    pub config: Config,
    pub catalog: Catalog,
    pub mailer: Arc<dyn Mailer>,
    pub submissions: Option<SubmissionLog>,
}

impl AppState {
    pub async fn new() -> anyhow::Result<Arc<Self>> {
        let config = Config::load()?;

        let catalog = load_catalog(&config.catalog_source).await;

        let mailer: Arc<dyn Mailer> = match &config.smtp {
            Some(smtp) => {
                info!("Sending contact mail through {}:{}", smtp.host, smtp.port);
                Arc::new(SmtpMailer::new(smtp)?)
            }
            None => Arc::new(LogMailer),
        };

        Ok(Self::with_parts(config, catalog, mailer))
    }

    pub fn with_parts(config: Config, catalog: Catalog, mailer: Arc<dyn Mailer>) -> Arc<Self> {
        let submissions = config.contact_log.clone().map(SubmissionLog::new);

        Arc::new(Self {
            config,
            catalog,
            mailer,
            submissions,
        })
    }
}
