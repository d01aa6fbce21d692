//! Shared application state

use std::sync::Arc;

use anyhow::Result;

use crate::application::dto::ContactMessage;
use crate::application::services::{
    AccountServiceImpl, ContactServiceImpl, EventServiceImpl, ItemServiceImpl, RaceServiceImpl,
    ReferenceServiceImpl, SpellServiceImpl, StatBlockServiceImpl,
};
use crate::infrastructure::config::AppConfig;
use crate::infrastructure::mailer::MailRelayClient;
use crate::infrastructure::persistence::{seed_reference_data, SqliteRepository};
use crate::infrastructure::queues::SqliteQueue;

/// Shared application state
pub struct AppState {
    pub config: AppConfig,
    pub repository: SqliteRepository,
    pub mailer: Arc<MailRelayClient>,
    // Application services
    pub spell_service: SpellServiceImpl,
    pub stat_block_service: StatBlockServiceImpl,
    pub race_service: RaceServiceImpl,
    pub item_service: ItemServiceImpl,
    pub event_service: EventServiceImpl,
    pub account_service: AccountServiceImpl,
    pub reference_service: ReferenceServiceImpl,
    pub contact_service: ContactServiceImpl<SqliteQueue<ContactMessage>>,
}

impl AppState {
    pub async fn new(config: AppConfig) -> Result<Self> {
        let repository = SqliteRepository::connect(&config.database_path).await?;
        seed_reference_data(&repository).await?;

        let contact_queue = SqliteQueue::new(
            repository.pool().clone(),
            "contact_mail",
            config.mail.max_attempts,
        )
        .await?;

        let mailer = Arc::new(MailRelayClient::new(config.mail.relay_url.as_deref()));

        Ok(Self {
            spell_service: SpellServiceImpl::new(repository.clone()),
            stat_block_service: StatBlockServiceImpl::new(repository.clone()),
            race_service: RaceServiceImpl::new(repository.clone()),
            item_service: ItemServiceImpl::new(repository.clone()),
            event_service: EventServiceImpl::new(repository.clone()),
            account_service: AccountServiceImpl::new(repository.clone()),
            reference_service: ReferenceServiceImpl::new(repository.clone()),
            contact_service: ContactServiceImpl::new(contact_queue),
            repository,
            mailer,
            config,
        })
    }
}
