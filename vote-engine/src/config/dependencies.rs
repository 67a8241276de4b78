use std::sync::Arc;

use sqlx::postgres::PgPoolOptions;
use tracing::info;
use vote_engine_core::{RealtimeNotifier, VoteOrchestrator};
use vote_engine_realtime::{BroadcastHub, RealtimeTransport};
use vote_engine_repository::{
    NotificationsRepository, PostgresNotificationsRepository, PostgresVoteStore,
};

use crate::config::Settings;
use crate::errors::EngineError;

/// `Dependencies` holds the wired components of the vote engine.
///
/// The orchestrator is the outward API surface; the notifications
/// repository and transport are exposed for the thin controllers that
/// read notifications and attach realtime subscribers.
pub struct Dependencies {
    pub orchestrator: Arc<VoteOrchestrator>,
    pub notifications: Arc<dyn NotificationsRepository>,
    pub transport: RealtimeTransport,
    pub pool: sqlx::PgPool,
}

impl Dependencies {
    /// Connects to PostgreSQL, applies migrations, and wires up the
    /// engine's components.
    pub async fn new(settings: &Settings) -> Result<Self, EngineError> {
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .connect(&settings.database_url)
            .await?;

        sqlx::migrate!("../vote-engine-repository/src/postgres/migrations")
            .run(&pool)
            .await?;

        let transport = if settings.realtime_enabled {
            RealtimeTransport::hub(Arc::new(BroadcastHub::new(settings.realtime_channel_capacity)))
        } else {
            info!("Realtime transport disabled by configuration");
            RealtimeTransport::Disabled
        };

        let notifications: Arc<dyn NotificationsRepository> =
            Arc::new(PostgresNotificationsRepository::new(pool.clone()));
        let store = Arc::new(PostgresVoteStore::new(pool.clone()));
        let notifier = RealtimeNotifier::new(transport.clone(), notifications.clone());
        let orchestrator = Arc::new(VoteOrchestrator::new(store, notifier));

        Ok(Dependencies {
            orchestrator,
            notifications,
            transport,
            pool,
        })
    }
}
