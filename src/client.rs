use std::sync::Arc;

use tracing::info;

use crate::config::ClientConfig;
use crate::error::Result;
use crate::executor::CommandExecutor;
use crate::identifier::AccountObjectIdentifier;
use crate::session::{Context, Session};
use crate::session_commands::SessionCommands;
use crate::system_functions::SystemFunctions;
use crate::warehouses::Warehouses;

/// Entry point: a shared session plus client settings.
///
/// Cloning is cheap and every clone talks through the same session.
///
/// ```rust,no_run
/// # async fn run(session: impl warehouse_client::session::Session + 'static) -> warehouse_client::Result<()> {
/// use warehouse_client::{Client, ClientConfig, Context};
///
/// let client = Client::new(session, ClientConfig::default())?;
/// let ctx = Context::background();
/// let warehouses = client.warehouses().show(&ctx, None).await?;
/// # let _ = warehouses;
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Client {
    executor: CommandExecutor,
}

impl Client {
    /// Wrap a session. Nothing is sent.
    ///
    /// # Errors
    /// `Error::ConfigError` if `config` fails validation.
    pub fn new(session: impl Session + 'static, config: ClientConfig) -> Result<Self> {
        Self::from_shared(Arc::new(session), config)
    }

    /// Like [`Client::new`] for a session that is already shared.
    ///
    /// # Errors
    /// `Error::ConfigError` if `config` fails validation.
    pub fn from_shared(session: Arc<dyn Session>, config: ClientConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            executor: CommandExecutor::new(session, Arc::new(config)),
        })
    }

    /// Wrap a session and apply the configured role, warehouse and query tag, in that order.
    ///
    /// # Errors
    /// `Error::ConfigError` for invalid settings, or the first failing session command.
    pub async fn connect(
        session: impl Session + 'static,
        config: ClientConfig,
        ctx: &Context,
    ) -> Result<Self> {
        let client = Self::new(session, config)?;
        let commands = client.session_commands();
        let config = client.config();

        if let Some(role) = &config.role {
            commands
                .use_role(ctx, &AccountObjectIdentifier::parse(role)?)
                .await?;
        }
        if let Some(warehouse) = &config.warehouse {
            commands
                .use_warehouse(ctx, &AccountObjectIdentifier::parse(warehouse)?)
                .await?;
        }
        if let Some(tag) = &config.query_tag {
            commands.set_query_tag(ctx, tag).await?;
        }

        info!(
            role = config.role.as_deref().unwrap_or("-"),
            warehouse = config.warehouse.as_deref().unwrap_or("-"),
            "session configured"
        );
        Ok(client)
    }

    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        self.executor.config()
    }

    /// The executor behind the facades, for statements rendered elsewhere.
    #[must_use]
    pub fn executor(&self) -> &CommandExecutor {
        &self.executor
    }

    #[must_use]
    pub fn warehouses(&self) -> Warehouses<'_> {
        Warehouses::new(&self.executor)
    }

    #[must_use]
    pub fn system_functions(&self) -> SystemFunctions<'_> {
        SystemFunctions::new(&self.executor)
    }

    #[must_use]
    pub fn session_commands(&self) -> SessionCommands<'_> {
        SessionCommands::new(&self.executor)
    }
}
