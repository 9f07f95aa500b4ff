//! Operations context for dependency injection

use apkget_config::Config;
use apkget_errors::Error;
use apkget_events::{EventEmitter, EventSender};
use apkget_net::NetClient;
use apkget_resolver::Resolver;

/// Operations context providing access to the pipeline components
///
/// A context is built per pipeline run. The resolver shares the network
/// client's cookie jar, so cookies set while resolving travel with the
/// artifact request.
pub struct OpsCtx {
    /// Network client
    pub net: NetClient,
    /// Link resolver bound to `net`
    pub resolver: Resolver,
    /// Event sender for progress reporting
    pub tx: EventSender,
    /// Application configuration
    pub config: Config,
}

impl OpsCtx {
    /// Build a fresh context from configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client cannot be built or the configured
    /// origin URLs are invalid.
    pub fn from_config(config: Config, tx: EventSender) -> Result<Self, Error> {
        let net = NetClient::from_config(&config)?;
        let resolver = Resolver::new(net.clone(), &config.origin)?;

        OpsContextBuilder::new()
            .with_net(net)
            .with_resolver(resolver)
            .with_event_sender(tx)
            .with_config(config)
            .build()
    }
}

impl EventEmitter for OpsCtx {
    fn event_sender(&self) -> Option<&EventSender> {
        Some(&self.tx)
    }
}

/// Builder for operations context
pub struct OpsContextBuilder {
    net: Option<NetClient>,
    resolver: Option<Resolver>,
    tx: Option<EventSender>,
    config: Option<Config>,
}

impl OpsContextBuilder {
    /// Create new context builder
    #[must_use]
    pub fn new() -> Self {
        Self {
            net: None,
            resolver: None,
            tx: None,
            config: None,
        }
    }

    /// Set network client
    #[must_use]
    pub fn with_net(mut self, net: NetClient) -> Self {
        self.net = Some(net);
        self
    }

    /// Set resolver
    #[must_use]
    pub fn with_resolver(mut self, resolver: Resolver) -> Self {
        self.resolver = Some(resolver);
        self
    }

    /// Set event sender
    #[must_use]
    pub fn with_event_sender(mut self, tx: EventSender) -> Self {
        self.tx = Some(tx);
        self
    }

    /// Set configuration
    #[must_use]
    pub fn with_config(mut self, config: Config) -> Self {
        self.config = Some(config);
        self
    }

    /// Build the context
    ///
    /// A missing configuration falls back to defaults. A missing resolver is
    /// built on top of the network client.
    ///
    /// # Errors
    ///
    /// Returns an error if the network client or event sender is missing,
    /// or a default resolver cannot be built.
    pub fn build(self) -> Result<OpsCtx, Error> {
        let net = self.net.ok_or_else(|| missing("net"))?;
        let tx = self.tx.ok_or_else(|| missing("event_sender"))?;
        let config = self.config.unwrap_or_default();

        let resolver = match self.resolver {
            Some(resolver) => resolver,
            None => Resolver::new(net.clone(), &config.origin)?,
        };

        Ok(OpsCtx {
            net,
            resolver,
            tx,
            config,
        })
    }
}

impl Default for OpsContextBuilder {
    fn default() -> Self {
        Self::new()
    }
}

fn missing(component: &str) -> Error {
    Error::internal(format!("operations context is missing component: {component}"))
}
