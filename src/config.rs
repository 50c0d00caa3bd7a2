//! Factory configuration: connection addresses plus the extension-point
//! closures (migrate, seed, preparation decision, option configuration,
//! prepared callback). Composition instead of subclassing: every hook is an
//! optional function value with a no-op default.

use std::sync::Arc;

use crate::connection::{self, SharedConnection};
use crate::errors::{FixtureError, FixtureResult};
use crate::factory::TestDbFactory;

/// Default address for both the prototype and the instance connections.
pub const DEFAULT_ADDRESS: &str = ":memory:";

/// Whether a context handle is being built for the one-time prototype
/// preparation or for an ordinary per-test instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContextRole {
    Prototype,
    Instance,
}

/// Engine options attached while a context handle is being constructed.
/// The configure hook receives this before the handle is built; pragma
/// statements collected here are applied to the underlying connection.
#[derive(Debug)]
pub struct ContextOptions {
    role: ContextRole,
    pragmas: Vec<String>,
}

impl ContextOptions {
    pub(crate) fn new(role: ContextRole) -> Self {
        Self { role, pragmas: Vec::new() }
    }

    /// The role of the handle under construction.
    pub fn role(&self) -> ContextRole {
        self.role
    }

    /// Queue a full PRAGMA statement, e.g. `PRAGMA foreign_keys = ON;`.
    /// Applied to the connection before the handle constructor runs.
    pub fn add_pragma(&mut self, statement: impl Into<String>) {
        self.pragmas.push(statement.into());
    }
}

pub(crate) type ContextConstructor<C> = Arc<dyn Fn(SharedConnection) -> C + Send + Sync>;
pub(crate) type ContextHook<C> = Arc<dyn Fn(&C) -> FixtureResult<()> + Send + Sync>;
pub(crate) type ConfigureHook = Arc<dyn Fn(&mut ContextOptions) + Send + Sync>;
pub(crate) type PrepareDecision = Arc<dyn Fn(&str) -> bool + Send + Sync>;
pub(crate) type PreparedCallback = Arc<dyn Fn() + Send + Sync>;

/// Resolved extension points held by the factory.
pub(crate) struct Hooks<C> {
    pub context: ContextConstructor<C>,
    pub migrate: Option<ContextHook<C>>,
    pub seed: Option<ContextHook<C>>,
    pub configure: Option<ConfigureHook>,
    pub should_prepare: Option<PrepareDecision>,
    pub on_prepared: Option<PreparedCallback>,
}

impl<C> Hooks<C> {
    /// Build a context handle around a shared connection: run the configure
    /// hook, apply any collected pragmas, then call the constructor. The
    /// handle shares the connection (`Arc` clone), it never copies it.
    pub(crate) fn build_context(
        &self,
        conn: &SharedConnection,
        role: ContextRole,
    ) -> FixtureResult<C> {
        let mut options = ContextOptions::new(role);
        if let Some(configure) = &self.configure {
            configure(&mut options);
        }
        if !options.pragmas.is_empty() {
            let guard = connection::lock(conn)?;
            for statement in &options.pragmas {
                guard.execute_batch(statement)?;
            }
        }
        Ok((self.context)(Arc::clone(conn)))
    }
}

/// Builder for [`TestDbFactory`].
///
/// The context constructor is the one required piece: it replaces the
/// original design's runtime constructor discovery with an explicit
/// closure supplied by the caller.
pub struct FactoryConfig<C> {
    prototype_address: String,
    instance_address: String,
    context: Option<ContextConstructor<C>>,
    migrate: Option<ContextHook<C>>,
    seed: Option<ContextHook<C>>,
    configure: Option<ConfigureHook>,
    should_prepare: Option<PrepareDecision>,
    on_prepared: Option<PreparedCallback>,
}

impl<C> Default for FactoryConfig<C> {
    fn default() -> Self {
        Self::new()
    }
}

impl<C> FactoryConfig<C> {
    pub fn new() -> Self {
        Self {
            prototype_address: DEFAULT_ADDRESS.to_string(),
            instance_address: DEFAULT_ADDRESS.to_string(),
            context: None,
            migrate: None,
            seed: None,
            configure: None,
            should_prepare: None,
            on_prepared: None,
        }
    }

    /// Address of the prototype database. Point this at a durable file to
    /// enable snapshot reuse across process runs.
    pub fn prototype_address(mut self, address: impl Into<String>) -> Self {
        self.prototype_address = address.into();
        self
    }

    /// Address template used for every cloned instance connection.
    pub fn instance_address(mut self, address: impl Into<String>) -> Self {
        self.instance_address = address.into();
        self
    }

    /// Required: construct the mapped-access handle from a shared connection.
    pub fn context(mut self, f: impl Fn(SharedConnection) -> C + Send + Sync + 'static) -> Self {
        self.context = Some(Arc::new(f));
        self
    }

    /// Apply pending schema changes to the prototype. Runs once, before the
    /// seed hook. Failures abort the build.
    pub fn migrate(mut self, f: impl Fn(&C) -> FixtureResult<()> + Send + Sync + 'static) -> Self {
        self.migrate = Some(Arc::new(f));
        self
    }

    /// Insert baseline rows into the freshly migrated prototype. Runs once,
    /// inside the build's single commit.
    pub fn seed(mut self, f: impl Fn(&C) -> FixtureResult<()> + Send + Sync + 'static) -> Self {
        self.seed = Some(Arc::new(f));
        self
    }

    /// Invoked for every context handle construction, prototype and
    /// instance alike; branch on [`ContextOptions::role`].
    pub fn configure(mut self, f: impl Fn(&mut ContextOptions) + Send + Sync + 'static) -> Self {
        self.configure = Some(Arc::new(f));
        self
    }

    /// Override the preparation decision. The default prepares in-memory
    /// addresses and files that do not exist yet.
    pub fn should_prepare(mut self, f: impl Fn(&str) -> bool + Send + Sync + 'static) -> Self {
        self.should_prepare = Some(Arc::new(f));
        self
    }

    /// Called synchronously once, after the prototype build committed.
    /// Never called when an existing snapshot is reused.
    pub fn on_prepared(mut self, f: impl Fn() + Send + Sync + 'static) -> Self {
        self.on_prepared = Some(Arc::new(f));
        self
    }

    /// Validate the configuration and construct the factory. The prototype
    /// is not touched yet; the build runs lazily on first use.
    pub fn build(self) -> FixtureResult<TestDbFactory<C>> {
        let context = self.context.ok_or(FixtureError::MissingContextConstructor)?;
        Ok(TestDbFactory::from_parts(
            self.prototype_address,
            self.instance_address,
            Hooks {
                context,
                migrate: self.migrate,
                seed: self.seed,
                configure: self.configure,
                should_prepare: self.should_prepare,
                on_prepared: self.on_prepared,
            },
        ))
    }
}
