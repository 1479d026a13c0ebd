//! Typed dependency registry
//!
//! The registry is the composition root of a process: infrastructure
//! singletons are registered once at startup, in dependency order, and read
//! afterwards. Keys are zero-sized marker types implementing [`ServiceKey`],
//! so every key is statically tied to the type of its provider and lookups
//! never need a type check at the call site. Caller-defined keys extend the
//! default set without touching it; two distinct key types can never collide.

use std::any::{Any, TypeId};
use std::collections::HashMap;
use std::fmt;

use tracing::debug;

use crate::error::ServiceError;

/// A registry key with a statically associated provider type
pub trait ServiceKey: 'static {
    /// Type of the provider stored under this key
    type Service: Send + Sync + 'static;

    /// Human-readable key name used in logs and errors
    const NAME: &'static str;
}

/// Declare a [`ServiceKey`] marker type
///
/// ```rust,ignore
/// service_key!(
///     /// Feature flag client
///     pub FlagsKey => Arc<dyn FlagClient>, "flags"
/// );
/// ```
#[macro_export]
macro_rules! service_key {
    ($(#[$meta:meta])* $vis:vis $key:ident => $service:ty, $name:literal) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, Default)]
        $vis struct $key;

        impl $crate::service::ServiceKey for $key {
            type Service = $service;
            const NAME: &'static str = $name;
        }
    };
}

struct Entry {
    name: &'static str,
    provider: Box<dyn Any + Send + Sync>,
}

/// Key-to-provider store with one provider per key
///
/// Population takes `&mut self`; once built the registry is shared (usually
/// behind an `Arc`) and only read, so there is no interior locking.
#[derive(Default)]
pub struct DependencyRegistry {
    providers: HashMap<TypeId, Entry>,
}

impl DependencyRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self {
            providers: HashMap::new(),
        }
    }

    /// Start a builder for a pre-seeded registry
    pub fn builder() -> RegistryBuilder {
        RegistryBuilder::new()
    }

    /// Register the provider for `K`, replacing and returning any previous one
    pub fn set<K: ServiceKey>(&mut self, provider: K::Service) -> Option<K::Service> {
        let previous = self.providers.insert(
            TypeId::of::<K>(),
            Entry {
                name: K::NAME,
                provider: Box::new(provider),
            },
        )?;

        debug!(key = K::NAME, "Replacing registered provider");
        previous
            .provider
            .downcast::<K::Service>()
            .ok()
            .map(|boxed| *boxed)
    }

    /// Get the provider for `K`.
    ///
    /// # Panics
    ///
    /// Panics with `No provider for <key>` when nothing is registered for `K`.
    /// A missing provider means the composition root was built incorrectly,
    /// which callers cannot recover from.
    #[track_caller]
    pub fn get<K: ServiceKey>(&self) -> &K::Service {
        match self.try_get::<K>() {
            Ok(provider) => provider,
            Err(e) => panic!("{}", e),
        }
    }

    /// Get the provider for `K`, or `ServiceError::NotFound`
    pub fn try_get<K: ServiceKey>(&self) -> Result<&K::Service, ServiceError> {
        self.providers
            .get(&TypeId::of::<K>())
            .and_then(|entry| entry.provider.downcast_ref::<K::Service>())
            .ok_or_else(|| ServiceError::NotFound(K::NAME.to_string()))
    }

    /// Check if a provider is registered for `K`
    pub fn has<K: ServiceKey>(&self) -> bool {
        self.providers.contains_key(&TypeId::of::<K>())
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    /// Names of all registered keys, sorted
    pub fn registered_keys(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.providers.values().map(|entry| entry.name).collect();
        names.sort_unstable();
        names
    }
}

impl fmt::Debug for DependencyRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DependencyRegistry")
            .field("keys", &self.registered_keys())
            .finish()
    }
}

/// Builder for a pre-seeded registry
#[derive(Debug, Default)]
pub struct RegistryBuilder {
    registry: DependencyRegistry,
}

impl RegistryBuilder {
    pub fn new() -> Self {
        Self {
            registry: DependencyRegistry::new(),
        }
    }

    /// Register a provider; a later call for the same key wins
    pub fn provide<K: ServiceKey>(mut self, provider: K::Service) -> Self {
        self.registry.set::<K>(provider);
        self
    }

    pub fn build(self) -> DependencyRegistry {
        self.registry
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    trait Greeter: Send + Sync {
        fn greet(&self) -> String;
    }

    struct English;

    impl Greeter for English {
        fn greet(&self) -> String {
            "hello".to_string()
        }
    }

    struct French;

    impl Greeter for French {
        fn greet(&self) -> String {
            "bonjour".to_string()
        }
    }

    service_key!(GreeterKey => Arc<dyn Greeter>, "greeter");
    service_key!(PortKey => u16, "port");

    #[test]
    fn test_set_and_get() {
        let mut registry = DependencyRegistry::new();
        assert!(registry.is_empty());

        registry.set::<PortKey>(8080);
        registry.set::<GreeterKey>(Arc::new(English));

        assert_eq!(*registry.get::<PortKey>(), 8080);
        assert_eq!(registry.get::<GreeterKey>().greet(), "hello");
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.registered_keys(), vec!["greeter", "port"]);
    }

    #[test]
    fn test_last_write_wins() {
        let mut registry = DependencyRegistry::new();
        let first: Arc<dyn Greeter> = Arc::new(English);
        let second: Arc<dyn Greeter> = Arc::new(French);

        assert!(registry.set::<GreeterKey>(first.clone()).is_none());
        let replaced = registry.set::<GreeterKey>(second.clone());

        assert!(Arc::ptr_eq(&replaced.unwrap(), &first));
        assert!(Arc::ptr_eq(registry.get::<GreeterKey>(), &second));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    #[should_panic(expected = "No provider for port")]
    fn test_get_missing_panics() {
        let registry = DependencyRegistry::new();
        registry.get::<PortKey>();
    }

    #[test]
    fn test_try_get_missing() {
        let registry = DependencyRegistry::new();
        assert_eq!(
            registry.try_get::<PortKey>().unwrap_err(),
            ServiceError::NotFound("port".to_string())
        );
        assert!(!registry.has::<PortKey>());
    }

    #[test]
    fn test_builder_pre_seeds() {
        let registry = DependencyRegistry::builder()
            .provide::<PortKey>(1)
            .provide::<PortKey>(2)
            .provide::<GreeterKey>(Arc::new(French))
            .build();

        assert_eq!(*registry.get::<PortKey>(), 2);
        assert!(registry.has::<GreeterKey>());
        assert_eq!(format!("{:?}", registry), "DependencyRegistry { keys: [\"greeter\", \"port\"] }");
    }
}
