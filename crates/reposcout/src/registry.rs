//! Service registry with singleton and factory lifecycles
//!
//! An explicit context object, constructed at startup and passed by
//! reference - not a process-wide global. Singletons hand back the identical
//! `Arc` on every resolution; factories build a fresh instance per call.
//!
//! Resolution is synchronous. A factory may resolve other registrations
//! while it runs (the map lock is released before the factory is invoked),
//! but cyclic factory dependencies are not detected: a cycle recurses until
//! the stack gives out. That is a caller responsibility, not a guard here.

use std::any::{Any, TypeId, type_name};
use std::collections::HashMap;
use std::collections::hash_map::Entry;
use std::sync::{Arc, RwLock};

use thiserror::Error;

/// Registry failures.
#[derive(Error, Debug)]
pub enum RegistryError {
    /// `get` was called for a type nothing registered.
    #[error("no registration for type {0}")]
    NotRegistered(&'static str),

    /// A second registration arrived for an already-registered type.
    /// Re-initializing without an explicit reset fails fast instead of
    /// silently double-registering.
    #[error("type {0} is already registered; clear the registry before re-initializing")]
    AlreadyRegistered(&'static str),

    /// The registry lock was poisoned by a panicking writer.
    #[error("service registry lock poisoned")]
    Poisoned,
}

/// Result type for registry operations.
pub type RegistryResult<T> = Result<T, RegistryError>;

type AnyService = Arc<dyn Any + Send + Sync>;
type ServiceFactory = Arc<dyn Fn() -> AnyService + Send + Sync>;

enum Registration {
    Singleton(AnyService),
    Factory(ServiceFactory),
}

/// What `get` found, extracted so the map lock can drop before any factory
/// code runs.
enum Resolved {
    Instance(AnyService),
    Build(ServiceFactory),
}

/// Type-keyed service registry.
#[derive(Default)]
pub struct ServiceRegistry {
    entries: RwLock<HashMap<TypeId, Registration>>,
}

impl ServiceRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register an instance resolved as the identical `Arc` on every `get`.
    ///
    /// # Errors
    ///
    /// `AlreadyRegistered` if the type already has a registration.
    pub fn register_singleton<T: Any + Send + Sync>(&self, instance: T) -> RegistryResult<()> {
        self.insert::<T>(Registration::Singleton(Arc::new(instance)))
    }

    /// Register a constructor invoked fresh on every `get`, yielding a
    /// distinct instance each time.
    ///
    /// # Errors
    ///
    /// `AlreadyRegistered` if the type already has a registration.
    pub fn register_factory<T, F>(&self, factory: F) -> RegistryResult<()>
    where
        T: Any + Send + Sync,
        F: Fn() -> T + Send + Sync + 'static,
    {
        self.insert::<T>(Registration::Factory(Arc::new(move || {
            Arc::new(factory()) as AnyService
        })))
    }

    fn insert<T: Any>(&self, registration: Registration) -> RegistryResult<()> {
        let mut entries = self.entries.write().map_err(|_| RegistryError::Poisoned)?;
        match entries.entry(TypeId::of::<T>()) {
            Entry::Occupied(_) => Err(RegistryError::AlreadyRegistered(type_name::<T>())),
            Entry::Vacant(slot) => {
                tracing::debug!(service = type_name::<T>(), "registered service");
                slot.insert(registration);
                Ok(())
            }
        }
    }

    /// Resolve a registration.
    ///
    /// # Errors
    ///
    /// `NotRegistered` if nothing was registered for `T`.
    pub fn get<T: Any + Send + Sync>(&self) -> RegistryResult<Arc<T>> {
        let resolved = {
            let entries = self.entries.read().map_err(|_| RegistryError::Poisoned)?;
            match entries.get(&TypeId::of::<T>()) {
                Some(Registration::Singleton(instance)) => Resolved::Instance(Arc::clone(instance)),
                Some(Registration::Factory(factory)) => Resolved::Build(Arc::clone(factory)),
                None => return Err(RegistryError::NotRegistered(type_name::<T>())),
            }
        };

        let service = match resolved {
            Resolved::Instance(instance) => instance,
            // Lock released above: the factory may call `get` itself.
            Resolved::Build(factory) => factory(),
        };

        service
            .downcast::<T>()
            .map_err(|_| RegistryError::NotRegistered(type_name::<T>()))
    }

    /// Whether a registration exists for `T`.
    pub fn is_registered<T: Any + Send + Sync>(&self) -> bool {
        self.entries
            .read()
            .map(|entries| entries.contains_key(&TypeId::of::<T>()))
            .unwrap_or(false)
    }

    /// Drop every registration.
    pub fn clear(&self) {
        if let Ok(mut entries) = self.entries.write() {
            entries.clear();
        }
    }
}
