// ABOUTME: Pluggable resolver interface over the external instance registry.
// ABOUTME: StaticRegistry is the map-backed implementation used in embeddings and tests.

use crate::config::UnitDeploy;
use crate::host::Deployable;
use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;

/// Errors from registry lookups.
///
/// `NoInstance` and `QualifierNotFound` mean "the type is known but nothing
/// suitable is registered" and trigger the driver's default-construction
/// fallback. Everything else is fatal to the run.
#[derive(Debug, Error)]
pub enum RegistryError {
    #[error("no instance registered under name {0:?}")]
    UnknownInstance(String),

    #[error("unknown type {0:?}")]
    UnknownType(String),

    #[error("type {0:?} is known but has no registered instance")]
    NoInstance(String),

    #[error("no instance of type {type_name:?} matches qualifier {qualifier:?}")]
    QualifierNotFound { type_name: String, qualifier: String },

    #[error("{count} instances of type {type_name:?} registered, qualifier required")]
    Ambiguous { type_name: String, count: usize },

    #[error("failed to construct {type_name:?}: {message}")]
    Construction { type_name: String, message: String },
}

impl RegistryError {
    /// Whether the driver should attempt default construction of the type
    /// instead of failing the run.
    pub fn triggers_fallback(&self) -> bool {
        matches!(
            self,
            RegistryError::NoInstance(_) | RegistryError::QualifierNotFound { .. }
        )
    }
}

/// Narrow lookup interface over whatever holds live unit instances.
///
/// The orchestrator only reads; implementations must be safe for concurrent
/// lookups.
pub trait Registry: Send + Sync {
    /// All programmatically declared unit deployments, in declaration order.
    fn declared_units(&self) -> Vec<UnitDeploy>;

    /// Whether a live instance is registered under this exact name.
    fn contains_instance(&self, name: &str) -> bool;

    /// Live instance by name.
    fn instance(&self, name: &str) -> Result<Arc<dyn Deployable>, RegistryError>;

    /// Live instance by type name, optionally disambiguated by qualifier.
    fn instance_of_type(
        &self,
        type_name: &str,
        qualifier: Option<&str>,
    ) -> Result<Arc<dyn Deployable>, RegistryError>;

    /// Construct a bare instance of the type via its default constructor.
    fn construct(&self, type_name: &str) -> Result<Arc<dyn Deployable>, RegistryError>;
}

type Constructor =
    Box<dyn Fn() -> std::result::Result<Arc<dyn Deployable>, String> + Send + Sync>;

#[derive(Default)]
struct TypeEntry {
    instances: Vec<(Option<String>, Arc<dyn Deployable>)>,
    constructor: Option<Constructor>,
}

/// Map-backed registry. Populated once before the run starts.
#[derive(Default)]
pub struct StaticRegistry {
    declared: Vec<UnitDeploy>,
    instances: HashMap<String, Arc<dyn Deployable>>,
    types: HashMap<String, TypeEntry>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a unit deployment programmatically. Declared units merge
    /// ahead of config-declared units on order ties.
    pub fn declare_unit(&mut self, unit: UnitDeploy) {
        self.declared.push(unit);
    }

    /// Register a live instance under a name.
    pub fn insert_instance(&mut self, name: impl Into<String>, instance: Arc<dyn Deployable>) {
        self.instances.insert(name.into(), instance);
    }

    /// Register a live instance of a type, optionally tagged with a qualifier.
    pub fn insert_typed(
        &mut self,
        type_name: impl Into<String>,
        qualifier: Option<&str>,
        instance: Arc<dyn Deployable>,
    ) {
        self.types
            .entry(type_name.into())
            .or_default()
            .instances
            .push((qualifier.map(str::to_string), instance));
    }

    /// Register the default constructor for a type. Makes the type known
    /// even when no instance is registered.
    pub fn insert_constructor<F>(&mut self, type_name: impl Into<String>, constructor: F)
    where
        F: Fn() -> std::result::Result<Arc<dyn Deployable>, String> + Send + Sync + 'static,
    {
        self.types.entry(type_name.into()).or_default().constructor =
            Some(Box::new(constructor));
    }
}

impl Registry for StaticRegistry {
    fn declared_units(&self) -> Vec<UnitDeploy> {
        self.declared.clone()
    }

    fn contains_instance(&self, name: &str) -> bool {
        self.instances.contains_key(name)
    }

    fn instance(&self, name: &str) -> Result<Arc<dyn Deployable>, RegistryError> {
        self.instances
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::UnknownInstance(name.to_string()))
    }

    fn instance_of_type(
        &self,
        type_name: &str,
        qualifier: Option<&str>,
    ) -> Result<Arc<dyn Deployable>, RegistryError> {
        let entry = self
            .types
            .get(type_name)
            .ok_or_else(|| RegistryError::UnknownType(type_name.to_string()))?;

        if entry.instances.is_empty() {
            return Err(RegistryError::NoInstance(type_name.to_string()));
        }

        match qualifier {
            Some(q) => entry
                .instances
                .iter()
                .find(|(tag, _)| tag.as_deref() == Some(q))
                .map(|(_, instance)| instance.clone())
                .ok_or_else(|| RegistryError::QualifierNotFound {
                    type_name: type_name.to_string(),
                    qualifier: q.to_string(),
                }),
            None => {
                if entry.instances.len() > 1 {
                    return Err(RegistryError::Ambiguous {
                        type_name: type_name.to_string(),
                        count: entry.instances.len(),
                    });
                }
                Ok(entry.instances[0].1.clone())
            }
        }
    }

    fn construct(&self, type_name: &str) -> Result<Arc<dyn Deployable>, RegistryError> {
        let entry = self
            .types
            .get(type_name)
            .ok_or_else(|| RegistryError::UnknownType(type_name.to_string()))?;

        match &entry.constructor {
            Some(ctor) => ctor().map_err(|message| RegistryError::Construction {
                type_name: type_name.to_string(),
                message,
            }),
            None => Err(RegistryError::Construction {
                type_name: type_name.to_string(),
                message: "no default constructor registered".to_string(),
            }),
        }
    }
}
