use std::collections::HashMap;
use std::fmt;

use crate::config::TypedConfig;
use crate::error::{CreateError, RegistrationError};

/// Builds a `T` from its configuration block.
pub type Constructor<T, C, E> = Box<dyn Fn(&C) -> Result<T, E> + Send + Sync>;

/// Registration phase of a [`Registry`].
///
/// All constructors are inserted here during startup; [`build`](Self::build)
/// then freezes the table. Nothing can be registered once lookups begin.
pub struct RegistryBuilder<T, C, E> {
    kind: &'static str,
    constructors: HashMap<String, Constructor<T, C, E>>,
}

impl<T, C, E> RegistryBuilder<T, C, E> {
    /// `kind` labels the pluggable family in errors and logs (e.g. `"privatekey"`).
    pub fn new(kind: &'static str) -> Self {
        Self {
            kind,
            constructors: HashMap::new(),
        }
    }

    /// Makes `constructor` available under `name`.
    ///
    /// An empty or already-registered name is a wiring defect and yields a
    /// [`RegistrationError`], which callers must treat as fatal.
    pub fn register<F>(
        &mut self,
        name: impl Into<String>,
        constructor: F,
    ) -> Result<&mut Self, RegistrationError>
    where
        F: Fn(&C) -> Result<T, E> + Send + Sync + 'static,
    {
        let name = name.into();
        if name.is_empty() {
            return Err(RegistrationError::EmptyName { kind: self.kind });
        }
        if self.constructors.contains_key(&name) {
            return Err(RegistrationError::Duplicate {
                kind: self.kind,
                name,
            });
        }

        tracing::debug!(kind = self.kind, name = %name, "registered constructor");
        self.constructors.insert(name, Box::new(constructor));
        Ok(self)
    }

    pub fn build(self) -> Registry<T, C, E> {
        Registry {
            kind: self.kind,
            constructors: self.constructors,
        }
    }
}

/// Read-only table mapping a configured type name to its constructor.
pub struct Registry<T, C, E> {
    kind: &'static str,
    constructors: HashMap<String, Constructor<T, C, E>>,
}

impl<T, C, E> Registry<T, C, E> {
    pub fn kind(&self) -> &'static str {
        self.kind
    }

    pub fn contains(&self, name: &str) -> bool {
        self.constructors.contains_key(name)
    }

    /// Registered type names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.constructors.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

impl<T, C: TypedConfig, E> Registry<T, C, E> {
    /// Looks up the constructor named by `config`'s type and runs it once.
    ///
    /// The constructor's error is returned unchanged inside
    /// [`CreateError::Constructor`].
    pub fn create(&self, config: &C) -> Result<T, CreateError<E>> {
        let type_name = config.type_name();
        let Some(constructor) = self.constructors.get(type_name) else {
            tracing::warn!(
                kind = self.kind,
                type_name,
                registered = ?self.names(),
                "no constructor registered for configured type"
            );
            return Err(CreateError::UnknownType {
                kind: self.kind,
                type_name: type_name.to_string(),
            });
        };

        let component = constructor(config).map_err(CreateError::Constructor)?;
        tracing::info!(kind = self.kind, type_name, "constructed component");
        Ok(component)
    }
}

impl<T, C, E> fmt::Debug for Registry<T, C, E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("kind", &self.kind)
            .field("names", &self.names())
            .finish()
    }
}
