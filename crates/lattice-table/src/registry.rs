//! Reuse identifiers and one-time template registration.
//!
//! Every row item names the cell template it displays with through a
//! [`ReuseKind`]. Before the host widget is asked for a cell of that kind,
//! the widget must know how to make one. The [`Registry`] takes care of
//! this, registering each dynamic template with the widget exactly once.

use std::collections::HashSet;
use std::fmt;
use std::sync::Arc;

use lattice_table_core::logging::targets;
use lattice_table_core::{Result, TableError};
use parking_lot::Mutex;

use crate::host::{CellTemplate, ListHost};
use crate::item::RowItem;

/// How a row's cell template reaches the host widget.
#[derive(Clone)]
pub enum ReuseKind {
    /// The host already knows this identifier, e.g. a prototype cell
    /// authored alongside the widget. Nothing needs to be registered.
    Prototype {
        /// The reuse identifier.
        identifier: String,
    },
    /// A template supplied at runtime, registered on first use.
    Template {
        /// The reuse identifier.
        identifier: String,
        /// Creates fresh cells for the identifier.
        template: Arc<dyn CellTemplate>,
    },
}

impl ReuseKind {
    /// A host-authored template known under `identifier`.
    pub fn prototype(identifier: impl Into<String>) -> Self {
        Self::Prototype {
            identifier: identifier.into(),
        }
    }

    /// A runtime template registered under `identifier`.
    ///
    /// Any `Fn() -> ViewHandle` closure works as a template.
    pub fn template<T>(identifier: impl Into<String>, template: T) -> Self
    where
        T: CellTemplate + 'static,
    {
        Self::Template {
            identifier: identifier.into(),
            template: Arc::new(template),
        }
    }

    /// The reuse identifier.
    pub fn identifier(&self) -> &str {
        match self {
            Self::Prototype { identifier } | Self::Template { identifier, .. } => identifier,
        }
    }

    /// Returns `true` for host-authored templates.
    pub fn is_prototype(&self) -> bool {
        matches!(self, Self::Prototype { .. })
    }
}

impl fmt::Debug for ReuseKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prototype { identifier } => {
                f.debug_struct("Prototype").field("identifier", identifier).finish()
            }
            Self::Template { identifier, .. } => f
                .debug_struct("Template")
                .field("identifier", identifier)
                .finish_non_exhaustive(),
        }
    }
}

/// Tracks which templates have been registered with the host widget.
///
/// Registration is idempotent: asking twice for the same identifier issues
/// one `register_template` call. The first template seen for an identifier
/// wins.
#[derive(Default)]
pub struct Registry {
    registered: Mutex<HashSet<String>>,
}

impl Registry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes sure `host` can materialize cells for `item`.
    ///
    /// Returns `Ok(true)` if a registration call was issued, `Ok(false)` if
    /// none was needed.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::EmptyReuseIdentifier`] if the item has no
    /// usable identifier.
    pub fn ensure_registered(&self, host: &dyn ListHost, item: &dyn RowItem) -> Result<bool> {
        self.ensure_kind_registered(host, &item.reuse_kind())
    }

    /// Makes sure `host` can materialize cells of `kind`.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::EmptyReuseIdentifier`] if `kind` has an empty
    /// identifier.
    pub fn ensure_kind_registered(&self, host: &dyn ListHost, kind: &ReuseKind) -> Result<bool> {
        if kind.identifier().is_empty() {
            return Err(TableError::EmptyReuseIdentifier);
        }
        let ReuseKind::Template {
            identifier,
            template,
        } = kind
        else {
            return Ok(false);
        };

        if !self.registered.lock().insert(identifier.clone()) {
            return Ok(false);
        }
        tracing::debug!(target: targets::REGISTRY, %identifier, "registering cell template");
        host.register_template(identifier, Arc::clone(template));
        Ok(true)
    }

    /// Returns `true` if a template was registered under `identifier`.
    pub fn is_registered(&self, identifier: &str) -> bool {
        self.registered.lock().contains(identifier)
    }

    /// Number of registered templates.
    pub fn len(&self) -> usize {
        self.registered.lock().len()
    }

    /// Returns `true` if nothing has been registered yet.
    pub fn is_empty(&self) -> bool {
        self.registered.lock().is_empty()
    }
}

impl fmt::Debug for Registry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Registry")
            .field("registered", &*self.registered.lock())
            .finish()
    }
}
