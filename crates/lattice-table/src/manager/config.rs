//! Manager configuration and builder.

use std::sync::{Arc, Weak};

use lattice_table_core::{Result, RowAnimation};

use super::ListManager;
use super::delegate::{ListManagerDelegate, ScrollDelegate};
use crate::host::ListHost;

/// Tunables for a [`ListManager`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ManagerConfig {
    /// Animation used when a row is removed by a committed swipe-to-delete.
    pub delete_animation: RowAnimation,
    /// Whether to attach the manager as the host's prefetch data source.
    pub prefetching: bool,
}

impl ManagerConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the swipe-to-delete animation.
    pub fn with_delete_animation(mut self, animation: RowAnimation) -> Self {
        self.delete_animation = animation;
        self
    }

    /// Enables or disables prefetching at construction.
    pub fn with_prefetching(mut self, enabled: bool) -> Self {
        self.prefetching = enabled;
        self
    }
}

/// Builder for [`ListManager`].
///
/// # Example
///
/// ```ignore
/// let manager = ListManager::builder(&host)
///     .delegate(&reorder_delegate)
///     .delete_animation(RowAnimation::Fade)
///     .prefetching(true)
///     .try_build()?;
/// ```
pub struct ListManagerBuilder {
    host: Weak<dyn ListHost>,
    config: ManagerConfig,
    delegate: Option<Weak<dyn ListManagerDelegate>>,
    scroll_delegate: Option<Weak<dyn ScrollDelegate>>,
}

impl ListManagerBuilder {
    /// Starts a builder for a manager driving `host`.
    pub fn new(host: Weak<dyn ListHost>) -> Self {
        Self {
            host,
            config: ManagerConfig::default(),
            delegate: None,
            scroll_delegate: None,
        }
    }

    /// Replaces the whole configuration.
    pub fn config(mut self, config: ManagerConfig) -> Self {
        self.config = config;
        self
    }

    /// Sets the swipe-to-delete animation.
    pub fn delete_animation(mut self, animation: RowAnimation) -> Self {
        self.config.delete_animation = animation;
        self
    }

    /// Enables prefetching once the manager is built.
    pub fn prefetching(mut self, enabled: bool) -> Self {
        self.config.prefetching = enabled;
        self
    }

    /// Attaches a reordering/section-index delegate. The manager does not
    /// keep it alive.
    pub fn delegate<D: ListManagerDelegate + 'static>(mut self, delegate: &Arc<D>) -> Self {
        let delegate = Arc::downgrade(delegate) as Weak<dyn ListManagerDelegate>;
        self.delegate = Some(delegate);
        self
    }

    /// Attaches a scroll delegate. The manager does not keep it alive.
    pub fn scroll_delegate<D: ScrollDelegate + 'static>(mut self, delegate: &Arc<D>) -> Self {
        let delegate = Arc::downgrade(delegate) as Weak<dyn ScrollDelegate>;
        self.scroll_delegate = Some(delegate);
        self
    }

    /// Builds the manager and attaches it to the host.
    ///
    /// # Errors
    ///
    /// Returns [`TableError::PrefetchingUnsupported`] if prefetching was
    /// requested and the host cannot prefetch.
    ///
    /// [`TableError::PrefetchingUnsupported`]: lattice_table_core::TableError::PrefetchingUnsupported
    pub fn try_build(self) -> Result<Arc<ListManager>> {
        let manager = ListManager::attach(self.host, self.config);
        *manager.delegate.write() = self.delegate;
        *manager.scroll_delegate.write() = self.scroll_delegate;
        if self.config.prefetching {
            manager.try_enable_prefetching()?;
        }
        Ok(manager)
    }

    /// Builds the manager and attaches it to the host.
    ///
    /// # Panics
    ///
    /// Panics if prefetching was requested and the host cannot prefetch.
    pub fn build(self) -> Arc<ListManager> {
        match self.try_build() {
            Ok(manager) => manager,
            Err(err) => super::fatal(err),
        }
    }
}
