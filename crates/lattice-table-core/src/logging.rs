//! Logging facilities for Lattice Table.
//!
//! Lattice Table uses the `tracing` crate for instrumentation. To see logs,
//! install a tracing subscriber in your application:
//!
//! ```ignore
//! fn main() {
//!     tracing_subscriber::fmt()
//!         .with_env_filter("lattice_table=debug")
//!         .init();
//! }
//! ```
//!
//! Mutations are traced at `trace` level, template registration at `debug`,
//! and contract violations are logged at `error` right before the panic they
//! cause.

/// Span names used throughout Lattice Table for tracing.
///
/// These constants can be used to filter traces for specific subsystems.
pub mod span_names {
    /// Batched model/widget update span.
    pub const BATCH: &str = "lattice_table::batch";
    /// Widget callback dispatch span.
    pub const DISPATCH: &str = "lattice_table::dispatch";
}

/// Target names for log filtering.
///
/// Use these with `tracing` directives to filter logs by subsystem.
pub mod targets {
    /// Core vocabulary target.
    pub const CORE: &str = "lattice_table_core";
    /// Multi-index splice target.
    pub const SPLICE: &str = "lattice_table_core::splice";
    /// List manager mutation target.
    pub const MANAGER: &str = "lattice_table::manager";
    /// Template registry target.
    pub const REGISTRY: &str = "lattice_table::registry";
    /// Widget callback dispatch target.
    pub const DISPATCH: &str = "lattice_table::dispatch";
}
