//! Application state for the Payroll Engine API.

use std::sync::Arc;

use crate::config::ConfigLoader;
use crate::generation::{PayrollAdmin, PayrollGenerator};
use crate::storage::PayrollStore;

/// Shared application state.
///
/// Holds the generator and the record admin, both backed by the same store.
#[derive(Clone)]
pub struct AppState {
    generator: Arc<PayrollGenerator>,
    admin: Arc<PayrollAdmin>,
}

impl AppState {
    /// Creates the state from a store and a loaded configuration.
    pub fn new(store: Arc<dyn PayrollStore>, config: &ConfigLoader) -> Self {
        Self::from_parts(
            PayrollGenerator::from_loader(Arc::clone(&store), config),
            PayrollAdmin::new(store),
        )
    }

    /// Creates the state from an already built generator and admin.
    pub fn from_parts(generator: PayrollGenerator, admin: PayrollAdmin) -> Self {
        Self {
            generator: Arc::new(generator),
            admin: Arc::new(admin),
        }
    }

    /// Returns the payroll generator.
    pub fn generator(&self) -> &PayrollGenerator {
        &self.generator
    }

    /// Returns the record admin.
    pub fn admin(&self) -> &PayrollAdmin {
        &self.admin
    }
}
