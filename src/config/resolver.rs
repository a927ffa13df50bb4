//! Compensation policy resolution.
//!
//! A policy applies from its `effective_from` date until the next policy
//! takes effect. The resolver picks the policy in force on the first day of
//! the pay period, so regenerating a past period reuses the policy that was
//! in force for it rather than whichever one was created last.

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::PayPeriod;

use super::types::{CompensationPolicy, PayrollConfig};

/// Where a resolved policy came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "source", rename_all = "snake_case")]
pub enum PolicySource {
    /// A configured policy in force for the period.
    Configured {
        /// The policy name.
        name: String,
        /// The date the policy took effect.
        effective_from: NaiveDate,
    },
    /// No configured policy covered the period; the built-in default applied.
    Default,
}

/// A policy together with the reason it was chosen.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPolicy {
    /// The policy to compute with.
    pub policy: CompensationPolicy,
    /// Where it came from.
    pub source: PolicySource,
}

impl ResolvedPolicy {
    /// Returns true if the built-in default was used.
    pub fn is_default(&self) -> bool {
        self.source == PolicySource::Default
    }

    /// Short label stored on generated payroll records.
    pub fn label(&self) -> String {
        match &self.source {
            PolicySource::Configured {
                name,
                effective_from,
            } => format!("{}@{}", name, effective_from),
            PolicySource::Default => "default".to_string(),
        }
    }
}

/// Selects the compensation policy in force for a pay period.
///
/// # Example
///
/// ```
/// use payroll_engine::config::PolicyResolver;
/// use payroll_engine::models::PayPeriod;
///
/// let resolver = PolicyResolver::default();
/// let resolved = resolver.resolve(&PayPeriod::new(1, 2026).unwrap());
/// assert!(resolved.is_default());
/// ```
#[derive(Debug, Clone, Default)]
pub struct PolicyResolver {
    /// Policies sorted by `effective_from`, oldest first.
    policies: Vec<CompensationPolicy>,
}

impl PolicyResolver {
    /// Builds a resolver over a validated configuration.
    pub fn from_config(config: &PayrollConfig) -> Self {
        Self {
            policies: config.policies().to_vec(),
        }
    }

    /// Resolves the policy for `period`, falling back to
    /// [`CompensationPolicy::fallback`] when none is in force.
    pub fn resolve(&self, period: &PayPeriod) -> ResolvedPolicy {
        let start = period.start_date();
        match self.policies.iter().rfind(|p| p.effective_from <= start) {
            Some(policy) => ResolvedPolicy {
                policy: policy.clone(),
                source: PolicySource::Configured {
                    name: policy.name.clone(),
                    effective_from: policy.effective_from,
                },
            },
            None => {
                tracing::debug!(
                    month = period.month(),
                    year = period.year(),
                    "No compensation policy in force, using defaults"
                );
                ResolvedPolicy {
                    policy: CompensationPolicy::fallback(),
                    source: PolicySource::Default,
                }
            }
        }
    }
}
