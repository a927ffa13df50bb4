//! Configuration types for payroll generation.
//!
//! This module contains the strongly-typed configuration structures that
//! are deserialized from YAML configuration files, and the invariants a
//! compensation policy must satisfy before the engine will use it.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// How days of a period with no attendance record are treated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnrecordedDays {
    /// Count them neither as present nor as absent.
    #[default]
    Ignore,
    /// Count them as absent.
    Absent,
}

/// Engine-wide settings from `engine.yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Human-readable name of this deployment.
    pub name: String,
    /// Version label of the configuration set.
    pub version: String,
    /// Treatment of days with no attendance record.
    pub unrecorded_days: UnrecordedDays,
}

/// One progressive tax bracket.
///
/// Income in `[min, max)` is taxed at `rate_percent`; a `max` of `None`
/// means the bracket is unbounded above.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxSlab {
    /// Lower bound of the bracket (inclusive).
    pub min: Decimal,
    /// Upper bound of the bracket (exclusive), or `None` for the top bracket.
    #[serde(default)]
    pub max: Option<Decimal>,
    /// Tax rate applied to income inside the bracket.
    pub rate_percent: Decimal,
}

impl TaxSlab {
    /// Creates a bracket.
    pub fn new(min: Decimal, max: Option<Decimal>, rate_percent: Decimal) -> Self {
        Self {
            min,
            max,
            rate_percent,
        }
    }
}

/// A qualitative bonus tier reached at a given achievement percentage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BonusTier {
    /// Name of the tier (e.g., "gold").
    pub label: String,
    /// Minimum achievement, in percent of target, to reach the tier.
    pub min_achievement_percent: Decimal,
}

/// Rules for target-based variable pay.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct VariablePayRules {
    /// Share of the achievement-scaled variable pay that is paid out.
    pub payout_percentage: Decimal,
    /// Whether achievement above 100% of target increases variable pay.
    pub allow_over_achievement: bool,
    /// Upper bound on the achievement ratio when over-achievement is allowed.
    pub max_achievement_ratio: Option<Decimal>,
    /// Qualitative tiers, reported in the audit trace only.
    pub tiers: Vec<BonusTier>,
}

impl Default for VariablePayRules {
    fn default() -> Self {
        Self {
            payout_percentage: Decimal::ONE_HUNDRED,
            allow_over_achievement: false,
            max_achievement_ratio: None,
            tiers: Vec::new(),
        }
    }
}

/// Deduction and variable pay policy in force from a given date.
///
/// # Example
///
/// ```
/// use payroll_engine::config::CompensationPolicy;
/// use rust_decimal::Decimal;
///
/// let policy = CompensationPolicy::fallback();
/// assert_eq!(policy.pf_percentage, Decimal::new(12, 0));
/// assert!(policy.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompensationPolicy {
    /// Name of the policy (e.g., "fy2025").
    pub name: String,
    /// First date the policy applies to.
    pub effective_from: NaiveDate,
    /// Provident fund deduction, as a percentage of base salary.
    pub pf_percentage: Decimal,
    /// Employee insurance deduction, as a percentage of base salary.
    pub insurance_percentage: Decimal,
    /// Progressive tax brackets, ascending, starting at zero.
    pub tax_slabs: Vec<TaxSlab>,
    /// Variable pay rules.
    #[serde(default)]
    pub variable_pay: VariablePayRules,
}

/// Default provident fund percentage when no policy is configured.
pub const DEFAULT_PF_PERCENTAGE: Decimal = Decimal::from_parts(12, 0, 0, false, 0);

/// Default insurance percentage when no policy is configured (0.75%).
pub const DEFAULT_INSURANCE_PERCENTAGE: Decimal = Decimal::from_parts(75, 0, 0, false, 2);

/// Default flat tax rate when no policy is configured.
pub const DEFAULT_TAX_RATE_PERCENT: Decimal = Decimal::from_parts(10, 0, 0, false, 0);

impl CompensationPolicy {
    /// The built-in policy used when nothing is configured for a period:
    /// 12% PF, 0.75% insurance and a flat 10% tax.
    pub fn fallback() -> Self {
        Self {
            name: "default".to_string(),
            effective_from: NaiveDate::MIN,
            pf_percentage: DEFAULT_PF_PERCENTAGE,
            insurance_percentage: DEFAULT_INSURANCE_PERCENTAGE,
            tax_slabs: vec![TaxSlab::new(Decimal::ZERO, None, DEFAULT_TAX_RATE_PERCENT)],
            variable_pay: VariablePayRules::default(),
        }
    }

    /// Checks the policy invariants.
    ///
    /// Percentages must lie in `[0, 100]`. Tax slabs must start at zero, be
    /// contiguous (each `min` equals the previous `max`), have `max > min`,
    /// and end with a single unbounded slab.
    pub fn validate(&self) -> EngineResult<()> {
        check_percentage(&self.name, "pf_percentage", self.pf_percentage)?;
        check_percentage(&self.name, "insurance_percentage", self.insurance_percentage)?;

        if self.variable_pay.payout_percentage.is_sign_negative() {
            return Err(self.invalid("variable_pay.payout_percentage cannot be negative"));
        }
        if self
            .variable_pay
            .max_achievement_ratio
            .is_some_and(|r| r < Decimal::ONE)
        {
            return Err(self.invalid("variable_pay.max_achievement_ratio must be at least 1"));
        }

        let Some(first) = self.tax_slabs.first() else {
            return Err(self.invalid("at least one tax slab is required"));
        };
        if !first.min.is_zero() {
            return Err(self.invalid("the first tax slab must start at 0"));
        }

        let last_index = self.tax_slabs.len() - 1;
        let mut expected_min = Decimal::ZERO;
        for (index, slab) in self.tax_slabs.iter().enumerate() {
            check_percentage(&self.name, "tax slab rate_percent", slab.rate_percent)?;

            if slab.min != expected_min {
                return Err(self.invalid(&format!(
                    "tax slab {} starts at {} but the previous slab ends at {}",
                    index + 1,
                    slab.min,
                    expected_min
                )));
            }

            match slab.max {
                Some(max) if index == last_index => {
                    return Err(self.invalid(&format!(
                        "the last tax slab must be unbounded, found max {}",
                        max
                    )));
                }
                Some(max) if max <= slab.min => {
                    return Err(self.invalid(&format!(
                        "tax slab {} has max {} not above min {}",
                        index + 1,
                        max,
                        slab.min
                    )));
                }
                Some(max) => expected_min = max,
                None if index != last_index => {
                    return Err(self.invalid(&format!(
                        "tax slab {} is unbounded but is not the last slab",
                        index + 1
                    )));
                }
                None => {}
            }
        }

        Ok(())
    }

    fn invalid(&self, message: &str) -> EngineError {
        EngineError::InvalidPolicy {
            name: self.name.clone(),
            message: message.to_string(),
        }
    }
}

fn check_percentage(policy: &str, field: &str, value: Decimal) -> EngineResult<()> {
    if value.is_sign_negative() || value > Decimal::ONE_HUNDRED {
        return Err(EngineError::InvalidPolicy {
            name: policy.to_string(),
            message: format!("{} must be between 0 and 100, found {}", field, value),
        });
    }
    Ok(())
}

/// The complete payroll configuration loaded from YAML files.
#[derive(Debug, Clone)]
pub struct PayrollConfig {
    /// Engine settings.
    settings: EngineSettings,
    /// Compensation policies (sorted oldest first).
    policies: Vec<CompensationPolicy>,
}

impl PayrollConfig {
    /// Creates a new PayrollConfig, validating and ordering the policies.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPolicy` if any policy breaks its invariants or if two
    /// policies take effect on the same date.
    pub fn new(
        settings: EngineSettings,
        policies: Vec<CompensationPolicy>,
    ) -> EngineResult<Self> {
        for policy in &policies {
            policy.validate()?;
        }

        let mut sorted_policies = policies;
        sorted_policies.sort_by(|a, b| a.effective_from.cmp(&b.effective_from));

        if let Some(pair) = sorted_policies
            .windows(2)
            .find(|pair| pair[0].effective_from == pair[1].effective_from)
        {
            return Err(EngineError::InvalidPolicy {
                name: pair[1].name.clone(),
                message: format!(
                    "takes effect on {}, the same date as '{}'",
                    pair[1].effective_from, pair[0].name
                ),
            });
        }

        Ok(Self {
            settings,
            policies: sorted_policies,
        })
    }

    /// Returns the engine settings.
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    /// Returns all compensation policies, oldest first.
    pub fn policies(&self) -> &[CompensationPolicy] {
        &self.policies
    }
}
