//! The payroll generation orchestrator.

use std::collections::HashSet;
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::calculation::{PayAdjustments, aggregate_attendance, compute_wages};
use crate::config::{ConfigLoader, EngineSettings, PolicyResolver, ResolvedPolicy};
use crate::error::{EngineError, EngineResult};
use crate::models::{Employee, PayPeriod, PayrollRecord};
use crate::storage::PayrollStore;

use super::report::{
    EmployeeFailure, EmployeeWarning, GenerationReport, GenerationRequest, SkipReason,
    SkippedEmployee,
};

/// What happened to one employee during a batch.
enum EmployeeOutcome {
    Created(PayrollRecord, Vec<EmployeeWarning>),
    Skipped(SkippedEmployee),
}

/// Generates payroll records for a period.
///
/// Generation is idempotent per `(employee_id, month, year)`: running it
/// again for a period only fills in employees that have no record yet and
/// never overwrites an existing one. The store's unique insert is the
/// authority; the existence check made before computing is a shortcut, and
/// an insert rejected because a concurrent request won is reported as a
/// skip.
#[derive(Clone)]
pub struct PayrollGenerator {
    store: Arc<dyn PayrollStore>,
    resolver: PolicyResolver,
    settings: EngineSettings,
}

impl PayrollGenerator {
    /// Creates a generator over a store with the given policies and settings.
    pub fn new(
        store: Arc<dyn PayrollStore>,
        resolver: PolicyResolver,
        settings: EngineSettings,
    ) -> Self {
        Self {
            store,
            resolver,
            settings,
        }
    }

    /// Creates a generator using the policies and settings of a loaded configuration.
    pub fn from_loader(store: Arc<dyn PayrollStore>, loader: &ConfigLoader) -> Self {
        Self::new(store, loader.policy_resolver(), loader.settings().clone())
    }

    /// The policy resolver in use.
    pub fn resolver(&self) -> &PolicyResolver {
        &self.resolver
    }

    /// Generates payroll for every requested employee.
    ///
    /// Employees are processed one at a time. Each employee's computation is
    /// isolated: a failure is recorded on the report and the batch moves on.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPeriod` for an out-of-range month or year, and
    /// `PolicyUnavailable` when `strict_policy` is set and no configured
    /// policy is in force. Both are raised before any employee is touched.
    /// Failing to list employees is also returned as an error.
    pub async fn generate(&self, request: &GenerationRequest) -> EngineResult<GenerationReport> {
        let started = Instant::now();
        let period = PayPeriod::new(request.month, request.year)?;

        let resolved = self.resolver.resolve(&period);
        if request.strict_policy && resolved.is_default() {
            return Err(EngineError::PolicyUnavailable {
                month: period.month(),
                year: period.year(),
            });
        }

        info!(
            month = period.month(),
            year = period.year(),
            policy = %resolved.label(),
            "Starting payroll generation"
        );

        let mut report = GenerationReport {
            month: period.month(),
            year: period.year(),
            created_count: 0,
            records: Vec::new(),
            skipped: Vec::new(),
            failures: Vec::new(),
            warnings: Vec::new(),
            policy: resolved.source.clone(),
        };

        let employees = self.candidates(request, &mut report).await?;
        let no_adjustments = PayAdjustments::default();

        for employee in &employees {
            let adjustments = request
                .adjustments
                .get(&employee.id)
                .unwrap_or(&no_adjustments);

            match self
                .generate_for(employee, &period, &resolved, adjustments)
                .await
            {
                Ok(EmployeeOutcome::Created(record, warnings)) => {
                    report.records.push(record);
                    report.warnings.extend(warnings);
                }
                Ok(EmployeeOutcome::Skipped(skipped)) => report.skipped.push(skipped),
                Err(error) => {
                    warn!(
                        employee_id = %employee.id,
                        month = period.month(),
                        year = period.year(),
                        error = %error,
                        "Payroll generation failed for employee"
                    );
                    report
                        .failures
                        .push(EmployeeFailure::from_error(&employee.id, &error));
                }
            }
        }

        report.created_count = report.records.len();

        info!(
            month = period.month(),
            year = period.year(),
            created_count = report.created_count,
            skipped_count = report.skipped.len(),
            failure_count = report.failures.len(),
            duration_us = started.elapsed().as_micros(),
            "Payroll generation completed"
        );

        Ok(report)
    }

    /// Loads the employees to process, recording unknown requested ids as failures.
    async fn candidates(
        &self,
        request: &GenerationRequest,
        report: &mut GenerationReport,
    ) -> EngineResult<Vec<Employee>> {
        let requested = match request.employee_ids.as_deref() {
            Some(ids) if !ids.is_empty() => ids,
            _ => return self.store.find_employees(None).await,
        };

        let mut seen = HashSet::new();
        let ids: Vec<String> = requested
            .iter()
            .filter(|id| seen.insert(id.as_str()))
            .cloned()
            .collect();

        let employees = self.store.find_employees(Some(ids.as_slice())).await?;
        let found: HashSet<&str> = employees.iter().map(|e| e.id.as_str()).collect();

        for id in ids.iter().filter(|id| !found.contains(id.as_str())) {
            let error = EngineError::EmployeeNotFound {
                employee_id: id.clone(),
            };
            warn!(employee_id = %id, "Requested employee does not exist");
            report.failures.push(EmployeeFailure::from_error(id, &error));
        }

        Ok(employees)
    }

    async fn generate_for(
        &self,
        employee: &Employee,
        period: &PayPeriod,
        resolved: &ResolvedPolicy,
        adjustments: &PayAdjustments,
    ) -> EngineResult<EmployeeOutcome> {
        if let Some(existing) = self
            .store
            .find_payroll(&employee.id, period.month(), period.year())
            .await?
        {
            debug!(
                employee_id = %employee.id,
                payroll_id = %existing.id,
                "Payroll already generated, skipping"
            );
            return Ok(EmployeeOutcome::Skipped(SkippedEmployee {
                employee_id: employee.id.clone(),
                reason: SkipReason::AlreadyGenerated,
                existing_id: Some(existing.id),
            }));
        }

        let attendance = self
            .store
            .find_attendance(&employee.id, period.start_date(), period.end_date())
            .await?;
        let summary = aggregate_attendance(
            &employee.id,
            &attendance,
            period,
            self.settings.unrecorded_days,
        );
        let breakdown = compute_wages(employee, &summary, &resolved.policy, adjustments)?;

        debug!(
            employee_id = %employee.id,
            effective_days = %breakdown.effective_days,
            gross_salary = %breakdown.gross_salary,
            net_salary = %breakdown.net_salary,
            "Computed wages"
        );

        let warnings: Vec<EmployeeWarning> = breakdown
            .audit
            .warnings
            .iter()
            .map(|w| {
                warn!(
                    employee_id = %employee.id,
                    code = %w.code,
                    "{}", w.message
                );
                EmployeeWarning {
                    employee_id: employee.id.clone(),
                    code: w.code.clone(),
                    message: w.message.clone(),
                }
            })
            .collect();

        let record = PayrollRecord::pending(
            &employee.id,
            period,
            &summary,
            employee.base_salary,
            &breakdown,
            resolved.label(),
        );

        match self.store.insert_payroll(record).await {
            Ok(record) => Ok(EmployeeOutcome::Created(record, warnings)),
            Err(EngineError::StorageConflict { .. }) => {
                warn!(
                    employee_id = %employee.id,
                    month = period.month(),
                    year = period.year(),
                    "Payroll inserted concurrently by another request, skipping"
                );
                let existing_id = match self
                    .store
                    .find_payroll(&employee.id, period.month(), period.year())
                    .await
                {
                    Ok(existing) => existing.map(|r| r.id),
                    Err(e) => {
                        warn!(
                            employee_id = %employee.id,
                            error = %e,
                            "Failed to look up existing payroll after insert conflict"
                        );
                        None
                    }
                };
                Ok(EmployeeOutcome::Skipped(SkippedEmployee {
                    employee_id: employee.id.clone(),
                    reason: SkipReason::LostInsertRace,
                    existing_id,
                }))
            }
            Err(error) => Err(error),
        }
    }
}
