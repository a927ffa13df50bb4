//! In-memory storage implementation.
//!
//! Thread-safe store guarded by `tokio` read/write locks, used by the
//! service binary, tests and benchmarks.

use std::collections::{BTreeMap, HashMap};
use std::fs;
use std::path::Path;

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use super::PayrollStore;
use crate::error::{EngineError, EngineResult};
use crate::models::{
    AttendanceRecord, Employee, PayrollFilter, PayrollRecord, PayrollStatus,
};

/// Employees and attendance to preload into a [`MemoryStore`].
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedData {
    /// Employees.
    #[serde(default)]
    pub employees: Vec<Employee>,
    /// Attendance records.
    #[serde(default)]
    pub attendance: Vec<AttendanceRecord>,
}

type PeriodKey = (String, u32, i32);

#[derive(Debug, Default)]
struct PayrollTable {
    records: HashMap<Uuid, PayrollRecord>,
    // unique index on (employee_id, month, year)
    by_period: HashMap<PeriodKey, Uuid>,
}

/// In-memory [`PayrollStore`].
///
/// Payroll records live behind a single write lock together with their
/// period index, so the duplicate check and the insert happen atomically.
#[derive(Debug, Default)]
pub struct MemoryStore {
    employees: RwLock<BTreeMap<String, Employee>>,
    attendance: RwLock<HashMap<String, Vec<AttendanceRecord>>>,
    payroll: RwLock<PayrollTable>,
}

impl MemoryStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a store preloaded with seed data.
    pub fn with_seed(seed: SeedData) -> Self {
        let mut employees = BTreeMap::new();
        for employee in seed.employees {
            employees.insert(employee.id.clone(), employee);
        }

        let mut attendance: HashMap<String, Vec<AttendanceRecord>> = HashMap::new();
        for record in seed.attendance {
            attendance
                .entry(record.employee_id.clone())
                .or_default()
                .push(record);
        }

        Self {
            employees: RwLock::new(employees),
            attendance: RwLock::new(attendance),
            payroll: RwLock::new(PayrollTable::default()),
        }
    }

    /// Loads seed data from a JSON file.
    pub fn from_seed_file<P: AsRef<Path>>(path: P) -> EngineResult<Self> {
        let path = path.as_ref();
        let path_str = path.display().to_string();

        let content = fs::read_to_string(path).map_err(|_| EngineError::ConfigNotFound {
            path: path_str.clone(),
        })?;
        let seed: SeedData =
            serde_json::from_str(&content).map_err(|e| EngineError::ConfigParseError {
                path: path_str,
                message: e.to_string(),
            })?;

        tracing::info!(
            path = %path.display(),
            employees = seed.employees.len(),
            attendance = seed.attendance.len(),
            "Loaded seed data"
        );
        Ok(Self::with_seed(seed))
    }

    /// Adds or replaces an employee.
    pub async fn upsert_employee(&self, employee: Employee) {
        self.employees
            .write()
            .await
            .insert(employee.id.clone(), employee);
    }

    /// Appends attendance records.
    pub async fn add_attendance(&self, records: impl IntoIterator<Item = AttendanceRecord>) {
        let mut attendance = self.attendance.write().await;
        for record in records {
            attendance
                .entry(record.employee_id.clone())
                .or_default()
                .push(record);
        }
    }

    /// Number of payroll records held.
    pub async fn payroll_count(&self) -> usize {
        self.payroll.read().await.records.len()
    }
}

#[async_trait]
impl PayrollStore for MemoryStore {
    async fn find_employees(&self, ids: Option<&[String]>) -> EngineResult<Vec<Employee>> {
        let employees = self.employees.read().await;
        Ok(match ids {
            Some(ids) => ids.iter().filter_map(|id| employees.get(id)).cloned().collect(),
            None => employees.values().cloned().collect(),
        })
    }

    async fn find_attendance(
        &self,
        employee_id: &str,
        from: NaiveDate,
        to: NaiveDate,
    ) -> EngineResult<Vec<AttendanceRecord>> {
        let attendance = self.attendance.read().await;
        Ok(attendance
            .get(employee_id)
            .map(|records| {
                records
                    .iter()
                    .filter(|r| r.date >= from && r.date <= to)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default())
    }

    async fn find_payroll(
        &self,
        employee_id: &str,
        month: u32,
        year: i32,
    ) -> EngineResult<Option<PayrollRecord>> {
        let table = self.payroll.read().await;
        let key = (employee_id.to_string(), month, year);
        Ok(table
            .by_period
            .get(&key)
            .and_then(|id| table.records.get(id))
            .cloned())
    }

    async fn insert_payroll(&self, record: PayrollRecord) -> EngineResult<PayrollRecord> {
        let mut table = self.payroll.write().await;
        let key = record.period_key();

        if table.by_period.contains_key(&key) {
            return Err(EngineError::StorageConflict {
                employee_id: record.employee_id,
                month: record.month,
                year: record.year,
            });
        }

        table.by_period.insert(key, record.id);
        table.records.insert(record.id, record.clone());
        Ok(record)
    }

    async fn get_payroll(&self, id: Uuid) -> EngineResult<Option<PayrollRecord>> {
        Ok(self.payroll.read().await.records.get(&id).cloned())
    }

    async fn list_payroll(&self, filter: &PayrollFilter) -> EngineResult<Vec<PayrollRecord>> {
        let table = self.payroll.read().await;
        Ok(table
            .records
            .values()
            .filter(|r| filter.matches(r))
            .cloned()
            .collect())
    }

    async fn update_payroll_status(
        &self,
        id: Uuid,
        status: PayrollStatus,
    ) -> EngineResult<PayrollRecord> {
        let mut table = self.payroll.write().await;
        let record = table
            .records
            .get_mut(&id)
            .ok_or_else(|| EngineError::PayrollNotFound { id: id.to_string() })?;

        if !record.status.can_transition_to(status) {
            return Err(EngineError::InvalidStatusTransition {
                from: record.status,
                to: status,
            });
        }

        record.status = status;
        Ok(record.clone())
    }

    async fn delete_payroll(&self, id: Uuid) -> EngineResult<PayrollRecord> {
        let mut table = self.payroll.write().await;
        let status = table
            .records
            .get(&id)
            .map(|r| r.status)
            .ok_or_else(|| EngineError::PayrollNotFound { id: id.to_string() })?;

        if status == PayrollStatus::Paid {
            return Err(EngineError::PayrollLocked {
                id: id.to_string(),
                status,
            });
        }

        let record = table
            .records
            .remove(&id)
            .ok_or_else(|| EngineError::PayrollNotFound { id: id.to_string() })?;
        table.by_period.remove(&record.period_key());
        Ok(record)
    }
}
