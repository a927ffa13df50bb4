//! Employee model.
//!
//! Employees are owned by HR administration and are read-only to the engine.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{EngineError, EngineResult};

/// Largest monetary amount accepted as input, one trillion.
///
/// Keeps every derived figure (annualized income, percentages of it) well
/// inside `Decimal` range.
pub const MAX_MONEY_AMOUNT: Decimal = Decimal::from_parts(3_567_587_328, 232, 0, false, 0);

/// Represents an employee as seen by the payroll engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Employee {
    /// Unique identifier for the employee.
    pub id: String,
    /// Display name of the employee.
    #[serde(default)]
    pub name: String,
    /// The monthly base salary.
    pub base_salary: Decimal,
    /// The full monthly variable pay available when the sales target is met.
    #[serde(default)]
    pub variable_pay: Option<Decimal>,
    /// The monthly sales target that variable pay is measured against.
    #[serde(default)]
    pub sales_target: Option<Decimal>,
}

impl Employee {
    /// Creates an employee with only a base salary.
    ///
    /// # Example
    ///
    /// ```
    /// use payroll_engine::models::Employee;
    /// use rust_decimal::Decimal;
    ///
    /// let employee = Employee::new("emp_001", Decimal::new(50_000, 0));
    /// assert!(employee.variable_pay.is_none());
    /// ```
    pub fn new(id: impl Into<String>, base_salary: Decimal) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            base_salary,
            variable_pay: None,
            sales_target: None,
        }
    }

    /// Checks the monetary fields the calculator relies on.
    ///
    /// Amounts must be non-negative and at most [`MAX_MONEY_AMOUNT`].
    pub fn validate(&self) -> EngineResult<()> {
        check_amount(&self.id, "base salary", self.base_salary)?;
        if let Some(variable_pay) = self.variable_pay {
            check_amount(&self.id, "variable pay", variable_pay)?;
        }
        if let Some(sales_target) = self.sales_target {
            check_amount(&self.id, "sales target", sales_target)?;
        }
        Ok(())
    }
}

/// Rejects a negative or oversized input amount for an employee.
pub(crate) fn check_amount(employee_id: &str, field: &str, amount: Decimal) -> EngineResult<()> {
    let message = if amount.is_sign_negative() && !amount.is_zero() {
        format!("{} cannot be negative", field)
    } else if amount > MAX_MONEY_AMOUNT {
        format!("{} exceeds {}", field, MAX_MONEY_AMOUNT)
    } else {
        return Ok(());
    };

    Err(EngineError::InvalidEmployee {
        employee_id: employee_id.to_string(),
        message,
    })
}
