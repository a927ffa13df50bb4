//! Calculation logic for the Payroll Engine.
//!
//! This module contains the attendance aggregator and the rule functions the
//! wage calculator is built from: attendance-scaled basic pay, target-based
//! variable pay, provident fund and insurance deductions, and progressive
//! income tax. Every rule returns its figures with an audit step.

mod attendance;
mod basic_pay;
mod income_tax;
mod rounding;
mod statutory;
mod variable_pay;
mod wages;

pub use attendance::aggregate_attendance;
pub use basic_pay::{BasicPayResult, calculate_basic_pay};
pub use income_tax::{
    IncomeTaxResult, PERIODS_PER_YEAR, calculate_income_tax, progressive_annual_tax,
};
pub(crate) use rounding::checked_amount;
pub use rounding::{MONEY_DECIMAL_PLACES, round_money};
pub use statutory::{StatutoryDeductionResult, calculate_statutory_deductions};
pub use variable_pay::{VariablePayResult, calculate_variable_pay};
pub use wages::{NEGATIVE_NET_SALARY, PayAdjustments, ZERO_ATTENDANCE, compute_wages};
