//! The structured operation description consumed by the `run` command.
//!
//! A request decodes identically whether it arrived as JSON or YAML; the
//! CLI is a thin consumer that only wires this into the stereotype entry
//! points in `amortiza-engine`.

use amortiza_core::daycounts::DayCountConvention;
use amortiza_core::types::Date;
use amortiza_engine::prelude::*;
use amortiza_indexes::{IndexCode, InMemoryBackend, RangedIndex};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::error::{CliError, CliResult};

/// Which stereotype to run.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Stereotype {
    /// Principal and interest due in a single terminal payment.
    Bullet,
    /// Interest settled monthly, principal due with the final installment.
    MonthlyInterest,
    /// Constant monthly installments (Price-table/SAC-style constant payment).
    PriceTable,
    /// A caller-supplied custom schedule.
    Free,
}

/// Which sequence to produce.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputKind {
    /// A payment schedule.
    Payments,
    /// A daily-return series.
    Daily,
}

/// A variable-index configuration, as given in a request.
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct VariableIndexSpec {
    /// The index code.
    pub code: IndexCode,
    /// Percentage of the published index applied.
    pub percentage: Decimal,
}

/// One unscheduled cashflow, as given in a request.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct UnscheduledSpec {
    /// The cashflow date.
    pub date: Date,
    /// The value paid, or `null` to settle the full remaining balance.
    pub value: Option<Decimal>,
}

/// One entry of a Free-stereotype custom schedule.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ScheduleEntrySpec {
    /// The scheduled date.
    pub date: Date,
    /// Fraction of original principal amortized at this entry.
    pub amortization_ratio: Decimal,
    /// Whether interest accrued this period is settled immediately.
    pub amortizes_interest: bool,
}

/// Daily, monthly, and savings-range observations to preload an in-memory
/// index backend with. Absent when the operation is fixed-rate.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct IndexDataSpec {
    /// Daily business-day observations, e.g. CDI.
    #[serde(default)]
    pub daily: Vec<(IndexCode, Date, Decimal)>,
    /// Monthly observations, e.g. IPCA.
    #[serde(default)]
    pub monthly: Vec<(IndexCode, i32, u32, Decimal)>,
    /// Savings-index monthly ranges.
    #[serde(default)]
    pub savings: Vec<(Date, Date, Decimal)>,
}

impl IndexDataSpec {
    fn into_backend(self) -> InMemoryBackend {
        let mut backend = InMemoryBackend::new();
        for (code, date, rate) in self.daily {
            backend.add_daily(code, date, rate);
        }
        for (code, year, month, value) in self.monthly {
            backend.add_monthly(code, year, month, value);
        }
        for (start, end, rate) in self.savings {
            backend.add_savings_range(RangedIndex::new(start, end, rate));
        }
        backend
    }
}

/// The full structured operation description.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct OperationSpec {
    /// The amortization stereotype to run.
    pub stereotype: Stereotype,
    /// Which sequence to produce.
    pub output: OutputKind,
    /// Principal disbursed at `zero_date`.
    pub principal: Decimal,
    /// Nominal annual rate, as a percentage.
    pub apy: Decimal,
    /// The day-count convention tag (`"360"`, `"365"`, `"30/360"`, `"252"`).
    pub convention: String,
    /// Disbursement date.
    pub zero_date: Date,
    /// Term in months. Ignored for `free`.
    #[serde(default)]
    pub term: Option<u32>,
    /// Optional anniversary date shifting the schedule's cadence.
    #[serde(default)]
    pub anniversary: Option<Date>,
    /// The variable-rate index, if any.
    #[serde(default)]
    pub variable: Option<VariableIndexSpec>,
    /// Unscheduled prepayments/settlements.
    #[serde(default)]
    pub unscheduled: Vec<UnscheduledSpec>,
    /// A caller-supplied custom schedule. Required for `free`.
    #[serde(default)]
    pub free_schedule: Option<Vec<ScheduleEntrySpec>>,
    /// Whether interest is exempt from revenue tax. Ignored for `daily`.
    #[serde(default)]
    pub tax_exempt: bool,
    /// Which interest figure `Payment::gain` reports. Ignored for `daily`.
    #[serde(default)]
    pub gain_output: GainOutput,
    /// Index observations preloading the in-memory backend.
    #[serde(default)]
    pub index_data: IndexDataSpec,
}

impl OperationSpec {
    fn variable_index(&self) -> Option<VariableIndex> {
        self.variable.map(|v| VariableIndex { code: v.code, percentage: v.percentage })
    }

    fn unscheduled_entries(&self) -> Vec<Bare> {
        self.unscheduled
            .iter()
            .map(|u| match u.value {
                Some(value) => Bare::new(u.date, value),
                None => Bare::settle_remaining(u.date),
            })
            .collect()
    }

    fn params(&self, convention: DayCountConvention) -> OperationParams {
        OperationParams {
            principal: self.principal,
            apy: self.apy,
            convention,
            variable: self.variable_index(),
            calc_date: None,
            tax_exempt: self.tax_exempt,
            gain_output: self.gain_output,
        }
    }

    /// Runs this operation, dispatching to the requested stereotype and
    /// output kind.
    pub fn run(&self) -> CliResult<RunOutput> {
        let convention = DayCountConvention::from_str(self.convention.trim())
            .map_err(|e| CliError::InvalidRequest(e.to_string()))?;
        let params = self.params(convention);
        let unscheduled = self.unscheduled_entries();
        let mut backend = self.index_data.clone().into_backend();
        let calendar = default_calendar();

        let term = || {
            self.term
                .ok_or_else(|| CliError::InvalidRequest("this stereotype requires `term`".into()))
        };

        match (self.stereotype, self.output) {
            (Stereotype::Bullet, OutputKind::Payments) => Ok(RunOutput::Payments(bullet_payments(
                &params,
                self.zero_date,
                term()?,
                self.anniversary,
                None,
                &unscheduled,
                &mut backend,
                &calendar,
            )?)),
            (Stereotype::Bullet, OutputKind::Daily) => Ok(RunOutput::Daily(bullet_daily(
                &params,
                self.zero_date,
                term()?,
                self.anniversary,
                None,
                &unscheduled,
                &mut backend,
                &calendar,
            )?)),
            (Stereotype::MonthlyInterest, OutputKind::Payments) => {
                Ok(RunOutput::Payments(monthly_interest_payments(
                    &params,
                    self.zero_date,
                    term()?,
                    self.anniversary,
                    &unscheduled,
                    &mut backend,
                    &calendar,
                )?))
            }
            (Stereotype::MonthlyInterest, OutputKind::Daily) => Ok(RunOutput::Daily(monthly_interest_daily(
                &params,
                self.zero_date,
                term()?,
                self.anniversary,
                &unscheduled,
                &mut backend,
                &calendar,
            )?)),
            (Stereotype::PriceTable, OutputKind::Payments) => Ok(RunOutput::Payments(price_table_payments(
                &params,
                self.zero_date,
                term()?,
                self.anniversary,
                &unscheduled,
                &mut backend,
                &calendar,
            )?)),
            (Stereotype::PriceTable, OutputKind::Daily) => Ok(RunOutput::Daily(price_table_daily(
                &params,
                self.zero_date,
                term()?,
                self.anniversary,
                &unscheduled,
                &mut backend,
                &calendar,
            )?)),
            (Stereotype::Free, OutputKind::Payments) => {
                let schedule = self.free_schedule_entries()?;
                Ok(RunOutput::Payments(free_payments(&params, schedule, &unscheduled, &mut backend, &calendar)?))
            }
            (Stereotype::Free, OutputKind::Daily) => {
                let schedule = self.free_schedule_entries()?;
                Ok(RunOutput::Daily(free_daily(&params, schedule, &unscheduled, &mut backend, &calendar)?))
            }
        }
    }

    fn free_schedule_entries(&self) -> CliResult<Vec<Amortization>> {
        let entries = self
            .free_schedule
            .as_ref()
            .ok_or_else(|| CliError::InvalidRequest("the free stereotype requires `free_schedule`".into()))?;
        Ok(entries
            .iter()
            .map(|e| Amortization::new(e.date, e.amortization_ratio, e.amortizes_interest))
            .collect())
    }
}

/// The result of running an [`OperationSpec`].
pub enum RunOutput {
    /// A payment schedule.
    Payments(Vec<PriceAdjustedPayment>),
    /// A daily-return series.
    Daily(Vec<DailyReturn>),
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_bullet_request_runs_end_to_end() {
        let spec = OperationSpec {
            stereotype: Stereotype::Bullet,
            output: OutputKind::Payments,
            principal: dec!(120000),
            apy: dec!(12),
            convention: "360".to_string(),
            zero_date: Date::from_ymd(2022, 1, 1).unwrap(),
            term: Some(12),
            anniversary: None,
            variable: None,
            unscheduled: Vec::new(),
            free_schedule: None,
            tax_exempt: false,
            gain_output: GainOutput::Deferred,
            index_data: IndexDataSpec::default(),
        };

        match spec.run().unwrap() {
            RunOutput::Payments(payments) => {
                assert_eq!(payments.len(), 1);
                assert_eq!(payments[0].payment.bal, Decimal::ZERO);
            }
            RunOutput::Daily(_) => panic!("expected a payment schedule"),
        }
    }

    #[test]
    fn test_free_request_without_schedule_is_rejected() {
        let spec = OperationSpec {
            stereotype: Stereotype::Free,
            output: OutputKind::Payments,
            principal: dec!(1000),
            apy: dec!(10),
            convention: "360".to_string(),
            zero_date: Date::from_ymd(2022, 1, 1).unwrap(),
            term: None,
            anniversary: None,
            variable: None,
            unscheduled: Vec::new(),
            free_schedule: None,
            tax_exempt: false,
            gain_output: GainOutput::Deferred,
            index_data: IndexDataSpec::default(),
        };

        assert!(spec.run().is_err());
    }

    #[test]
    fn test_bad_convention_tag_is_rejected() {
        let spec = OperationSpec {
            stereotype: Stereotype::Bullet,
            output: OutputKind::Payments,
            principal: dec!(1000),
            apy: dec!(10),
            convention: "not-a-convention".to_string(),
            zero_date: Date::from_ymd(2022, 1, 1).unwrap(),
            term: Some(12),
            anniversary: None,
            variable: None,
            unscheduled: Vec::new(),
            free_schedule: None,
            tax_exempt: false,
            gain_output: GainOutput::Deferred,
            index_data: IndexDataSpec::default(),
        };
        assert!(spec.run().is_err());
    }
}
