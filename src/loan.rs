//! Level-payment loan schedules built on simple periodic interest.

use std::collections::HashMap;
use std::io;

use chrono::{Months, NaiveDate};
use serde::Serialize;

use crate::calc::{non_blank, parse_field, require_non_negative, round_cents, ValidationError};

pub const DEFAULT_PAYMENTS_PER_YEAR: u32 = 12;

/// Upper bound on schedule length; a 100 year weekly loan still fits.
pub const MAX_PAYMENTS: i64 = 6_000;

pub const CSV_HEADER: [&str; 6] = ["payment_no", "date", "payment", "interest", "principal", "balance"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Json,
    Csv,
}

impl ExportFormat {
    /// Anything other than `csv` falls back to JSON.
    pub fn from_field(raw: Option<&str>) -> Self {
        match non_blank(raw) {
            Some(v) if v.eq_ignore_ascii_case("csv") => ExportFormat::Csv,
            _ => ExportFormat::Json,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct LoanRequest {
    pub principal: f64,
    pub annual_rate: f64,
    pub term_years: f64,
    pub payments_per_year: u32,
    pub start_date: NaiveDate,
    pub include_schedule: bool,
    pub export: ExportFormat,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ScheduleRow {
    pub payment_no: u32,
    pub date: NaiveDate,
    pub payment: f64,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

/// Full result of amortizing a loan.
#[derive(Debug, Clone, PartialEq)]
pub struct Amortization {
    pub payment: f64,
    pub total_interest: f64,
    pub total_payment: f64,
    pub schedule: Vec<ScheduleRow>,
}

/// JSON body of the loan endpoint.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoanSummary {
    pub payment: f64,
    pub total_interest: f64,
    pub total_payment: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub schedule: Option<Vec<ScheduleRow>>,
}

fn lookup<'a>(fields: &'a HashMap<String, String>, names: &[&str]) -> Option<&'a str> {
    names
        .iter()
        .find_map(|name| fields.get(*name).map(String::as_str))
}

fn parse_payments_per_year(raw: Option<&str>) -> Result<u32, ValidationError> {
    let Some(value) = non_blank(raw) else {
        return Ok(DEFAULT_PAYMENTS_PER_YEAR);
    };
    let parsed: i64 = value.parse().map_err(|_| ValidationError::NotInteger {
        field: "payments_per_year".to_string(),
    })?;
    if parsed <= 0 {
        return Err(ValidationError::NotPositive {
            field: "payments_per_year".to_string(),
        });
    }
    u32::try_from(parsed).map_err(|_| ValidationError::NotInteger {
        field: "payments_per_year".to_string(),
    })
}

fn parse_start_date(raw: Option<&str>, today: NaiveDate) -> Result<NaiveDate, ValidationError> {
    match non_blank(raw) {
        None => Ok(today),
        Some(value) => NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
            ValidationError::InvalidDate {
                field: "start_date".to_string(),
            }
        }),
    }
}

fn parse_flag(raw: Option<&str>, default: bool) -> bool {
    match non_blank(raw) {
        None => default,
        Some(v) => matches!(v.to_ascii_lowercase().as_str(), "true" | "1" | "yes"),
    }
}

impl LoanRequest {
    /// Build a request from submitted fields.
    ///
    /// `annual_rate` falls back to `rate` and `term_years` to `time`, so the
    /// interest form's field names work here too. `today` is used when no
    /// start date is given.
    pub fn from_fields(
        fields: &HashMap<String, String>,
        today: NaiveDate,
    ) -> Result<Self, ValidationError> {
        let principal = require_non_negative(
            "principal",
            parse_field("principal", lookup(fields, &["principal"]))?,
        )?;
        let annual_rate = parse_field("annual_rate", lookup(fields, &["annual_rate", "rate"]))?;
        let term_years = parse_field("term_years", lookup(fields, &["term_years", "time"]))?;
        let payments_per_year = parse_payments_per_year(lookup(fields, &["payments_per_year"]))?;
        let start_date = parse_start_date(lookup(fields, &["start_date"]), today)?;

        Ok(Self {
            principal,
            annual_rate,
            term_years,
            payments_per_year,
            start_date,
            include_schedule: parse_flag(lookup(fields, &["include_schedule"]), true),
            export: ExportFormat::from_field(lookup(fields, &["export"])),
        })
    }

    pub fn payment_count(&self) -> Result<u32, ValidationError> {
        let n = (self.term_years * f64::from(self.payments_per_year)).round();
        if n <= 0.0 {
            return Err(ValidationError::NonPositiveTerm);
        }
        if n > MAX_PAYMENTS as f64 {
            return Err(ValidationError::TermTooLong { max: MAX_PAYMENTS });
        }
        Ok(n as u32)
    }

    pub fn periodic_rate(&self) -> f64 {
        self.annual_rate / 100.0 / f64::from(self.payments_per_year)
    }

    /// Fixed installment, rounded to cents.
    ///
    /// A rate too small to move `1 + r` off 1.0 leaves the annuity
    /// denominator at zero; such loans are split evenly like zero-rate ones.
    pub fn level_payment(&self, n_payments: u32) -> f64 {
        let r = self.periodic_rate();
        let n = f64::from(n_payments);
        let even_split = self.principal / n;
        if r == 0.0 {
            return round_cents(even_split);
        }

        let denom = 1.0 - (1.0 + r).powf(-n);
        let payment = self.principal * r / denom;
        if denom == 0.0 || !payment.is_finite() {
            round_cents(even_split)
        } else {
            round_cents(payment)
        }
    }

    /// Compute the amortization schedule.
    ///
    /// Each period's amounts are rounded to cents as they are produced. The
    /// last payment absorbs the rounding residue so the balance ends at zero.
    pub fn amortize(&self) -> Result<Amortization, ValidationError> {
        let n_payments = self.payment_count()?;
        let r = self.periodic_rate();
        let payment = self.level_payment(n_payments);

        let mut balance = self.principal;
        let mut total_interest = 0.0;
        let mut schedule = Vec::with_capacity(n_payments as usize);

        for i in 1..=n_payments {
            let interest = round_cents(balance * r);
            let (principal_paid, payment_amount) = if i == n_payments {
                let principal_paid = round_cents(balance);
                balance = 0.0;
                (principal_paid, round_cents(principal_paid + interest))
            } else {
                let principal_paid = round_cents(payment - interest);
                balance = round_cents(balance - principal_paid);
                (principal_paid, payment)
            };

            total_interest += interest;
            schedule.push(ScheduleRow {
                payment_no: i,
                date: self.payment_date(i)?,
                payment: payment_amount,
                interest,
                principal: principal_paid,
                balance,
            });
        }

        Ok(Amortization {
            payment,
            total_interest: round_cents(total_interest),
            total_payment: round_cents(self.principal + total_interest),
            schedule,
        })
    }

    /// Due date of payment `payment_no` (1-based), keeping the start day of
    /// month where the target month allows it.
    pub fn payment_date(&self, payment_no: u32) -> Result<NaiveDate, ValidationError> {
        self.start_date
            .checked_add_months(Months::new(payment_no - 1))
            .ok_or_else(|| ValidationError::DateOutOfRange {
                field: "start_date".to_string(),
            })
    }
}

impl Amortization {
    pub fn into_summary(self, include_schedule: bool) -> LoanSummary {
        LoanSummary {
            payment: self.payment,
            total_interest: self.total_interest,
            total_payment: self.total_payment,
            schedule: include_schedule.then_some(self.schedule),
        }
    }
}

/// Render schedule rows as CSV with a header line.
pub fn schedule_to_csv(rows: &[ScheduleRow]) -> Result<String, csv::Error> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(CSV_HEADER)?;
    for row in rows {
        writer.write_record([
            row.payment_no.to_string(),
            row.date.format("%Y-%m-%d").to_string(),
            format!("{:.2}", row.payment),
            format!("{:.2}", row.interest),
            format!("{:.2}", row.principal),
            format!("{:.2}", row.balance),
        ])?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| csv::Error::from(e.into_error()))?;
    String::from_utf8(bytes)
        .map_err(|e| csv::Error::from(io::Error::new(io::ErrorKind::InvalidData, e)))
}
