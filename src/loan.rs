use chrono::{Months, NaiveDate};

/// Fixed-rate, fixed-term loan as entered by the caller. The engine never
/// mutates it; validation (positive principal, positive term) is the
/// caller's job.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LoanDetails {
    pub principal: f64,
    /// Annual nominal rate in percent (i.e., 6.0, not 0.06).
    pub annual_rate: f64,
    pub term_years: u32,
    pub start_date: NaiveDate,
}

impl LoanDetails {
    pub fn new(principal: f64, annual_rate: f64, term_years: u32, start_date: NaiveDate) -> Self {
        Self {
            principal,
            annual_rate,
            term_years,
            start_date,
        }
    }

    pub fn monthly_payment(&self) -> f64 {
        monthly_payment(self.principal, self.annual_rate, self.term_years)
    }

    pub fn monthly_rate(&self) -> f64 {
        self.annual_rate / 1200.
    }
}

// standard annuity formula: principal * r * (1+r)^n / ((1+r)^n - 1)
// with r the monthly rate and n the number of payments
pub fn monthly_payment(principal: f64, annual_rate: f64, term_years: u32) -> f64 {
    let pmt_count = (term_years * 12) as f64;
    if annual_rate == 0. {
        // straight-line, the closed form divides by zero here
        return principal / pmt_count;
    }
    let monthly_rate = annual_rate / 1200.;
    let factor = (1. + monthly_rate).powf(pmt_count);
    (principal * monthly_rate * factor) / (factor - 1.)
}

// Payment dates are always derived from the loan start date plus a whole
// number of months, so the start day-of-month carries through the schedule
// (clamped to month end where the target month is shorter).
pub(crate) fn payment_date(start: NaiveDate, offset_months: u32) -> NaiveDate {
    // only fails past chrono's year cap, far beyond the 1200-month ceiling
    start
        .checked_add_months(Months::new(offset_months))
        .unwrap_or(start)
}
