use chrono::NaiveDate;

use crate::loan::LoanDetails;
use crate::schedule::{accelerated_schedule, standard_schedule, ExtraPayments, PaymentRow};

/// Standard vs. accelerated run of the same loan, with the summary deltas
/// the caller displays. Recomputed from scratch whenever either input
/// changes; nothing in here is updated incrementally.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ComparisonResult {
    pub standard_schedule: Vec<PaymentRow>,
    pub accelerated_schedule: Vec<PaymentRow>,
    pub standard_total_interest: f64,
    pub accelerated_total_interest: f64,
    pub standard_payoff_date: NaiveDate,
    pub accelerated_payoff_date: NaiveDate,
    pub interest_saved: f64,
    /// May be 0 or negative when acceleration is ineffective.
    pub time_saved_months: i64,
}

impl ComparisonResult {
    /// Months saved split into whole years and remaining months.
    pub fn time_saved(&self) -> (i64, i64) {
        (self.time_saved_months / 12, self.time_saved_months % 12)
    }
}

/// Runs both schedules and derives the comparison figures. Pure; calling
/// twice with the same inputs yields identical results.
pub fn compare(details: &LoanDetails, extras: &ExtraPayments) -> ComparisonResult {
    let standard = standard_schedule(details);
    let accelerated = accelerated_schedule(details, extras);

    let standard_total_interest = standard.last().map_or(0., |row| row.total_interest_paid);
    let accelerated_total_interest = accelerated.last().map_or(0., |row| row.total_interest_paid);
    // a degenerate loan yields no rows; fall back to the start date
    let standard_payoff_date = standard.last().map_or(details.start_date, |row| row.date);
    let accelerated_payoff_date = accelerated.last().map_or(details.start_date, |row| row.date);

    ComparisonResult {
        standard_total_interest,
        accelerated_total_interest,
        standard_payoff_date,
        accelerated_payoff_date,
        interest_saved: standard_total_interest - accelerated_total_interest,
        time_saved_months: standard.len() as i64 - accelerated.len() as i64,
        standard_schedule: standard,
        accelerated_schedule: accelerated,
    }
}
