use chrono::{Datelike, NaiveDate};
use log::trace;
use std::fmt;

use crate::loan::{payment_date, LoanDetails};

/// Balance at or below this is treated as paid off; absorbs floating-point
/// residue on the final payment.
pub const BALANCE_EPSILON: f64 = 0.01;

/// Hard ceiling on simulated months (100 years). Keeps pathological inputs,
/// e.g. a payment that never covers interest, from looping forever.
pub const MAX_MONTHS: u32 = 1200;

/// How often a custom payment fires. Annual entries carry their own growth
/// percentage; one-time entries have nothing to escalate.
#[derive(Clone, Copy, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Frequency {
    OneTime,
    Annual { annual_increase_pct: Option<f64> },
}

/// A single extra principal payment rule. The anchor decides which simulated
/// months it fires in; `None` (an unparseable date at the boundary) never
/// matches.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CustomPayment {
    pub id: String,
    pub amount: f64,
    pub anchor: Option<NaiveDate>,
    pub frequency: Frequency,
}

impl CustomPayment {
    pub fn one_time(id: &str, amount: f64, anchor: &str) -> Self {
        Self {
            id: id.to_string(),
            amount,
            anchor: parse_anchor(anchor),
            frequency: Frequency::OneTime,
        }
    }

    pub fn annual(id: &str, amount: f64, anchor: &str, annual_increase_pct: Option<f64>) -> Self {
        Self {
            id: id.to_string(),
            amount,
            anchor: parse_anchor(anchor),
            frequency: Frequency::Annual {
                annual_increase_pct,
            },
        }
    }

    // Extra applied by this rule in the month containing `date`. Matching is
    // by calendar year/month only; the anchor's day is ignored.
    fn amount_for(&self, date: NaiveDate) -> f64 {
        let Some(anchor) = self.anchor else {
            return 0.;
        };
        if self.amount <= 0. {
            return 0.;
        }
        match self.frequency {
            Frequency::OneTime => {
                if date.year() == anchor.year() && date.month() == anchor.month() {
                    self.amount
                } else {
                    0.
                }
            }
            Frequency::Annual {
                annual_increase_pct,
            } => {
                if date.month() != anchor.month() || date.year() < anchor.year() {
                    return 0.;
                }
                let years_elapsed = date.year() - anchor.year();
                match annual_increase_pct {
                    Some(pct) if pct > 0. && years_elapsed > 0 => {
                        self.amount * (1. + pct / 100.).powi(years_elapsed)
                    }
                    _ => self.amount,
                }
            }
        }
    }
}

/// Anchor dates arrive as ISO strings from the persistence boundary. A
/// string that does not parse yields `None`, which the matcher treats as
/// "never fires".
pub fn parse_anchor(date: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(date, "%Y-%m-%d").ok()
}

/// Extra-principal configuration for an accelerated run.
#[derive(Clone, PartialEq, Debug, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ExtraPayments {
    /// Recurring extra applied every month, 0 to disable.
    pub monthly_extra: f64,
    /// Optional annual escalation of the recurring extra, in percent.
    pub annual_increase_pct: Option<f64>,
    pub custom_payments: Vec<CustomPayment>,
}

impl ExtraPayments {
    pub fn monthly(amount: f64) -> Self {
        Self {
            monthly_extra: amount,
            ..Self::default()
        }
    }

    // Recurring amount for a 1-based month index. The amount steps up once
    // per completed 12-month block, not continuously.
    fn monthly_amount_for(&self, month: u32) -> f64 {
        if self.monthly_extra <= 0. {
            return 0.;
        }
        let years_elapsed = (month - 1) / 12;
        match self.annual_increase_pct {
            Some(pct) if pct > 0. && years_elapsed > 0 => {
                self.monthly_extra * (1. + pct / 100.).powi(years_elapsed as i32)
            }
            _ => self.monthly_extra,
        }
    }

    fn total_for(&self, month: u32, date: NaiveDate) -> f64 {
        let mut total = self.monthly_amount_for(month);
        for payment in &self.custom_payments {
            total += payment.amount_for(date);
        }
        total
    }
}

/// One simulated month. Immutable once emitted by the generator.
#[derive(Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PaymentRow {
    /// 1-based month index.
    pub month: u32,
    pub date: NaiveDate,
    /// Total cash paid this month (principal + interest).
    pub payment: f64,
    pub principal: f64,
    pub interest: f64,
    /// Balance after this payment, never negative.
    pub remaining_balance: f64,
    pub total_interest_paid: f64,
    /// Whether any extra-payment rule fired this month.
    pub is_extra: bool,
    /// The fixed baseline payment the loan requires.
    pub min_payment: f64,
    /// Extra principal applied this month, clamped on the payoff row.
    pub extra_payment: f64,
}

impl fmt::Display for PaymentRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "month {}, date {}, payment ${:.2}, principal ${:.2}, interest ${:.2}, extra ${:.2}, balance ${:.2}",
            self.month,
            self.date,
            self.payment,
            self.principal,
            self.interest,
            self.extra_payment,
            self.remaining_balance
        )
    }
}

/// Baseline schedule: the required payment only, no extras.
pub fn standard_schedule(details: &LoanDetails) -> Vec<PaymentRow> {
    simulate(details, |_, _| 0.)
}

/// Accelerated schedule: recurring and custom extras applied on top of the
/// required payment.
pub fn accelerated_schedule(details: &LoanDetails, extras: &ExtraPayments) -> Vec<PaymentRow> {
    simulate(details, |month, date| extras.total_for(month, date))
}

// Walks the loan month by month until the balance is extinguished or the
// ceiling is hit. Both public modes share this step; they differ only in
// the extra principal supplied for each month.
fn simulate(details: &LoanDetails, extra_for: impl Fn(u32, NaiveDate) -> f64) -> Vec<PaymentRow> {
    let mut schedule = Vec::new();
    let mut balance = details.principal;
    let mut total_interest = 0.;
    let monthly_rate = details.monthly_rate();
    let base_payment = details.monthly_payment();

    for month in 1..=MAX_MONTHS {
        if balance <= BALANCE_EPSILON {
            break;
        }

        let date = payment_date(details.start_date, month - 1);
        let interest = balance * monthly_rate;

        // floored so a payment that fails to cover interest cannot grow
        // the balance
        let scheduled_principal = (base_payment - interest).max(0.);

        let extra = extra_for(month, date);
        let is_extra = extra > 0.;

        let mut principal = scheduled_principal + extra;
        let mut extra_applied = extra;

        // payoff row: settle the exact balance and keep the reported
        // scheduled/extra split consistent, flooring the extra at 0
        if balance - principal < 0. {
            principal = balance;
            extra_applied = (principal - scheduled_principal).max(0.);
        }

        let payment = principal + interest;
        balance -= principal;
        total_interest += interest;

        trace!(
            "month {}, date {}, interest {:.2}, principal {:.2}, balance {:.2}",
            month,
            date,
            interest,
            principal,
            balance
        );

        schedule.push(PaymentRow {
            month,
            date,
            payment,
            principal,
            interest,
            remaining_balance: balance.max(0.),
            total_interest_paid: total_interest,
            is_extra,
            min_payment: base_payment,
            extra_payment: extra_applied,
        });
    }

    schedule
}

pub fn show_schedule(schedule: &[PaymentRow]) {
    for row in schedule {
        println!("{}", row);
    }
}
