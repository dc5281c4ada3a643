use chrono::NaiveDate;
use log::info;
use mortgage::compare::compare;
use mortgage::loan::LoanDetails;
use mortgage::schedule::{show_schedule, CustomPayment, ExtraPayments};
use simple_logger::SimpleLogger;

fn main() {
    SimpleLogger::new()
        .with_level(log::LevelFilter::Info)
        .init()
        .unwrap();

    let details = LoanDetails::new(
        600_000.,
        6.,
        30,
        NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
    );
    let extras = ExtraPayments {
        monthly_extra: 200.,
        annual_increase_pct: Some(3.),
        custom_payments: vec![CustomPayment::one_time("bonus-2026", 10_000., "2026-06-01")],
    };

    let result = compare(&details, &extras);
    let (years, months) = result.time_saved();

    info!(
        "minimum payment ${:.2}, target payment ${:.2}",
        details.monthly_payment(),
        details.monthly_payment() + extras.monthly_extra
    );
    info!(
        "standard payoff {}, accelerated payoff {}",
        result.standard_payoff_date, result.accelerated_payoff_date
    );
    info!(
        "interest saved ${:.2}, time saved {}y {}m",
        result.interest_saved, years, months
    );

    show_schedule(&result.accelerated_schedule);
}

// verifies that types can implement the gated traits below
#[cfg(test)]
fn is_normal<T: Sized + Send + Sync + Unpin>() {}

#[test]
fn normal_types() {
    is_normal::<mortgage::schedule::PaymentRow>();
    is_normal::<mortgage::compare::ComparisonResult>();
}
