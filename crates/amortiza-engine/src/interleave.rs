//! The schedule interleaver (component C3).

use amortiza_core::error::{AmortizaError, AmortizaResult};

use crate::types::{Amortization, Bare, ScheduleEntry};

/// Merges an ordered list of scheduled amortizations with an ordered list
/// of unscheduled cashflows into one date-ordered stream.
///
/// On a tie, the unscheduled entry precedes the scheduled one (a
/// prepayment posted on the same day as a regular installment is applied
/// first). Two entries from the *same* input sharing a date is refused:
/// duplicate scheduled dates or duplicate unscheduled dates on the same
/// day are not supported.
pub fn interleave(scheduled: &[Amortization], unscheduled: &[Bare]) -> AmortizaResult<Vec<ScheduleEntry>> {
    check_ordered(scheduled.iter().map(|a| a.date), "scheduled amortization")?;
    check_ordered(unscheduled.iter().map(|b| b.date), "unscheduled cashflow")?;

    let mut out = Vec::with_capacity(scheduled.len() + unscheduled.len());
    let mut si = 0usize;
    let mut ui = 0usize;

    while si < scheduled.len() || ui < unscheduled.len() {
        match (scheduled.get(si), unscheduled.get(ui)) {
            (Some(s), Some(u)) => {
                if u.date <= s.date {
                    out.push(ScheduleEntry::Unscheduled(u.clone()));
                    ui += 1;
                } else {
                    out.push(ScheduleEntry::Scheduled(s.clone()));
                    si += 1;
                }
            }
            (Some(s), None) => {
                out.push(ScheduleEntry::Scheduled(s.clone()));
                si += 1;
            }
            (None, Some(u)) => {
                out.push(ScheduleEntry::Unscheduled(u.clone()));
                ui += 1;
            }
            (None, None) => unreachable!(),
        }
    }

    Ok(out)
}

fn check_ordered(dates: impl Iterator<Item = amortiza_core::types::Date>, label: &str) -> AmortizaResult<()> {
    let mut prev = None;
    for date in dates {
        if let Some(p) = prev {
            if date == p {
                return Err(AmortizaError::ordering(format!(
                    "duplicate {label} date {date}"
                )));
            }
            if date < p {
                return Err(AmortizaError::ordering(format!("{label} list is not strictly ordered by date")));
            }
        }
        prev = Some(date);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    fn date(y: i32, m: u32, d: u32) -> amortiza_core::types::Date {
        amortiza_core::types::Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_interleave_tie_break_unscheduled_first() {
        let scheduled = vec![Amortization::new(date(2024, 2, 1), Decimal::ONE, true)];
        let unscheduled = vec![Bare::new(date(2024, 2, 1), dec!(100))];

        let merged = interleave(&scheduled, &unscheduled).unwrap();
        assert_eq!(merged.len(), 2);
        assert!(!merged[0].is_scheduled());
        assert!(merged[1].is_scheduled());
    }

    #[test]
    fn test_interleave_duplicate_scheduled_dates_errors() {
        let scheduled = vec![
            Amortization::new(date(2024, 1, 1), Decimal::ZERO, true),
            Amortization::new(date(2024, 1, 1), Decimal::ONE, true),
        ];
        let result = interleave(&scheduled, &[]);
        assert!(matches!(result, Err(AmortizaError::Ordering { .. })));
    }

    #[test]
    fn test_interleave_unsorted_unscheduled_errors() {
        let unscheduled = vec![Bare::new(date(2024, 2, 1), dec!(1)), Bare::new(date(2024, 1, 1), dec!(1))];
        let result = interleave(&[], &unscheduled);
        assert!(matches!(result, Err(AmortizaError::Ordering { .. })));
    }
}
