//! Brazilian national holiday calendar (B3 / ANBIMA business days).

use super::Calendar;
use crate::types::Date;

/// Business day calendar for the Brazilian financial market.
///
/// Covers the national holidays observed by B3 (the Brazilian stock
/// exchange) in addition to weekends. Moving holidays are derived from
/// the date of Easter via the anonymous Gregorian algorithm.
#[derive(Debug, Clone, Copy, Default)]
pub struct B3Calendar;

impl B3Calendar {
    fn is_national_holiday(&self, date: Date) -> bool {
        let year = date.year();
        let month = date.month();
        let day = date.day();

        match (month, day) {
            (1, 1) => return true,   // Confraternização Universal
            (4, 21) => return true,  // Tiradentes
            (5, 1) => return true,   // Dia do Trabalho
            (9, 7) => return true,   // Independência
            (10, 12) => return true, // Nossa Senhora Aparecida
            (11, 2) => return true,  // Finados
            (11, 15) => return true, // Proclamação da República
            (11, 20) if year >= 2024 => return true, // Consciência Negra
            (12, 25) => return true, // Natal
            _ => {}
        }

        let easter = easter_sunday(year);
        let carnival_monday = easter.add_days(-48);
        let carnival_tuesday = easter.add_days(-47);
        let good_friday = easter.add_days(-2);
        let corpus_christi = easter.add_days(60);

        date == carnival_monday
            || date == carnival_tuesday
            || date == good_friday
            || date == corpus_christi
    }
}

impl Calendar for B3Calendar {
    fn name(&self) -> &'static str {
        "B3"
    }

    fn is_business_day(&self, date: Date) -> bool {
        if date.is_weekend() {
            return false;
        }

        !self.is_national_holiday(date)
    }
}

/// Computes the date of Easter Sunday for the given year using the
/// anonymous Gregorian (Meeus/Jones/Butcher) algorithm.
fn easter_sunday(year: i32) -> Date {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = (h + l - 7 * m + 114) % 31 + 1;

    Date::from_ymd(year, month as u32, day as u32).expect("Easter date is always valid")
}
