use chrono::{Datelike, Month, NaiveDate};
use std::fmt::{Display, Formatter};

/// A calendar month with a 1-based month number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct YearMonth {
    year: i32,
    month: u32,
}

impl YearMonth {
    /// Returns `None` unless `month` is in `1..=12` and the year is
    /// representable.
    pub fn new(year: i32, month: u32) -> Option<Self> {
        NaiveDate::from_ymd_opt(year, month, 1).map(|_| Self { year, month })
    }

    pub fn of(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.month(),
        }
    }

    pub fn year(self) -> i32 {
        self.year
    }

    pub fn month(self) -> u32 {
        self.month
    }

    pub fn contains(self, date: NaiveDate) -> bool {
        date.year() == self.year && date.month() == self.month
    }

    /// First day of the month.
    pub fn first_day(self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, 1)
    }

    pub fn next(self) -> Self {
        if self.month == 12 {
            Self {
                year: self.year + 1,
                month: 1,
            }
        } else {
            Self {
                year: self.year,
                month: self.month + 1,
            }
        }
    }

    pub fn previous(self) -> Self {
        if self.month == 1 {
            Self {
                year: self.year - 1,
                month: 12,
            }
        } else {
            Self {
                year: self.year,
                month: self.month - 1,
            }
        }
    }

    pub fn days_in_month(self) -> u32 {
        let next = self.next();
        match (self.first_day(), next.first_day()) {
            (Some(first), Some(following)) => (following - first).num_days() as u32,
            // December of the last representable year.
            _ => 31,
        }
    }

    /// English month name, e.g. `March`.
    pub fn month_name(self) -> &'static str {
        u8::try_from(self.month)
            .ok()
            .and_then(|month| Month::try_from(month).ok())
            .map_or("", |month| month.name())
    }
}

impl Display for YearMonth {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.month_name(), self.year)
    }
}

/// One day in a month grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayCell {
    pub day: u32,
    pub has_events: bool,
}

/// Grid layout of one month, weeks starting on Sunday.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MonthView {
    pub year_month: YearMonth,
    /// Empty cells before day 1 (Sunday = 0 ... Saturday = 6).
    pub leading_blank_days: u32,
    pub days: Vec<DayCell>,
}

impl MonthView {
    /// Builds the grid, marking days for which `has_events` returns true.
    pub fn build(year_month: YearMonth, has_events: impl Fn(NaiveDate) -> bool) -> Self {
        let leading_blank_days = year_month
            .first_day()
            .map_or(0, |first| first.weekday().num_days_from_sunday());
        let days = (1..=year_month.days_in_month())
            .filter_map(|day| NaiveDate::from_ymd_opt(year_month.year, year_month.month, day))
            .map(|date| DayCell {
                day: date.day(),
                has_events: has_events(date),
            })
            .collect();

        Self {
            year_month,
            leading_blank_days,
            days,
        }
    }

    pub fn days_with_events(&self) -> impl Iterator<Item = u32> + '_ {
        self.days
            .iter()
            .filter(|cell| cell.has_events)
            .map(|cell| cell.day)
    }
}

#[cfg(test)]
mod tests {
    use super::{MonthView, YearMonth};

    #[test]
    fn rejects_out_of_range_month() {
        assert!(YearMonth::new(2024, 0).is_none());
        assert!(YearMonth::new(2024, 13).is_none());
    }

    #[test]
    fn navigation_wraps_years() {
        let january = YearMonth::new(2024, 1).unwrap();
        assert_eq!(january.previous(), YearMonth::new(2023, 12).unwrap());
        assert_eq!(january.previous().next(), january);
    }

    #[test]
    fn days_in_month_handles_leap_years() {
        assert_eq!(YearMonth::new(2024, 2).unwrap().days_in_month(), 29);
        assert_eq!(YearMonth::new(2023, 2).unwrap().days_in_month(), 28);
        assert_eq!(YearMonth::new(2023, 12).unwrap().days_in_month(), 31);
    }

    #[test]
    fn grid_starts_on_weekday_of_first() {
        // 2024-09-01 is a Sunday, 2024-03-01 a Friday.
        let september = MonthView::build(YearMonth::new(2024, 9).unwrap(), |_| false);
        assert_eq!(september.leading_blank_days, 0);
        assert_eq!(september.days.len(), 30);

        let march = MonthView::build(YearMonth::new(2024, 3).unwrap(), |_| false);
        assert_eq!(march.leading_blank_days, 5);
        assert_eq!(march.year_month.to_string(), "March 2024");
    }
}
