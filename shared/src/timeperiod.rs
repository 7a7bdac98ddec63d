use chrono::{
    DateTime, Datelike, Days, Duration, Local, NaiveDateTime, NaiveTime, SecondsFormat, TimeZone,
    Utc,
};

/// Calendar week (Monday to Sunday) in the time zone of the clock it was computed from.
///
/// Both bounds are inclusive: the window ends at Sunday 23:59:59.999.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeekWindow {
    start: DateTime<Utc>,
    end: DateTime<Utc>,
}

impl WeekWindow {
    /// Week containing the local wall-clock "now".
    pub fn current() -> Self {
        Self::containing(&Local::now())
    }

    pub fn containing<Tz: TimeZone>(now: &DateTime<Tz>) -> Self {
        let today = now.date_naive();
        // Sunday counts as the last day of the week, so it is six days past Monday.
        let monday = today - Days::new(today.weekday().num_days_from_monday() as u64);
        let next_monday = monday + Days::new(7);

        let start = monday.and_time(NaiveTime::MIN);
        let end = next_monday.and_time(NaiveTime::MIN) - Duration::milliseconds(1);

        let tz = now.timezone();
        Self {
            start: resolve_local(&tz, start),
            end: resolve_local(&tz, end),
        }
    }

    pub fn start(&self) -> DateTime<Utc> {
        self.start
    }

    pub fn end(&self) -> DateTime<Utc> {
        self.end
    }

    pub fn contains(&self, timestamp: &DateTime<Utc>) -> bool {
        *timestamp >= self.start && *timestamp <= self.end
    }

    /// Lower bound as sent to the commits endpoint, e.g. `2024-03-04T00:00:00.000Z`.
    pub fn since(&self) -> String {
        self.start.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    pub fn until(&self) -> String {
        self.end.to_rfc3339_opts(SecondsFormat::Millis, true)
    }

    /// ISO week label such as `2024W10`.
    pub fn label(&self) -> String {
        let week = self.start.iso_week();
        format!("{}W{}", week.year(), week.week())
    }
}

// Local midnight can fall into a DST gap; such instants are read as UTC instead.
fn resolve_local<Tz: TimeZone>(tz: &Tz, local: NaiveDateTime) -> DateTime<Utc> {
    tz.from_local_datetime(&local)
        .earliest()
        .map(|dt| dt.with_timezone(&Utc))
        .unwrap_or_else(|| Utc.from_utc_datetime(&local))
}
