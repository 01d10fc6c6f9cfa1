use crate::api::*;
use crate::config::*;
use crate::notify::*;
use crate::structs::*;

use chrono::{Duration, Local, NaiveDateTime, NaiveTime, Timelike};
use tokio::time::Instant;

pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;

/// Source of the local wall-clock time.
pub type Clock = Box<dyn Fn() -> NaiveDateTime>;

fn local_now() -> NaiveDateTime {
    Local::now().naive_local()
}

//////////////////////////////////////////////////////////
// Timing
//////////////////////////////////////////////////////////
/// Computes when to wake up: today's target time minus the lead time.
///
/// Once the current hour has reached the target hour, the result is pushed
/// by `PAST_TARGET_INCREMENT_MINUTES` instead of moving to tomorrow, so it
/// may still lie in the past.
pub fn wake_instant(now: NaiveDateTime, target: NaiveTime, lead_minutes: i64) -> NaiveDateTime {
    let desired = now.date().and_time(target);
    let mut wake = desired - Duration::minutes(lead_minutes);

    if now.hour() >= target.hour() {
        wake += Duration::minutes(PAST_TARGET_INCREMENT_MINUTES);
    }
    wake
}

/// Time left until `wake`, zero if it is already behind us.
pub fn sleep_duration(now: NaiveDateTime, wake: NaiveDateTime) -> std::time::Duration {
    (wake - now).to_std().unwrap_or(std::time::Duration::ZERO)
}

//////////////////////////////////////////////////////////
// Journey tracking
//////////////////////////////////////////////////////////
/// Origin and destination, resolved once, plus the client to poll journeys.
#[derive(Debug, Clone)]
pub struct JourneyTracker {
    api: TransportApi,
    from: Station,
    to: Station,
}

impl JourneyTracker {
    pub async fn new(api: TransportApi, origin: &str, destination: &str) -> ApiResult<Self> {
        let from = resolve(&api, origin).await?;
        let to = resolve(&api, destination).await?;
        Ok(Self { api, from, to })
    }

    #[cfg(test)]
    pub fn from_station(&self) -> &Station {
        &self.from
    }

    #[cfg(test)]
    pub fn to_station(&self) -> &Station {
        &self.to
    }

    /// Fetches the current first leg and renders it.
    pub async fn message(&self) -> ApiResult<Lookup<String>> {
        let leg = self.api.get_journey(&self.from, &self.to).await?;
        Ok(leg.map(|leg| format_message(&leg, &self.from.name, &self.to.name)))
    }
}

async fn resolve(api: &TransportApi, keywords: &str) -> ApiResult<Station> {
    match api.get_station(keywords).await? {
        Lookup::Found(station) => {
            log::info!(
                "'{}' resolved to {} ({}) at {}, {}",
                keywords,
                station.name,
                station.id,
                station.latitude,
                station.longitude
            );
            Ok(station)
        }
        Lookup::NotFound => Err(format!("No station found for '{}'", keywords))?,
    }
}

//////////////////////////////////////////////////////////
// Loop
//////////////////////////////////////////////////////////
pub struct Scheduler<S: NotificationSink> {
    tracker: JourneyTracker,
    sink: S,
    config: CommuteConfig,
    notification_timeout: u32,
    clock: Clock,
}

impl<S: NotificationSink> Scheduler<S> {
    pub fn new(tracker: JourneyTracker, sink: S, config: CommuteConfig) -> Self {
        Self {
            tracker,
            sink,
            config,
            notification_timeout: NOTIFICATION_TIMEOUT_SECS,
            clock: Box::new(local_now),
        }
    }

    pub fn with_clock<F: Fn() -> NaiveDateTime + 'static>(mut self, clock: F) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn with_notification_timeout(mut self, secs: u32) -> Self {
        self.notification_timeout = secs;
        self
    }

    #[cfg(test)]
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Fetches the journey and pops up a notification, once.
    pub async fn run_cycle(&self) -> HandlerResult {
        log::info!("Fetching journey {} -> {}", self.tracker.from.name, self.tracker.to.name);
        let body = match self.tracker.message().await? {
            Lookup::Found(body) => body,
            Lookup::NotFound => Err(format!(
                "No journey found from {} to {}",
                self.tracker.from.name, self.tracker.to.name
            ))?,
        };

        let request = NotificationRequest {
            title: notification_title(Local::now()),
            body,
            timeout_secs: self.notification_timeout,
        };
        log::info!("Notifying: {}", request.title);
        self.sink.notify(&request)
    }

    /// Sleeps until the next wake instant and notifies, forever.
    /// Returns only when a cycle fails.
    pub async fn run(&self) -> HandlerResult {
        loop {
            let now = (self.clock)();
            let wake = wake_instant(now, self.config.target, self.config.lead_minutes);
            let nap = sleep_duration(now, wake);

            if nap.is_zero() {
                log::info!("Wake time {} already passed, going ahead", wake.format("%H:%M:%S"));
            } else {
                log::info!("Sleeping {}s until {}", nap.as_secs(), wake.format("%H:%M:%S"));
                tokio::time::sleep_until(Instant::now() + nap).await;
            }

            self.run_cycle().await?;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32, s: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2023, 5, 2)
            .unwrap()
            .and_hms_opt(h, m, s)
            .unwrap()
    }

    fn six_pm() -> NaiveTime {
        NaiveTime::from_hms_opt(18, 0, 0).unwrap()
    }

    #[test]
    fn wakes_lead_minutes_before_target() {
        let now = at(17, 58, 30);
        let wake = wake_instant(now, six_pm(), 1);
        assert_eq!(wake, at(17, 59, 0));
        assert_eq!(sleep_duration(now, wake), std::time::Duration::from_secs(30));
    }

    #[test]
    fn past_target_hour_adds_fixed_increment_same_day() {
        let now = at(19, 10, 0);
        let wake = wake_instant(now, six_pm(), 1);
        assert_eq!(wake, at(18, 14, 0));
        assert_eq!(wake.date(), now.date());
        assert_eq!(sleep_duration(now, wake), std::time::Duration::ZERO);
    }

    #[test]
    fn increment_applies_within_target_hour() {
        let now = at(18, 0, 5);
        assert_eq!(wake_instant(now, six_pm(), 1), at(18, 14, 0));
    }

    #[test]
    fn early_morning_sleeps_all_day() {
        let now = at(6, 0, 0);
        let wake = wake_instant(now, six_pm(), 10);
        assert_eq!(wake, at(17, 50, 0));
        assert_eq!(sleep_duration(now, wake).as_secs(), 11 * 3600 + 50 * 60);
    }
}
