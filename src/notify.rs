use crate::structs::*;

use chrono::{DateTime, Local};
use notify_rust::{Notification, Timeout};
use std::error::Error;

pub type NotifyResult = Result<(), Box<dyn Error + Send + Sync>>;

//////////////////////////////////////////////////////////
// Message
//////////////////////////////////////////////////////////
/// Renders the multi-line summary shown in the pop-up.
/// Every detail line reads ` - <Label>: <value>`, including `Destiny` and `Departure Delay`.
pub fn format_message(leg: &JourneyLeg, origin: &str, destination: &str) -> String {
    format!(
        "Your {} is almost at the station.
Journey information is as follows:
 - Line name: {}
 - Origin: {}
 - Destiny: {}
 - Departure: {}
 - Planned Departure: {}
 - Departure Delay: {}",
        leg.mode,
        leg.line_name,
        origin,
        destination,
        leg.departure.as_deref().unwrap_or_default(),
        leg.planned_departure.as_deref().unwrap_or_default(),
        leg.departure_delay.map(|d| d.to_string()).unwrap_or_default(),
    )
}

pub fn notification_title(now: DateTime<Local>) -> String {
    format!("It's already {}, it's time to go!", now.format("%H:%M"))
}

//////////////////////////////////////////////////////////
// Notifications
//////////////////////////////////////////////////////////
/// Anything able to put a notification in front of the user.
pub trait NotificationSink {
    fn notify(&self, request: &NotificationRequest) -> NotifyResult;
}

/// Native desktop notifications (D-Bus, macOS notification center, WinRT toasts).
#[derive(Debug, Default, Clone, Copy)]
pub struct DesktopNotifier;

impl NotificationSink for DesktopNotifier {
    fn notify(&self, request: &NotificationRequest) -> NotifyResult {
        let millis = request.timeout_secs.saturating_mul(1000);
        Notification::new()
            .summary(&request.title)
            .body(&request.body)
            .timeout(Timeout::Milliseconds(millis))
            .show()?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn title_embeds_wall_clock() {
        let now = Local.with_ymd_and_hms(2023, 3, 14, 7, 5, 42).unwrap();
        assert_eq!(notification_title(now), "It's already 07:05, it's time to go!");
    }

    #[test]
    fn missing_times_leave_gaps() {
        let leg = JourneyLeg {
            trip_id: "1|2|3".to_string(),
            line_name: "M1".to_string(),
            mode: "train".to_string(),
            departure: None,
            planned_departure: None,
            departure_delay: None,
        };
        let msg = format_message(&leg, "A", "B");
        assert!(msg.contains("\n - Departure: \n"));
        assert!(msg.ends_with(" - Departure Delay: "));
    }
}
