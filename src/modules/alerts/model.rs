use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Alert {
    pub id: i64,
    #[schema(example = "Nouvel avis")]
    pub title: String,
    pub message: String,
    #[schema(example = "blue")]
    pub color: String,
    #[schema(example = "info")]
    pub icon: String,
    pub date: DateTime<Utc>,
    pub read: bool,
}

impl Alert {
    fn unread(id: i64, title: &str, message: &str, color: &str, icon: &str, date: DateTime<Utc>) -> Self {
        Self {
            id,
            title: title.to_string(),
            message: message.to_string(),
            color: color.to_string(),
            icon: icon.to_string(),
            date,
            read: false,
        }
    }
}

/// The fixed dashboard feed, stamped with `now`.
pub fn current_alerts(now: DateTime<Utc>) -> Vec<Alert> {
    vec![
        Alert::unread(1, "Nouvel avis", "Un client a laissé un avis", "blue", "info", now),
        Alert::unread(
            2,
            "Tendance négative",
            "La note moyenne baisse",
            "red",
            "exclamation-triangle",
            now,
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feed_is_unread_and_stamped() {
        let now = Utc::now();
        let alerts = current_alerts(now);

        assert_eq!(alerts.len(), 2);
        assert_eq!(alerts[0].id, 1);
        assert_eq!(alerts[1].icon, "exclamation-triangle");
        assert!(alerts.iter().all(|alert| !alert.read && alert.date == now));
    }
}
