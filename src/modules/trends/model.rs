use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// One entry per weekday, Monday first. The three series have equal length.
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyTrend {
    #[schema(example = json!(["Lun", "Mar", "Mer", "Jeu", "Ven", "Sam", "Dim"]))]
    pub days: Vec<String>,
    pub average_ratings: Vec<f64>,
    pub feedback_counts: Vec<u32>,
}

impl WeeklyTrend {
    pub fn current() -> Self {
        Self {
            days: ["Lun", "Mar", "Mer", "Jeu", "Ven", "Sam", "Dim"]
                .into_iter()
                .map(String::from)
                .collect(),
            average_ratings: vec![4.0, 4.2, 3.8, 4.5, 4.1, 4.3, 4.4],
            feedback_counts: vec![2, 3, 1, 5, 2, 4, 3],
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_series_line_up_with_days() {
        let trend = WeeklyTrend::current();

        assert_eq!(trend.days.len(), 7);
        assert_eq!(trend.average_ratings.len(), trend.days.len());
        assert_eq!(trend.feedback_counts.len(), trend.days.len());
    }

    #[test]
    fn test_wire_names_are_camel_case() {
        let json = serde_json::to_value(WeeklyTrend::current()).unwrap();

        assert_eq!(json["days"][0], "Lun");
        assert_eq!(json["averageRatings"][3], 4.5);
        assert_eq!(json["feedbackCounts"][3], 5);
    }
}
