use super::rating::{Rating, TravelExperience};
use super::validation::RATING_RANGE;
use serde::Serialize;

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageSummary {
    pub package_id: String,
    pub total_ratings: usize,
    pub average_rating: f64,
    pub distribution: Vec<RatingCount>,
    pub experience: ExperienceAverages,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RatingCount {
    pub stars: i32,
    pub count: usize,
    pub percentage: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ExperienceAverages {
    pub accommodation: Option<f64>,
    pub transportation: Option<f64>,
    pub guide: Option<f64>,
    pub value: Option<f64>,
}

fn round1(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn average(values: impl Iterator<Item = i32>) -> Option<f64> {
    let (sum, count) = values.fold((0i64, 0usize), |(sum, count), v| (sum + v as i64, count + 1));
    (count > 0).then(|| round1(sum as f64 / count as f64))
}

impl PackageSummary {
    /// Aggregates the given ratings. Callers pass only the ratings that
    /// should count, normally the approved ones.
    pub fn from_ratings(package_id: &str, ratings: &[Rating]) -> Self {
        let total = ratings.len();

        let distribution = RATING_RANGE
            .rev()
            .map(|stars| {
                let count = ratings.iter().filter(|r| r.rating == stars).count();
                let percentage = if total == 0 {
                    0.0
                } else {
                    round1(count as f64 * 100.0 / total as f64)
                };
                RatingCount {
                    stars,
                    count,
                    percentage,
                }
            })
            .collect();

        let experiences: Vec<&TravelExperience> = ratings
            .iter()
            .filter_map(|r| r.travel_experience.as_ref())
            .collect();

        Self {
            package_id: package_id.to_string(),
            total_ratings: total,
            average_rating: average(ratings.iter().map(|r| r.rating)).unwrap_or(0.0),
            distribution,
            experience: ExperienceAverages {
                accommodation: average(experiences.iter().filter_map(|e| e.accommodation)),
                transportation: average(experiences.iter().filter_map(|e| e.transportation)),
                guide: average(experiences.iter().filter_map(|e| e.guide)),
                value: average(experiences.iter().filter_map(|e| e.value)),
            },
        }
    }
}
