//! Seeded balance classifier.
//!
//! The model is fit once at process start from six fixed seed weeks
//! (two per intended label) and frozen: the scaler is never refit and
//! the centroids never move. Classification is a nearest-centroid
//! lookup in standardized space, so identical input always yields the
//! identical cluster and label.

pub mod kmeans;

use serde::{Deserialize, Serialize};

use crate::error::{Result, ValidationError};
use crate::log::WeekFeatures;
use kmeans::{FeatureVec, StandardScaler};

/// Six seed weeks in `FEATURE_NAMES` order, two per intended label.
const SEED_WEEKS: [FeatureVec; 6] = [
    [42.0, 5.5, 7.0, 14.0, 2.4, 1.0], // overloaded
    [40.0, 6.0, 6.0, 12.0, 2.6, 1.0],
    [28.0, 7.0, 3.0, 10.0, 3.2, 3.0], // balanced
    [25.0, 7.5, 2.0, 11.0, 3.4, 3.0],
    [15.0, 8.2, 0.0, 8.0, 4.2, 4.0], // relaxed
    [12.0, 8.0, 1.0, 6.0, 4.0, 5.0],
];

const KMEANS_SEED: u64 = 42;
const KMEANS_RESTARTS: usize = 10;

/// Lifestyle balance category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BalanceLabel {
    Overloaded,
    Balanced,
    Relaxed,
}

impl BalanceLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            BalanceLabel::Overloaded => "Overloaded",
            BalanceLabel::Balanced => "Balanced",
            BalanceLabel::Relaxed => "Relaxed",
        }
    }
}

impl std::fmt::Display for BalanceLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Heuristic overload score used only at model-build time to name the
/// clusters. Positive pressure from study load and deadlines, relief
/// from sleep and above-neutral mood.
fn overload_score(centroid_raw: &FeatureVec) -> f64 {
    let [study, sleep, deadlines, _classes, mood, _exercise] = *centroid_raw;
    study / 40.0 + deadlines / 6.0 - sleep / 7.0 - (mood - 3.0) / 2.0
}

fn label_for_score(score: f64) -> BalanceLabel {
    if score > 0.6 {
        BalanceLabel::Overloaded
    } else if score < -0.2 {
        BalanceLabel::Relaxed
    } else {
        BalanceLabel::Balanced
    }
}

/// Result of classifying one week of logs.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub cluster: usize,
    pub label: BalanceLabel,
    /// The assigned centroid in raw feature units, rounded to 2dp.
    pub centroid_hint: WeekFeatures,
    /// The submitted aggregate, rounded to 2dp.
    pub features_submitted: WeekFeatures,
}

/// Frozen classifier: scaler + centroids + cluster labels.
///
/// Built once at startup and shared immutably; safe for concurrent
/// reads without synchronization.
#[derive(Debug, Clone)]
pub struct ClusterModel {
    scaler: StandardScaler,
    /// Centroids in standardized space, indexed by cluster id.
    centroids: Vec<FeatureVec>,
    /// Centroids back in raw feature units.
    centroids_raw: Vec<FeatureVec>,
    labels: Vec<BalanceLabel>,
}

impl ClusterModel {
    /// Fit the seeded model: standardize the seed weeks, run 3-means
    /// with a fixed seed, name the centroids by overload score.
    ///
    /// # Errors
    /// Returns `ValidationError::DegenerateLabels` if two centroids
    /// score into the same label band, which would make one label
    /// unreachable for the lifetime of the process.
    pub fn build() -> Result<Self> {
        let scaler = StandardScaler::fit(&SEED_WEEKS);
        let standardized: Vec<FeatureVec> =
            SEED_WEEKS.iter().map(|s| scaler.transform(s)).collect();

        let fit = kmeans::fit(&standardized, 3, KMEANS_RESTARTS, KMEANS_SEED);
        let centroids_raw: Vec<FeatureVec> = fit
            .centroids
            .iter()
            .map(|c| scaler.inverse_transform(c))
            .collect();
        let labels: Vec<BalanceLabel> = centroids_raw
            .iter()
            .map(|c| label_for_score(overload_score(c)))
            .collect();

        if labels[0] == labels[1] || labels[0] == labels[2] || labels[1] == labels[2] {
            return Err(ValidationError::DegenerateLabels([
                labels[0].as_str(),
                labels[1].as_str(),
                labels[2].as_str(),
            ])
            .into());
        }

        Ok(Self {
            scaler,
            centroids: fit.centroids,
            centroids_raw,
            labels,
        })
    }

    /// Assign a week's features to the nearest frozen centroid.
    pub fn classify(&self, features: &WeekFeatures) -> Classification {
        let z = self.scaler.transform_features(features);
        let (cluster, _) = kmeans::nearest(&z, &self.centroids);
        Classification {
            cluster,
            label: self.labels[cluster],
            centroid_hint: WeekFeatures::from_array(self.centroids_raw[cluster]).rounded(),
            features_submitted: features.rounded(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::log::DailyLog;

    fn week(study: f64, sleep: f64, deadlines: u32, mood: f64) -> Vec<DailyLog> {
        (0..7)
            .map(|i| DailyLog {
                date: format!("2026-01-{:02}", i + 5),
                study_hours: study,
                sleep_hours: sleep,
                deadlines,
                classes_hours: 2.0,
                mood,
                exercised: i % 2 == 0,
            })
            .collect()
    }

    #[test]
    fn build_yields_three_distinct_labels() {
        let model = ClusterModel::build().unwrap();
        let mut labels = model.labels.clone();
        labels.sort_by_key(|l| l.as_str());
        labels.dedup();
        assert_eq!(labels.len(), 3);
    }

    #[test]
    fn overload_score_bands() {
        // A hard week scores well above the overloaded threshold.
        assert!(overload_score(&[42.0, 5.5, 7.0, 14.0, 2.4, 1.0]) > 0.6);
        // An easy week scores below the relaxed threshold.
        assert!(overload_score(&[12.0, 8.0, 1.0, 6.0, 4.0, 5.0]) < -0.2);
    }

    #[test]
    fn classify_is_deterministic() {
        let model = ClusterModel::build().unwrap();
        let features = WeekFeatures::from_logs(&week(6.0, 5.5, 1, 2.4)).unwrap();
        let a = model.classify(&features);
        let b = model.classify(&features);
        assert_eq!(a.cluster, b.cluster);
        assert_eq!(a.label, b.label);
    }

    #[test]
    fn heavy_week_classifies_overloaded() {
        let model = ClusterModel::build().unwrap();
        let features = WeekFeatures::from_logs(&week(6.0, 5.5, 1, 2.4)).unwrap();
        assert_eq!(model.classify(&features).label, BalanceLabel::Overloaded);
    }

    #[test]
    fn light_week_classifies_relaxed() {
        let model = ClusterModel::build().unwrap();
        let features = WeekFeatures::from_logs(&week(2.0, 8.2, 0, 4.2)).unwrap();
        assert_eq!(model.classify(&features).label, BalanceLabel::Relaxed);
    }

    #[test]
    fn centroid_hint_is_rounded() {
        let model = ClusterModel::build().unwrap();
        let features = WeekFeatures::from_logs(&week(4.0, 7.0, 0, 3.2)).unwrap();
        let result = model.classify(&features);
        let v = result.centroid_hint.as_array();
        for x in v {
            assert!((x * 100.0 - (x * 100.0).round()).abs() < 1e-9);
        }
    }
}
