use crate::analytics::scoring;
use serde::de::{self, IgnoredAny};
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ProfileError {
    #[error("unknown {field} value {value:?}")]
    UnknownValue { field: &'static str, value: String },
}

/// Closed set of questionnaire answers with a stable wire spelling.
pub trait Choice: Sized + Copy + 'static {
    const FIELD: &'static str;
    const ALL: &'static [Self];

    fn as_str(&self) -> &'static str;

    fn parse(raw: &str) -> Result<Self, ProfileError> {
        let trimmed = raw.trim();
        Self::ALL
            .iter()
            .copied()
            .find(|choice| choice.as_str().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ProfileError::UnknownValue {
                field: Self::FIELD,
                value: trimmed.to_string(),
            })
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseFrequency {
    Never,
    Rarely,
    Sometimes,
    Regularly,
    Daily,
}

impl Choice for ExerciseFrequency {
    const FIELD: &'static str = "exerciseFrequency";
    const ALL: &'static [Self] = &[
        ExerciseFrequency::Never,
        ExerciseFrequency::Rarely,
        ExerciseFrequency::Sometimes,
        ExerciseFrequency::Regularly,
        ExerciseFrequency::Daily,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            ExerciseFrequency::Never => "never",
            ExerciseFrequency::Rarely => "rarely",
            ExerciseFrequency::Sometimes => "sometimes",
            ExerciseFrequency::Regularly => "regularly",
            ExerciseFrequency::Daily => "daily",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum Diet {
    Vegetarian,
    Vegan,
    NonVegetarian,
    Pescatarian,
    Other,
}

impl Choice for Diet {
    const FIELD: &'static str = "diet";
    const ALL: &'static [Self] = &[
        Diet::Vegetarian,
        Diet::Vegan,
        Diet::NonVegetarian,
        Diet::Pescatarian,
        Diet::Other,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            Diet::Vegetarian => "vegetarian",
            Diet::Vegan => "vegan",
            Diet::NonVegetarian => "non-vegetarian",
            Diet::Pescatarian => "pescatarian",
            Diet::Other => "other",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum WaterIntake {
    #[serde(rename = "less-than-1L")]
    LessThanOneLitre,
    #[serde(rename = "1-2L")]
    OneToTwoLitres,
    #[serde(rename = "2-3L")]
    TwoToThreeLitres,
    #[serde(rename = "more-than-3L")]
    MoreThanThreeLitres,
}

impl Choice for WaterIntake {
    const FIELD: &'static str = "waterIntake";
    const ALL: &'static [Self] = &[
        WaterIntake::LessThanOneLitre,
        WaterIntake::OneToTwoLitres,
        WaterIntake::TwoToThreeLitres,
        WaterIntake::MoreThanThreeLitres,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            WaterIntake::LessThanOneLitre => "less-than-1L",
            WaterIntake::OneToTwoLitres => "1-2L",
            WaterIntake::TwoToThreeLitres => "2-3L",
            WaterIntake::MoreThanThreeLitres => "more-than-3L",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SmokingStatus {
    Never,
    Former,
    Occasional,
    Regular,
}

impl SmokingStatus {
    pub fn is_current(&self) -> bool {
        matches!(self, SmokingStatus::Occasional | SmokingStatus::Regular)
    }
}

impl Choice for SmokingStatus {
    const FIELD: &'static str = "smokingStatus";
    const ALL: &'static [Self] = &[
        SmokingStatus::Never,
        SmokingStatus::Former,
        SmokingStatus::Occasional,
        SmokingStatus::Regular,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            SmokingStatus::Never => "never",
            SmokingStatus::Former => "former",
            SmokingStatus::Occasional => "occasional",
            SmokingStatus::Regular => "regular",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AlcoholConsumption {
    Never,
    Rarely,
    Occasionally,
    Weekly,
    Daily,
}

impl AlcoholConsumption {
    pub fn is_heavy(&self) -> bool {
        matches!(self, AlcoholConsumption::Weekly | AlcoholConsumption::Daily)
    }
}

impl Choice for AlcoholConsumption {
    const FIELD: &'static str = "alcoholConsumption";
    const ALL: &'static [Self] = &[
        AlcoholConsumption::Never,
        AlcoholConsumption::Rarely,
        AlcoholConsumption::Occasionally,
        AlcoholConsumption::Weekly,
        AlcoholConsumption::Daily,
    ];

    fn as_str(&self) -> &'static str {
        match self {
            AlcoholConsumption::Never => "never",
            AlcoholConsumption::Rarely => "rarely",
            AlcoholConsumption::Occasionally => "occasionally",
            AlcoholConsumption::Weekly => "weekly",
            AlcoholConsumption::Daily => "daily",
        }
    }
}

/// Questionnaire answers for one user. Every field may be absent; readers
/// apply the documented defaults instead of failing.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HealthProfile {
    #[serde(
        default,
        alias = "height",
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub height_cm: Option<f64>,
    #[serde(
        default,
        alias = "weight",
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub weight_kg: Option<f64>,
    #[serde(
        default,
        deserialize_with = "optional_choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub exercise_frequency: Option<ExerciseFrequency>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub sleep_hours: Option<f64>,
    #[serde(
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub stress_level: Option<f64>,
    #[serde(
        default,
        deserialize_with = "optional_choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub diet: Option<Diet>,
    #[serde(
        default,
        deserialize_with = "optional_choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub water_intake: Option<WaterIntake>,
    #[serde(default, deserialize_with = "condition_set")]
    pub medical_conditions: BTreeSet<String>,
    #[serde(
        default,
        deserialize_with = "optional_choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub smoking_status: Option<SmokingStatus>,
    #[serde(
        default,
        deserialize_with = "optional_choice",
        skip_serializing_if = "Option::is_none"
    )]
    pub alcohol_consumption: Option<AlcoholConsumption>,
}

impl HealthProfile {
    /// Body mass index; `0.0` when height or weight is unusable.
    pub fn bmi(&self) -> f64 {
        scoring::body_mass_index(
            self.weight_kg.unwrap_or(0.0),
            self.height_cm.unwrap_or(0.0),
        )
    }

    pub fn sleep_hours(&self) -> f64 {
        self.sleep_hours.unwrap_or(0.0)
    }

    pub fn stress_level(&self) -> f64 {
        self.stress_level.unwrap_or(0.0)
    }

    pub fn has_condition(&self, name: &str) -> bool {
        self.medical_conditions.contains(name)
    }

    pub fn condition_count(&self) -> usize {
        self.medical_conditions.len()
    }

    pub fn exercises_rarely(&self) -> bool {
        matches!(
            self.exercise_frequency,
            Some(ExerciseFrequency::Never | ExerciseFrequency::Rarely)
        )
    }

    pub fn smokes(&self) -> bool {
        self.smoking_status.is_some_and(|s| s.is_current())
    }

    pub fn drinks_heavily(&self) -> bool {
        self.alcohol_consumption.is_some_and(|a| a.is_heavy())
    }
}

/// Account details captured at registration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct UserDetails {
    pub name: String,
    pub email: String,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
    Other(IgnoredAny),
}

fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<NumberOrText> = Option::deserialize(deserializer)?;
    let value = match raw {
        Some(NumberOrText::Number(v)) => Some(v),
        Some(NumberOrText::Text(text)) => text.trim().parse::<f64>().ok(),
        Some(NumberOrText::Other(_)) | None => None,
    };
    Ok(value.filter(|v| v.is_finite()))
}

fn optional_choice<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Choice,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => T::parse(value).map(Some).map_err(de::Error::custom),
    }
}

fn condition_set<'de, D>(deserializer: D) -> Result<BTreeSet<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<Vec<String>> = Option::deserialize(deserializer)?;
    Ok(raw
        .unwrap_or_default()
        .into_iter()
        .map(|c| c.trim().to_string())
        .filter(|c| !c.is_empty())
        .collect())
}
