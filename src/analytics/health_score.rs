//! Single 0-100 wellness score built from additive adjustments to a base of 70.
use crate::analytics::scoring::{
    BMI_HEALTHY_MIN, BMI_OBESE_MIN, BMI_OVERWEIGHT_MIN, SLEEP_GOOD_MAX, SLEEP_GOOD_MIN,
    STRESS_LOW_MAX, STRESS_MODERATE_MAX,
};
use crate::domain::models::{AlcoholConsumption, ExerciseFrequency, HealthProfile, SmokingStatus};
use serde::{Deserialize, Serialize};

const BASE_SCORE: i32 = 70;
const MAX_IMPROVEMENT: u8 = 20;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HealthScores {
    pub current: u8,
    pub target: u8,
}

impl HealthScores {
    pub fn for_profile(profile: &HealthProfile) -> Self {
        let current = current_health_score(profile);
        Self {
            current,
            target: target_health_score(current),
        }
    }
}

pub fn current_health_score(profile: &HealthProfile) -> u8 {
    let score = BASE_SCORE
        + bmi_delta(profile.bmi())
        + exercise_delta(profile.exercise_frequency)
        + sleep_delta(profile.sleep_hours())
        + stress_delta(profile.stress_level())
        + conditions_delta(profile.condition_count())
        + smoking_delta(profile.smoking_status)
        + alcohol_delta(profile.alcohol_consumption);

    score.clamp(0, 100) as u8
}

/// Up to twenty points above the current score, never past 100.
pub fn target_health_score(current: u8) -> u8 {
    let current = current.min(100);
    let improvement = MAX_IMPROVEMENT.min(100 - current);
    (current + improvement).min(100)
}

fn bmi_delta(bmi: f64) -> i32 {
    if (BMI_HEALTHY_MIN..BMI_OVERWEIGHT_MIN).contains(&bmi) {
        5
    } else if bmi < BMI_OBESE_MIN {
        -3
    } else {
        -8
    }
}

// Missing answers fall through to the last arm of each ladder.
fn exercise_delta(frequency: Option<ExerciseFrequency>) -> i32 {
    match frequency {
        Some(ExerciseFrequency::Daily) => 10,
        Some(ExerciseFrequency::Regularly) => 7,
        Some(ExerciseFrequency::Sometimes) => 3,
        Some(ExerciseFrequency::Rarely) => -3,
        Some(ExerciseFrequency::Never) | None => -7,
    }
}

fn sleep_delta(hours: f64) -> i32 {
    if (SLEEP_GOOD_MIN..=SLEEP_GOOD_MAX).contains(&hours) {
        5
    } else if (6.0..SLEEP_GOOD_MIN).contains(&hours) {
        -2
    } else {
        -5
    }
}

fn stress_delta(level: f64) -> i32 {
    if level <= STRESS_LOW_MAX {
        5
    } else if level <= STRESS_MODERATE_MAX {
        0
    } else {
        -5
    }
}

fn conditions_delta(count: usize) -> i32 {
    -3 * i32::try_from(count).unwrap_or(i32::MAX / 3)
}

fn smoking_delta(status: Option<SmokingStatus>) -> i32 {
    match status {
        Some(SmokingStatus::Never) => 5,
        Some(SmokingStatus::Former) => 2,
        Some(SmokingStatus::Occasional | SmokingStatus::Regular) | None => -10,
    }
}

fn alcohol_delta(consumption: Option<AlcoholConsumption>) -> i32 {
    match consumption {
        Some(AlcoholConsumption::Never) => 5,
        Some(AlcoholConsumption::Rarely) => 2,
        Some(AlcoholConsumption::Occasionally) => -2,
        Some(AlcoholConsumption::Weekly | AlcoholConsumption::Daily) | None => -5,
    }
}
