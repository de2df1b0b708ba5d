//! Single-measurement scoring: BMI, sleep and stress brackets.
//! Brackets are half-open; a value sitting on a boundary belongs to the higher bracket.
use serde::{Deserialize, Serialize};

pub const BMI_HEALTHY_MIN: f64 = 18.5;
pub const BMI_OVERWEIGHT_MIN: f64 = 25.0;
pub const BMI_OBESE_MIN: f64 = 30.0;

pub const SLEEP_FAIR_MIN: f64 = 5.0;
pub const SLEEP_GOOD_MIN: f64 = 7.0;
pub const SLEEP_GOOD_MAX: f64 = 9.0;

pub const STRESS_LOW_MAX: f64 = 3.0;
pub const STRESS_MODERATE_MAX: f64 = 6.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BmiCategory {
    Underweight,
    #[serde(rename = "Healthy Weight")]
    HealthyWeight,
    Overweight,
    Obese,
}

impl BmiCategory {
    pub fn from_bmi(bmi: f64) -> Self {
        if bmi < BMI_HEALTHY_MIN {
            BmiCategory::Underweight
        } else if bmi < BMI_OVERWEIGHT_MIN {
            BmiCategory::HealthyWeight
        } else if bmi < BMI_OBESE_MIN {
            BmiCategory::Overweight
        } else {
            BmiCategory::Obese
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiCategory::Underweight => "Underweight",
            BmiCategory::HealthyWeight => "Healthy Weight",
            BmiCategory::Overweight => "Overweight",
            BmiCategory::Obese => "Obese",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SleepQuality {
    Poor,
    Fair,
    Good,
    Excessive,
}

impl SleepQuality {
    pub fn from_hours(hours: f64) -> Self {
        if hours < SLEEP_FAIR_MIN {
            SleepQuality::Poor
        } else if hours < SLEEP_GOOD_MIN {
            SleepQuality::Fair
        } else if hours <= SLEEP_GOOD_MAX {
            SleepQuality::Good
        } else {
            SleepQuality::Excessive
        }
    }

    /// Score out of 10 attached to each bracket.
    pub fn score(&self) -> u8 {
        match self {
            SleepQuality::Poor => 3,
            SleepQuality::Fair => 6,
            SleepQuality::Good => 9,
            SleepQuality::Excessive => 7,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum StressCategory {
    Low,
    Moderate,
    High,
}

impl StressCategory {
    pub fn from_level(level: f64) -> Self {
        if level <= STRESS_LOW_MAX {
            StressCategory::Low
        } else if level <= STRESS_MODERATE_MAX {
            StressCategory::Moderate
        } else {
            StressCategory::High
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BmiReading {
    pub score: f64,
    pub category: BmiCategory,
    pub percentile: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SleepReading {
    pub hours: f64,
    pub quality: SleepQuality,
    pub score: u8,
    pub percentile: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StressReading {
    pub level: f64,
    pub category: StressCategory,
    pub percentile: f64,
}

/// `weight_kg / (height_m)^2`, or `0.0` when the inputs cannot produce a finite value.
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    if height_cm <= 0.0 {
        return 0.0;
    }
    let height_m = height_cm / 100.0;
    let bmi = weight_kg / (height_m * height_m);
    if bmi.is_finite() && bmi > 0.0 {
        bmi
    } else {
        0.0
    }
}

pub fn classify_bmi(bmi: f64) -> BmiReading {
    let category = BmiCategory::from_bmi(bmi);
    let percentile = match category {
        BmiCategory::Underweight => (bmi / BMI_HEALTHY_MIN) * 100.0,
        BmiCategory::HealthyWeight => {
            ((bmi - BMI_HEALTHY_MIN) / (BMI_OVERWEIGHT_MIN - BMI_HEALTHY_MIN)) * 100.0 + 25.0
        }
        BmiCategory::Overweight => {
            ((bmi - BMI_OVERWEIGHT_MIN) / (BMI_OBESE_MIN - BMI_OVERWEIGHT_MIN)) * 100.0 + 50.0
        }
        BmiCategory::Obese => ((bmi - BMI_OBESE_MIN) / 10.0) * 100.0 + 75.0,
    };

    BmiReading {
        score: bmi,
        category,
        percentile: clamp_percentile(percentile),
    }
}

pub fn classify_sleep(hours: f64) -> SleepReading {
    let quality = SleepQuality::from_hours(hours);
    let percentile = match quality {
        SleepQuality::Poor => (hours / SLEEP_FAIR_MIN) * 30.0,
        SleepQuality::Fair => ((hours - SLEEP_FAIR_MIN) / 2.0) * 30.0 + 30.0,
        SleepQuality::Good => ((hours - SLEEP_GOOD_MIN) / 2.0) * 30.0 + 60.0,
        // counts down from the top of the scale
        SleepQuality::Excessive => 100.0 - ((hours - SLEEP_GOOD_MAX) / 3.0) * 30.0,
    };

    SleepReading {
        hours,
        quality,
        score: quality.score(),
        percentile: clamp_percentile(percentile),
    }
}

pub fn classify_stress(level: f64) -> StressReading {
    let category = StressCategory::from_level(level);
    let percentile = match category {
        StressCategory::Low => (level / STRESS_LOW_MAX) * 30.0,
        StressCategory::Moderate => ((level - STRESS_LOW_MAX) / 3.0) * 30.0 + 30.0,
        StressCategory::High => ((level - STRESS_MODERATE_MAX) / 4.0) * 40.0 + 60.0,
    };

    StressReading {
        level,
        category,
        percentile: clamp_percentile(percentile),
    }
}

fn clamp_percentile(value: f64) -> f64 {
    if value.is_nan() {
        0.0
    } else {
        value.clamp(0.0, 100.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn bmi_from_height_and_weight() {
        let bmi = body_mass_index(70.0, 170.0);
        assert!((bmi - 24.2214).abs() < 1e-3);
        assert_eq!(body_mass_index(70.0, 0.0), 0.0);
        assert_eq!(body_mass_index(0.0, 170.0), 0.0);
        assert_eq!(body_mass_index(f64::NAN, 170.0), 0.0);
    }

    #[test]
    fn bmi_boundaries_land_in_higher_bracket() {
        assert_eq!(classify_bmi(18.4).category, BmiCategory::Underweight);
        assert_eq!(classify_bmi(18.5).category, BmiCategory::HealthyWeight);
        assert_eq!(classify_bmi(24.99).category, BmiCategory::HealthyWeight);
        assert_eq!(classify_bmi(25.0).category, BmiCategory::Overweight);
        assert_eq!(classify_bmi(30.0).category, BmiCategory::Obese);
    }

    #[test]
    fn bmi_percentiles_follow_bracket_formulas() {
        assert!(approx(classify_bmi(9.25).percentile, 50.0));
        assert!(approx(classify_bmi(18.5).percentile, 25.0));
        assert!(approx(classify_bmi(27.5).percentile, 100.0));
        assert!(approx(classify_bmi(25.0).percentile, 50.0));
        assert!(approx(classify_bmi(30.0).percentile, 75.0));
        assert!(approx(classify_bmi(45.0).percentile, 100.0));
        // Healthy Weight formula overshoots near the top and is clamped
        assert!(approx(classify_bmi(24.0).percentile, 100.0));
    }

    #[test]
    fn bmi_score_is_not_rounded() {
        let reading = classify_bmi(24.221453);
        assert_eq!(reading.score, 24.221453);
    }

    #[test]
    fn sleep_bracket_table() {
        let cases = [
            (0.0, SleepQuality::Poor, 3),
            (4.0, SleepQuality::Poor, 3),
            (5.0, SleepQuality::Fair, 6),
            (6.0, SleepQuality::Fair, 6),
            (7.0, SleepQuality::Good, 9),
            (8.0, SleepQuality::Good, 9),
            (9.0, SleepQuality::Good, 9),
            (10.0, SleepQuality::Excessive, 7),
            (15.0, SleepQuality::Excessive, 7),
        ];
        for (hours, quality, score) in cases {
            let reading = classify_sleep(hours);
            assert_eq!(reading.quality, quality, "hours={hours}");
            assert_eq!(reading.score, score, "hours={hours}");
            assert!((0.0..=100.0).contains(&reading.percentile));
        }
    }

    #[test]
    fn sleep_percentiles() {
        assert!(approx(classify_sleep(4.0).percentile, 24.0));
        assert!(approx(classify_sleep(6.0).percentile, 45.0));
        assert!(approx(classify_sleep(8.0).percentile, 75.0));
        assert!(approx(classify_sleep(10.0).percentile, 90.0));
        assert!(approx(classify_sleep(40.0).percentile, 0.0));
    }

    #[test]
    fn stress_boundaries() {
        let cases = [
            (1.0, StressCategory::Low),
            (3.0, StressCategory::Low),
            (4.0, StressCategory::Moderate),
            (6.0, StressCategory::Moderate),
            (7.0, StressCategory::High),
            (10.0, StressCategory::High),
        ];
        for (level, category) in cases {
            assert_eq!(classify_stress(level).category, category, "level={level}");
        }
        assert!(approx(classify_stress(3.0).percentile, 30.0));
        assert!(approx(classify_stress(6.0).percentile, 60.0));
        assert!(approx(classify_stress(10.0).percentile, 100.0));
    }

    #[test]
    fn category_labels_serialize_as_display_text() {
        let json = serde_json::to_value(BmiCategory::HealthyWeight).unwrap();
        assert_eq!(json, serde_json::json!("Healthy Weight"));
        assert_eq!(BmiCategory::HealthyWeight.label(), "Healthy Weight");
    }
}
