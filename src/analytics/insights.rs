//! Dashboard insights: scoring readings plus rule-driven recommendation buckets.
use crate::analytics::scoring::{
    self, BmiReading, SleepReading, StressReading, BMI_HEALTHY_MIN, BMI_OBESE_MIN,
    BMI_OVERWEIGHT_MIN, SLEEP_GOOD_MAX, SLEEP_GOOD_MIN,
};
use crate::domain::models::{Choice, HealthProfile, WaterIntake};
use serde::{Deserialize, Serialize};

pub const DIABETES: &str = "Diabetes";
pub const HYPERTENSION: &str = "Hypertension";

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct Recommendations {
    pub general: Vec<String>,
    pub nutrition: Vec<String>,
    pub fitness: Vec<String>,
    pub mental: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct HealthInsights {
    pub bmi: BmiReading,
    pub sleep: SleepReading,
    pub stress: StressReading,
    pub recommendations: Recommendations,
    /// Tags in rule order; duplicates are allowed.
    pub categories: Vec<String>,
}

/// Run the three scoring primitives, then every recommendation rule in order.
/// Rules are independent: each one that matches adds to its buckets and may push a tag.
pub fn generate_health_insights(profile: &HealthProfile) -> HealthInsights {
    let bmi = profile.bmi();
    let sleep_hours = profile.sleep_hours();
    let stress_level = profile.stress_level();

    let mut recs = Recommendations::default();
    let mut categories = Vec::new();

    add_bmi_rules(&mut recs, &mut categories, bmi);
    add_sleep_rules(&mut recs, &mut categories, sleep_hours);
    add_stress_rules(&mut recs, &mut categories, stress_level);
    add_exercise_rules(&mut recs, &mut categories, profile);
    add_condition_rules(&mut recs, &mut categories, profile);
    add_hydration_rules(&mut recs, &mut categories, profile);
    add_diet_rules(&mut recs, profile);
    add_smoking_rules(&mut recs, &mut categories, profile);
    add_alcohol_rules(&mut recs, &mut categories, profile);
    fill_empty_buckets(&mut recs);

    HealthInsights {
        bmi: scoring::classify_bmi(bmi),
        sleep: scoring::classify_sleep(sleep_hours),
        stress: scoring::classify_stress(stress_level),
        recommendations: recs,
        categories,
    }
}

fn add_bmi_rules(recs: &mut Recommendations, categories: &mut Vec<String>, bmi: f64) {
    if bmi < BMI_HEALTHY_MIN {
        recs.general.push(
            "Your BMI is below the healthy range. Consider consulting with a healthcare provider about healthy weight gain strategies."
                .into(),
        );
        recs.nutrition.push(
            "Focus on nutrient-dense foods with healthy fats and proteins to support healthy weight gain."
                .into(),
        );
        categories.push("weight-gain".into());
    } else if (BMI_OVERWEIGHT_MIN..BMI_OBESE_MIN).contains(&bmi) {
        recs.general.push(
            "Your BMI indicates you may be overweight. Consider adopting a balanced diet and regular exercise routine."
                .into(),
        );
        recs.nutrition.push(
            "Focus on portion control and increasing your intake of vegetables, fruits, and whole grains."
                .into(),
        );
        categories.push("weight-management".into());
    } else if bmi >= BMI_OBESE_MIN {
        recs.general.push(
            "Your BMI indicates obesity, which increases risk for several health conditions. Consider consulting with a healthcare provider."
                .into(),
        );
        recs.nutrition.push(
            "Focus on a balanced diet with calorie control, increased vegetables and fruits, and reduced processed foods."
                .into(),
        );
        recs.fitness.push(
            "Start with low-impact exercises like walking or swimming and gradually increase intensity as your fitness improves."
                .into(),
        );
        categories.push("weight-management".into());
    }
}

fn add_sleep_rules(recs: &mut Recommendations, categories: &mut Vec<String>, hours: f64) {
    if hours < SLEEP_GOOD_MIN {
        recs.general.push(format!(
            "You're getting {hours} hours of sleep, which is below the recommended 7-9 hours for adults."
        ));
        recs.mental.push(
            "Establish a regular sleep schedule and create a relaxing bedtime routine to improve sleep quality."
                .into(),
        );
        categories.push("sleep-improvement".into());
    } else if hours > SLEEP_GOOD_MAX {
        recs.general.push(format!(
            "You're sleeping {hours} hours, which is more than the recommended amount. Excessive sleep can sometimes indicate other health issues."
        ));
    }
}

fn add_stress_rules(recs: &mut Recommendations, categories: &mut Vec<String>, level: f64) {
    if level > scoring::STRESS_MODERATE_MAX {
        recs.general.push(format!(
            "Your stress level is high ({level}/10). High stress can impact both physical and mental health."
        ));
        recs.mental.push(
            "Consider incorporating stress-reduction techniques like meditation, deep breathing, or mindfulness practices into your daily routine."
                .into(),
        );
        categories.push("stress-management".into());
    }
}

fn add_exercise_rules(
    recs: &mut Recommendations,
    categories: &mut Vec<String>,
    profile: &HealthProfile,
) {
    if profile.exercises_rarely() {
        recs.general.push(
            "You're not getting enough physical activity, which is important for overall health."
                .into(),
        );
        recs.fitness.push(
            "Start with short walks or light activities and gradually build up to at least 150 minutes of moderate exercise per week."
                .into(),
        );
        categories.push("physical-activity".into());
    }
}

fn add_condition_rules(
    recs: &mut Recommendations,
    categories: &mut Vec<String>,
    profile: &HealthProfile,
) {
    if profile.has_condition(DIABETES) {
        recs.general.push(
            "Managing diabetes requires careful attention to diet, exercise, and medication if prescribed."
                .into(),
        );
        recs.nutrition.push(
            "Monitor carbohydrate intake and focus on foods with a low glycemic index to help manage blood sugar levels."
                .into(),
        );
        categories.push("diabetes-management".into());
    }

    if profile.has_condition(HYPERTENSION) {
        recs.general.push(
            "Managing hypertension (high blood pressure) is important to reduce risk of heart disease and stroke."
                .into(),
        );
        recs.nutrition.push(
            "Reduce sodium intake and follow a heart-healthy diet rich in fruits, vegetables, and whole grains."
                .into(),
        );
        categories.push("heart-health".into());
    }
}

fn add_hydration_rules(
    recs: &mut Recommendations,
    categories: &mut Vec<String>,
    profile: &HealthProfile,
) {
    if profile.water_intake == Some(WaterIntake::LessThanOneLitre) {
        recs.general.push(
            "You're not drinking enough water. Proper hydration is essential for overall health."
                .into(),
        );
        recs.nutrition.push(
            "Aim to drink at least 2 liters (8 cups) of water daily, more if you're physically active or in hot weather."
                .into(),
        );
        categories.push("hydration".into());
    }
}

fn add_diet_rules(recs: &mut Recommendations, profile: &HealthProfile) {
    if let Some(diet) = profile.diet {
        recs.nutrition.push(format!(
            "Based on your {} diet, ensure you're getting all essential nutrients. Consider consulting with a nutritionist for personalized advice.",
            diet.as_str()
        ));
    }
}

fn add_smoking_rules(
    recs: &mut Recommendations,
    categories: &mut Vec<String>,
    profile: &HealthProfile,
) {
    if profile.smokes() {
        recs.general.push(
            "Smoking significantly increases risk for many serious health conditions. Consider quitting for substantial health benefits."
                .into(),
        );
        categories.push("smoking-cessation".into());
    }
}

fn add_alcohol_rules(
    recs: &mut Recommendations,
    categories: &mut Vec<String>,
    profile: &HealthProfile,
) {
    if profile.drinks_heavily() {
        recs.general.push(
            "Regular alcohol consumption can impact health. Consider limiting intake to moderate levels or less."
                .into(),
        );
        recs.nutrition.push(
            "Limit alcohol consumption to no more than 1 drink per day for women or 2 drinks per day for men."
                .into(),
        );
        categories.push("alcohol-moderation".into());
    }
}

fn fill_empty_buckets(recs: &mut Recommendations) {
    if recs.general.is_empty() {
        recs.general.push(
            "Your health indicators are in a good range. Keep up your current habits and schedule regular check-ups."
                .into(),
        );
    }
    if recs.nutrition.is_empty() {
        recs.nutrition.push(
            "Focus on a balanced diet with plenty of fruits, vegetables, whole grains, and lean proteins."
                .into(),
        );
    }
    if recs.fitness.is_empty() {
        recs.fitness.push(
            "Aim for at least 150 minutes of moderate-intensity exercise per week, along with muscle-strengthening activities twice weekly."
                .into(),
        );
    }
    if recs.mental.is_empty() {
        recs.mental.push(
            "Take time for activities you enjoy and that help you relax. Consider practices like meditation or journaling."
                .into(),
        );
    }
}
