use crate::analytics::health_score::HealthScores;
use crate::analytics::insights::{DIABETES, HYPERTENSION};
use crate::analytics::scoring::{
    BMI_HEALTHY_MIN, BMI_OVERWEIGHT_MIN, SLEEP_GOOD_MAX, SLEEP_GOOD_MIN, STRESS_MODERATE_MAX,
};
use crate::domain::models::{ExerciseFrequency, HealthProfile, WaterIntake};
use crate::services::consultation::Prescription;
use crate::services::report_analysis::ReportAnalysis;
use serde::{Deserialize, Serialize};

pub const PLAN_DURATION_WEEKS: u8 = 12;
const MAX_FOCUS_AREAS: usize = 5;
const MIN_FOCUS_AREAS: usize = 3;
const FOCUS_FILLERS: [&str; 3] = ["Nutrition", "Preventive Health", "Mental Wellbeing"];
/// Stress above this level adds a referral to a mental health professional.
const STRESS_REFERRAL_MIN: f64 = 7.0;

const HEART_DISEASE: &str = "Heart Disease";
const JOINT_PAIN: &str = "Joint Pain";
const ARTHRITIS: &str = "Arthritis";

const OVERVIEW: &str = "This personalized lifestyle plan is designed based on your health assessment, medical data, and specific health goals. Following these recommendations can help improve your overall health and address specific areas of concern identified in your assessment.";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct LifestylePlan {
    pub overview: String,
    pub scores: HealthScores,
    /// Weeks.
    pub duration: u8,
    pub focus_areas: Vec<String>,
    pub nutrition: NutritionPlan,
    pub exercise: ExercisePlan,
    pub sleep: SleepPlan,
    pub stress: StressPlan,
    pub weekly_goals: Vec<WeeklyGoal>,
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct NutritionPlan {
    pub guidelines: Vec<String>,
    pub include: Vec<String>,
    pub limit: Vec<String>,
    pub meal_plan: MealPlan,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct MealPlan {
    pub breakfast: Vec<String>,
    pub lunch: Vec<String>,
    pub dinner: Vec<String>,
    pub snacks: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ExercisePlan {
    pub weekly_goals: ExerciseGoals,
    pub activities: Vec<Activity>,
    pub weekly_schedule: WeeklySchedule,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct ExerciseGoals {
    pub minutes: u32,
    pub days: u8,
    pub steps: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Activity {
    pub name: String,
    pub description: String,
    pub frequency: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct WeeklySchedule {
    pub monday: Vec<String>,
    pub tuesday: Vec<String>,
    pub wednesday: Vec<String>,
    pub thursday: Vec<String>,
    pub friday: Vec<String>,
    pub saturday: Vec<String>,
    pub sunday: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SleepPlan {
    pub goals: SleepGoals,
    pub recommendations: Vec<String>,
    pub bedtime_routine: Vec<RoutineStep>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SleepGoals {
    pub duration: f64,
    pub bedtime: String,
    pub wake_time: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RoutineStep {
    pub time: String,
    pub activity: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StressPlan {
    pub daily_practices: Vec<String>,
    pub techniques: Vec<Technique>,
    pub triggers: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Technique {
    pub name: String,
    pub description: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct WeeklyGoal {
    pub name: String,
    pub progress: u8,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Resource {
    pub title: String,
    pub url: String,
}

/// Build a 12-week plan from the questionnaire. A stored report analysis or
/// prescription is accepted so callers can pass everything they have, but the
/// plan content is driven by the profile alone.
pub fn generate_lifestyle_plan(
    profile: &HealthProfile,
    report: Option<&ReportAnalysis>,
    prescription: Option<&Prescription>,
) -> LifestylePlan {
    if let Some(report) = report {
        tracing::debug!(
            "Lifestyle plan received report analysis with {} abnormal parameters",
            report.abnormal_parameters.len()
        );
    }
    if let Some(prescription) = prescription {
        tracing::debug!(
            "Lifestyle plan received prescription for {}",
            prescription.diagnosis.primary
        );
    }

    LifestylePlan {
        overview: OVERVIEW.to_string(),
        scores: HealthScores::for_profile(profile),
        duration: PLAN_DURATION_WEEKS,
        focus_areas: determine_focus_areas(profile),
        nutrition: NutritionPlan {
            guidelines: nutrition_guidelines(profile),
            include: foods_to_include(profile),
            limit: strings(&[
                "Processed foods high in sodium",
                "Sugary beverages and desserts",
                "Refined carbohydrates (white bread, pastries)",
                "Fried foods",
                "Processed meats (bacon, sausage)",
                "Excessive alcohol",
                "Foods with trans fats",
                "High-sodium condiments",
            ]),
            meal_plan: sample_meal_plan(),
        },
        exercise: ExercisePlan {
            weekly_goals: exercise_goals(profile.exercise_frequency),
            activities: recommended_activities(profile),
            weekly_schedule: exercise_schedule(),
        },
        sleep: SleepPlan {
            goals: sleep_goals(profile.sleep_hours()),
            recommendations: strings(&[
                "Maintain a consistent sleep schedule, even on weekends",
                "Create a relaxing bedtime routine to signal your body it's time to sleep",
                "Keep your bedroom dark, quiet, and cool (65-68°F or 18-20°C)",
                "Avoid screens (phones, tablets, computers) for at least 1 hour before bed",
                "Limit caffeine after noon and avoid alcohol close to bedtime",
                "Exercise regularly, but not within 2-3 hours of bedtime",
                "If you can't fall asleep after 20 minutes, get up and do something relaxing until you feel sleepy",
            ]),
            bedtime_routine: bedtime_routine(),
        },
        stress: StressPlan {
            daily_practices: stress_practices(profile.stress_level()),
            techniques: stress_techniques(),
            triggers: strings(&[
                "Work deadlines and pressure",
                "Financial concerns",
                "Family responsibilities",
                "Lack of sleep or poor sleep quality",
                "Excessive caffeine or alcohol",
                "Digital overload and constant connectivity",
            ]),
        },
        weekly_goals: [
            ("Physical Activity", 35),
            ("Nutrition", 60),
            ("Sleep Quality", 45),
            ("Stress Management", 25),
            ("Water Intake", 70),
        ]
        .into_iter()
        .map(|(name, progress)| WeeklyGoal {
            name: name.to_string(),
            progress,
        })
        .collect(),
        resources: [
            "Healthy Eating Guide",
            "Beginner's Exercise Program",
            "Sleep Improvement Techniques",
            "Stress Management Strategies",
            "Meditation for Beginners",
        ]
        .into_iter()
        .map(|title| Resource {
            title: title.to_string(),
            url: "#".to_string(),
        })
        .collect(),
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

// ─────────────────────────────────────────────────────────
// FOCUS AREAS
// ─────────────────────────────────────────────────────────
pub fn determine_focus_areas(profile: &HealthProfile) -> Vec<String> {
    let mut areas: Vec<&str> = Vec::new();

    let bmi = profile.bmi();
    if bmi < BMI_HEALTHY_MIN || bmi >= BMI_OVERWEIGHT_MIN {
        areas.push("Weight Management");
    }
    if profile.exercises_rarely() {
        areas.push("Physical Activity");
    }
    let sleep = profile.sleep_hours();
    if sleep < SLEEP_GOOD_MIN || sleep > SLEEP_GOOD_MAX {
        areas.push("Sleep Quality");
    }
    if profile.stress_level() > STRESS_MODERATE_MAX {
        areas.push("Stress Management");
    }
    if matches!(
        profile.water_intake,
        Some(WaterIntake::LessThanOneLitre | WaterIntake::OneToTwoLitres)
    ) {
        areas.push("Hydration");
    }
    if profile.condition_count() > 0 {
        areas.push("Chronic Condition Management");
    }
    if profile.smokes() {
        areas.push("Smoking Cessation");
    }
    if profile.drinks_heavily() {
        areas.push("Alcohol Moderation");
    }

    for filler in FOCUS_FILLERS {
        if areas.len() >= MIN_FOCUS_AREAS {
            break;
        }
        if !areas.contains(&filler) {
            areas.push(filler);
        }
    }

    areas.truncate(MAX_FOCUS_AREAS);
    areas.into_iter().map(String::from).collect()
}

// ─────────────────────────────────────────────────────────
// NUTRITION
// ─────────────────────────────────────────────────────────
fn nutrition_guidelines(profile: &HealthProfile) -> Vec<String> {
    let mut guidelines = strings(&[
        "Aim for a balanced diet with a variety of fruits, vegetables, whole grains, lean proteins, and healthy fats",
        "Eat at least 5 servings of fruits and vegetables daily",
        "Choose whole grains over refined grains when possible",
        "Stay hydrated by drinking water throughout the day",
        "Practice mindful eating by paying attention to hunger and fullness cues",
    ]);

    if profile.has_condition(DIABETES) {
        guidelines.push(
            "Monitor carbohydrate intake and focus on foods with a low glycemic index".into(),
        );
        guidelines.push("Distribute carbohydrates evenly throughout the day".into());
    }
    if profile.has_condition(HYPERTENSION) {
        guidelines.push("Limit sodium intake to less than 2,300mg per day".into());
        guidelines.push(
            "Follow the DASH diet approach (Dietary Approaches to Stop Hypertension)".into(),
        );
    }

    guidelines
}

fn foods_to_include(profile: &HealthProfile) -> Vec<String> {
    let mut foods = strings(&[
        "Leafy green vegetables",
        "Colorful fruits and berries",
        "Whole grains (brown rice, quinoa, oats)",
        "Lean proteins (chicken, fish, legumes)",
        "Healthy fats (olive oil, avocados, nuts)",
        "Low-fat dairy or dairy alternatives",
        "Herbs and spices (instead of salt)",
        "Green tea",
    ]);

    if profile.has_condition(HEART_DISEASE) {
        foods.push("Fatty fish (salmon, mackerel)".into());
        foods.push("Walnuts and flaxseeds".into());
    }

    foods
}

fn sample_meal_plan() -> MealPlan {
    MealPlan {
        breakfast: strings(&[
            "Overnight oats with berries and nuts",
            "Whole grain toast with avocado and eggs",
            "Greek yogurt with fruit and granola",
            "Vegetable omelet with whole grain toast",
        ]),
        lunch: strings(&[
            "Quinoa bowl with roasted vegetables and chickpeas",
            "Grilled chicken salad with olive oil dressing",
            "Lentil soup with whole grain bread",
            "Tuna salad sandwich on whole grain bread with side salad",
        ]),
        dinner: strings(&[
            "Baked salmon with roasted vegetables and brown rice",
            "Stir-fry with tofu and vegetables over brown rice",
            "Grilled chicken with sweet potato and steamed broccoli",
            "Bean and vegetable chili with side salad",
        ]),
        snacks: strings(&[
            "Apple with almond butter",
            "Carrot sticks with hummus",
            "Greek yogurt with berries",
            "Handful of mixed nuts",
            "Whole fruit with a small piece of cheese",
        ]),
    }
}

// ─────────────────────────────────────────────────────────
// EXERCISE
// ─────────────────────────────────────────────────────────
fn exercise_goals(frequency: Option<ExerciseFrequency>) -> ExerciseGoals {
    let (minutes, days, steps) = match frequency {
        Some(ExerciseFrequency::Never) => (90, 3, 7_000),
        Some(ExerciseFrequency::Rarely) => (120, 4, 8_000),
        Some(ExerciseFrequency::Daily) => (210, 6, 12_000),
        _ => (150, 5, 10_000),
    };
    ExerciseGoals {
        minutes,
        days,
        steps,
    }
}

fn activity(name: &str, description: &str, frequency: &str, duration: &str) -> Activity {
    Activity {
        name: name.into(),
        description: description.into(),
        frequency: frequency.into(),
        duration: duration.into(),
    }
}

fn recommended_activities(profile: &HealthProfile) -> Vec<Activity> {
    let mut activities = vec![
        activity(
            "Walking",
            "Low-impact activity suitable for all fitness levels",
            "5-7 days per week",
            "30 minutes per session",
        ),
        activity(
            "Strength Training",
            "Builds muscle and increases metabolism",
            "2-3 days per week",
            "20-30 minutes per session",
        ),
        activity(
            "Flexibility Exercises",
            "Improves range of motion and reduces injury risk",
            "Daily",
            "10-15 minutes per session",
        ),
        activity(
            "Balance Training",
            "Improves stability and prevents falls",
            "2-3 days per week",
            "10-15 minutes per session",
        ),
    ];

    if profile.has_condition(JOINT_PAIN) || profile.has_condition(ARTHRITIS) {
        activities.push(activity(
            "Swimming",
            "Low-impact exercise that's gentle on joints",
            "2-3 days per week",
            "30 minutes per session",
        ));
    }

    activities
}

fn exercise_schedule() -> WeeklySchedule {
    let walk = || strings(&["30-minute walk", "10-minute stretching"]);
    WeeklySchedule {
        monday: walk(),
        tuesday: strings(&["20-minute strength training", "10-minute balance exercises"]),
        wednesday: walk(),
        thursday: strings(&["20-minute strength training", "10-minute flexibility exercises"]),
        friday: walk(),
        saturday: strings(&[
            "45-minute longer activity (hiking, cycling, swimming)",
            "15-minute stretching",
        ]),
        sunday: strings(&["Rest day or gentle yoga", "10-minute stretching"]),
    }
}

// ─────────────────────────────────────────────────────────
// SLEEP
// ─────────────────────────────────────────────────────────
fn sleep_goals(hours: f64) -> SleepGoals {
    let duration = if hours < SLEEP_GOOD_MIN {
        (hours + 1.0).min(8.0)
    } else if hours > SLEEP_GOOD_MAX {
        8.0
    } else {
        hours
    };
    SleepGoals {
        duration,
        bedtime: "10:30 PM".into(),
        wake_time: "6:30 AM".into(),
    }
}

fn bedtime_routine() -> Vec<RoutineStep> {
    [
        ("9:00 PM", "Turn off electronic devices or use blue light filters"),
        ("9:15 PM", "Take a warm shower or bath"),
        ("9:45 PM", "Practice relaxation techniques (deep breathing, meditation)"),
        ("10:00 PM", "Read a physical book (not on a screen)"),
        ("10:30 PM", "Lights out"),
    ]
    .into_iter()
    .map(|(time, activity)| RoutineStep {
        time: time.into(),
        activity: activity.into(),
    })
    .collect()
}

// ─────────────────────────────────────────────────────────
// STRESS
// ─────────────────────────────────────────────────────────
fn stress_practices(stress_level: f64) -> Vec<String> {
    let mut practices = strings(&[
        "Practice deep breathing for 5 minutes, 3 times daily",
        "Take short breaks throughout the day to reset and refocus",
        "Spend time in nature when possible",
        "Limit news and social media consumption",
        "Practice gratitude by noting 3 things you're grateful for each day",
        "Maintain social connections with friends and family",
    ]);

    if stress_level > STRESS_REFERRAL_MIN {
        practices.push(
            "Consider speaking with a mental health professional for additional support".into(),
        );
    }

    practices
}

fn stress_techniques() -> Vec<Technique> {
    [
        (
            "Deep Breathing",
            "Breathe in slowly for 4 counts, hold for 2, exhale for 6 counts",
            "5 minutes, 3 times daily",
        ),
        (
            "Progressive Muscle Relaxation",
            "Tense and then release each muscle group in your body",
            "10-15 minutes daily",
        ),
        (
            "Mindfulness Meditation",
            "Focus on the present moment without judgment",
            "10-20 minutes daily",
        ),
        (
            "Guided Imagery",
            "Visualize peaceful scenes or successful outcomes",
            "10 minutes daily",
        ),
    ]
    .into_iter()
    .map(|(name, description, duration)| Technique {
        name: name.into(),
        description: description.into(),
        duration: duration.into(),
    })
    .collect()
}
