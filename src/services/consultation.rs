//! Prescription summaries for finished consultations, picked from fixed
//! templates by the consulting doctor's specialty.
use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Doctor,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct TranscriptMessage {
    pub text: String,
    pub sender: Sender,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Prescription {
    pub summary: String,
    pub diagnosis: Diagnosis,
    pub symptoms: Vec<String>,
    pub observations: Vec<String>,
    pub medications: Vec<Medication>,
    pub medication_instructions: String,
    pub follow_up: FollowUp,
    pub lifestyle: Vec<String>,
    pub doctor: Doctor,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Diagnosis {
    pub primary: String,
    pub secondary: String,
    pub notes: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub duration: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct FollowUp {
    pub next_appointment: String,
    pub tests: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Doctor {
    pub name: String,
    pub specialty: String,
    pub license: String,
    pub contact: String,
}

#[async_trait]
pub trait PrescriptionWriter: Send + Sync {
    async fn write(&self, transcript: &[TranscriptMessage], specialty: &str) -> Result<Prescription>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpecialtyTemplate {
    Cardiology,
    Gastroenterology,
    Dermatology,
    General,
}

impl SpecialtyTemplate {
    pub fn for_specialty(specialty: &str) -> Self {
        let lowered = specialty.to_lowercase();
        if lowered.contains("cardio") {
            SpecialtyTemplate::Cardiology
        } else if lowered.contains("gastro") {
            SpecialtyTemplate::Gastroenterology
        } else if lowered.contains("derma") {
            SpecialtyTemplate::Dermatology
        } else {
            SpecialtyTemplate::General
        }
    }

    pub fn prescription(&self) -> Prescription {
        match self {
            SpecialtyTemplate::Cardiology => cardiology(),
            SpecialtyTemplate::Gastroenterology => gastroenterology(),
            SpecialtyTemplate::Dermatology => dermatology(),
            SpecialtyTemplate::General => general_medicine(),
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct CannedPrescriptionWriter;

#[async_trait]
impl PrescriptionWriter for CannedPrescriptionWriter {
    async fn write(&self, transcript: &[TranscriptMessage], specialty: &str) -> Result<Prescription> {
        let template = SpecialtyTemplate::for_specialty(specialty);
        tracing::debug!(
            "Writing {:?} prescription from {} transcript messages",
            template,
            transcript.len()
        );
        Ok(template.prescription())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn medication(name: &str, dosage: &str, frequency: &str, duration: &str) -> Medication {
    Medication {
        name: name.into(),
        dosage: dosage.into(),
        frequency: frequency.into(),
        duration: duration.into(),
    }
}

fn doctor(name: &str, specialty: &str, license: &str, contact: &str) -> Doctor {
    Doctor {
        name: name.into(),
        specialty: specialty.into(),
        license: license.into(),
        contact: contact.into(),
    }
}

fn cardiology() -> Prescription {
    Prescription {
        summary: "Based on our consultation, you're experiencing occasional chest discomfort, shortness of breath during moderate activity, and mild ankle swelling. Your family history of heart disease and current lifestyle factors contribute to your cardiovascular risk profile. I'm recommending medication, lifestyle modifications, and follow-up testing to better manage your heart health.".into(),
        diagnosis: Diagnosis {
            primary: "Essential Hypertension (I10)".into(),
            secondary: "Hyperlipidemia (E78.5)".into(),
            notes: "Patient presents with elevated blood pressure readings over the past 3 months and family history of cardiovascular disease. Lipid profile from previous tests shows elevated LDL cholesterol.".into(),
        },
        symptoms: strings(&[
            "Occasional chest discomfort, non-radiating",
            "Shortness of breath during moderate physical activity",
            "Mild ankle swelling in the evenings",
            "Fatigue after normal daily activities",
        ]),
        observations: strings(&[
            "Blood pressure measured during consultation: 148/92 mmHg",
            "Heart rate: 78 bpm, regular rhythm",
            "Mild edema noted in both ankles",
            "Heart sounds: Normal S1, S2; no murmurs detected",
        ]),
        medications: vec![
            medication("Lisinopril", "10mg", "Once daily", "3 months, then review"),
            medication("Atorvastatin", "20mg", "Once daily at bedtime", "3 months, then review"),
            medication("Aspirin (low-dose)", "81mg", "Once daily with food", "Ongoing"),
        ],
        medication_instructions: "Take medications as prescribed. Lisinopril may cause a dry cough; contact me if this becomes bothersome. Take Atorvastatin at bedtime for optimal effect. Take Aspirin with food to minimize stomach irritation.".into(),
        follow_up: FollowUp {
            next_appointment: "3 months from today".into(),
            tests: strings(&[
                "Comprehensive metabolic panel",
                "Lipid profile (fasting)",
                "Electrocardiogram (ECG)",
                "Echocardiogram to assess heart function",
            ]),
        },
        lifestyle: strings(&[
            "Adopt the DASH diet (Dietary Approaches to Stop Hypertension) - rich in fruits, vegetables, whole grains, and low-fat dairy",
            "Limit sodium intake to less than 2,300mg per day (about 1 teaspoon of salt)",
            "Engage in moderate aerobic exercise for 30 minutes, 5 days per week (walking, swimming, or cycling)",
            "Maintain a healthy weight; aim to reduce current weight by 5-10% over the next 6 months",
            "Limit alcohol consumption to no more than 1 drink per day",
            "Practice stress reduction techniques such as deep breathing or meditation for 10-15 minutes daily",
        ]),
        doctor: doctor("Dr. Meena Patel", "Cardiology", "MA54321", "cardio@example.com"),
    }
}

fn gastroenterology() -> Prescription {
    Prescription {
        summary: "Based on our consultation, you're experiencing recurring abdominal discomfort, bloating after meals, and occasional acid reflux. Your symptoms are consistent with Irritable Bowel Syndrome (IBS) with some features of Gastroesophageal Reflux Disease (GERD). I'm recommending a combination of medications, dietary changes, and lifestyle modifications to help manage your symptoms.".into(),
        diagnosis: Diagnosis {
            primary: "Irritable Bowel Syndrome (K58.9)".into(),
            secondary: "Gastroesophageal Reflux Disease (K21.9)".into(),
            notes: "Patient presents with chronic abdominal discomfort, altered bowel habits, and postprandial bloating consistent with IBS. Also reports symptoms of acid reflux, particularly after large meals or when lying down.".into(),
        },
        symptoms: strings(&[
            "Recurring lower abdominal pain and discomfort",
            "Bloating after meals, particularly with certain foods",
            "Alternating constipation and diarrhea",
            "Heartburn and acid reflux, worse when lying down or after large meals",
        ]),
        observations: strings(&[
            "Abdomen: Soft, mild tenderness in lower quadrants without rebound",
            "No hepatosplenomegaly detected",
            "Normal bowel sounds",
            "No signs of dehydration or malnutrition",
        ]),
        medications: vec![
            medication("Omeprazole", "20mg", "Once daily, 30 minutes before breakfast", "4 weeks, then as needed"),
            medication("Dicyclomine", "10mg", "Twice daily before meals", "2 weeks, then as needed for IBS flares"),
            medication("Psyllium Husk Fiber Supplement", "1 tablespoon", "Once daily mixed with 8oz water", "Ongoing"),
        ],
        medication_instructions: "Take Omeprazole on an empty stomach 30 minutes before breakfast. Dicyclomine may cause dry mouth and blurred vision; avoid driving until you know how it affects you. Always mix the fiber supplement with plenty of water and drink immediately.".into(),
        follow_up: FollowUp {
            next_appointment: "6 weeks from today".into(),
            tests: strings(&[
                "Comprehensive metabolic panel",
                "Complete blood count",
                "Stool analysis for occult blood and parasites",
                "Consider upper endoscopy if symptoms persist despite treatment",
            ]),
        },
        lifestyle: strings(&[
            "Follow a low-FODMAP diet for 4-6 weeks, then gradually reintroduce foods to identify triggers",
            "Eat smaller, more frequent meals rather than large meals",
            "Avoid eating within 3 hours of bedtime to reduce reflux symptoms",
            "Elevate the head of your bed 6-8 inches to reduce nighttime reflux",
            "Practice stress reduction techniques such as deep breathing, yoga, or meditation",
            "Maintain a food diary to identify specific trigger foods",
            "Stay well-hydrated with at least 8 glasses of water daily",
        ]),
        doctor: doctor("Dr. Sunita Verma", "Gastroenterology", "CO86420", "gut@example.com"),
    }
}

fn dermatology() -> Prescription {
    Prescription {
        summary: "Based on our consultation, you're experiencing persistent facial redness, small bumps, and occasional flare-ups triggered by certain foods, stress, and weather changes. These symptoms are consistent with Rosacea. I'm recommending topical treatments, oral medication, skincare modifications, and lifestyle changes to help manage your condition.".into(),
        diagnosis: Diagnosis {
            primary: "Rosacea (L71.9)".into(),
            secondary: "Seborrheic Dermatitis (L21.9)".into(),
            notes: "Patient presents with erythematotelangiectatic and papulopustular rosacea affecting the central face, with some features of seborrheic dermatitis in the nasolabial folds.".into(),
        },
        symptoms: strings(&[
            "Persistent redness across cheeks and nose",
            "Small red bumps and occasional pustules",
            "Facial flushing with triggers (spicy food, alcohol, temperature changes)",
            "Mild burning and stinging sensation",
            "Dryness and flaking around the nasolabial folds",
        ]),
        observations: strings(&[
            "Diffuse erythema across central face with visible telangiectasias",
            "Several inflammatory papules on cheeks and chin",
            "Mild seborrheic dermatitis in nasolabial folds",
            "No ocular involvement noted",
            "No evidence of demodex folliculitis",
        ]),
        medications: vec![
            medication("Metronidazole Cream 0.75%", "Pea-sized amount", "Twice daily to affected areas", "12 weeks"),
            medication("Doxycycline", "40mg", "Once daily with food", "8 weeks"),
            medication("Ketoconazole Cream 2%", "Thin layer", "Twice weekly to nasolabial folds", "4 weeks"),
        ],
        medication_instructions: "Apply Metronidazole cream to clean, dry skin. Take Doxycycline with a full glass of water and food to prevent stomach upset. Avoid lying down for 30 minutes after taking it. Use Ketoconazole cream sparingly on areas with flaking or scaling.".into(),
        follow_up: FollowUp {
            next_appointment: "8 weeks from today".into(),
            tests: strings(&[
                "No specific tests required at this time",
                "Consider skin biopsy if diagnosis becomes uncertain or treatment response is poor",
            ]),
        },
        lifestyle: strings(&[
            "Use gentle, fragrance-free cleansers and moisturizers suitable for sensitive skin",
            "Apply broad-spectrum SPF 30+ sunscreen daily, even on cloudy days",
            "Avoid known triggers: spicy foods, alcohol (especially red wine), extreme temperatures",
            "Consider using a green-tinted primer or foundation to neutralize redness",
            "Avoid hot showers, saunas, and steam rooms which can trigger flares",
            "Practice stress management techniques as stress can exacerbate symptoms",
            "Use a humidifier in dry environments to maintain skin hydration",
        ]),
        doctor: doctor("Dr. Lakshmi Reddy", "Dermatology", "TX13579", "skin@example.com"),
    }
}

fn general_medicine() -> Prescription {
    Prescription {
        summary: "Based on our consultation, you're experiencing fatigue, occasional headaches, and difficulty sleeping. These symptoms appear to be related to stress and possible mild depression. I'm recommending lifestyle modifications, stress management techniques, and follow-up to monitor your progress.".into(),
        diagnosis: Diagnosis {
            primary: "Adjustment Disorder with Mixed Anxiety and Depressed Mood (F43.23)".into(),
            secondary: "Insomnia due to stress (G47.01)".into(),
            notes: "Patient presents with symptoms of fatigue, mood changes, and sleep disturbances that appear to be related to recent life stressors including work pressure and family responsibilities.".into(),
        },
        symptoms: strings(&[
            "Persistent fatigue not relieved by rest",
            "Tension headaches, typically in the afternoon",
            "Difficulty falling asleep and staying asleep",
            "Reduced interest in usual activities",
            "Increased irritability and difficulty concentrating",
        ]),
        observations: strings(&[
            "Patient appears tired with mild psychomotor slowing",
            "Affect is somewhat flat but appropriate",
            "No evidence of suicidal ideation or psychosis",
            "Vital signs within normal limits",
            "Physical examination unremarkable",
        ]),
        medications: vec![
            medication("Melatonin", "3mg", "Once daily, 1 hour before bedtime", "4 weeks, then reassess"),
            medication("Magnesium Glycinate", "300mg", "Once daily with dinner", "Ongoing"),
        ],
        medication_instructions: "Melatonin may cause drowsiness; take only before bedtime. Magnesium may cause loose stools in some people; if this occurs, reduce the dose temporarily.".into(),
        follow_up: FollowUp {
            next_appointment: "4 weeks from today".into(),
            tests: strings(&[
                "Complete blood count",
                "Comprehensive metabolic panel",
                "Thyroid function tests",
                "Vitamin D level",
                "Consider referral to mental health specialist if symptoms persist or worsen",
            ]),
        },
        lifestyle: strings(&[
            "Establish a regular sleep schedule, going to bed and waking up at the same time each day",
            "Practice sleep hygiene: dark room, comfortable temperature, no screens 1 hour before bed",
            "Engage in moderate physical activity for 30 minutes daily, preferably outdoors",
            "Practice mindfulness meditation or deep breathing for 10-15 minutes daily",
            "Limit caffeine intake, especially after noon",
            "Consider using a journal to track stressors and mood patterns",
            "Maintain social connections and seek support from friends and family",
        ]),
        doctor: doctor("Dr. Anil Sharma", "General Medicine", "NY12345", "doctor@example.com"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn specialty_matching_is_case_insensitive() {
        assert_eq!(SpecialtyTemplate::for_specialty("Cardiologist"), SpecialtyTemplate::Cardiology);
        assert_eq!(
            SpecialtyTemplate::for_specialty("GASTROENTEROLOGY"),
            SpecialtyTemplate::Gastroenterology
        );
        assert_eq!(SpecialtyTemplate::for_specialty("Dermatologist"), SpecialtyTemplate::Dermatology);
        assert_eq!(SpecialtyTemplate::for_specialty("Ayurveda"), SpecialtyTemplate::General);
    }

    #[test]
    fn transcript_messages_parse_with_optional_time() {
        let messages: Vec<TranscriptMessage> = serde_json::from_value(json!([
            { "text": "I get chest pain on stairs", "sender": "user", "time": "2024-03-18T10:02:00.000Z" },
            { "text": "How long has this been happening?", "sender": "doctor" }
        ]))
        .unwrap();
        assert_eq!(messages[0].sender, Sender::User);
        assert_eq!(
            messages[0].time.map(|t| t.to_rfc3339()),
            Some("2024-03-18T10:02:00+00:00".to_string())
        );
        assert_eq!(messages[1].time, None);
    }

    #[tokio::test]
    async fn canned_writer_ignores_transcript_content() {
        let writer = CannedPrescriptionWriter;
        let empty = writer.write(&[], "Dermatology").await.unwrap();
        let chatty = writer
            .write(
                &[TranscriptMessage {
                    text: "My knee hurts".into(),
                    sender: Sender::User,
                    time: None,
                }],
                "Dermatology",
            )
            .await
            .unwrap();
        assert_eq!(empty, chatty);
        assert_eq!(empty.doctor.name, "Dr. Lakshmi Reddy");
    }

    #[test]
    fn prescription_wire_format() {
        let json = serde_json::to_value(SpecialtyTemplate::Cardiology.prescription()).unwrap();
        assert_eq!(json["followUp"]["nextAppointment"], "3 months from today");
        assert_eq!(json["medications"].as_array().unwrap().len(), 3);
        assert!(json["medicationInstructions"].is_string());
        assert_eq!(json["diagnosis"]["primary"], "Essential Hypertension (I10)");
    }
}
