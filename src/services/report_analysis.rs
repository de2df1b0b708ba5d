use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct ReportAnalysis {
    pub summary: String,
    pub key_findings: Vec<String>,
    pub abnormal_parameters: Vec<AbnormalParameter>,
    pub normal_parameters: Vec<NormalParameter>,
    pub recommendations: Vec<String>,
    pub potential_risks: Vec<PotentialRisk>,
    pub lifestyle_modifications: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AbnormalParameter {
    pub name: String,
    pub value: String,
    pub range: String,
    pub status: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NormalParameter {
    pub name: String,
    pub value: String,
    pub range: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PotentialRisk {
    pub condition: String,
    pub description: String,
}

#[async_trait]
pub trait ReportAnalyzer: Send + Sync {
    async fn analyze(&self, report_name: &str) -> Result<ReportAnalysis>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReportTemplate {
    BloodCount,
    LipidProfile,
    Thyroid,
    General,
}

impl ReportTemplate {
    /// First keyword group that appears in the report name wins.
    pub fn for_report_name(report_name: &str) -> Self {
        let lowered = report_name.to_lowercase();
        let has = |keys: &[&str]| keys.iter().any(|k| lowered.contains(k));

        if has(&["blood", "cbc"]) {
            ReportTemplate::BloodCount
        } else if has(&["lipid", "cholesterol"]) {
            ReportTemplate::LipidProfile
        } else if has(&["thyroid"]) {
            ReportTemplate::Thyroid
        } else {
            ReportTemplate::General
        }
    }

    pub fn analysis(&self) -> ReportAnalysis {
        match self {
            ReportTemplate::BloodCount => blood_count_analysis(),
            ReportTemplate::LipidProfile => lipid_profile_analysis(),
            ReportTemplate::Thyroid => thyroid_analysis(),
            ReportTemplate::General => general_analysis(),
        }
    }
}

/// Keyword-selected templates; no document content is read.
#[derive(Debug, Clone, Default)]
pub struct CannedReportAnalyzer;

#[async_trait]
impl ReportAnalyzer for CannedReportAnalyzer {
    async fn analyze(&self, report_name: &str) -> Result<ReportAnalysis> {
        let template = ReportTemplate::for_report_name(report_name);
        tracing::debug!("Report {:?} matched template {:?}", report_name, template);
        Ok(template.analysis())
    }
}

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn abnormal(name: &str, value: &str, range: &str, status: &str) -> AbnormalParameter {
    AbnormalParameter {
        name: name.into(),
        value: value.into(),
        range: range.into(),
        status: status.into(),
    }
}

fn normal(name: &str, value: &str, range: &str) -> NormalParameter {
    NormalParameter {
        name: name.into(),
        value: value.into(),
        range: range.into(),
    }
}

fn risk(condition: &str, description: &str) -> PotentialRisk {
    PotentialRisk {
        condition: condition.into(),
        description: description.into(),
    }
}

fn blood_count_analysis() -> ReportAnalysis {
    ReportAnalysis {
        summary: "Your Complete Blood Count (CBC) results show several values outside the normal range. Your hemoglobin is slightly below normal, suggesting mild anemia. White blood cell count is elevated, which may indicate an infection or inflammation. Platelet count is within normal range.".into(),
        key_findings: strings(&[
            "Hemoglobin level is below normal range, indicating possible iron deficiency anemia",
            "Elevated white blood cell count suggests your body may be fighting an infection",
            "Red blood cell morphology shows slight microcytosis (smaller than normal red cells)",
            "Other parameters are within normal limits",
        ]),
        abnormal_parameters: vec![
            abnormal("Hemoglobin", "11.2 g/dL", "12.0-16.0 g/dL", "Low"),
            abnormal("White Blood Cells", "12.3 x10^9/L", "4.0-11.0 x10^9/L", "High"),
            abnormal("Mean Corpuscular Volume", "78 fL", "80-100 fL", "Low"),
        ],
        normal_parameters: vec![
            normal("Red Blood Cells", "4.6 x10^12/L", "4.0-5.5 x10^12/L"),
            normal("Platelets", "250 x10^9/L", "150-450 x10^9/L"),
            normal("Hematocrit", "38%", "36-46%"),
        ],
        recommendations: strings(&[
            "Consider dietary changes to increase iron intake (lean red meat, beans, spinach)",
            "Follow up with your healthcare provider to identify the cause of your elevated white blood cell count",
            "A ferritin test may be helpful to confirm iron deficiency",
            "Repeat CBC in 4-6 weeks to monitor progress",
            "Stay well-hydrated and maintain a balanced diet",
        ]),
        potential_risks: vec![risk(
            "Iron Deficiency Anemia",
            "Your results suggest mild anemia, which can cause fatigue, weakness, and reduced exercise capacity if left untreated.",
        )],
        lifestyle_modifications: strings(&[
            "Include iron-rich foods in your diet (lean red meat, beans, lentils, fortified cereals)",
            "Consume vitamin C with iron-rich foods to enhance absorption",
            "Avoid tea, coffee, or calcium supplements with meals as they can inhibit iron absorption",
            "Ensure adequate rest while your body recovers",
            "Stay hydrated with at least 8 glasses of water daily",
        ]),
    }
}

fn lipid_profile_analysis() -> ReportAnalysis {
    ReportAnalysis {
        summary: "Your lipid profile shows elevated total cholesterol and LDL (bad) cholesterol levels. HDL (good) cholesterol is within normal range, but on the lower end. Triglycerides are moderately elevated. This pattern indicates an increased risk for cardiovascular disease that should be addressed through lifestyle modifications and possibly medication.".into(),
        key_findings: strings(&[
            "Total cholesterol is significantly above the desirable range",
            "LDL cholesterol (bad cholesterol) is elevated, increasing risk for plaque buildup in arteries",
            "HDL cholesterol (good cholesterol) is at the lower end of normal range",
            "Triglycerides are moderately elevated, suggesting potential metabolic issues",
        ]),
        abnormal_parameters: vec![
            abnormal("Total Cholesterol", "245 mg/dL", "<200 mg/dL", "High"),
            abnormal("LDL Cholesterol", "162 mg/dL", "<100 mg/dL", "High"),
            abnormal("Triglycerides", "180 mg/dL", "<150 mg/dL", "High"),
        ],
        normal_parameters: vec![
            normal("HDL Cholesterol", "42 mg/dL", ">40 mg/dL"),
            normal("Total Cholesterol/HDL Ratio", "5.8", "<5.0"),
        ],
        recommendations: strings(&[
            "Adopt a heart-healthy diet low in saturated fats and trans fats",
            "Increase physical activity to at least 150 minutes of moderate exercise per week",
            "Consider consultation with a healthcare provider about cholesterol-lowering medications",
            "Monitor blood pressure regularly",
            "Repeat lipid profile in 3 months to assess improvement",
        ]),
        potential_risks: vec![
            risk(
                "Cardiovascular Disease",
                "Elevated LDL cholesterol increases risk for atherosclerosis (hardening of arteries) and cardiovascular events like heart attack and stroke.",
            ),
            risk(
                "Metabolic Syndrome",
                "The combination of elevated triglycerides and lower HDL suggests possible metabolic syndrome, which increases risk for diabetes and heart disease.",
            ),
        ],
        lifestyle_modifications: strings(&[
            "Reduce intake of saturated fats (fatty meats, full-fat dairy) and eliminate trans fats",
            "Increase consumption of omega-3 fatty acids (fatty fish, walnuts, flaxseeds)",
            "Add soluble fiber to your diet (oats, beans, fruits)",
            "Limit alcohol consumption",
            "Maintain a healthy weight through diet and regular exercise",
            "Quit smoking if applicable",
        ]),
    }
}

fn thyroid_analysis() -> ReportAnalysis {
    ReportAnalysis {
        summary: "Your thyroid function test results indicate subclinical hypothyroidism. Your TSH (Thyroid Stimulating Hormone) is elevated, while T4 (Thyroxine) is within normal range but on the lower end. This pattern suggests your thyroid is starting to underperform, but hasn't yet resulted in overt hypothyroidism.".into(),
        key_findings: strings(&[
            "Elevated TSH level indicates the pituitary gland is working harder to stimulate your thyroid",
            "Free T4 is within normal range but on the lower end",
            "This pattern is consistent with subclinical hypothyroidism",
            "Anti-thyroid antibodies are present, suggesting autoimmune thyroiditis (Hashimoto's disease)",
        ]),
        abnormal_parameters: vec![
            abnormal("TSH", "6.8 mIU/L", "0.4-4.0 mIU/L", "High"),
            abnormal("Anti-TPO Antibodies", "120 IU/mL", "<35 IU/mL", "High"),
        ],
        normal_parameters: vec![
            normal("Free T4", "0.9 ng/dL", "0.8-1.8 ng/dL"),
            normal("Free T3", "3.1 pg/mL", "2.3-4.2 pg/mL"),
        ],
        recommendations: strings(&[
            "Follow up with an endocrinologist to discuss these results",
            "Consider thyroid hormone replacement therapy if symptoms are present",
            "Monitor thyroid function every 6 months",
            "Check vitamin D and B12 levels, as deficiencies are common with thyroid disorders",
            "Evaluate for other autoimmune conditions if symptoms warrant",
        ]),
        potential_risks: vec![
            risk(
                "Overt Hypothyroidism",
                "Subclinical hypothyroidism can progress to overt hypothyroidism, especially with positive antibodies.",
            ),
            risk(
                "Cardiovascular Risk",
                "Untreated hypothyroidism may increase cholesterol levels and risk for heart disease.",
            ),
        ],
        lifestyle_modifications: strings(&[
            "Ensure adequate iodine intake through diet (iodized salt, seafood)",
            "Consider selenium-rich foods (Brazil nuts, seafood) which support thyroid function",
            "Maintain regular exercise to help with metabolism and energy levels",
            "Practice stress management techniques, as stress can impact thyroid function",
            "Get adequate sleep to support overall hormonal balance",
        ]),
    }
}

fn general_analysis() -> ReportAnalysis {
    ReportAnalysis {
        summary: "Your general health report shows most values within normal ranges, with a few minor deviations. Overall, your results indicate good general health with some areas for improvement.".into(),
        key_findings: strings(&[
            "Most parameters are within normal ranges",
            "Vitamin D level is slightly below optimal range",
            "Fasting glucose is at the higher end of normal range",
            "Kidney and liver function tests are normal",
        ]),
        abnormal_parameters: vec![
            abnormal("Vitamin D", "24 ng/mL", "30-80 ng/mL", "Low"),
            abnormal("Fasting Glucose", "99 mg/dL", "70-99 mg/dL", "High"),
        ],
        normal_parameters: vec![
            normal("ALT (Liver Enzyme)", "22 U/L", "7-56 U/L"),
            normal("Creatinine", "0.9 mg/dL", "0.6-1.2 mg/dL"),
            normal("Sodium", "140 mEq/L", "135-145 mEq/L"),
        ],
        recommendations: strings(&[
            "Consider vitamin D supplementation after consulting with your healthcare provider",
            "Monitor your blood glucose levels and consider reducing refined carbohydrate intake",
            "Maintain regular check-ups to monitor your health status",
            "Continue with a balanced diet and regular exercise",
            "Stay well-hydrated throughout the day",
        ]),
        potential_risks: vec![
            risk(
                "Vitamin D Deficiency",
                "Low vitamin D levels can affect bone health, immune function, and mood regulation.",
            ),
            risk(
                "Prediabetes",
                "Your fasting glucose is at the upper limit of normal, which may indicate prediabetes risk if it increases.",
            ),
        ],
        lifestyle_modifications: strings(&[
            "Increase sun exposure (15-30 minutes daily) to boost vitamin D levels naturally",
            "Consider vitamin D-rich foods (fatty fish, egg yolks, fortified foods)",
            "Reduce intake of refined carbohydrates and sugary foods",
            "Incorporate more fiber-rich foods in your diet",
            "Maintain regular physical activity of at least 150 minutes per week",
        ]),
    }
}
