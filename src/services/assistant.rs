use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

/// One prior message of the conversation as the chat page sends it.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatTurn {
    pub role: ChatRole,
    pub content: String,
}

#[async_trait]
pub trait ChatAssistant: Send + Sync {
    async fn reply(&self, message: &str, history: &[ChatTurn]) -> Result<String>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChatTopic {
    Sleep,
    Stress,
    Digestion,
    Weight,
    Skin,
    Joints,
    GeneralHealth,
    Other,
}

impl ChatTopic {
    // Checked in order; the first topic with a matching keyword wins.
    const KEYWORDS: &'static [(ChatTopic, &'static [&'static str])] = &[
        (ChatTopic::Sleep, &["sleep", "insomnia", "can't sleep"]),
        (ChatTopic::Stress, &["stress", "anxiety", "worried"]),
        (
            ChatTopic::Digestion,
            &["digestion", "stomach", "constipation", "diarrhea"],
        ),
        (
            ChatTopic::Weight,
            &["weight", "fat", "obesity", "lose weight"],
        ),
        (ChatTopic::Skin, &["skin", "acne", "rash", "eczema"]),
        (
            ChatTopic::Joints,
            &["joint", "arthritis", "pain", "inflammation"],
        ),
        (
            ChatTopic::GeneralHealth,
            &["health", "wellness", "balance", "dosha"],
        ),
    ];

    pub fn detect(message: &str) -> Self {
        let lowered = message.to_lowercase();
        Self::KEYWORDS
            .iter()
            .find(|(_, keys)| keys.iter().any(|k| lowered.contains(k)))
            .map(|(topic, _)| *topic)
            .unwrap_or(ChatTopic::Other)
    }

    pub fn reply(&self) -> &'static str {
        match self {
            ChatTopic::Sleep => "According to Ayurveda, sleep issues are often related to an imbalance in your doshas, particularly Vata. Here are some recommendations:\n\n1. Try to sleep and wake at consistent times\n2. Avoid electronic devices 1-2 hours before bed\n3. Drink warm milk with a pinch of nutmeg before sleeping\n4. Practice gentle yoga or meditation before bed\n5. Consider herbs like Ashwagandha or Jatamansi, which are known to promote restful sleep",
            ChatTopic::Stress => "Stress management is crucial in Ayurveda. Here are some Ayurvedic approaches to reduce stress:\n\n1. Practice pranayama (breathing exercises) like Anulom Vilom\n2. Include adaptogenic herbs like Ashwagandha in your routine\n3. Apply warm sesame oil to your scalp and feet before sleeping\n4. Follow a regular daily routine (dinacharya)\n5. Consider a gentle Abhyanga (self-massage) with dosha-appropriate oils",
            ChatTopic::Digestion => "Digestion is central to health in Ayurveda. Here are some suggestions:\n\n1. Eat your main meal at lunch when digestive fire (Agni) is strongest\n2. Sip warm water throughout the day\n3. Include digestive spices like ginger, cumin, and fennel in your meals\n4. Consider Triphala, a traditional formula for digestive health\n5. Avoid eating when stressed or emotional\n\nIf your digestive issues persist, I recommend consulting with one of our Ayurvedic doctors for personalized advice.",
            ChatTopic::Weight => "Ayurveda approaches weight management holistically. Here are some suggestions:\n\n1. Determine your dominant dosha (Vata, Pitta, Kapha) as this affects your metabolism\n2. Focus on warm, cooked foods with digestive spices\n3. Consider herbs like Triphala, Guggulu, or Garcinia for supporting metabolism\n4. Practice yoga asanas that stimulate digestion and metabolism\n5. Follow dinacharya (daily routine) with meals at regular times\n\nFor a personalized weight management plan, I recommend consulting with one of our Ayurvedic doctors.",
            ChatTopic::Skin => "Skin health in Ayurveda is connected to internal balance. Here are some Ayurvedic approaches:\n\n1. Determine if your skin issue is Vata (dry, rough), Pitta (inflamed, red), or Kapha (oily, congested)\n2. Consider blood-purifying herbs like Neem, Turmeric, or Manjistha\n3. Apply appropriate oils or pastes based on your skin type\n4. Stay hydrated and eat a diet rich in antioxidants\n5. Manage stress, as it can significantly impact skin health\n\nFor persistent skin issues, I recommend consulting with Dr. Lakshmi Reddy, who specializes in Ayurvedic dermatology.",
            ChatTopic::Joints => "Joint health is important in Ayurveda. Here are some suggestions:\n\n1. Consider anti-inflammatory herbs like Turmeric, Boswellia, or Ashwagandha\n2. Apply warm sesame or castor oil to affected joints\n3. Practice gentle yoga to maintain joint mobility\n4. Avoid cold foods and environments which can aggravate joint pain\n5. Maintain a diet that reduces inflammation\n\nFor chronic joint issues, I recommend consulting with Dr. Rajiv Gupta, who specializes in joint and pain management.",
            ChatTopic::GeneralHealth => "Ayurveda focuses on balance and prevention. Here are some general wellness principles:\n\n1. Understand your unique constitution (Prakriti) and current imbalances (Vikriti)\n2. Follow dinacharya (daily routine) aligned with natural cycles\n3. Eat according to your dominant dosha and the season\n4. Practice regular gentle detoxification (Panchakarma)\n5. Incorporate meditation and yoga into your routine\n\nFor a personalized wellness plan, I recommend booking a consultation with one of our Ayurvedic doctors.",
            ChatTopic::Other => "Thank you for your question. Ayurveda offers personalized approaches based on your unique constitution and current imbalances. For specific advice on your situation, I recommend booking a consultation with one of our Ayurvedic doctors who can provide tailored recommendations for your health needs.",
        }
    }
}

/// Keyword-matched replies. Never fails, so it doubles as the fallback.
#[derive(Debug, Clone, Default)]
pub struct RuleBasedAssistant;

impl RuleBasedAssistant {
    pub fn answer(&self, message: &str) -> String {
        ChatTopic::detect(message).reply().to_string()
    }
}

#[async_trait]
impl ChatAssistant for RuleBasedAssistant {
    async fn reply(&self, message: &str, _history: &[ChatTurn]) -> Result<String> {
        Ok(self.answer(message))
    }
}

/// Routes chat to the hosted model when one is configured and answers from
/// the keyword rules when it is missing or failing.
#[derive(Clone)]
pub struct ChatService {
    primary: Option<Arc<dyn ChatAssistant>>,
    fallback: RuleBasedAssistant,
}

impl ChatService {
    pub fn new(primary: Option<Arc<dyn ChatAssistant>>) -> Self {
        Self {
            primary,
            fallback: RuleBasedAssistant,
        }
    }

    pub fn rule_based() -> Self {
        Self::new(None)
    }

    pub fn has_primary(&self) -> bool {
        self.primary.is_some()
    }

    pub async fn reply(&self, message: &str, history: &[ChatTurn]) -> String {
        if let Some(primary) = &self.primary {
            match primary.reply(message, history).await {
                Ok(text) if !text.trim().is_empty() => return text,
                Ok(_) => tracing::warn!("Chat model returned an empty reply, using rule-based answer"),
                Err(e) => tracing::warn!("Chat model failed, using rule-based answer: {}", e),
            }
        }
        self.fallback.answer(message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::anyhow;

    struct Failing;

    #[async_trait]
    impl ChatAssistant for Failing {
        async fn reply(&self, _message: &str, _history: &[ChatTurn]) -> Result<String> {
            Err(anyhow!("upstream unavailable"))
        }
    }

    struct Echo;

    #[async_trait]
    impl ChatAssistant for Echo {
        async fn reply(&self, message: &str, history: &[ChatTurn]) -> Result<String> {
            Ok(format!("{} ({} earlier)", message, history.len()))
        }
    }

    #[test]
    fn topic_detection_follows_rule_order() {
        assert_eq!(ChatTopic::detect("I can't SLEEP at night"), ChatTopic::Sleep);
        assert_eq!(ChatTopic::detect("work anxiety"), ChatTopic::Stress);
        assert_eq!(ChatTopic::detect("upset stomach"), ChatTopic::Digestion);
        assert_eq!(ChatTopic::detect("how to lose weight"), ChatTopic::Weight);
        assert_eq!(ChatTopic::detect("acne on my chin"), ChatTopic::Skin);
        assert_eq!(ChatTopic::detect("knee pain"), ChatTopic::Joints);
        assert_eq!(ChatTopic::detect("balance my dosha"), ChatTopic::GeneralHealth);
        assert_eq!(ChatTopic::detect("hello"), ChatTopic::Other);
        // sleep is checked before stress
        assert_eq!(ChatTopic::detect("stress keeps me from sleep"), ChatTopic::Sleep);
    }

    #[tokio::test]
    async fn rule_based_assistant_always_answers() {
        let reply = RuleBasedAssistant.reply("what about eczema?", &[]).await.unwrap();
        assert!(reply.contains("Dr. Lakshmi Reddy"));
    }

    #[tokio::test]
    async fn failing_primary_falls_back() {
        let service = ChatService::new(Some(Arc::new(Failing)));
        let reply = service.reply("insomnia again", &[]).await;
        assert_eq!(reply, ChatTopic::Sleep.reply());
    }

    #[tokio::test]
    async fn working_primary_is_used() {
        let service = ChatService::new(Some(Arc::new(Echo)));
        let history = vec![ChatTurn {
            role: ChatRole::User,
            content: "hi".into(),
        }];
        assert_eq!(service.reply("hello", &history).await, "hello (1 earlier)");
        assert!(service.has_primary());
    }

    #[tokio::test]
    async fn no_primary_uses_rules() {
        let service = ChatService::rule_based();
        assert!(!service.has_primary());
        assert_eq!(service.reply("hello", &[]).await, ChatTopic::Other.reply());
    }

    #[test]
    fn history_ignores_extra_fields() {
        let turns: Vec<ChatTurn> = serde_json::from_value(serde_json::json!([
            { "id": "1", "role": "assistant", "content": "Namaste!", "timestamp": "2024-01-01" }
        ]))
        .unwrap();
        assert_eq!(turns[0].role, ChatRole::Assistant);
    }
}
