//! Offline assistant answering from a fixed set of topics.

use async_trait::async_trait;
use chrono::{Duration, Utc};
use learnsphere_core::prelude::*;
use learnsphere_core::{Reference, ReferenceKind, ResponseStyle, SessionContext};
use tokio::sync::RwLock;
use tracing::instrument;

use crate::backend::AssistantBackend;

struct Topic {
    keywords: &'static [&'static str],
    content: &'static str,
    suggestions: [&'static str; 4],
    references: &'static [(&'static str, Option<&'static str>, ReferenceKind)],
}

const MACHINE_LEARNING: Topic = Topic {
    keywords: &["machine learning", "机器学习"],
    content: "Machine learning is a core branch of artificial intelligence that lets computers learn from data and improve without being explicitly programmed.

## Main types

1. **Supervised learning** trains on labelled data
   - Classification predicts discrete labels
   - Regression predicts continuous values
2. **Unsupervised learning** finds structure in unlabelled data
   - Clustering groups similar samples
   - Dimensionality reduction removes redundant features
3. **Reinforcement learning** learns by trial and error
   - An agent acts in an environment
   - Reward signals shape its policy

## Resources at CityU

- CS4487 Machine Learning
- Research projects in the School of Data Science
- Hands-on work in the AI labs

Start with the maths (linear algebra, probability) before implementing specific algorithms.",
    suggestions: [
        "What is the difference between deep learning and machine learning?",
        "How do I choose the right algorithm?",
        "Which AI research areas does CityU focus on?",
        "What maths do I need for machine learning?",
    ],
    references: &[
        ("Machine Learning Basics", None, ReferenceKind::Document),
        ("CS4487 Machine Learning", None, ReferenceKind::Course),
        ("Machine Learning (Zhou Zhihua)", None, ReferenceKind::Paper),
    ],
};

const UNIVERSITY: Topic = Topic {
    keywords: &["cityu", "城市大学"],
    content: "City University of Hong Kong (CityU) is an internationally recognised research university with strong AI and technology programmes.

## Strengths

- **Computer Science** ranked in the global top 50
- **Engineering** leading in Asia
- **Business** with AACSB and EQUIS accreditation
- **Creative Media** pioneering digital media art in Asia

## AI research directions

1. Machine learning and data mining
2. Computer vision and image processing
3. Natural language processing
4. Intelligent robotics
5. Fintech and blockchain

## Studying in Hong Kong

As an international financial centre, Hong Kong offers internships, a bilingual environment and easy access to both the mainland and the rest of the world.",
    suggestions: [
        "Who are the well-known AI professors at CityU?",
        "How do I apply for a CityU postgraduate programme?",
        "What is campus life like at CityU?",
        "What are the advantages of studying AI in Hong Kong?",
    ],
    references: &[
        ("CityU AI Course Plan", None, ReferenceKind::Document),
        ("CityU website", Some("https://www.cityu.edu.hk"), ReferenceKind::Website),
        ("Department of Computer Science", None, ReferenceKind::Course),
    ],
};

const STUDY_METHODS: Topic = Topic {
    keywords: &["study method", "how to study", "study tips", "学习方法", "如何学习", "学习技巧"],
    content: "Effective learning combines sound methods with steady practice.

## Principles

### Active learning
- **Feynman technique**: explain the idea in plain words
- **Self-testing**: check yourself regularly
- **Concept maps**: connect what you know

### Spaced repetition
- Schedule reviews against the forgetting curve
- Stretch the interval after each successful review
- Spend extra time on weak spots

## Campus resources

- Library databases and e-books
- The learning centre for writing and study skills
- Peer study groups

## Practical tips

1. Set SMART goals
2. Work in focused blocks (e.g. Pomodoro)
3. Keep a distraction-free study space
4. Sleep enough and exercise",
    suggestions: [
        "How do I build an effective study plan?",
        "How can I improve my focus?",
        "How do I balance study and life?",
        "Which study tools do you recommend?",
    ],
    references: &[
        ("Study Methods", None, ReferenceKind::Document),
        ("CityU Learning Resources Guide", None, ReferenceKind::Course),
        ("Research in Cognitive Psychology", None, ReferenceKind::Paper),
    ],
};

const HONG_KONG: Topic = Topic {
    keywords: &["hong kong", "culture", "香港", "文化"],
    content: "Hong Kong is an international city where Eastern and Western cultures meet.

## Everyday culture

- **Languages**: Cantonese, Mandarin and English side by side
- **Food**: cha chaan teng classics such as milk tea and pineapple buns
- **Neighbourhoods**: from street markets to harbour-front malls

## Academic environment

- World-class universities and frequent international exchange
- English-medium teaching
- A gateway between the mainland and the world

## Festivals

- Lunar New Year flower markets and lion dances
- Mid-Autumn lanterns and mooncakes
- Dragon Boat races

Studying at CityU is a chance to experience the city as well as the classroom.",
    suggestions: [
        "What should I know about living in Hong Kong?",
        "Which places and events are worth visiting?",
        "How can I settle into student life here?",
        "What are the job prospects in Hong Kong?",
    ],
    references: &[
        ("Hong Kong Culture Guide", None, ReferenceKind::Document),
        (
            "Hong Kong Tourism Board",
            Some("https://www.discoverhongkong.com"),
            ReferenceKind::Website,
        ),
        ("CityU Campus Culture", None, ReferenceKind::Course),
    ],
};

const FALLBACK: Topic = Topic {
    keywords: &[],
    content: "Thanks for your question! As the LearnSphere study assistant I can help with:

## Academic support
- Course questions and explanations
- Research methods and academic writing
- Study planning

## CityU
- Course information and selection advice
- Campus life
- Career planning

## AI and technology
- AI fundamentals
- Programming help
- Project advice

## Hong Kong
- Local culture
- Practical living tips

Tell me what you would like to know and I will go into detail.",
    suggestions: [
        "I want to learn the basics of machine learning",
        "Tell me about CityU's AI courses",
        "How can I study more efficiently?",
        "What is special about Hong Kong culture?",
    ],
    references: &[
        ("LearnSphere User Guide", None, ReferenceKind::Document),
        ("AI Learning Resources", None, ReferenceKind::Course),
    ],
};

const TOPICS: [&Topic; 4] = [&MACHINE_LEARNING, &UNIVERSITY, &STUDY_METHODS, &HONG_KONG];

fn topic_for(message: &str) -> &'static Topic {
    let message = message.to_lowercase();
    TOPICS
        .into_iter()
        .find(|topic| topic.keywords.iter().any(|k| message.contains(k)))
        .unwrap_or(&FALLBACK)
}

/// Rough token estimate: one token per four characters
pub fn estimate_tokens(content: &str) -> u32 {
    u32::try_from(content.chars().count() / 4).unwrap_or(u32::MAX)
}

/// Keyword-driven assistant with canned replies.
///
/// Topics are checked in order (machine learning, the university, study
/// methods, Hong Kong) with a general reply as fallback. Sessions created
/// here are kept in memory and listed ahead of two sample conversations.
pub struct ScriptedAssistant {
    config: AssistantConfig,
    latency: LatencyConfig,
    created: RwLock<Vec<ChatSession>>,
}

impl ScriptedAssistant {
    pub fn new(config: AssistantConfig) -> Self {
        Self {
            config,
            latency: LatencyConfig::default(),
            created: RwLock::new(Vec::new()),
        }
    }

    /// Delay replies and session calls per `latency`
    pub fn with_latency(mut self, latency: LatencyConfig) -> Self {
        self.latency = latency;
        self
    }

    fn respond(&self, content: &str) -> AssistantResponse {
        let topic = topic_for(content);
        AssistantResponse {
            content: topic.content.to_string(),
            tokens: estimate_tokens(topic.content),
            model: self.config.model.clone(),
            suggestions: topic.suggestions.iter().map(|s| s.to_string()).collect(),
            references: topic
                .references
                .iter()
                .map(|&(title, url, kind)| {
                    let reference = Reference::new(title, kind);
                    match url {
                        Some(url) => reference.with_url(url),
                        None => reference,
                    }
                })
                .collect(),
        }
    }

    async fn pause(delay: std::time::Duration) {
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }

    fn context(&self, subject: &str, documents: &[&str], style: ResponseStyle) -> SessionContext {
        let preferences = ChatPreferences {
            subject: subject.to_string(),
            response_style: style,
            ..self.config.default_preferences.clone()
        };
        SessionContext {
            subject: Some(subject.to_string()),
            documents: documents.iter().map(|d| d.to_string()).collect(),
            preferences: Some(preferences),
        }
    }

    fn sample_sessions(&self, user_id: &str) -> Vec<ChatSession> {
        let now = Utc::now();
        let day_ago = now - Duration::days(1);
        let two_days_ago = now - Duration::days(2);

        let exchange = |question: &str, answer: &str, asked: chrono::DateTime<Utc>, secs: i64| {
            let mut user = ChatMessage::user(question);
            user.timestamp = asked;
            let mut reply = ChatMessage::assistant(answer, None);
            reply.timestamp = asked + Duration::seconds(secs);
            vec![user, reply]
        };

        vec![
            ChatSession {
                id: "1".to_string(),
                title: "Machine learning basics Q&A".to_string(),
                messages: exchange(
                    "What is machine learning?",
                    "Machine learning is a branch of artificial intelligence that lets computers learn and improve without explicit programming. Algorithms and statistical models find patterns in data and use them to make predictions or decisions.",
                    day_ago,
                    5,
                ),
                created_at: day_ago,
                updated_at: day_ago + Duration::seconds(5),
                user_id: user_id.to_string(),
                context: Some(self.context("Machine Learning", &["1"], ResponseStyle::Academic)),
            },
            ChatSession {
                id: "2".to_string(),
                title: "CityU course advice".to_string(),
                messages: exchange(
                    "Can you recommend some AI courses at CityU?",
                    "Based on the CityU curriculum I would suggest:\n\n1. **CS4487 Machine Learning** for core algorithms\n2. **CS5487 Deep Learning** for neural networks\n3. **CS4486 Artificial Intelligence** for foundations and applications\n4. **CS5489 Computer Vision** for image processing\n\nTaking them in this order builds up gradually.",
                    two_days_ago,
                    8,
                ),
                created_at: two_days_ago,
                updated_at: two_days_ago + Duration::seconds(8),
                user_id: user_id.to_string(),
                context: Some(self.context("CityU courses", &["3"], ResponseStyle::Detailed)),
            },
        ]
    }
}

#[async_trait]
impl AssistantBackend for ScriptedAssistant {
    #[instrument(skip(self, request), name = "scripted_send_message")]
    async fn send_message(&self, request: &SendMessageRequest) -> Result<AssistantResponse> {
        Self::pause(self.latency.assistant()).await;
        let response = self.respond(&request.content);
        log::debug!("Scripted reply: {} tokens", response.tokens);
        Ok(response)
    }

    async fn create_session(&self, title: &str, user_id: &str) -> Result<ChatSession> {
        Self::pause(self.latency.write()).await;

        let now = Utc::now();
        let subject = self.config.default_preferences.subject.clone();
        let session = ChatSession {
            id: uuid::Uuid::new_v4().to_string(),
            title: title.to_string(),
            messages: Vec::new(),
            created_at: now,
            updated_at: now,
            user_id: user_id.to_string(),
            context: Some(SessionContext {
                subject: Some(subject),
                documents: Vec::new(),
                preferences: Some(self.config.default_preferences.clone()),
            }),
        };

        self.created.write().await.insert(0, session.clone());
        Ok(session)
    }

    async fn sessions(&self, user_id: &str) -> Result<Vec<ChatSession>> {
        Self::pause(self.latency.list()).await;

        let mut sessions: Vec<ChatSession> = self
            .created
            .read()
            .await
            .iter()
            .filter(|s| s.user_id == user_id)
            .cloned()
            .collect();
        sessions.extend(self.sample_sessions(user_id));
        Ok(sessions)
    }
}
