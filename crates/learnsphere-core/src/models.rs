//! Core data models for documents, users and assistant conversations.
//!
//! These types are designed to be:
//! - **Serializable**: camelCase on the wire, matching the client data shapes
//! - **Debuggable**: Derive Debug for easy inspection
//! - **Type-Safe**: Enums replace magic strings (`LinkType`, `ChatRole`, ...)

use chrono::{DateTime, Utc};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

// ============================================================================
// Documents
// ============================================================================

/// Derived statistics shown next to a document
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentMetadata {
    pub word_count: usize,
    /// Estimated reading time in minutes
    pub reading_time: u32,
    pub last_edited_by: String,
}

/// A markdown note owned by a user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,
    pub title: String,
    pub content: String,
    /// Unique, insertion order preserved
    pub tags: Vec<String>,
    pub category: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub author_id: String,
    pub is_public: bool,
    pub collaborators: Vec<String>,
    /// Ids of other documents referencing this one. Derived by the link graph.
    pub backlinks: Vec<String>,
    pub metadata: DocumentMetadata,
}

impl Document {
    /// Whether the document carries the given tag (exact match)
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Case-insensitive match over title, body and tags
    pub fn matches_query(&self, query: &str) -> bool {
        let needle = query.to_lowercase();
        self.title.to_lowercase().contains(&needle)
            || self.content.to_lowercase().contains(&needle)
            || self.tags.iter().any(|t| t.to_lowercase().contains(&needle))
    }
}

/// Anything that can be scanned for outgoing cross-references.
///
/// Backlink discovery only needs an id, a title and a body, so it works over
/// full [`Document`]s as well as lightweight views (e.g. files on disk).
pub trait LinkSource {
    fn id(&self) -> &str;
    fn title(&self) -> &str;
    fn content(&self) -> &str;
}

impl LinkSource for Document {
    fn id(&self) -> &str {
        &self.id
    }

    fn title(&self) -> &str {
        &self.title
    }

    fn content(&self) -> &str {
        &self.content
    }
}

impl<T: LinkSource + ?Sized> LinkSource for &T {
    fn id(&self) -> &str {
        (**self).id()
    }

    fn title(&self) -> &str {
        (**self).title()
    }

    fn content(&self) -> &str {
        (**self).content()
    }
}

/// Kind of relationship expressed by a cross-reference
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LinkType {
    /// `[[Title]]` inside the body
    #[default]
    Reference,
    Mention,
    Citation,
}

/// A cross-reference from one document to another
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BiDirectionalLink {
    pub source_id: String,
    /// Empty when no document with `target_title` exists
    pub target_id: String,
    pub source_text: String,
    pub target_title: String,
    pub link_type: LinkType,
}

impl BiDirectionalLink {
    /// Whether the target has been resolved to a document id
    pub fn is_resolved(&self) -> bool {
        !self.target_id.is_empty()
    }
}

/// One heading in a document outline
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TocEntry {
    pub level: u8, // 1-6
    pub title: String,
    pub anchor: String,
}

/// Every derived view of a body, computed in one call
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentAnalysis {
    pub summary: String,
    pub tags: Vec<String>,
    pub toc: Vec<TocEntry>,
    pub outbound_links: Vec<String>,
    pub word_count: usize,
    pub reading_time: u32,
}

/// Input for creating a document
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDocument {
    pub title: String,
    pub content: Option<String>,
    pub category: String,
    pub tags: Option<Vec<String>>,
    pub folder_id: Option<String>,
}

/// Partial update; `None` fields keep their current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDocument {
    pub title: Option<String>,
    pub content: Option<String>,
    pub tags: Option<Vec<String>>,
    pub category: Option<String>,
}

impl UpdateDocument {
    /// Whether the update touches fields that feed the link graph
    pub fn affects_links(&self) -> bool {
        self.title.is_some() || self.content.is_some()
    }
}

/// Folder tree node used by document listings
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentFolder {
    pub id: String,
    pub name: String,
    pub parent_id: Option<String>,
    pub children: Vec<DocumentFolder>,
    pub documents: Vec<Document>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// ============================================================================
// Users
// ============================================================================

/// Interface language
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    Zh,
    En,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    #[default]
    Student,
    Faculty,
    Researcher,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub language: Language,
    pub theme: Theme,
    pub notifications: bool,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            language: Language::Zh,
            theme: Theme::Light,
            notifications: true,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub avatar: Option<String>,
    pub department: Option<String>,
    pub student_id: Option<String>,
    pub role: UserRole,
    pub preferences: UserPreferences,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginCredentials {
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub remember_me: bool,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterData {
    pub email: String,
    pub username: String,
    pub full_name: String,
    pub password: String,
    pub confirm_password: String,
    pub department: Option<String>,
    pub student_id: Option<String>,
    pub role: UserRole,
}

/// Partial profile change; `None` keeps the current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProfileUpdate {
    pub full_name: Option<String>,
    pub avatar: Option<String>,
    pub department: Option<String>,
    pub language: Option<Language>,
    pub theme: Option<Theme>,
    pub notifications: Option<bool>,
}

/// Signed-in user plus the bearer token issued for them
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthSession {
    pub user: User,
    pub token: String,
}

// ============================================================================
// Assistant
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
    System,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReferenceKind {
    Document,
    Course,
    Paper,
    Website,
}

/// Source material cited by an assistant reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    pub title: String,
    pub url: Option<String>,
    #[serde(rename = "type")]
    pub kind: ReferenceKind,
}

impl Reference {
    pub fn new(title: impl Into<String>, kind: ReferenceKind) -> Self {
        Self {
            title: title.into(),
            url: None,
            kind,
        }
    }

    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageMetadata {
    pub tokens: Option<u32>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub references: Vec<Reference>,
    /// Set on placeholder replies produced after a backend failure
    #[serde(default)]
    pub error: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub id: String,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
    pub metadata: Option<MessageMetadata>,
}

impl ChatMessage {
    fn new(role: ChatRole, content: impl Into<String>, metadata: Option<MessageMetadata>) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            role,
            content: content.into(),
            timestamp: Utc::now(),
            metadata,
        }
    }

    /// Message typed by the user, stamped now
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content, None)
    }

    /// Assistant reply, stamped now
    pub fn assistant(content: impl Into<String>, metadata: Option<MessageMetadata>) -> Self {
        Self::new(ChatRole::Assistant, content, metadata)
    }

    pub fn is_error(&self) -> bool {
        self.metadata.as_ref().is_some_and(|m| m.error)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseStyle {
    #[default]
    Academic,
    Casual,
    Detailed,
    Concise,
}

// Field names stay snake_case so the struct can be layered through `AppConfig`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatPreferences {
    pub language: Language,
    pub response_style: ResponseStyle,
    pub subject: String,
    pub include_references: bool,
    pub max_tokens: u32,
}

impl Default for ChatPreferences {
    fn default() -> Self {
        Self {
            language: Language::Zh,
            response_style: ResponseStyle::Academic,
            subject: "General study".to_string(),
            include_references: true,
            max_tokens: 2000,
        }
    }
}

/// Partial preference change; `None` keeps the current value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PreferencesUpdate {
    pub language: Option<Language>,
    pub response_style: Option<ResponseStyle>,
    pub subject: Option<String>,
    pub include_references: Option<bool>,
    pub max_tokens: Option<u32>,
}

impl ChatPreferences {
    /// Apply a partial update in place
    pub fn merge(&mut self, update: PreferencesUpdate) {
        if let Some(language) = update.language {
            self.language = language;
        }
        if let Some(style) = update.response_style {
            self.response_style = style;
        }
        if let Some(subject) = update.subject {
            self.subject = subject;
        }
        if let Some(include) = update.include_references {
            self.include_references = include;
        }
        if let Some(max_tokens) = update.max_tokens {
            self.max_tokens = max_tokens;
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SessionContext {
    pub subject: Option<String>,
    #[serde(default)]
    pub documents: Vec<String>,
    pub preferences: Option<ChatPreferences>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatSession {
    pub id: String,
    pub title: String,
    pub messages: Vec<ChatMessage>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub user_id: String,
    pub context: Option<SessionContext>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RequestContext {
    #[serde(default)]
    pub documents: Vec<String>,
    pub subject: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendMessageRequest {
    pub content: String,
    pub session_id: Option<String>,
    pub context: Option<RequestContext>,
}

impl SendMessageRequest {
    pub fn new(content: impl Into<String>) -> Self {
        Self {
            content: content.into(),
            ..Self::default()
        }
    }

    pub fn in_session(mut self, session_id: impl Into<String>) -> Self {
        self.session_id = Some(session_id.into());
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AssistantResponse {
    pub content: String,
    pub tokens: u32,
    pub model: String,
    #[serde(default)]
    pub suggestions: Vec<String>,
    #[serde(default)]
    pub references: Vec<Reference>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptCategory {
    Study,
    Research,
    Writing,
    Analysis,
    General,
}

/// Canned prompt template with `{placeholder}` slots
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuickPrompt {
    pub id: String,
    pub title: String,
    pub content: String,
    pub category: PromptCategory,
    pub icon: String,
    pub description: String,
}

static PLACEHOLDER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\{([a-z_]+)\}").unwrap());

impl QuickPrompt {
    /// Placeholder names in order of first appearance
    pub fn placeholders(&self) -> Vec<String> {
        let mut names: Vec<String> = Vec::new();
        for cap in PLACEHOLDER.captures_iter(&self.content) {
            let name = &cap[1];
            if !names.iter().any(|n| n == name) {
                names.push(name.to_string());
            }
        }
        names
    }

    /// Substitute `{name}` slots; slots without a value are left as written
    pub fn render<K, V>(&self, vars: &[(K, V)]) -> String
    where
        K: AsRef<str>,
        V: AsRef<str>,
    {
        PLACEHOLDER
            .replace_all(&self.content, |cap: &regex::Captures| {
                vars.iter()
                    .find(|(key, _)| key.as_ref() == &cap[1])
                    .map(|(_, value)| value.as_ref().to_string())
                    .unwrap_or_else(|| cap[0].to_string())
            })
            .into_owned()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_document() -> Document {
        Document {
            id: "1".to_string(),
            title: "Rust Notes".to_string(),
            content: "Ownership and borrowing".to_string(),
            tags: vec!["rust".to_string(), "Systems".to_string()],
            category: "notes".to_string(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
            author_id: "1".to_string(),
            is_public: false,
            collaborators: vec![],
            backlinks: vec![],
            metadata: DocumentMetadata::default(),
        }
    }

    #[test]
    fn test_document_query_matching() {
        let doc = sample_document();
        assert!(doc.matches_query("rust"));
        assert!(doc.matches_query("BORROW"));
        assert!(doc.matches_query("systems"));
        assert!(!doc.matches_query("python"));
    }

    #[test]
    fn test_document_serializes_camel_case() {
        let json = serde_json::to_value(sample_document()).unwrap();
        assert!(json.get("authorId").is_some());
        assert!(json.get("isPublic").is_some());
        assert_eq!(json["metadata"]["readingTime"], 0);
    }

    #[test]
    fn test_link_type_wire_format() {
        let json = serde_json::to_string(&LinkType::Reference).unwrap();
        assert_eq!(json, "\"reference\"");
    }

    #[test]
    fn test_link_resolution_flag() {
        let mut link = BiDirectionalLink {
            source_id: "1".to_string(),
            target_id: String::new(),
            source_text: "Rust Notes".to_string(),
            target_title: "Rust Notes".to_string(),
            link_type: LinkType::Reference,
        };
        assert!(!link.is_resolved());
        link.target_id = "2".to_string();
        assert!(link.is_resolved());
    }

    #[test]
    fn test_preferences_merge_keeps_unset_fields() {
        let mut prefs = ChatPreferences::default();
        prefs.merge(PreferencesUpdate {
            language: Some(Language::En),
            max_tokens: Some(500),
            ..Default::default()
        });
        assert_eq!(prefs.language, Language::En);
        assert_eq!(prefs.max_tokens, 500);
        assert_eq!(prefs.response_style, ResponseStyle::Academic);
        assert!(prefs.include_references);
    }

    #[test]
    fn test_reference_type_field_name() {
        let reference = Reference::new("Course page", ReferenceKind::Website).with_url("https://example.edu");
        let json = serde_json::to_value(&reference).unwrap();
        assert_eq!(json["type"], "website");
        assert_eq!(json["url"], "https://example.edu");
    }

    #[test]
    fn test_chat_message_constructors() {
        let question = ChatMessage::user("What is overfitting?");
        assert_eq!(question.role, ChatRole::User);
        assert!(question.metadata.is_none());
        assert!(!question.is_error());

        let apology = ChatMessage::assistant(
            "Sorry",
            Some(MessageMetadata {
                error: true,
                ..MessageMetadata::default()
            }),
        );
        assert_eq!(apology.role, ChatRole::Assistant);
        assert!(apology.is_error());
        assert_ne!(question.id, apology.id);
    }

    #[test]
    fn test_quick_prompt_render() {
        let prompt = QuickPrompt {
            id: "5".to_string(),
            title: "Programming help".to_string(),
            content: "Stuck with {programming_language}: {problem}".to_string(),
            category: PromptCategory::Study,
            icon: "💻".to_string(),
            description: "Programming support".to_string(),
        };
        assert_eq!(prompt.placeholders(), vec!["programming_language", "problem"]);
        assert_eq!(
            prompt.render(&[("programming_language", "Rust")]),
            "Stuck with Rust: {problem}"
        );
        assert_eq!(
            prompt.render(&[("problem", "lifetimes"), ("programming_language", "Rust")]),
            "Stuck with Rust: lifetimes"
        );
    }
}
