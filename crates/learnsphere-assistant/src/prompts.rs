//! Built-in quick prompt templates.

use learnsphere_core::{PromptCategory, QuickPrompt};

const TEMPLATES: [(&str, &str, &str, PromptCategory, &str, &str); 8] = [
    (
        "1",
        "Course study",
        "Please help me build a study plan for {subject}, including learning goals, a schedule and recommended resources.",
        PromptCategory::Study,
        "📚",
        "Personalised study plan",
    ),
    (
        "2",
        "Essay writing",
        "I am writing a paper on {topic}. Please review the structure and give me writing advice.",
        PromptCategory::Writing,
        "✍️",
        "Academic writing guidance",
    ),
    (
        "3",
        "Explain a concept",
        "Please explain {concept} in simple terms and give a few real-world examples.",
        PromptCategory::Study,
        "💡",
        "Complex ideas made simple",
    ),
    (
        "4",
        "Literature review",
        "Please summarise the main arguments, methods and contributions of this paper: {citation}",
        PromptCategory::Research,
        "🔍",
        "In-depth paper analysis",
    ),
    (
        "5",
        "Programming help",
        "I ran into a problem while learning {programming_language}: {problem}. Please suggest a fix with example code.",
        PromptCategory::Study,
        "💻",
        "Programming support",
    ),
    (
        "6",
        "Programme enquiry",
        "I would like to learn about the {department} programme at CityU: courses, faculty and career prospects.",
        PromptCategory::General,
        "🏫",
        "CityU programme advice",
    ),
    (
        "7",
        "Project planning",
        "I want to start a project on {project_topic}. Please help me plan it and set milestones.",
        PromptCategory::Research,
        "🎯",
        "Project management guidance",
    ),
    (
        "8",
        "Living in Hong Kong",
        "As a student new to Hong Kong, what practical advice do you have about {aspect}?",
        PromptCategory::General,
        "🌏",
        "Hong Kong living guide",
    ),
];

/// The eight built-in templates, in display order
pub fn quick_prompts() -> Vec<QuickPrompt> {
    TEMPLATES
        .iter()
        .map(|&(id, title, content, category, icon, description)| QuickPrompt {
            id: id.to_string(),
            title: title.to_string(),
            content: content.to_string(),
            category,
            icon: icon.to_string(),
            description: description.to_string(),
        })
        .collect()
}

/// Templates in one category
pub fn prompts_in(category: PromptCategory) -> Vec<QuickPrompt> {
    quick_prompts()
        .into_iter()
        .filter(|p| p.category == category)
        .collect()
}

pub fn find_prompt(id: &str) -> Option<QuickPrompt> {
    quick_prompts().into_iter().find(|p| p.id == id)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalog() {
        let prompts = quick_prompts();
        assert_eq!(prompts.len(), 8);
        let ids: Vec<_> = prompts.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, ["1", "2", "3", "4", "5", "6", "7", "8"]);
        assert!(prompts.iter().all(|p| !p.placeholders().is_empty()));
    }

    #[test]
    fn test_categories() {
        assert_eq!(prompts_in(PromptCategory::Study).len(), 3);
        assert_eq!(prompts_in(PromptCategory::Research).len(), 2);
        assert_eq!(prompts_in(PromptCategory::General).len(), 2);
        assert_eq!(prompts_in(PromptCategory::Writing).len(), 1);
        assert!(prompts_in(PromptCategory::Analysis).is_empty());
    }

    #[test]
    fn test_render_programming_prompt() {
        let prompt = find_prompt("5").unwrap();
        assert_eq!(prompt.placeholders(), vec!["programming_language", "problem"]);

        let text = prompt.render(&[
            ("programming_language", "Rust"),
            ("problem", "borrow checker errors"),
        ]);
        assert!(text.starts_with("I ran into a problem while learning Rust: borrow checker errors."));
        assert!(!text.contains('{'));
    }

    #[test]
    fn test_render_leaves_missing_slots() {
        let prompt = find_prompt("8").unwrap();
        assert!(prompt.render::<&str, &str>(&[]).contains("{aspect}"));
        assert!(find_prompt("99").is_none());
    }
}
