//! Sample study notes used by the demo and by tests.

use chrono::{Duration, Utc};
use learnsphere_core::Document;
use learnsphere_parser::READING_SPEED_WPM;

use crate::repository::compute_metadata;

const SAMPLE_EDITOR: &str = "Demo Student";

const MACHINE_LEARNING: &str = "# Machine Learning Basics

## What is machine learning?

Machine learning is a branch of artificial intelligence that lets computers learn without being explicitly programmed.

### Main types

1. **Supervised learning** - training on labelled data
2. **Unsupervised learning** - finding patterns in unlabelled data
3. **Reinforcement learning** - learning by interacting with an environment

## Related notes

- [[Deep Learning Overview]]
- [[Data Preprocessing Tips]]
- [[CityU AI Courses]]

## References

- *Machine Learning*, Zhou Zhihua
- Stanford CS229";

const DEEP_LEARNING: &str = "# Deep Learning Overview

Deep learning is an important branch of [[Machine Learning Basics]] that uses multi-layer neural networks to learn representations of data.

## Core concepts

### Neural networks

- Perceptron
- Multi-layer perceptron
- Convolutional neural networks (CNN)
- Recurrent neural networks (RNN)

### Training

1. Forward pass
2. Loss computation
3. Backpropagation
4. Parameter update

## Applications

- Computer vision
- Natural language processing
- Speech recognition

See also: [[Machine Learning Basics]]";

const COURSE_PLAN: &str = "# CityU AI Course Plan

## This semester

### CS4487 - Machine Learning

- Lecturer: Dr. Li
- Tue/Thu 14:30-16:00, AC1 Lecture Theatre
- Notes: [[Machine Learning Basics]]

### CS5487 - Deep Learning

- Lecturer: Dr. Wang
- Mon/Wed 16:00-17:30, Yeung Building LT-7

## Study plan

1. **Weeks 1-4**: theory
2. **Weeks 5-8**: project work
3. **Weeks 9-12**: advanced topics
4. **Weeks 13-16**: final project

## AI in Hong Kong

As an international finance centre, Hong Kong has particular strengths in applied AI:

- Fintech
- Smart city initiatives
- Cross-border data flows";

fn sample(
    id: &str,
    title: &str,
    content: &str,
    tags: &[&str],
    category: &str,
    age: Duration,
    edited: Duration,
) -> Document {
    let now = Utc::now();
    Document {
        id: id.to_string(),
        title: title.to_string(),
        content: content.to_string(),
        tags: tags.iter().map(|t| t.to_string()).collect(),
        category: category.to_string(),
        created_at: now - age,
        updated_at: now - edited,
        author_id: "1".to_string(),
        is_public: false,
        collaborators: Vec::new(),
        backlinks: Vec::new(),
        metadata: compute_metadata(content, SAMPLE_EDITOR, READING_SPEED_WPM),
    }
}

/// Three linked study notes. `backlinks` is left empty for the caller to
/// derive.
pub fn sample_documents() -> Vec<Document> {
    let mut course_plan = sample(
        "3",
        "CityU AI Course Plan",
        COURSE_PLAN,
        &["Course Planning", "CityU", "AI", "Study Plan"],
        "Academic Planning",
        Duration::days(3),
        Duration::minutes(30),
    );
    course_plan.is_public = true;
    course_plan.collaborators = vec!["2".to_string(), "3".to_string()];

    vec![
        sample(
            "1",
            "Machine Learning Basics",
            MACHINE_LEARNING,
            &["Machine Learning", "AI", "Notes"],
            "Study Notes",
            Duration::days(1),
            Duration::hours(1),
        ),
        sample(
            "2",
            "Deep Learning Overview",
            DEEP_LEARNING,
            &["Deep Learning", "AI", "Neural Networks"],
            "Study Notes",
            Duration::days(2),
            Duration::hours(2),
        ),
        course_plan,
    ]
}
