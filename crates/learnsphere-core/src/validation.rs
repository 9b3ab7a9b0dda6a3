//! Form validation.
//!
//! Field validators return an optional [`ValidationIssue`]; form-level
//! validators collect them into a [`ValidationReport`].

use crate::error::{Error, Result};
use crate::models::{CreateDocument, LoginCredentials, RegisterData, UpdateDocument};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::sync::LazyLock;

static EMAIL_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap());
static USERNAME_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-zA-Z0-9_]+$").unwrap());

pub const MIN_PASSWORD_LEN: usize = 6;
pub const MIN_USERNAME_LEN: usize = 3;
pub const MIN_FULL_NAME_LEN: usize = 2;

/// Severity level for validation issues
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    /// Should be addressed but does not block submission
    Warning,
    /// Blocks submission
    Error,
}

impl Severity {
    /// Check if this severity is considered a failure
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Error)
    }
}

/// A problem with one form field
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationIssue {
    pub severity: Severity,
    /// Name of the offending field
    pub field: String,
    /// Human-readable message
    pub message: String,
}

impl ValidationIssue {
    /// Create a blocking issue for a field
    pub fn error(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create a non-blocking issue for a field
    pub fn warning(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field: field.into(),
            message: message.into(),
        }
    }
}

/// Result of validating a form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ValidationReport {
    /// Whether validation passed (no errors)
    pub passed: bool,
    pub issues: Vec<ValidationIssue>,
}

impl ValidationReport {
    /// Create a new validation report
    pub fn new() -> Self {
        Self {
            passed: true,
            issues: Vec::new(),
        }
    }

    /// Add an issue to the report
    pub fn add_issue(&mut self, issue: ValidationIssue) {
        if issue.severity.is_failure() {
            self.passed = false;
        }
        self.issues.push(issue);
    }

    /// Add the issue if the validator produced one
    pub fn check(&mut self, issue: Option<ValidationIssue>) {
        if let Some(issue) = issue {
            self.add_issue(issue);
        }
    }

    /// Merge another report into this one
    pub fn merge(&mut self, other: ValidationReport) {
        for issue in other.issues {
            self.add_issue(issue);
        }
    }

    /// Issues reported for a single field
    pub fn issues_for(&self, field: &str) -> Vec<&ValidationIssue> {
        self.issues.iter().filter(|i| i.field == field).collect()
    }

    /// Check if there are any failures
    pub fn has_failures(&self) -> bool {
        !self.passed
    }

    /// Convert into `Err(ValidationError)` carrying every failing message
    pub fn into_result(self) -> Result<()> {
        if self.passed {
            return Ok(());
        }
        let reasons: Vec<String> = self
            .issues
            .iter()
            .filter(|i| i.severity.is_failure())
            .map(|i| format!("{}: {}", i.field, i.message))
            .collect();
        Err(Error::validation_error(reasons.join("; ")))
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

/// Email must be present, well-formed and belong to the institution
pub fn validate_email(email: &str, required_domain: &str) -> Option<ValidationIssue> {
    if email.is_empty() {
        return Some(ValidationIssue::error("email", "Please enter an email address"));
    }
    if !EMAIL_PATTERN.is_match(email) {
        return Some(ValidationIssue::error("email", "Please enter a valid email address"));
    }
    if !email.contains(required_domain) {
        return Some(ValidationIssue::error(
            "email",
            format!("Please use an institutional address ({})", required_domain),
        ));
    }
    None
}

pub fn validate_password(password: &str) -> Option<ValidationIssue> {
    if password.is_empty() {
        return Some(ValidationIssue::error("password", "Please enter a password"));
    }
    if password.chars().count() < MIN_PASSWORD_LEN {
        return Some(ValidationIssue::error(
            "password",
            format!("Password must be at least {} characters", MIN_PASSWORD_LEN),
        ));
    }
    None
}

pub fn validate_confirm_password(password: &str, confirm: &str) -> Option<ValidationIssue> {
    if confirm.is_empty() {
        return Some(ValidationIssue::error(
            "confirmPassword",
            "Please confirm the password",
        ));
    }
    if password != confirm {
        return Some(ValidationIssue::error(
            "confirmPassword",
            "Passwords do not match",
        ));
    }
    None
}

pub fn validate_username(username: &str) -> Option<ValidationIssue> {
    if username.is_empty() {
        return Some(ValidationIssue::error("username", "Please enter a username"));
    }
    if username.chars().count() < MIN_USERNAME_LEN {
        return Some(ValidationIssue::error(
            "username",
            format!("Username must be at least {} characters", MIN_USERNAME_LEN),
        ));
    }
    if !USERNAME_PATTERN.is_match(username) {
        return Some(ValidationIssue::error(
            "username",
            "Username may only contain letters, digits and underscores",
        ));
    }
    None
}

pub fn validate_full_name(full_name: &str) -> Option<ValidationIssue> {
    if full_name.is_empty() {
        return Some(ValidationIssue::error("fullName", "Please enter your name"));
    }
    if full_name.chars().count() < MIN_FULL_NAME_LEN {
        return Some(ValidationIssue::error(
            "fullName",
            format!("Name must be at least {} characters", MIN_FULL_NAME_LEN),
        ));
    }
    None
}

impl LoginCredentials {
    /// Validate the sign-in form
    pub fn validate(&self, required_domain: &str) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.check(validate_email(&self.email, required_domain));
        report.check(validate_password(&self.password));
        report
    }
}

impl RegisterData {
    /// Validate the sign-up form
    pub fn validate(&self, required_domain: &str) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.check(validate_email(&self.email, required_domain));
        report.check(validate_username(&self.username));
        report.check(validate_full_name(&self.full_name));
        report.check(validate_password(&self.password));
        report.check(validate_confirm_password(
            &self.password,
            &self.confirm_password,
        ));
        report
    }
}

impl CreateDocument {
    /// Title and category are required; an empty body only warns
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if self.title.trim().is_empty() {
            report.add_issue(ValidationIssue::error("title", "Please enter a title"));
        }
        if self.category.trim().is_empty() {
            report.add_issue(ValidationIssue::error("category", "Please choose a category"));
        }
        if self.content.as_deref().is_none_or(|c| c.trim().is_empty()) {
            report.add_issue(ValidationIssue::warning("content", "Document body is empty"));
        }
        report
    }
}

impl UpdateDocument {
    /// A provided title or category must not be blank
    pub fn validate(&self) -> ValidationReport {
        let mut report = ValidationReport::new();
        if self.title.as_deref().is_some_and(|t| t.trim().is_empty()) {
            report.add_issue(ValidationIssue::error("title", "Please enter a title"));
        }
        if self.category.as_deref().is_some_and(|c| c.trim().is_empty()) {
            report.add_issue(ValidationIssue::error("category", "Please choose a category"));
        }
        report
    }
}
