// Built-in feature generators.
//
// All four are stateless unit structs. Text lengths are counted in
// characters, not bytes, so accented subjects measure the same as their
// ASCII equivalents of equal visible length.

use super::traits::{FeatureGenerator, FeatureSet, FeatureValue};
use crate::store::models::Email;

/// Phrases that mark an email as likely spam. Matched as lowercase
/// substrings of the combined subject and body.
pub const SPAM_WORDS: &[&str] = &[
    "free",
    "winner",
    "congratulations",
    "click here",
    "limited time",
    "act now",
    "urgent",
    "special offer",
    "guaranteed",
    "no risk",
    "cash",
    "money back",
    "amazing",
    "incredible",
    "unbeatable",
];

/// Subject and body joined by a single space, the text most generators scan.
fn combined_text(email: &Email) -> String {
    format!("{} {}", email.subject, email.body)
}

/// Flags emails containing any of the `SPAM_WORDS`.
pub struct SpamFeatureGenerator;

impl FeatureGenerator for SpamFeatureGenerator {
    fn generate(&self, email: &Email) -> FeatureSet {
        let text = combined_text(email).to_lowercase();
        let has_spam_words = SPAM_WORDS.iter().any(|word| text.contains(word));

        FeatureSet::from([(
            "has_spam_words".to_string(),
            FeatureValue::Integer(i64::from(has_spam_words)),
        )])
    }

    fn feature_names(&self) -> &[&'static str] {
        &["has_spam_words"]
    }
}

/// Mean length of the whitespace-separated words in subject and body.
pub struct AverageWordLengthFeatureGenerator;

impl FeatureGenerator for AverageWordLengthFeatureGenerator {
    fn generate(&self, email: &Email) -> FeatureSet {
        let text = combined_text(email);
        let (total, count) = text
            .split_whitespace()
            .fold((0usize, 0usize), |(total, count), word| {
                (total + word.chars().count(), count + 1)
            });

        let average_word_length = if count == 0 {
            0.0
        } else {
            total as f64 / count as f64
        };

        FeatureSet::from([(
            "average_word_length".to_string(),
            FeatureValue::Float(average_word_length),
        )])
    }

    fn feature_names(&self) -> &[&'static str] {
        &["average_word_length"]
    }
}

/// Length-based stand-in for an embedding: the mean of subject and body
/// lengths. This is what the topic scorer compares against descriptions.
pub struct EmailEmbeddingsFeatureGenerator;

impl FeatureGenerator for EmailEmbeddingsFeatureGenerator {
    fn generate(&self, email: &Email) -> FeatureSet {
        let subject_len = email.subject.chars().count();
        let body_len = email.body.chars().count();

        let average_embedding = if subject_len == 0 && body_len == 0 {
            0.0
        } else {
            (subject_len + body_len) as f64 / 2.0
        };

        FeatureSet::from([(
            "average_embedding".to_string(),
            FeatureValue::Float(average_embedding),
        )])
    }

    fn feature_names(&self) -> &[&'static str] {
        &["average_embedding"]
    }
}

/// Passes the subject and body through unchanged.
pub struct RawEmailFeatureGenerator;

impl FeatureGenerator for RawEmailFeatureGenerator {
    fn generate(&self, email: &Email) -> FeatureSet {
        FeatureSet::from([
            (
                "email_subject".to_string(),
                FeatureValue::from(email.subject.as_str()),
            ),
            (
                "email_body".to_string(),
                FeatureValue::from(email.body.as_str()),
            ),
        ])
    }

    fn feature_names(&self) -> &[&'static str] {
        &["email_subject", "email_body"]
    }
}
