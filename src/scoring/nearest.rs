// Nearest-email classification — label transfer from the closest stored email.
//
// Every email becomes a 2-vector of character lengths, [subject, body], and
// the stored email with the highest cosine similarity to the query lends it
// its ground-truth label. Cosine only sees the subject/body proportion, so
// a short and a long email with the same shape match perfectly.

use serde::{Deserialize, Serialize};

use crate::store::models::{Email, StoredEmail};

/// Outcome of a nearest-email lookup.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NearestMatch {
    /// The matched email's label. None when the store is empty or the match
    /// was stored without one.
    pub predicted_class: Option<String>,
    /// The matched record as stored.
    #[serde(rename = "match")]
    pub matched: Option<StoredEmail>,
    /// Cosine similarity of the match (0.0 when there is none).
    pub similarity: f64,
}

impl NearestMatch {
    fn empty() -> Self {
        Self {
            predicted_class: None,
            matched: None,
            similarity: 0.0,
        }
    }
}

#[derive(Debug, Default, Clone, Copy)]
pub struct NearestEmailClassifier;

impl NearestEmailClassifier {
    /// Find the stored email most similar to `query`.
    ///
    /// Exact ties keep the earliest stored email.
    pub fn classify(&self, query: &Email, stored: &[StoredEmail]) -> NearestMatch {
        let query_vec = length_vector(&query.subject, &query.body);

        let mut best: Option<(&StoredEmail, f64)> = None;
        for email in stored {
            let score = cosine_similarity(query_vec, length_vector(&email.subject, &email.body));
            match best {
                Some((_, best_score)) if score <= best_score => {}
                _ => best = Some((email, score)),
            }
        }

        match best {
            Some((email, similarity)) => NearestMatch {
                predicted_class: email.ground_truth.clone(),
                matched: Some(email.clone()),
                similarity,
            },
            None => NearestMatch::empty(),
        }
    }
}

/// `[subject length, body length]` in characters.
pub fn length_vector(subject: &str, body: &str) -> [f64; 2] {
    [subject.chars().count() as f64, body.chars().count() as f64]
}

/// Cosine similarity of two 2-vectors. 0.0 if either has zero magnitude.
pub fn cosine_similarity(a: [f64; 2], b: [f64; 2]) -> f64 {
    let dot = a[0] * b[0] + a[1] * b[1];
    let norm_a = a[0].hypot(a[1]);
    let norm_b = b[0].hypot(b[1]);

    if norm_a == 0.0 || norm_b == 0.0 {
        0.0
    } else {
        dot / (norm_a * norm_b)
    }
}
