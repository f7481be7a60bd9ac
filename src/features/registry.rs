// FeatureGeneratorRegistry — the name -> generator table.
//
// Built once at start-up (usually via `builtin()`), then shared read-only
// behind an Arc. Output keys are prefixed with the generator name, so
// `spam` + `has_spam_words` becomes `spam_has_spam_words`.
//
// A call either returns every requested feature or fails: unknown names are
// rejected before any generator runs, and a prefixed key produced twice is
// an error rather than an overwrite.

use std::sync::Arc;

use serde::Serialize;
use tracing::debug;

use super::generators::{
    AverageWordLengthFeatureGenerator, EmailEmbeddingsFeatureGenerator, RawEmailFeatureGenerator,
    SpamFeatureGenerator,
};
use super::traits::{FeatureGenerator, FeatureSet};
use crate::error::ClassifyError;
use crate::store::models::Email;

/// Name and declared feature names of a registered generator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GeneratorInfo {
    pub name: String,
    pub features: Vec<String>,
}

#[derive(Default, Clone)]
pub struct FeatureGeneratorRegistry {
    // Vec rather than a map: registration order is the default run order.
    generators: Vec<(String, Arc<dyn FeatureGenerator>)>,
}

impl FeatureGeneratorRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// The four built-in generators in their canonical order.
    pub fn builtin() -> Self {
        let builtin: [(&str, Arc<dyn FeatureGenerator>); 4] = [
            ("spam", Arc::new(SpamFeatureGenerator)),
            ("word_length", Arc::new(AverageWordLengthFeatureGenerator)),
            ("email_embeddings", Arc::new(EmailEmbeddingsFeatureGenerator)),
            ("raw_email", Arc::new(RawEmailFeatureGenerator)),
        ];
        Self {
            generators: builtin
                .into_iter()
                .map(|(name, generator)| (name.to_string(), generator))
                .collect(),
        }
    }

    /// Add a generator under `name`, after the existing ones.
    pub fn register(
        &mut self,
        name: &str,
        generator: Arc<dyn FeatureGenerator>,
    ) -> Result<&mut Self, ClassifyError> {
        if self.get(name).is_some() {
            return Err(ClassifyError::DuplicateGenerator(name.to_string()));
        }
        self.generators.push((name.to_string(), generator));
        debug!(generator = name, "Registered feature generator");
        Ok(self)
    }

    pub fn get(&self, name: &str) -> Option<&Arc<dyn FeatureGenerator>> {
        self.generators
            .iter()
            .find(|(registered, _)| registered == name)
            .map(|(_, generator)| generator)
    }

    /// Registered names in run order.
    pub fn names(&self) -> Vec<&str> {
        self.generators.iter().map(|(name, _)| name.as_str()).collect()
    }

    pub fn len(&self) -> usize {
        self.generators.len()
    }

    pub fn is_empty(&self) -> bool {
        self.generators.is_empty()
    }

    /// Describe every registered generator without running any.
    pub fn list_generators(&self) -> Vec<GeneratorInfo> {
        self.generators
            .iter()
            .map(|(name, generator)| GeneratorInfo {
                name: name.clone(),
                features: generator
                    .feature_names()
                    .iter()
                    .map(|f| f.to_string())
                    .collect(),
            })
            .collect()
    }

    /// Run the named generators (all of them when `names` is None) and merge
    /// their output into one prefixed FeatureSet.
    pub fn generate_all(
        &self,
        email: &Email,
        names: Option<&[&str]>,
    ) -> Result<FeatureSet, ClassifyError> {
        let selected: Vec<(&str, &Arc<dyn FeatureGenerator>)> = match names {
            None => self
                .generators
                .iter()
                .map(|(name, generator)| (name.as_str(), generator))
                .collect(),
            Some(names) => names
                .iter()
                .map(|&name| {
                    self.get(name)
                        .map(|generator| (name, generator))
                        .ok_or_else(|| ClassifyError::UnknownGenerator(name.to_string()))
                })
                .collect::<Result<_, _>>()?,
        };

        let mut features = FeatureSet::new();
        for (name, generator) in selected {
            for (feature, value) in generator.generate(email) {
                let key = format!("{name}_{feature}");
                if features.contains_key(&key) {
                    return Err(ClassifyError::FeatureKeyCollision(key));
                }
                features.insert(key, value);
            }
        }

        Ok(features)
    }
}
