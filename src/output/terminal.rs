// Colored terminal output for classification results and catalog listings.
//
// This module handles all terminal-specific formatting. The CLI commands in
// main.rs delegate here so the pipeline stays free of printing.

use colored::Colorize;

use crate::features::registry::GeneratorInfo;
use crate::features::traits::FeatureValue;
use crate::pipeline::classify::TopicClassification;
use crate::scoring::nearest::NearestMatch;
use crate::store::models::TopicTable;

/// Width of the similarity bars.
const BAR_WIDTH: usize = 20;

/// Display a topic-mode result: ranked scores with the winner highlighted,
/// followed by the computed features.
pub fn display_topic_classification(result: &TopicClassification) {
    println!(
        "\n{}",
        format!("=== Predicted topic: {} ===", result.predicted_topic).bold()
    );
    println!();

    let mut ranked: Vec<(&String, f64)> = result
        .topic_scores
        .iter()
        .map(|(name, score)| (name, *score))
        .collect();
    ranked.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));

    for (name, score) in ranked {
        let line = format!("  {:<24} {} {:.3}", name, similarity_bar(score), score);
        if *name == result.predicted_topic {
            println!("{}", line.bright_green());
        } else {
            println!("{line}");
        }
    }

    println!("\n  {}", "Features:".dimmed());
    for (key, value) in &result.features {
        let rendered = match value {
            FeatureValue::Integer(i) => i.to_string(),
            FeatureValue::Float(f) => format!("{f}"),
            FeatureValue::Text(text) => format!("\"{}\"", super::truncate_chars(text, 60)),
        };
        println!("    {:<36} {}", key, rendered.dimmed());
    }
    println!();
}

/// Display a nearest-email result.
pub fn display_nearest_match(result: &NearestMatch) {
    let Some(matched) = &result.matched else {
        println!("No stored emails to compare against.");
        println!("  Store labeled examples with `mailtopic store-email`.");
        return;
    };

    let label = match &result.predicted_class {
        Some(label) => label.bright_green().bold(),
        None => "(unlabeled)".yellow(),
    };
    println!("\n{} {}", "=== Nearest email label:".bold(), label);
    println!(
        "  Similarity: {} {:.3}",
        similarity_bar(result.similarity),
        result.similarity
    );
    println!(
        "  Matched:    {} / {}",
        super::truncate_chars(&matched.subject, 40),
        super::truncate_chars(&matched.body, 60).dimmed()
    );
    println!();
}

/// List registered generators and the features each one produces.
pub fn display_generators(generators: &[GeneratorInfo]) {
    println!(
        "\n{}",
        format!("=== Feature generators ({}) ===", generators.len()).bold()
    );
    for generator in generators {
        println!("  {}", generator.name.bold());
        for feature in &generator.features {
            println!("      {}_{}", generator.name.dimmed(), feature);
        }
    }
    println!();
}

/// List topics with their descriptions.
pub fn display_topics(topics: &TopicTable) {
    if topics.is_empty() {
        println!("No topics yet. Add one with `mailtopic add-topic <name> <description>`.");
        return;
    }

    println!("\n{}", format!("=== Topics ({}) ===", topics.len()).bold());
    for (name, entry) in topics {
        println!(
            "  {:<24} {}",
            name.bold(),
            super::truncate_chars(&entry.description, 80).dimmed()
        );
    }
    println!();
}

/// A fixed-width bar for a score in [0, 1].
fn similarity_bar(score: f64) -> String {
    let filled = (score.clamp(0.0, 1.0) * BAR_WIDTH as f64).round() as usize;
    format!(
        "[{}{}]",
        "=".repeat(filled),
        " ".repeat(BAR_WIDTH.saturating_sub(filled))
    )
}
