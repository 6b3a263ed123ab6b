//! Built-in few-shot examples.

use super::{ExampleData, ExtractionRecord};

/// The fixed example set handed to the engine on every call.
///
/// Strategies may declare their own `examples` bag, but it is not consulted
/// here; every run sends these three literary examples.
pub fn default_examples() -> Vec<ExampleData> {
    vec![
        ExampleData {
            text: "ROMEO. But soft! What light through yonder window breaks? \
                   It is the east, and Juliet is the sun."
                .to_string(),
            extractions: vec![
                ExtractionRecord::new("character", "ROMEO").with_attribute("role", "speaker"),
                ExtractionRecord::new("emotion", "But soft!")
                    .with_attribute("feeling", "gentle awe"),
                ExtractionRecord::relation(
                    "is",
                    ("Juliet", "character"),
                    "metaphor",
                    ("the sun", "symbol"),
                ),
            ],
        },
        ExampleData {
            text: "JULIET. O Romeo, Romeo! wherefore art thou Romeo?".to_string(),
            extractions: vec![
                ExtractionRecord::new("character", "JULIET").with_attribute("role", "speaker"),
                ExtractionRecord::new("emotion", "O Romeo, Romeo!")
                    .with_attribute("feeling", "longing"),
                ExtractionRecord::relation(
                    "wherefore art thou Romeo",
                    ("JULIET", "character"),
                    "addresses",
                    ("Romeo", "character"),
                ),
            ],
        },
        ExampleData {
            text: "JULIET appears at a window.".to_string(),
            extractions: vec![
                ExtractionRecord::new("character", "JULIET").with_attribute("role", "character"),
                ExtractionRecord::relation(
                    "appears",
                    ("JULIET", "character"),
                    "appears_at",
                    ("a window", "location"),
                ),
            ],
        },
    ]
}
