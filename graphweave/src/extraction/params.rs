//! Sampling parameters derived from a strategy's granularity.

use crate::strategy::{Breadth, ContextScope, Depth, GranularityConfig};
use serde::{Deserialize, Serialize};

/// Engine call parameters.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CallParameters {
    /// Number of extraction passes over the text
    pub passes: u32,
    /// Characters of context fed to each engine call
    pub context_window_chars: u32,
    pub temperature: f64,
}

/// Derive call parameters from a granularity.
///
/// Breadth sets the baseline, depth then clamps the temperature, and context
/// scope finally scales the window. Unknown axis values take the `standard`
/// baseline and leave the remaining steps untouched.
pub fn derive_parameters(granularity: &GranularityConfig) -> CallParameters {
    let (passes, mut window, mut temperature) = match granularity.breadth {
        Breadth::Minimal => (1, 1000, 0.0),
        Breadth::Comprehensive => (3, 2000, 0.2),
        Breadth::Standard | Breadth::Other(_) => (2, 1500, 0.1),
    };

    match granularity.depth {
        Depth::Inferential => temperature = f64::max(temperature, 0.3),
        Depth::Surface => temperature = f64::min(temperature, 0.05),
        Depth::Semantic | Depth::Other(_) => {}
    }

    match granularity.context_scope {
        ContextScope::Document => window *= 2,
        ContextScope::Local => window /= 2,
        ContextScope::Paragraph | ContextScope::Other(_) => {}
    }

    CallParameters {
        passes,
        context_window_chars: window,
        temperature,
    }
}
