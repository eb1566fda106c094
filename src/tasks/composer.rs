//! Randomized user prompt composition.

use crate::tasks::vocabulary::{ACTIONS, OUTPUTS, TOPICS, VIBES};
use rand::rngs::ThreadRng;
use rand::Rng;
use std::fmt;

/// A prompt built from one sampled word of each vocabulary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPrompt {
    pub action: &'static str,
    pub vibe: &'static str,
    pub output: &'static str,
    pub topic: &'static str,
}

impl GeneratedPrompt {
    /// The interpolated instruction, e.g. `suggest 5 silly errands related to pets.`
    pub fn text(&self) -> String {
        format!(
            "{} 5 {} {} related to {}.",
            self.action, self.vibe, self.output, self.topic
        )
    }
}

impl fmt::Display for GeneratedPrompt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text())
    }
}

/// Samples prompts from the fixed vocabularies using an injected random source.
pub struct PromptComposer<R: Rng = ThreadRng> {
    rng: R,
}

impl PromptComposer<ThreadRng> {
    pub fn new() -> Self {
        Self::with_rng(rand::thread_rng())
    }
}

impl Default for PromptComposer<ThreadRng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: Rng> PromptComposer<R> {
    pub fn with_rng(rng: R) -> Self {
        Self { rng }
    }

    pub fn compose(&mut self) -> GeneratedPrompt {
        GeneratedPrompt {
            action: pick(&mut self.rng, ACTIONS),
            vibe: pick(&mut self.rng, VIBES),
            output: pick(&mut self.rng, OUTPUTS),
            topic: pick(&mut self.rng, TOPICS),
        }
    }
}

/// Compose a prompt with the thread-local random source.
pub fn compose() -> GeneratedPrompt {
    PromptComposer::new().compose()
}

// Vocabularies are non-empty constants, so the range is never empty.
fn pick<R: Rng>(rng: &mut R, items: &'static [&'static str]) -> &'static str {
    items[rng.gen_range(0..items.len())]
}
