use crate::error::GenerationError;
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// The closed set of content kinds a user can ask for.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    #[default]
    Story,
    Joke,
    Quote,
}

impl Category {
    pub const ALL: [Category; 3] = [Category::Story, Category::Joke, Category::Quote];

    pub fn as_str(self) -> &'static str {
        match self {
            Category::Story => "story",
            Category::Joke => "joke",
            Category::Quote => "quote",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Category::Story => "Story",
            Category::Joke => "Joke",
            Category::Quote => "Quote",
        }
    }

    /// Instruction sent to the generation service for this category.
    pub fn prompt(self) -> &'static str {
        match self {
            Category::Story => {
                "Write a very short story, about 3-4 sentences long, with a surprising or thought-provoking ending."
            }
            Category::Joke => {
                "Tell me a clever one-liner joke. It should be safe for all audiences."
            }
            Category::Quote => {
                "Generate a single, powerful motivational quote that is original and insightful."
            }
        }
    }

    pub fn index(self) -> usize {
        match self {
            Category::Story => 0,
            Category::Joke => 1,
            Category::Quote => 2,
        }
    }

    pub fn next(self) -> Self {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Self {
        Self::ALL[(self.index() + Self::ALL.len() - 1) % Self::ALL.len()]
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = GenerationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Self::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| GenerationError::InvalidCategory(s.trim().to_string()))
    }
}
