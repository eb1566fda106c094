//! The two user selections offered next to the generate action.

use crate::error::TaskGenError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    #[default]
    Work,
    Personal,
    Health,
    Learning,
    Creative,
    Other,
}

impl Category {
    pub const ALL: [Category; 6] = [
        Category::Work,
        Category::Personal,
        Category::Health,
        Category::Learning,
        Category::Creative,
        Category::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Work => "work",
            Category::Personal => "personal",
            Category::Health => "health",
            Category::Learning => "learning",
            Category::Creative => "creative",
            Category::Other => "other",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Category::Work => "Work",
            Category::Personal => "Personal",
            Category::Health => "Health & Fitness",
            Category::Learning => "Learning",
            Category::Creative => "Creative",
            Category::Other => "Other",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = TaskGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| TaskGenError::ConfigError(format!("unknown category: {}", s)))
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Complexity {
    Simple,
    #[default]
    Medium,
    Complex,
}

impl Complexity {
    pub const ALL: [Complexity; 3] = [Complexity::Simple, Complexity::Medium, Complexity::Complex];

    pub fn as_str(&self) -> &'static str {
        match self {
            Complexity::Simple => "simple",
            Complexity::Medium => "medium",
            Complexity::Complex => "complex",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Complexity::Simple => "Simple",
            Complexity::Medium => "Medium",
            Complexity::Complex => "Complex",
        }
    }
}

impl fmt::Display for Complexity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Complexity {
    type Err = TaskGenError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Complexity::ALL
            .into_iter()
            .find(|c| c.as_str() == wanted)
            .ok_or_else(|| TaskGenError::ConfigError(format!("unknown complexity: {}", s)))
    }
}
