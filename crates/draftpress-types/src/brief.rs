// ContentBrief — the structured specification of what article to generate.

use serde::{Deserialize, Serialize};

use crate::error::Error;

/// The seven content verticals the topic calendar rotates through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    Technology,
    Marketing,
    Finance,
    Health,
    Travel,
    Ecommerce,
    Productivity,
}

impl Category {
    pub const ALL: [Category; 7] = [
        Category::Technology,
        Category::Marketing,
        Category::Finance,
        Category::Health,
        Category::Travel,
        Category::Ecommerce,
        Category::Productivity,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::Technology => "technology",
            Category::Marketing => "marketing",
            Category::Finance => "finance",
            Category::Health => "health",
            Category::Travel => "travel",
            Category::Ecommerce => "ecommerce",
            Category::Productivity => "productivity",
        }
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The brief sent to every provider in a generation round.
///
/// Built once per round and cloned per adapter dispatch; never mutated after
/// construction.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentBrief {
    /// Article subject. Also becomes the article title.
    pub topic: String,
    /// Target keywords, in priority order. Must be non-empty.
    pub keywords: Vec<String>,
    /// Word-count goal. Must be positive.
    pub target_length: u32,
    /// Body section headings, in order.
    pub sections: Vec<String>,
    pub category: Category,
}

impl ContentBrief {
    pub fn new(topic: impl Into<String>, category: Category) -> Self {
        Self {
            topic: topic.into(),
            keywords: Vec::new(),
            target_length: 1200,
            sections: Vec::new(),
            category,
        }
    }

    /// Validate that the brief has the minimum required fields.
    ///
    /// Returns a configuration error if:
    /// - `topic` is empty or whitespace-only
    /// - `keywords` is empty
    /// - `target_length` is zero
    pub fn validate(&self) -> Result<(), Error> {
        if self.topic.trim().is_empty() {
            return Err(Error::configuration("brief topic must not be empty"));
        }
        if self.keywords.is_empty() {
            return Err(Error::configuration("brief keywords must not be empty"));
        }
        if self.target_length == 0 {
            return Err(Error::configuration("brief target_length must be positive"));
        }
        Ok(())
    }

    /// Builder-style setter for keywords.
    pub fn keywords(mut self, keywords: Vec<String>) -> Self {
        self.keywords = keywords;
        self
    }

    /// Builder-style setter for target_length.
    pub fn target_length(mut self, target_length: u32) -> Self {
        self.target_length = target_length;
        self
    }

    /// Builder-style setter for sections.
    pub fn sections(mut self, sections: Vec<String>) -> Self {
        self.sections = sections;
        self
    }
}
