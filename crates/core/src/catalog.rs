//! Catalog topics: the static, read-only content documents served by the
//! site (tours, destinations, etc.). Each topic maps 1:1 to a JSON file.

use std::fmt;

use serde::Serialize;

/// A named static content document.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogTopic {
    Tours,
    Destinations,
    Gallery,
    Team,
    Hotel,
    Transport,
    Visa,
}

/// All topics, in the order they appear on the site.
pub const ALL_TOPICS: &[CatalogTopic] = &[
    CatalogTopic::Tours,
    CatalogTopic::Destinations,
    CatalogTopic::Gallery,
    CatalogTopic::Team,
    CatalogTopic::Hotel,
    CatalogTopic::Transport,
    CatalogTopic::Visa,
];

impl CatalogTopic {
    /// Parse a topic from its URL path segment. Unknown segments are `None`;
    /// the gateway turns that into a 404, not a validation error.
    pub fn parse(segment: &str) -> Option<Self> {
        match segment {
            "tours" => Some(Self::Tours),
            "destinations" => Some(Self::Destinations),
            "gallery" => Some(Self::Gallery),
            "team" => Some(Self::Team),
            "hotel" => Some(Self::Hotel),
            "transport" => Some(Self::Transport),
            "visa" => Some(Self::Visa),
            _ => None,
        }
    }

    /// URL path segment / canonical name for this topic.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Tours => "tours",
            Self::Destinations => "destinations",
            Self::Gallery => "gallery",
            Self::Team => "team",
            Self::Hotel => "hotel",
            Self::Transport => "transport",
            Self::Visa => "visa",
        }
    }

    /// File name of the backing document inside the catalog directory.
    pub fn file_name(&self) -> String {
        format!("{}.json", self.as_str())
    }
}

impl fmt::Display for CatalogTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
