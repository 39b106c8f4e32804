//! Resource Type Module
//!
//! Classifies cached resources from a content-type hint or the key's file extension.

use std::fmt;

use serde::{Deserialize, Serialize};

// == Resource Type ==
/// Classification of a cached resource, used to pick its expiration policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ResourceType {
    Image,
    Json,
    Font,
    Stylesheet,
    Script,
    Markup,
    Other,
}

/// Content-type substrings, checked in order.
const MIME_FAMILIES: &[(&str, ResourceType)] = &[
    ("image", ResourceType::Image),
    ("json", ResourceType::Json),
    ("font", ResourceType::Font),
    ("css", ResourceType::Stylesheet),
    ("stylesheet", ResourceType::Stylesheet),
    ("javascript", ResourceType::Script),
    ("script", ResourceType::Script),
    ("html", ResourceType::Markup),
    ("markup", ResourceType::Markup),
];

const IMAGE_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "gif", "webp", "svg", "ico", "bmp", "avif"];
const JSON_EXTENSIONS: &[&str] = &["json"];
const FONT_EXTENSIONS: &[&str] = &["woff", "woff2", "ttf", "otf", "eot"];
const STYLESHEET_EXTENSIONS: &[&str] = &["css"];
const SCRIPT_EXTENSIONS: &[&str] = &["js", "mjs"];
const MARKUP_EXTENSIONS: &[&str] = &["html", "htm"];

impl ResourceType {
    /// All resource types, in declaration order.
    pub const ALL: [ResourceType; 7] = [
        ResourceType::Image,
        ResourceType::Json,
        ResourceType::Font,
        ResourceType::Stylesheet,
        ResourceType::Script,
        ResourceType::Markup,
        ResourceType::Other,
    ];

    // == Classify ==
    /// Determines the resource type of `key`.
    ///
    /// A content-type hint wins when it names a known MIME family; otherwise the
    /// file extension of the key decides. Anything unresolved is `Other`.
    pub fn classify(key: &str, content_type_hint: Option<&str>) -> Self {
        content_type_hint
            .and_then(Self::from_content_type)
            .or_else(|| file_extension(key).and_then(Self::from_extension))
            .unwrap_or(ResourceType::Other)
    }

    /// Matches a content-type string against the known MIME families.
    pub fn from_content_type(content_type: &str) -> Option<Self> {
        let content_type = content_type.to_ascii_lowercase();
        MIME_FAMILIES
            .iter()
            .find(|(needle, _)| content_type.contains(needle))
            .map(|(_, resource_type)| *resource_type)
    }

    /// Matches a bare file extension (without the dot).
    pub fn from_extension(extension: &str) -> Option<Self> {
        let extension = extension.to_ascii_lowercase();
        let table: [(&[&str], ResourceType); 6] = [
            (IMAGE_EXTENSIONS, ResourceType::Image),
            (JSON_EXTENSIONS, ResourceType::Json),
            (FONT_EXTENSIONS, ResourceType::Font),
            (STYLESHEET_EXTENSIONS, ResourceType::Stylesheet),
            (SCRIPT_EXTENSIONS, ResourceType::Script),
            (MARKUP_EXTENSIONS, ResourceType::Markup),
        ];
        table
            .iter()
            .find(|(extensions, _)| extensions.contains(&extension.as_str()))
            .map(|(_, resource_type)| *resource_type)
    }

    /// Lowercase name used in logs and configuration keys.
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceType::Image => "image",
            ResourceType::Json => "json",
            ResourceType::Font => "font",
            ResourceType::Stylesheet => "stylesheet",
            ResourceType::Script => "script",
            ResourceType::Markup => "markup",
            ResourceType::Other => "other",
        }
    }
}

impl fmt::Display for ResourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// == Utility Functions ==
/// Extracts the file extension from the last path segment of a key,
/// ignoring any query string or fragment.
fn file_extension(key: &str) -> Option<&str> {
    let path = key.split(['?', '#']).next().unwrap_or(key);
    let segment = path.rsplit('/').next().unwrap_or(path);
    match segment.rsplit_once('.') {
        Some((stem, extension)) if !stem.is_empty() && !extension.is_empty() => Some(extension),
        _ => None,
    }
}
