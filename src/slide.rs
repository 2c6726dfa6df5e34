// ABOUTME: Slide and theme data model for the slide-deck library
// ABOUTME: Defines slide records, partial updates, theme catalogs and the persisted document

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::DeckError;

/// Title given to slides created with `add_slide`.
pub const DEFAULT_SLIDE_TITLE: &str = "New Slide";

/// Marker appended to the title of a duplicated slide.
pub const COPY_SUFFIX: &str = " (copy)";

/// Opaque slide identifier. New slides get a UUID v4, loaded slides keep
/// whatever string they were stored with.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SlideId(String);

impl SlideId {
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SlideId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SlideId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for SlideId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// The kind of a slide, which decides which payload fields are rendered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SlideType {
    Title,
    Content,
    Code,
    Quote,
    Diagram,
}

impl SlideType {
    pub const ALL: [SlideType; 5] = [
        SlideType::Title,
        SlideType::Content,
        SlideType::Code,
        SlideType::Quote,
        SlideType::Diagram,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SlideType::Title => "title",
            SlideType::Content => "content",
            SlideType::Code => "code",
            SlideType::Quote => "quote",
            SlideType::Diagram => "diagram",
        }
    }

    /// Human readable label used by list views.
    pub fn label(&self) -> &'static str {
        match self {
            SlideType::Title => "Title",
            SlideType::Content => "Content",
            SlideType::Code => "Code",
            SlideType::Quote => "Quote",
            SlideType::Diagram => "Diagram",
        }
    }
}

impl fmt::Display for SlideType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

impl FromStr for SlideType {
    type Err = DeckError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        SlideType::ALL
            .iter()
            .copied()
            .find(|t| t.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| {
                DeckError::ValidationError(format!(
                    "Unknown slide type '{}', expected one of: title, content, code, quote, diagram",
                    s
                ))
            })
    }
}

/// One visual unit of the deck.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Slide {
    pub id: SlideId,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(rename = "type")]
    pub kind: SlideType,
    pub order: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<String>,
}

impl Slide {
    /// Create a slide with a fresh id and empty payloads.
    pub fn new(kind: SlideType, title: impl Into<String>, order: i64) -> Self {
        Self {
            id: SlideId::generate(),
            title: title.into(),
            content: String::new(),
            kind,
            order,
            code: None,
            language: None,
            quote: None,
            author: None,
            diagram: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<SlideId>) -> Self {
        self.id = id.into();
        self
    }

    pub fn with_content(mut self, content: impl Into<String>) -> Self {
        self.content = content.into();
        self
    }

    /// Merge a partial update into this slide. Fields absent from the patch
    /// are left untouched.
    pub fn apply(&mut self, patch: &SlidePatch) {
        if let Some(title) = &patch.title {
            self.title = title.clone();
        }
        if let Some(kind) = patch.kind {
            self.kind = kind;
        }
        if let Some(content) = &patch.content {
            self.content = content.clone();
        }
        if let Some(code) = &patch.code {
            self.code = Some(code.clone());
        }
        if let Some(language) = &patch.language {
            self.language = Some(language.clone());
        }
        if let Some(quote) = &patch.quote {
            self.quote = Some(quote.clone());
        }
        if let Some(author) = &patch.author {
            self.author = Some(author.clone());
        }
        if let Some(diagram) = &patch.diagram {
            self.diagram = Some(diagram.clone());
        }
    }
}

/// Partial slide update. `id` and `order` cannot be patched: ids are
/// immutable and order is only rewritten by a reorder.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlidePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, rename = "type", skip_serializing_if = "Option::is_none")]
    pub kind: Option<SlideType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub code: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quote: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub author: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub diagram: Option<String>,
}

impl SlidePatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn kind(mut self, kind: SlideType) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn content(mut self, content: impl Into<String>) -> Self {
        self.content = Some(content.into());
        self
    }

    pub fn code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    pub fn language(mut self, language: impl Into<String>) -> Self {
        self.language = Some(language.into());
        self
    }

    pub fn quote(mut self, quote: impl Into<String>) -> Self {
        self.quote = Some(quote.into());
        self
    }

    pub fn author(mut self, author: impl Into<String>) -> Self {
        self.author = Some(author.into());
        self
    }

    pub fn diagram(mut self, diagram: impl Into<String>) -> Self {
        self.diagram = Some(diagram.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Fold a later patch into this one; fields set in `later` win.
    pub fn merge(&mut self, later: SlidePatch) {
        fn take<T>(slot: &mut Option<T>, value: Option<T>) {
            if value.is_some() {
                *slot = value;
            }
        }
        take(&mut self.title, later.title);
        take(&mut self.kind, later.kind);
        take(&mut self.content, later.content);
        take(&mut self.code, later.code);
        take(&mut self.language, later.language);
        take(&mut self.quote, later.quote);
        take(&mut self.author, later.author);
        take(&mut self.diagram, later.diagram);
    }
}

/// A named catalog entry, e.g. a theme color or a font family.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NamedValue {
    pub name: &'static str,
    pub value: &'static str,
}

const fn named(name: &'static str, value: &'static str) -> NamedValue {
    NamedValue { name, value }
}

pub const THEME_COLORS: [NamedValue; 8] = [
    named("Orange", "24 95% 53%"),
    named("Blue", "221 83% 53%"),
    named("Green", "142 71% 45%"),
    named("Purple", "262 83% 58%"),
    named("Pink", "330 81% 60%"),
    named("Red", "0 72% 51%"),
    named("Yellow", "45 93% 47%"),
    named("Cyan", "186 94% 42%"),
];

pub const HEADING_FONTS: [NamedValue; 7] = [
    named("Cal Sans", "Cal Sans, sans-serif"),
    named("Inter", "Inter, sans-serif"),
    named("Playfair Display", "Playfair Display, serif"),
    named("Montserrat", "Montserrat, sans-serif"),
    named("Roboto Slab", "Roboto Slab, serif"),
    named("Poppins", "Poppins, sans-serif"),
    named("Oswald", "Oswald, sans-serif"),
];

pub const BODY_FONTS: [NamedValue; 6] = [
    named("Inter", "Inter, sans-serif"),
    named("Lora", "Lora, serif"),
    named("Open Sans", "Open Sans, sans-serif"),
    named("Roboto", "Roboto, sans-serif"),
    named("Source Sans 3", "Source Sans 3, sans-serif"),
    named("Merriweather", "Merriweather, serif"),
];

/// Languages offered for code slides. `language` itself is free text.
pub const CODE_LANGUAGES: [NamedValue; 11] = [
    named("JavaScript", "javascript"),
    named("TypeScript", "typescript"),
    named("Python", "python"),
    named("Java", "java"),
    named("C#", "csharp"),
    named("Go", "go"),
    named("Rust", "rust"),
    named("SQL", "sql"),
    named("Bash", "bash"),
    named("HTML", "html"),
    named("CSS", "css"),
];

pub const DEFAULT_CODE_LANGUAGE: &str = "javascript";

/// Global styling applied to every slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationTheme {
    /// HSL triple such as `"24 95% 53%"`.
    pub primary_color: String,
    pub heading_font: String,
    pub body_font: String,
}

impl Default for PresentationTheme {
    fn default() -> Self {
        Self {
            primary_color: "24 95% 53%".to_string(),
            heading_font: "Inter, sans-serif".to_string(),
            body_font: "Inter, sans-serif".to_string(),
        }
    }
}

impl PresentationTheme {
    pub fn apply(&mut self, patch: &ThemePatch) {
        if let Some(color) = &patch.primary_color {
            self.primary_color = color.clone();
        }
        if let Some(font) = &patch.heading_font {
            self.heading_font = font.clone();
        }
        if let Some(font) = &patch.body_font {
            self.body_font = font.clone();
        }
    }

    /// True when the primary color is not one of the catalog colors.
    pub fn is_custom_color(&self) -> bool {
        !THEME_COLORS.iter().any(|c| c.value == self.primary_color)
    }

    /// CSS custom properties the style layer binds to.
    pub fn css_variables(&self) -> Vec<(&'static str, String)> {
        vec![
            ("--presentation-primary", self.primary_color.clone()),
            ("--presentation-heading-font", self.heading_font.clone()),
            ("--presentation-body-font", self.body_font.clone()),
            ("--accent", self.primary_color.clone()),
            ("--ring", self.primary_color.clone()),
            ("--sidebar-ring", self.primary_color.clone()),
        ]
    }
}

/// Partial theme update.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemePatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary_color: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_font: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body_font: Option<String>,
}

impl ThemePatch {
    pub fn is_empty(&self) -> bool {
        self.primary_color.is_none() && self.heading_font.is_none() && self.body_font.is_none()
    }
}

/// The persisted document: a named deck with its theme.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Presentation {
    pub id: String,
    pub name: String,
    pub slides: Vec<Slide>,
    #[serde(default)]
    pub theme: PresentationTheme,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Presentation {
    pub fn new(name: impl Into<String>, slides: Vec<Slide>, theme: PresentationTheme) -> Self {
        let now = Utc::now();
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            name: name.into(),
            slides,
            theme,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn touch(&mut self) {
        self.updated_at = Utc::now();
    }
}
