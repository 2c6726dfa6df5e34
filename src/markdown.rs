// ABOUTME: Markdown outline import and export for the slide-deck library
// ABOUTME: Each level-one heading starts a slide; slide types are inferred from the body

use crate::errors::{DeckError, Result};
use crate::slide::{Slide, SlideType};
use crate::utils;
use log::{debug, info};
use std::fs;
use std::path::Path;

/// Deck name used when the outline has no `% Title` line.
pub const DEFAULT_OUTLINE_NAME: &str = "Presentation";

/// A deck read from a Markdown outline.
#[derive(Debug, Clone)]
pub struct Outline {
    pub name: String,
    pub author: Option<String>,
    pub date: Option<String>,
    pub slides: Vec<Slide>,
}

/// Read and parse an outline file.
pub fn import_markdown(markdown_path: &Path) -> Result<Outline> {
    info!("Importing slides from markdown: {:?}", markdown_path);

    utils::validate_file_exists(markdown_path)?;

    let markdown = fs::read_to_string(markdown_path)?;
    parse_outline(&markdown)
}

/// Parse an outline. Slides are ordered `0..n` in document order.
pub fn parse_outline(markdown: &str) -> Result<Outline> {
    let (frontmatter, body) = parse_frontmatter(markdown);
    let name = frontmatter
        .title
        .unwrap_or_else(|| DEFAULT_OUTLINE_NAME.to_string());

    let sections = split_sections(&body);
    if sections.is_empty() {
        return Err(DeckError::Import("no slides found in outline".to_string()));
    }

    let slides = sections
        .into_iter()
        .enumerate()
        .map(|(index, section)| {
            let title = section.title.unwrap_or_else(|| name.clone());
            build_slide(index, title, &section.body)
        })
        .collect::<Vec<_>>();

    debug!("Parsed {} slides from outline '{}'", slides.len(), name);
    Ok(Outline {
        name,
        author: frontmatter.author,
        date: frontmatter.date,
        slides,
    })
}

#[derive(Debug, Default)]
struct Frontmatter {
    title: Option<String>,
    author: Option<String>,
    date: Option<String>,
}

/// Parse frontmatter in the format: % Title\n% Author\n% Date (each line
/// optional after the title).
fn parse_frontmatter(content: &str) -> (Frontmatter, String) {
    let lines: Vec<&str> = content.lines().collect();
    let mut frontmatter = Frontmatter::default();

    let mut start_idx = 0;
    while start_idx < lines.len() && start_idx < 3 && lines[start_idx].starts_with("% ") {
        let value = lines[start_idx].trim_start_matches("% ").trim().to_string();
        let value = (!value.is_empty()).then_some(value);
        match start_idx {
            0 => frontmatter.title = value,
            1 => frontmatter.author = value,
            _ => frontmatter.date = value,
        }
        start_idx += 1;
    }

    if start_idx == 0 {
        return (frontmatter, content.to_string());
    }

    // Skip optional blank lines after the frontmatter
    while start_idx < lines.len() && lines[start_idx].trim().is_empty() {
        start_idx += 1;
    }
    (frontmatter, lines[start_idx..].join("\n"))
}

/// A level-one heading: `# Text`, `#Text` or a lone `#`, but not `##`.
fn heading_text(line: &str) -> Option<&str> {
    let trimmed = line.trim();
    let rest = trimmed.strip_prefix('#')?;
    if rest.starts_with('#') {
        return None;
    }
    Some(rest.trim())
}

/// Opening marker of a fenced block: the fence character and its run length.
fn fence_marker(line: &str) -> Option<(char, usize)> {
    let trimmed = line.trim_start();
    let ch = trimmed.chars().next().filter(|c| *c == '`' || *c == '~')?;
    let len = trimmed.chars().take_while(|c| *c == ch).count();
    (len >= 3).then_some((ch, len))
}

/// A closing fence uses the opening character, is at least as long and
/// carries no info string.
fn closes_fence(line: &str, open: (char, usize)) -> bool {
    match fence_marker(line) {
        Some((ch, len)) => ch == open.0 && len >= open.1 && line.trim().chars().all(|c| c == ch),
        None => false,
    }
}

/// Tracks whether a line-by-line scan is inside a fenced block.
#[derive(Debug, Default)]
struct FenceState {
    open: Option<(char, usize)>,
}

impl FenceState {
    /// Feed one line. Returns true when the line opens or closes a block.
    fn step(&mut self, line: &str) -> bool {
        match self.open {
            Some(open) if closes_fence(line, open) => {
                self.open = None;
                true
            }
            Some(_) => false,
            None => match fence_marker(line) {
                Some(marker) => {
                    self.open = Some(marker);
                    true
                }
                None => false,
            },
        }
    }

    fn inside(&self) -> bool {
        self.open.is_some()
    }
}

struct Section {
    title: Option<String>,
    body: Vec<String>,
}

fn split_sections(content: &str) -> Vec<Section> {
    let mut sections: Vec<Section> = Vec::new();
    let mut preamble: Vec<String> = Vec::new();
    let mut fences = FenceState::default();

    for line in content.lines() {
        fences.step(line);
        let in_fence = fences.inside();

        let heading = if in_fence { None } else { heading_text(line) };
        match heading {
            Some(title) => sections.push(Section {
                title: Some(title.to_string()),
                body: Vec::new(),
            }),
            None => {
                // Escaped hashes only exist to dodge the heading rule
                let line = if in_fence {
                    line.to_string()
                } else {
                    line.replace(r"\#", "#")
                };
                match sections.last_mut() {
                    Some(section) => section.body.push(line),
                    None => preamble.push(line),
                }
            }
        }
    }

    if preamble.iter().any(|l| !l.trim().is_empty()) {
        sections.insert(
            0,
            Section {
                title: None,
                body: preamble,
            },
        );
    }
    sections
}

fn trim_blank(lines: &[String]) -> &[String] {
    let start = lines
        .iter()
        .position(|l| !l.trim().is_empty())
        .unwrap_or(lines.len());
    let end = lines
        .iter()
        .rposition(|l| !l.trim().is_empty())
        .map(|i| i + 1)
        .unwrap_or(start);
    &lines[start..end.max(start)]
}

/// `<!-- type: code -->` written under each exported heading.
fn type_marker(line: &str) -> Option<SlideType> {
    line.trim()
        .strip_prefix("<!--")?
        .strip_suffix("-->")?
        .trim()
        .strip_prefix("type:")?
        .parse()
        .ok()
}

/// `(open, close)` line indices of every complete fenced block.
fn fenced_blocks(body: &[String]) -> Vec<(usize, usize)> {
    let mut fences = FenceState::default();
    let mut open_at = None;
    let mut blocks = Vec::new();
    for (i, line) in body.iter().enumerate() {
        if fences.step(line) {
            match open_at.take() {
                Some(open) => blocks.push((open, i)),
                None => open_at = Some(i),
            }
        }
    }
    blocks
}

/// The block ends the body: returns (lead text, info string, inner text).
fn trailing_fence(
    body: &[String],
    (open, close): (usize, usize),
) -> Option<(String, String, String)> {
    if close + 1 != body.len() {
        return None;
    }
    let info = body[open]
        .trim()
        .trim_start_matches(|c| c == '`' || c == '~')
        .trim()
        .to_string();
    let lead = trim_blank(&body[..open]).join("\n");
    let inner = body[open + 1..close].join("\n");
    Some((lead, info, inner))
}

fn author_of(line: &str) -> Option<&str> {
    line.strip_prefix("— ").or_else(|| line.strip_prefix("-- "))
}

/// Quote lines that would read as an author line get a leading backslash.
fn needs_quote_escape(line: &str) -> bool {
    author_of(line.trim_start().trim_start_matches('\\')).is_some()
}

fn unescape_quote_line(line: String) -> String {
    match line.strip_prefix('\\') {
        Some(rest) if needs_quote_escape(rest) => rest.to_string(),
        _ => line,
    }
}

/// The body ends with a blockquote: returns (lead text, quote, author).
/// A closing unescaped `— Name` line inside the quote is taken as its author.
fn trailing_quote(body: &[String]) -> Option<(String, String, Option<String>)> {
    let is_quote = |l: &String| l.trim_start().starts_with('>');
    let start = body
        .iter()
        .rposition(|l| !is_quote(l))
        .map(|i| i + 1)
        .unwrap_or(0);
    if start == body.len() {
        return None;
    }

    let mut lines: Vec<String> = body[start..]
        .iter()
        .map(|l| {
            let stripped = l.trim_start().trim_start_matches('>');
            stripped.strip_prefix(' ').unwrap_or(stripped).to_string()
        })
        .collect();

    let author = lines
        .last()
        .and_then(|last| author_of(last.trim()).map(|a| a.trim().to_string()));
    if author.is_some() {
        lines.pop();
    }
    let lines: Vec<String> = lines.into_iter().map(unescape_quote_line).collect();
    let lead = trim_blank(&body[..start]).join("\n");
    let quote = trim_blank(&lines).join("\n");
    Some((lead, quote, author))
}

/// Short prose with no lists, tables, headings or blocks.
fn looks_plain(body: &[String]) -> bool {
    let filled: Vec<&String> = body.iter().filter(|l| !l.trim().is_empty()).collect();
    filled.len() <= 3
        && filled.iter().all(|l| {
            let t = l.trim_start();
            !(t.starts_with('#')
                || t.starts_with("- ")
                || t.starts_with("* ")
                || t.starts_with('|')
                || t.starts_with('>')
                || fence_marker(t).is_some()
                || t.split_once(". ")
                    .map(|(n, _)| !n.is_empty() && n.chars().all(|c| c.is_ascii_digit()))
                    .unwrap_or(false))
        })
}

fn infer_kind(body: &[String]) -> SlideType {
    let blocks = fenced_blocks(body);
    if let [block] = blocks.as_slice() {
        if let Some((_, info, _)) = trailing_fence(body, *block) {
            return if info.eq_ignore_ascii_case("mermaid") {
                SlideType::Diagram
            } else {
                SlideType::Code
            };
        }
    }
    if trailing_quote(body).is_some() {
        SlideType::Quote
    } else if looks_plain(body) {
        SlideType::Title
    } else {
        SlideType::Content
    }
}

fn build_slide(index: usize, title: String, body: &[String]) -> Slide {
    let body = trim_blank(body);
    let (kind, body) = match body.first().and_then(|l| type_marker(l)) {
        Some(kind) => (kind, trim_blank(&body[1..])),
        None => (infer_kind(body), body),
    };
    let mut slide = Slide::new(kind, title, index as i64);

    match kind {
        SlideType::Code | SlideType::Diagram => {
            let payload = fenced_blocks(body)
                .last()
                .and_then(|block| trailing_fence(body, *block));
            match payload {
                Some((lead, info, inner)) => {
                    slide.content = lead;
                    if kind == SlideType::Diagram {
                        slide.diagram = Some(inner);
                    } else {
                        slide.code = Some(inner);
                        slide.language = (!info.is_empty()).then_some(info);
                    }
                }
                None => slide.content = body.join("\n"),
            }
        }
        SlideType::Quote => match trailing_quote(body) {
            Some((lead, quote, author)) => {
                slide.content = lead;
                slide.quote = Some(quote);
                slide.author = author;
            }
            None => slide.content = body.join("\n"),
        },
        SlideType::Title | SlideType::Content => slide.content = body.join("\n"),
    }
    slide
}

/// Escape lines that would otherwise start a new slide on re-import.
fn escape_headings(text: &str) -> String {
    let mut fences = FenceState::default();
    text.lines()
        .map(|line| {
            fences.step(line);
            if !fences.inside() && heading_text(line).is_some() {
                line.replacen('#', r"\#", 1)
            } else {
                line.to_string()
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Fence `inner` with a backtick run longer than any it contains.
fn fenced(info: &str, inner: &str) -> String {
    let longest = inner
        .lines()
        .map(|l| l.trim_start().chars().take_while(|c| *c == '`').count())
        .max()
        .unwrap_or(0);
    let fence = "`".repeat(longest.max(2) + 1);
    format!("{}{}\n{}\n{}", fence, info, inner, fence)
}

fn slide_body(slide: &Slide) -> String {
    let content = escape_headings(slide.content.trim());
    let payload = match slide.kind {
        SlideType::Code => slide
            .code
            .as_deref()
            .map(|code| fenced(slide.language.as_deref().unwrap_or(""), code)),
        SlideType::Diagram => slide.diagram.as_deref().map(|d| fenced("mermaid", d)),
        SlideType::Quote => slide.quote.as_deref().map(|quote| {
            let mut lines: Vec<String> = quote
                .lines()
                .map(|l| {
                    if needs_quote_escape(l) {
                        format!(r"> \{}", l)
                    } else {
                        format!("> {}", l)
                    }
                })
                .collect();
            if let Some(author) = slide.author.as_deref().filter(|a| !a.is_empty()) {
                lines.push(">".to_string());
                lines.push(format!("> — {}", author));
            }
            lines.join("\n")
        }),
        SlideType::Title | SlideType::Content => None,
    };

    match payload {
        Some(payload) if content.is_empty() => payload,
        Some(payload) => format!("{}\n\n{}", content, payload),
        None => content,
    }
}

/// Render slides, in the given order, as an outline document.
pub fn export_outline<'a, I>(name: &str, slides: I) -> String
where
    I: IntoIterator<Item = &'a Slide>,
{
    let mut doc = format!("% {}\n", name);
    for slide in slides {
        doc.push_str("\n# ");
        doc.push_str(slide.title.trim());
        doc.push_str(&format!("\n<!-- type: {} -->\n", slide.kind.as_str()));
        let body = slide_body(slide);
        if !body.is_empty() {
            doc.push('\n');
            doc.push_str(&body);
            doc.push('\n');
        }
    }
    doc
}

/// Utility function to write an outline to a file
pub fn write_outline_to_file(outline: &str, output_path: &Path) -> Result<()> {
    info!("Writing outline to file: {:?}", output_path);

    utils::ensure_parent_directory_exists(output_path)?;
    fs::write(output_path, outline)?;
    Ok(())
}
