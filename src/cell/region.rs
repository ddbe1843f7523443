//! Line-based content containers used as the two regions of an expandable cell.

use lipgloss_extras::prelude::*;
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

/// Ellipsis appended to lines that do not fit the cell width.
pub const ELLIPSIS: &str = "…";

/// An opaque content container: a block of text lines rendered with a style.
///
/// Regions know nothing about expansion. The owning [`ExpandCell`](super::ExpandCell)
/// decides whether a region participates in layout.
///
/// # Examples
///
/// ```rust
/// use bubbletea_expandable::cell::Region;
///
/// let mut region = Region::new();
/// region.set_content("Title\nSubtitle");
/// assert_eq!(region.height(), 2);
/// assert_eq!(region.lines()[1], "Subtitle");
/// ```
#[derive(Debug, Clone)]
pub struct Region {
    lines: Vec<String>,
    style: Style,
}

impl Default for Region {
    fn default() -> Self {
        Self::new()
    }
}

impl Region {
    /// Creates an empty, unstyled region.
    pub fn new() -> Self {
        Self {
            lines: Vec::new(),
            style: Style::new(),
        }
    }

    /// Creates a region holding `content`, split on newlines.
    pub fn with_content(content: impl AsRef<str>) -> Self {
        let mut region = Self::new();
        region.set_content(content);
        region
    }

    /// Sets the style applied to every rendered line.
    pub fn with_style(mut self, style: Style) -> Self {
        self.style = style;
        self
    }

    /// Replaces the content, one line per newline-separated segment.
    pub fn set_content(&mut self, content: impl AsRef<str>) {
        self.lines = content.as_ref().lines().map(str::to_string).collect();
    }

    /// Appends a single line.
    pub fn push_line(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    /// Removes all content.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Replaces the style.
    pub fn set_style(&mut self, style: Style) {
        self.style = style;
    }

    /// The raw, unstyled lines.
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Number of terminal rows this region occupies.
    pub fn height(&self) -> usize {
        self.lines.len()
    }

    /// Widest line in terminal columns.
    pub fn content_width(&self) -> usize {
        self.lines.iter().map(|l| l.width()).max().unwrap_or(0)
    }

    /// Renders every line fitted to exactly `width` columns.
    pub fn render(&self, width: usize) -> Vec<String> {
        self.lines
            .iter()
            .map(|line| self.style.render(&fit(line, width)))
            .collect()
    }
}

/// Truncates or pads `line` to exactly `width` display columns.
pub(crate) fn fit(line: &str, width: usize) -> String {
    let current = line.width();
    if current <= width {
        let mut out = String::with_capacity(line.len() + width - current);
        out.push_str(line);
        out.extend(std::iter::repeat(' ').take(width - current));
        return out;
    }
    if width == 0 {
        return String::new();
    }

    let budget = width - ELLIPSIS.width();
    let mut out = String::new();
    let mut used = 0;
    for ch in line.chars() {
        let w = ch.width().unwrap_or(0);
        if used + w > budget {
            break;
        }
        used += w;
        out.push(ch);
    }
    out.push_str(ELLIPSIS);
    out.extend(std::iter::repeat(' ').take(budget - used));
    out
}
