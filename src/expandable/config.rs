//! Layout and animation configuration for the expandable list.

use super::types::{AnimationSpeed, EdgeInsets};

/// Construction-time configuration of an expandable list.
///
/// Built with the `with_*` methods, or with one of the convenience
/// constructors. Once handed to [`Model::new`](super::Model::new) the
/// configuration no longer changes.
///
/// # Examples
///
/// ```rust
/// use bubbletea_expandable::expandable::{AnimationSpeed, EdgeInsets, ListConfig};
///
/// let config = ListConfig::default()
///     .with_section_inset(EdgeInsets::symmetric(1, 2))
///     .with_line_spacing(1)
///     .with_animation_speed(AnimationSpeed::Fast);
///
/// assert_eq!(config.section_inset.horizontal(), 4);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ListConfig {
    /// Padding between the list bounds and its scrollable content.
    pub content_inset: EdgeInsets,
    /// Padding around every section.
    pub section_inset: EdgeInsets,
    /// Blank rows between consecutive items of a section.
    pub line_spacing: usize,
    /// Duration of expand and collapse transitions.
    pub animation_speed: AnimationSpeed,
}

impl ListConfig {
    /// Creates a configuration from explicit insets and spacing.
    pub fn new(content_inset: EdgeInsets, section_inset: EdgeInsets, line_spacing: usize) -> Self {
        Self {
            content_inset,
            section_inset,
            line_spacing,
            animation_speed: AnimationSpeed::default(),
        }
    }

    /// Creates a configuration from scalar horizontal and vertical insets.
    pub fn with_insets(
        horizontal_content_inset: usize,
        vertical_content_inset: usize,
        horizontal_section_inset: usize,
        vertical_section_inset: usize,
        line_spacing: usize,
    ) -> Self {
        Self::new(
            EdgeInsets::symmetric(vertical_content_inset, horizontal_content_inset),
            EdgeInsets::symmetric(vertical_section_inset, horizontal_section_inset),
            line_spacing,
        )
    }

    /// Sets the content inset.
    pub fn with_content_inset(mut self, inset: EdgeInsets) -> Self {
        self.content_inset = inset;
        self
    }

    /// Sets the section inset.
    pub fn with_section_inset(mut self, inset: EdgeInsets) -> Self {
        self.section_inset = inset;
        self
    }

    /// Sets the blank rows between items.
    pub fn with_line_spacing(mut self, spacing: usize) -> Self {
        self.line_spacing = spacing;
        self
    }

    /// Sets the transition speed.
    pub fn with_animation_speed(mut self, speed: AnimationSpeed) -> Self {
        self.animation_speed = speed;
        self
    }

    /// Width available to a cell inside a list `bounds_width` columns wide.
    ///
    /// Saturates at zero when the insets are wider than the list.
    pub fn item_width(&self, bounds_width: usize) -> usize {
        bounds_width
            .saturating_sub(self.content_inset.horizontal())
            .saturating_sub(self.section_inset.horizontal())
    }
}
