//! Core value types shared by the expandable list, its delegate and its interceptor.

use std::fmt;
use std::time::Duration;

/// Position of an item: section, then item within the section.
///
/// Index paths order by section first, so a `BTreeSet<IndexPath>` iterates
/// items top to bottom.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct IndexPath {
    /// Section index.
    pub section: usize,
    /// Item index within the section.
    pub item: usize,
}

impl IndexPath {
    /// Creates an index path.
    pub const fn new(section: usize, item: usize) -> Self {
        Self { section, item }
    }

    /// Shorthand for an item in section zero.
    pub const fn item(item: usize) -> Self {
        Self { section: 0, item }
    }
}

impl fmt::Display for IndexPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.section, self.item)
    }
}

/// Padding around content, in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct EdgeInsets {
    /// Rows above.
    pub top: usize,
    /// Columns to the left.
    pub left: usize,
    /// Rows below.
    pub bottom: usize,
    /// Columns to the right.
    pub right: usize,
}

impl EdgeInsets {
    /// No padding.
    pub const ZERO: EdgeInsets = EdgeInsets::new(0, 0, 0, 0);

    /// Creates insets from explicit edges.
    pub const fn new(top: usize, left: usize, bottom: usize, right: usize) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same padding on every edge.
    pub const fn uniform(inset: usize) -> Self {
        Self::new(inset, inset, inset, inset)
    }

    /// `vertical` above and below, `horizontal` left and right.
    pub const fn symmetric(vertical: usize, horizontal: usize) -> Self {
        Self::new(vertical, horizontal, vertical, horizontal)
    }

    /// Left plus right.
    pub const fn horizontal(&self) -> usize {
        self.left + self.right
    }

    /// Top plus bottom.
    pub const fn vertical(&self) -> usize {
        self.top + self.bottom
    }
}

/// Outer size of the list in terminal cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    /// Columns.
    pub width: usize,
    /// Rows.
    pub height: usize,
}

impl Size {
    /// Creates a size.
    pub const fn new(width: usize, height: usize) -> Self {
        Self { width, height }
    }
}

/// How long an expand or collapse transition takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationSpeed {
    /// Effectively instant (10 ms), but still serialized through the queue.
    None,
    /// 300 ms.
    Fast,
    /// 500 ms.
    #[default]
    Medium,
    /// 700 ms.
    Slow,
}

impl AnimationSpeed {
    /// Transition duration for this speed.
    pub const fn duration(self) -> Duration {
        match self {
            AnimationSpeed::None => Duration::from_millis(10),
            AnimationSpeed::Fast => Duration::from_millis(300),
            AnimationSpeed::Medium => Duration::from_millis(500),
            AnimationSpeed::Slow => Duration::from_millis(700),
        }
    }
}

/// Every callback of [`ListDelegate`](super::ListDelegate), for capability probing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Notification {
    /// An item is about to enter the viewport.
    WillDisplay,
    /// An item left the viewport.
    DidEndDisplaying,
    /// May the cursor highlight an item?
    ShouldHighlight,
    /// The cursor highlighted an item.
    DidHighlight,
    /// The cursor left an item.
    DidUnhighlight,
    /// May an item become selected?
    ShouldSelect,
    /// An item became selected.
    DidSelect,
    /// May an item become deselected?
    ShouldDeselect,
    /// An item became deselected.
    DidDeselect,
    /// The scroll offset changed.
    DidScroll,
}

impl Notification {
    /// Callbacks the list always handles itself before involving the delegate.
    pub const INTERCEPTED: [Notification; 3] = [
        Notification::WillDisplay,
        Notification::ShouldSelect,
        Notification::ShouldDeselect,
    ];

    /// Returns true if the interceptor implements this callback itself.
    pub fn is_intercepted(self) -> bool {
        Self::INTERCEPTED.contains(&self)
    }
}

/// Sent when the user changes the preferred content size of the terminal
/// (for example by zooming). The list deselects everything and re-lays out.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ContentSizeChangedMsg;
