//! Scrollable portfolio page model

use crate::config::SectionConfig;

/// Label shown under the hero while the page is near the top
pub const SCROLL_INDICATOR_TEXT: &str = "↓ scroll";

/// Blank lines between the hero and the first section
const HERO_PADDING: usize = 3;

/// What a rendered line represents, for styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineKind {
    Owner,
    Tagline,
    Indicator,
    Heading,
    Body,
    Blank,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageLine {
    pub text: String,
    pub kind: LineKind,
    /// Section the line belongs to (None for the hero)
    pub section: Option<usize>,
}

impl PageLine {
    fn new(text: impl Into<String>, kind: LineKind, section: Option<usize>) -> Self {
        Self {
            text: text.into(),
            kind,
            section,
        }
    }

    fn blank(section: Option<usize>) -> Self {
        Self::new("", LineKind::Blank, section)
    }
}

/// Line range of one section on the page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SectionSpan {
    pub id: String,
    pub title: String,
    pub top: u16,
    pub height: u16,
}

/// Navigation link to a section anchor
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavLink {
    pub href: String,
    pub label: String,
    /// Column of the first character, relative to the nav bar
    pub x: u16,
    pub width: u16,
}

impl NavLink {
    pub fn contains_column(&self, column: u16) -> bool {
        column >= self.x && column < self.x + self.width
    }
}

/// Laid-out page plus the current scroll position
#[derive(Debug, Clone, Default)]
pub struct PageState {
    pub lines: Vec<PageLine>,
    pub sections: Vec<SectionSpan>,
    pub scroll: u16,
    pub viewport_height: u16,
}

impl PageState {
    /// Lay out the page for a content column `width` wide
    pub fn layout(owner: &str, tagline: &str, sections: &[SectionConfig], width: u16) -> Self {
        let width = usize::from(width.max(10));
        let mut lines = vec![
            PageLine::new(owner, LineKind::Owner, None),
            PageLine::new(tagline, LineKind::Tagline, None),
            PageLine::blank(None),
            PageLine::new(SCROLL_INDICATOR_TEXT, LineKind::Indicator, None),
        ];
        lines.extend((0..HERO_PADDING).map(|_| PageLine::blank(None)));

        let mut spans = Vec::with_capacity(sections.len());
        for (idx, section) in sections.iter().enumerate() {
            let top = lines.len();
            lines.push(PageLine::new(&section.title, LineKind::Heading, Some(idx)));
            lines.push(PageLine::blank(Some(idx)));
            for text in wrap_text(&section.body, width) {
                lines.push(PageLine::new(text, LineKind::Body, Some(idx)));
            }
            lines.push(PageLine::blank(Some(idx)));
            lines.push(PageLine::blank(Some(idx)));

            spans.push(SectionSpan {
                id: section.id.clone(),
                title: section.title.clone(),
                top: to_u16(top),
                height: to_u16(lines.len() - top),
            });
        }

        Self {
            lines,
            sections: spans,
            scroll: 0,
            viewport_height: 0,
        }
    }

    pub fn content_height(&self) -> u16 {
        to_u16(self.lines.len())
    }

    pub fn max_scroll(&self) -> u16 {
        self.content_height().saturating_sub(self.viewport_height)
    }

    /// Set the scroll offset (clamped); returns true if it moved
    pub fn scroll_to(&mut self, offset: u16) -> bool {
        let clamped = offset.min(self.max_scroll());
        let moved = clamped != self.scroll;
        self.scroll = clamped;
        moved
    }

    pub fn scroll_by(&mut self, delta: i32) -> bool {
        let target = (i32::from(self.scroll) + delta).clamp(0, i32::from(u16::MAX));
        self.scroll_to(target as u16)
    }

    /// Fraction of each section currently inside the viewport
    pub fn visible_ratios(&self) -> Vec<f32> {
        let view_top = u32::from(self.scroll);
        let view_bottom = view_top + u32::from(self.viewport_height);
        self.sections
            .iter()
            .map(|span| {
                if span.height == 0 {
                    return 0.0;
                }
                let top = u32::from(span.top);
                let bottom = top + u32::from(span.height);
                let overlap = bottom.min(view_bottom).saturating_sub(top.max(view_top));
                overlap as f32 / f32::from(span.height)
            })
            .collect()
    }

    /// `(id, top)` pairs that `#id` links resolve against
    pub fn anchor_targets(&self) -> impl Iterator<Item = (&str, u16)> {
        self.sections.iter().map(|s| (s.id.as_str(), s.top))
    }

    /// Navigation links laid out left to right, one space apart
    pub fn nav_links(&self) -> Vec<NavLink> {
        let mut x = 1u16;
        self.sections
            .iter()
            .enumerate()
            .map(|(idx, span)| {
                let label = format!("{} {}", idx + 1, span.title);
                let width = to_u16(label.chars().count() + 2);
                let link = NavLink {
                    href: format!("#{}", span.id),
                    label,
                    x,
                    width,
                };
                x = x.saturating_add(width + 1);
                link
            })
            .collect()
    }
}

fn to_u16(n: usize) -> u16 {
    u16::try_from(n).unwrap_or(u16::MAX)
}

/// Wrap text to fit within a maximum width
pub fn wrap_text(text: &str, max_width: usize) -> Vec<String> {
    let mut lines = Vec::new();

    for paragraph in text.split('\n') {
        if paragraph.is_empty() {
            lines.push(String::new());
            continue;
        }

        let mut current_line = String::new();
        for word in paragraph.split_whitespace() {
            let current_len = current_line.chars().count();
            if current_len + word.chars().count() + 1 > max_width && !current_line.is_empty() {
                lines.push(current_line);
                current_line = String::new();
            }
            if !current_line.is_empty() {
                current_line.push(' ');
            }
            current_line.push_str(word);
        }
        if !current_line.is_empty() {
            lines.push(current_line);
        }
    }

    if lines.is_empty() {
        lines.push(String::new());
    }

    lines
}
