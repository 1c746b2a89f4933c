//! Sticky section composition for the outer vertical scroll

/// The sections stacked in the profile screen, top to bottom
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SectionKind {
    Header,
    Highlights,
    TabBar,
    Content,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Section {
    pub kind: SectionKind,
    pub height: u16,
}

/// Where a section lands in the viewport for one scroll position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Placement {
    pub kind: SectionKind,
    /// Viewport row of the first visible row
    pub y: u16,
    /// Rows of the section hidden above `y`
    pub clip_top: u16,
    /// Visible rows
    pub height: u16,
    /// Pinned to the top of the viewport
    pub pinned: bool,
}

/// Ordered sections plus an optional sticky boundary
///
/// Once the outer scroll passes the sticky section it pins to row 0, and the
/// sections after it scroll underneath.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ViewTree {
    sections: Vec<Section>,
    sticky_index: Option<usize>,
}

impl ViewTree {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_section(mut self, kind: SectionKind, height: u16) -> Self {
        self.sections.push(Section { kind, height });
        self
    }

    /// Append a section and mark it as the sticky boundary.
    /// Only the last call wins.
    pub fn with_sticky(mut self, kind: SectionKind, height: u16) -> Self {
        self.sticky_index = Some(self.sections.len());
        self.sections.push(Section { kind, height });
        self
    }

    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    pub fn sticky_index(&self) -> Option<usize> {
        self.sticky_index
    }

    pub fn height_of(&self, kind: SectionKind) -> Option<u16> {
        self.sections.iter().find(|s| s.kind == kind).map(|s| s.height)
    }

    pub fn total_height(&self) -> u32 {
        self.sections.iter().map(|s| s.height as u32).sum()
    }

    /// Natural (unscrolled) top of the section at `index`
    fn natural_top(&self, index: usize) -> u32 {
        self.sections[..index].iter().map(|s| s.height as u32).sum()
    }

    /// Natural top of the sticky section, if any
    pub fn sticky_offset(&self) -> Option<u16> {
        self.sticky_index
            .map(|i| self.natural_top(i).min(u16::MAX as u32) as u16)
    }

    pub fn max_scroll(&self, viewport: u16) -> u16 {
        self.total_height()
            .saturating_sub(viewport as u32)
            .min(u16::MAX as u32) as u16
    }

    pub fn is_pinned(&self, scroll: u16) -> bool {
        matches!(self.sticky_offset(), Some(offset) if scroll > offset)
    }

    /// Visible placements for `scroll` in a viewport of `viewport` rows,
    /// in drawing order. The pinned section, if any, comes last so it
    /// draws over anything beneath it.
    pub fn layout(&self, scroll: u16, viewport: u16) -> Vec<Placement> {
        let scroll = scroll.min(self.max_scroll(viewport)) as u32;
        let viewport_end = scroll + viewport as u32;
        let pinned = self.is_pinned(scroll as u16);

        let mut placements = Vec::with_capacity(self.sections.len());
        let mut pinned_placement = None;
        // Rows covered by the pinned section
        let mut covered = 0u32;

        if pinned {
            if let Some(index) = self.sticky_index {
                let section = self.sections[index];
                let height = (section.height as u32).min(viewport as u32);
                covered = height;
                if height > 0 {
                    pinned_placement = Some(Placement {
                        kind: section.kind,
                        y: 0,
                        clip_top: 0,
                        height: height as u16,
                        pinned: true,
                    });
                }
            }
        }

        let mut top = 0u32;
        for (index, section) in self.sections.iter().enumerate() {
            let section_top = top;
            let section_end = top + section.height as u32;
            top = section_end;

            if pinned && Some(index) == self.sticky_index {
                continue;
            }

            let window_start = scroll + covered;
            let visible_start = section_top.max(window_start);
            let visible_end = section_end.min(viewport_end);
            if visible_start >= visible_end {
                continue;
            }

            placements.push(Placement {
                kind: section.kind,
                y: (visible_start - scroll) as u16,
                clip_top: (visible_start - section_top) as u16,
                height: (visible_end - visible_start) as u16,
                pinned: false,
            });
        }

        placements.extend(pinned_placement);
        placements
    }

    /// Map a viewport row to the section under it and the row within that
    /// section
    pub fn hit_test(&self, row: u16, scroll: u16, viewport: u16) -> Option<(SectionKind, u16)> {
        if row >= viewport {
            return None;
        }
        self.layout(scroll, viewport)
            .into_iter()
            .rev()
            .find(|p| row >= p.y && row < p.y + p.height)
            .map(|p| (p.kind, p.clip_top + (row - p.y)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn profile_tree() -> ViewTree {
        ViewTree::new()
            .with_section(SectionKind::Header, 10)
            .with_section(SectionKind::Highlights, 4)
            .with_sticky(SectionKind::TabBar, 2)
            .with_section(SectionKind::Content, 50)
    }

    #[test]
    fn test_unscrolled_layout() {
        let tree = profile_tree();
        let placements = tree.layout(0, 20);

        assert_eq!(placements.len(), 4);
        assert_eq!(placements[0].kind, SectionKind::Header);
        assert_eq!(placements[2].y, 14);
        assert!(!placements[2].pinned);
        let content = placements[3];
        assert_eq!(content.y, 16);
        assert_eq!(content.height, 4);
        assert_eq!(content.clip_top, 0);
    }

    #[test]
    fn test_sticky_pins_after_boundary() {
        let tree = profile_tree();
        assert_eq!(tree.sticky_offset(), Some(14));
        assert!(!tree.is_pinned(14));

        let placements = tree.layout(20, 20);
        let tab_bar = placements.last().copied().unwrap();
        assert_eq!(tab_bar.kind, SectionKind::TabBar);
        assert!(tab_bar.pinned);
        assert_eq!(tab_bar.y, 0);

        let content = placements
            .iter()
            .find(|p| p.kind == SectionKind::Content)
            .copied()
            .unwrap();
        assert_eq!(content.y, 2);
        assert_eq!(content.clip_top, 6);
        assert_eq!(content.height, 18);
        assert!(placements.iter().all(|p| p.kind != SectionKind::Header));
    }

    #[test]
    fn test_scroll_clamped_to_max() {
        let tree = profile_tree();
        assert_eq!(tree.max_scroll(20), 46);
        assert_eq!(tree.layout(500, 20), tree.layout(46, 20));
    }

    #[test]
    fn test_partial_header() {
        let tree = profile_tree();
        let header = tree.layout(3, 20)[0];
        assert_eq!(header.y, 0);
        assert_eq!(header.clip_top, 3);
        assert_eq!(header.height, 7);
    }

    #[test]
    fn test_hit_test_prefers_pinned() {
        let tree = profile_tree();
        assert_eq!(tree.hit_test(0, 30, 20), Some((SectionKind::TabBar, 0)));
        assert_eq!(tree.hit_test(2, 30, 20), Some((SectionKind::Content, 16)));
        assert_eq!(tree.hit_test(15, 0, 20), Some((SectionKind::TabBar, 1)));
        assert_eq!(tree.hit_test(25, 0, 20), None);
    }

    #[test]
    fn test_tree_without_sticky_never_pins() {
        let tree = ViewTree::new()
            .with_section(SectionKind::Header, 5)
            .with_section(SectionKind::Content, 30);
        assert!(!tree.is_pinned(20));
        assert!(tree.layout(20, 10).iter().all(|p| !p.pinned));
    }
}
