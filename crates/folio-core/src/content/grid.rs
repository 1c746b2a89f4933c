//! Deterministic content items and fixed-column grid geometry

use serde::Serialize;
use url::Url;

use crate::{Error, Result};

/// One grid cell. Identity is derived from its position, so it is stable
/// across re-renders without any stored ids.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentItem {
    pub id: String,
    pub source_ref: String,
}

/// Image URL template with a `{n}` placeholder
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceTemplate {
    template: String,
}

impl SourceTemplate {
    const PLACEHOLDER: &'static str = "{n}";

    pub fn new(template: impl Into<String>) -> Result<Self> {
        let template = template.into();
        if !template.contains(Self::PLACEHOLDER) {
            return Err(Error::Template(format!(
                "'{}' has no {} placeholder",
                template,
                Self::PLACEHOLDER
            )));
        }
        let source = Self { template };
        // Validate with a concrete value
        Url::parse(&source.render(0))?;
        Ok(source)
    }

    pub fn render(&self, n: u64) -> String {
        self.template.replace(Self::PLACEHOLDER, &n.to_string())
    }
}

/// Produces the items of one category
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ItemGenerator {
    category_offset: u32,
    count: usize,
    template: SourceTemplate,
}

impl ItemGenerator {
    pub fn new(category_offset: u32, count: usize, template: SourceTemplate) -> Self {
        Self {
            category_offset,
            count,
            template,
        }
    }

    pub fn count(&self) -> usize {
        self.count
    }

    pub fn category_offset(&self) -> u32 {
        self.category_offset
    }

    /// Lazy, finite sequence. Every call starts over and yields the same items.
    pub fn items(&self) -> Items<'_> {
        Items {
            generator: self,
            next: 0,
        }
    }

    pub fn item(&self, index: usize) -> Option<ContentItem> {
        (index < self.count).then(|| ContentItem {
            id: index.to_string(),
            source_ref: self
                .template
                .render(self.category_offset as u64 + index as u64),
        })
    }
}

#[derive(Debug, Clone)]
pub struct Items<'a> {
    generator: &'a ItemGenerator,
    next: usize,
}

impl Iterator for Items<'_> {
    type Item = ContentItem;

    fn next(&mut self) -> Option<Self::Item> {
        let item = self.generator.item(self.next)?;
        self.next += 1;
        Some(item)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = self.generator.count.saturating_sub(self.next);
        (left, Some(left))
    }
}

impl ExactSizeIterator for Items<'_> {}

/// Cell position inside a grid, relative to the grid origin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CellRect {
    pub x: u16,
    pub y: u16,
    pub width: u16,
    pub height: u16,
}

/// Fixed-column grid. Row height follows the category's aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridLayout {
    columns: u16,
    /// Cell height / cell width
    aspect_ratio: f64,
    /// Rows per column of width on the host surface
    vertical_scale: f64,
}

impl GridLayout {
    pub fn new(columns: u16, aspect_ratio: f64, vertical_scale: f64) -> Self {
        Self {
            columns: columns.max(1),
            aspect_ratio,
            vertical_scale,
        }
    }

    pub fn columns(&self) -> u16 {
        self.columns
    }

    pub fn aspect_ratio(&self) -> f64 {
        self.aspect_ratio
    }

    pub fn cell_width(&self, width: u16) -> u16 {
        width / self.columns
    }

    pub fn row_height(&self, width: u16) -> u16 {
        let cell = self.cell_width(width) as f64;
        (cell * self.aspect_ratio * self.vertical_scale).round().max(1.0) as u16
    }

    pub fn rows(&self, count: usize) -> usize {
        count.div_ceil(self.columns as usize)
    }

    pub fn content_height(&self, width: u16, count: usize) -> u16 {
        let rows = self.rows(count) as u32 * self.row_height(width) as u32;
        rows.min(u16::MAX as u32) as u16
    }

    /// Cell for item `index`. The last column absorbs the division remainder.
    pub fn cell_rect(&self, index: usize, width: u16) -> CellRect {
        let columns = self.columns as usize;
        let column = (index % columns) as u16;
        let row = (index / columns) as u32;
        let cell_width = self.cell_width(width);
        let height = self.row_height(width);
        let x = column * cell_width;
        let w = if column + 1 == self.columns {
            width.saturating_sub(x)
        } else {
            cell_width
        };
        CellRect {
            x,
            y: (row * height as u32).min(u16::MAX as u32) as u16,
            width: w,
            height,
        }
    }
}
