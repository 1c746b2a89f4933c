use crate::config::{CategoryConfig, ContentConfig};
use crate::nav::TabDescriptor;
use crate::Result;

use super::grid::{ContentItem, GridLayout, ItemGenerator, SourceTemplate};

/// A tab together with the grid it shows
#[derive(Debug, Clone)]
pub struct Category {
    pub tab: TabDescriptor,
    pub generator: ItemGenerator,
    pub layout: GridLayout,
}

impl Category {
    pub fn from_config(
        config: &CategoryConfig,
        template: SourceTemplate,
        count: usize,
        columns: u16,
        vertical_scale: f64,
    ) -> Self {
        Self {
            tab: config.tab(),
            generator: ItemGenerator::new(config.offset, count, template),
            layout: GridLayout::new(columns, config.aspect_ratio, vertical_scale),
        }
    }

    pub fn items(&self) -> Vec<ContentItem> {
        self.generator.items().collect()
    }

    pub fn content_height(&self, width: u16) -> u16 {
        self.layout.content_height(width, self.generator.count())
    }
}

/// All categories in tab order
#[derive(Debug, Clone)]
pub struct Catalog {
    categories: Vec<Category>,
}

impl Catalog {
    pub fn from_config(config: &ContentConfig, vertical_scale: f64) -> Result<Self> {
        let template = SourceTemplate::new(config.image_template.clone())?;
        let categories = config
            .categories
            .iter()
            .map(|c| {
                Category::from_config(
                    c,
                    template.clone(),
                    config.items_per_category,
                    config.columns,
                    vertical_scale,
                )
            })
            .collect();
        Ok(Self { categories })
    }

    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    pub fn get(&self, index: usize) -> Option<&Category> {
        self.categories.get(index)
    }

    pub fn find(&self, key: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.tab.key == key)
    }

    pub fn tabs(&self) -> Vec<TabDescriptor> {
        self.categories.iter().map(|c| c.tab.clone()).collect()
    }

    pub fn len(&self) -> usize {
        self.categories.len()
    }

    pub fn is_empty(&self) -> bool {
        self.categories.is_empty()
    }
}
