use serde::Serialize;

use crate::models::Category;

/// Presentation data for a taste category.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryConfig {
    pub category: Category,
    pub label: &'static str,
    pub short_label: &'static str,
    pub color: &'static str,
    pub emoji: &'static str,
}

pub const MAX_LEVEL: u8 = 5;

impl Category {
    pub fn label(&self) -> &'static str {
        match self {
            Category::Spicy => "辛い",
            Category::Oily => "油っぽい",
            Category::Sweet => "甘い",
        }
    }

    pub fn short_label(&self) -> &'static str {
        match self {
            Category::Spicy => "辛",
            Category::Oily => "油",
            Category::Sweet => "甘",
        }
    }

    pub fn color(&self) -> &'static str {
        match self {
            Category::Spicy => "#ef4444",
            Category::Oily => "#eab308",
            Category::Sweet => "#ec4899",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Category::Spicy => "🌶️",
            Category::Oily => "🍟",
            Category::Sweet => "🍰",
        }
    }

    /// Noun used in front of a level, e.g. 辛さ for spicy.
    pub fn level_label(&self) -> &'static str {
        match self {
            Category::Spicy => "辛さ",
            Category::Oily => "油っぽさ",
            Category::Sweet => "甘さ",
        }
    }

    pub fn config(&self) -> CategoryConfig {
        CategoryConfig {
            category: *self,
            label: self.label(),
            short_label: self.short_label(),
            color: self.color(),
            emoji: self.emoji(),
        }
    }

    /// The category emoji repeated `level` times (clamped to 1..=5).
    pub fn render_level(&self, level: u8) -> String {
        self.emoji().repeat(clamp_level(level) as usize)
    }

    /// Text form of a level: `辛さ 3/5`.
    pub fn level_text(&self, level: u8) -> String {
        format!("{} {}/{}", self.level_label(), clamp_level(level), MAX_LEVEL)
    }
}

fn clamp_level(level: u8) -> u8 {
    level.clamp(1, MAX_LEVEL)
}

pub fn all_configs() -> Vec<CategoryConfig> {
    Category::ALL.iter().map(Category::config).collect()
}

/// Set of categories currently shown on the map. Starts with all selected.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryFilter {
    selected: Vec<Category>,
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter {
            selected: Category::ALL.to_vec(),
        }
    }
}

impl CategoryFilter {
    pub fn only(categories: &[Category]) -> Self {
        let mut selected = Vec::new();
        for c in Category::ALL {
            if categories.contains(&c) {
                selected.push(c);
            }
        }
        CategoryFilter { selected }
    }

    pub fn contains(&self, category: Category) -> bool {
        self.selected.contains(&category)
    }

    pub fn toggle(&mut self, category: Category) {
        if let Some(i) = self.selected.iter().position(|c| *c == category) {
            self.selected.remove(i);
        } else {
            self.selected.push(category);
            self.selected
                .sort_by_key(|c| Category::ALL.iter().position(|a| a == c));
        }
    }

    pub fn is_all(&self) -> bool {
        Category::ALL.iter().all(|c| self.contains(*c))
    }

    pub fn selected(&self) -> &[Category] {
        &self.selected
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configs_cover_all_categories() {
        let configs = all_configs();
        assert_eq!(configs.len(), 3);
        assert_eq!(configs[0].label, "辛い");
        assert_eq!(configs[1].color, "#eab308");
        assert_eq!(configs[2].short_label, "甘");
    }

    #[test]
    fn test_render_level_repeats_emoji() {
        assert_eq!(Category::Oily.render_level(3), "🍟🍟🍟");
        assert_eq!(Category::Sweet.render_level(9), "🍰".repeat(5));
        assert_eq!(Category::Sweet.render_level(0), "🍰");
    }

    #[test]
    fn test_level_text() {
        assert_eq!(Category::Spicy.level_text(4), "辛さ 4/5");
        assert_eq!(Category::Oily.level_text(2), "油っぽさ 2/5");
    }

    #[test]
    fn test_filter_starts_with_everything() {
        let f = CategoryFilter::default();
        assert!(f.is_all());
        assert!(f.contains(Category::Sweet));
    }

    #[test]
    fn test_filter_toggle_keeps_canonical_order() {
        let mut f = CategoryFilter::default();
        f.toggle(Category::Spicy);
        assert!(!f.contains(Category::Spicy));
        assert!(!f.is_all());
        f.toggle(Category::Spicy);
        assert_eq!(f.selected(), &Category::ALL);
    }

    #[test]
    fn test_filter_only() {
        let f = CategoryFilter::only(&[Category::Sweet, Category::Spicy]);
        assert_eq!(f.selected(), &[Category::Spicy, Category::Sweet]);
    }
}
