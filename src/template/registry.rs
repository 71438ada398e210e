//! Named template configurations.
use crate::common::RGBColor;
use crate::template::main_config;
use std::collections::BTreeMap;

/// Font sizes of the classic template, in points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassicFontSizes {
    pub cover_title: f64,
    pub cover_subtitle: f64,
    pub section_header: f64,
    pub slide_title: f64,
    pub heading: f64,
    pub body: f64,
    pub bullet_levels: [f64; 3],
    pub caption: f64,
    pub footnote: f64,
}

/// The classic 4:3 template: a flat color set and a type scale.
#[derive(Debug, Clone, PartialEq)]
pub struct ClassicTemplate {
    pub primary: RGBColor,
    pub secondary: RGBColor,
    pub background: RGBColor,
    pub text: RGBColor,
    pub accent: RGBColor,
    pub font: String,
    pub font_sizes: ClassicFontSizes,
    /// Slide margin on every side, in inches
    pub margin_in: f64,
}

impl Default for ClassicTemplate {
    fn default() -> Self {
        Self {
            primary: RGBColor::new(0x2E, 0x50, 0x90),
            secondary: RGBColor::new(0x5B, 0x9B, 0xD5),
            background: RGBColor::WHITE,
            text: RGBColor::BLACK,
            accent: RGBColor::new(0xFF, 0xC0, 0x00),
            font: main_config::FONT_PRIMARY.to_string(),
            font_sizes: ClassicFontSizes {
                cover_title: 54.0,
                cover_subtitle: 32.0,
                section_header: 44.0,
                slide_title: 36.0,
                heading: 28.0,
                body: 18.0,
                bullet_levels: [20.0, 18.0, 16.0],
                caption: 14.0,
                footnote: 12.0,
            },
            margin_in: 0.5,
        }
    }
}

/// What a registered template renders with.
#[derive(Debug, Clone, PartialEq)]
pub enum TemplateKind {
    /// The 16:9 grid template in [`main_config`]
    Main,
    Classic(ClassicTemplate),
}

#[derive(Debug, Clone, PartialEq)]
pub struct TemplateConfig {
    pub display_name: String,
    pub version: String,
    pub kind: TemplateKind,
}

impl TemplateConfig {
    pub fn main() -> Self {
        Self {
            display_name: main_config::TEMPLATE_NAME.to_string(),
            version: main_config::TEMPLATE_VERSION.to_string(),
            kind: TemplateKind::Main,
        }
    }

    pub fn classic() -> Self {
        Self {
            display_name: "Default".to_string(),
            version: "1.0".to_string(),
            kind: TemplateKind::Classic(ClassicTemplate::default()),
        }
    }
}

/// Registry of templates keyed by lowercase name.
#[derive(Debug, Clone)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, TemplateConfig>,
}

impl Default for TemplateRegistry {
    /// Registry with the built-in `main` and `default` templates.
    fn default() -> Self {
        let mut registry = Self {
            templates: BTreeMap::new(),
        };
        registry.register_template("main", TemplateConfig::main());
        registry.register_template("default", TemplateConfig::classic());
        registry
    }
}

impl TemplateRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register or replace a template. Names are case-insensitive.
    pub fn register_template(&mut self, name: &str, config: TemplateConfig) {
        self.templates.insert(name.to_lowercase(), config);
    }

    pub fn get_template(&self, name: &str) -> Option<&TemplateConfig> {
        self.templates.get(&name.to_lowercase())
    }

    pub fn list_templates(&self) -> Vec<String> {
        self.templates.keys().cloned().collect()
    }

    pub fn template_exists(&self, name: &str) -> bool {
        self.templates.contains_key(&name.to_lowercase())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_templates() {
        let registry = TemplateRegistry::new();
        assert_eq!(registry.list_templates(), vec!["default", "main"]);
        assert!(registry.template_exists("MAIN"));
        assert_eq!(
            registry.get_template("Main").map(|t| &t.kind),
            Some(&TemplateKind::Main)
        );
    }

    #[test]
    fn test_register_is_case_insensitive() {
        let mut registry = TemplateRegistry::new();
        let mut config = TemplateConfig::classic();
        config.display_name = "Board".to_string();
        registry.register_template("Board", config);

        assert!(registry.template_exists("board"));
        assert_eq!(registry.get_template("BOARD").unwrap().display_name, "Board");
        assert!(!registry.template_exists("missing"));
    }

    #[test]
    fn test_classic_defaults() {
        let classic = ClassicTemplate::default();
        assert_eq!(classic.primary.to_hex(), "2E5090");
        assert_eq!(classic.accent.to_hex(), "FFC000");
        assert_eq!(classic.font_sizes.cover_title, 54.0);
        assert_eq!(classic.margin_in, 0.5);
    }
}
