use crate::utils::error::{RenderError, Result};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Parts of the rendered table that accept a CSS override.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StyleRegion {
    Table,
    Cells,
    HeadCells,
    Head,
    Body,
    EmptyCells,
    Rows,
}

impl StyleRegion {
    pub const ALL: [StyleRegion; 7] = [
        StyleRegion::Table,
        StyleRegion::Cells,
        StyleRegion::HeadCells,
        StyleRegion::Head,
        StyleRegion::Body,
        StyleRegion::EmptyCells,
        StyleRegion::Rows,
    ];

    /// Configuration key, as used under `[style]`.
    pub fn name(&self) -> &'static str {
        match self {
            StyleRegion::Table => "table",
            StyleRegion::Cells => "cells",
            StyleRegion::HeadCells => "head_cells",
            StyleRegion::Head => "head",
            StyleRegion::Body => "body",
            StyleRegion::EmptyCells => "empty_cells",
            StyleRegion::Rows => "rows",
        }
    }

    pub fn selector(&self) -> &'static str {
        match self {
            StyleRegion::Table => "table",
            StyleRegion::Cells => "td, th",
            StyleRegion::HeadCells => "th",
            StyleRegion::Head => "thead",
            StyleRegion::Body => "tbody",
            StyleRegion::EmptyCells => "td:empty",
            StyleRegion::Rows => "tr",
        }
    }

    fn default_css(&self) -> &'static str {
        match self {
            StyleRegion::Table => {
                "border: 2px solid black;\n\
                 border-collapse: collapse;\n\
                 empty-cells: show;\n\
                 font-family: 'Trebuchet MS', 'Lucida Sans Unicode', 'Lucida Grande', 'Lucida Sans', Arial, sans-serif;"
            }
            StyleRegion::Cells => {
                "max-width: 160px;\n\
                 border: 1px solid black;\n\
                 text-align: center;\n\
                 padding: 5px;"
            }
            StyleRegion::HeadCells => "font-weight: bold;",
            StyleRegion::Head => "border-bottom-style: double;",
            StyleRegion::Body => "display: flex;",
            StyleRegion::EmptyCells => {
                "border: none;\n\
                 border-right: 1px solid black;\n\
                 background-color: lightgrey;"
            }
            StyleRegion::Rows => "flex: 1;",
        }
    }
}

/// CSS declarations per region. Payloads are opaque; they are only checked
/// for being a declaration list that cannot escape its rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StyleSheet {
    rules: BTreeMap<StyleRegion, String>,
}

impl Default for StyleSheet {
    fn default() -> Self {
        let rules = StyleRegion::ALL
            .iter()
            .map(|region| (*region, region.default_css().to_string()))
            .collect();
        Self { rules }
    }
}

impl StyleSheet {
    /// Defaults with `overrides` applied on top.
    pub fn with_overrides(overrides: &BTreeMap<StyleRegion, String>) -> Result<Self> {
        let mut sheet = Self::default();
        for (region, css) in overrides {
            sheet.set(*region, css.clone())?;
        }
        Ok(sheet)
    }

    pub fn set(&mut self, region: StyleRegion, css: String) -> Result<()> {
        validate_css(region, &css)?;
        self.rules.insert(region, css);
        Ok(())
    }

    pub fn get(&self, region: StyleRegion) -> Option<&str> {
        self.rules.get(&region).map(String::as_str)
    }

    pub fn to_css(&self) -> String {
        let mut css = String::new();
        for (region, declarations) in &self.rules {
            css.push_str(region.selector());
            css.push('{');
            css.push_str(declarations);
            css.push_str("}\n");
        }
        css
    }
}

fn validate_css(region: StyleRegion, css: &str) -> Result<()> {
    let field = format!("style.{}", region.name());
    if css.trim().is_empty() {
        return Err(RenderError::InvalidConfigValueError {
            field,
            value: css.to_string(),
            reason: "Style cannot be empty".to_string(),
        });
    }
    if css.contains(['{', '}', '<']) {
        return Err(RenderError::InvalidConfigValueError {
            field,
            value: css.to_string(),
            reason: "Style must be a list of declarations without braces or markup".to_string(),
        });
    }
    Ok(())
}
