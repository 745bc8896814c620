// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::{Cost, Horizon, Portfolio, Theme, ThemeId};

pub const DEFAULT_PREFIX: &str = "R";
pub const DEFAULT_SUFFIX: &str = "m";

/// Sum of non-BAU initiative costs.
pub fn theme_total(theme: &Theme) -> Cost {
    theme
        .items
        .iter()
        .filter(|item| !item.bau)
        .map(|item| item.cost)
        .sum()
}

pub fn horizon_total(portfolio: &Portfolio, horizon: Horizon) -> Cost {
    portfolio.themes(horizon).iter().map(theme_total).sum()
}

pub fn horizon_total_by_name(portfolio: &Portfolio, name: &str) -> Cost {
    Horizon::parse(name)
        .map(|horizon| horizon_total(portfolio, horizon))
        .unwrap_or(Cost::ZERO)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AmountFormat {
    pub prefix: String,
    pub suffix: String,
}

impl Default for AmountFormat {
    fn default() -> Self {
        Self {
            prefix: DEFAULT_PREFIX.to_owned(),
            suffix: DEFAULT_SUFFIX.to_owned(),
        }
    }
}

impl AmountFormat {
    pub fn new(prefix: impl Into<String>, suffix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            suffix: suffix.into(),
        }
    }

    pub fn format(&self, cost: Cost) -> String {
        format!("{}{}{}", self.prefix, cost.one_decimal(), self.suffix)
    }

    /// Unit label for column headers, e.g. `Rm`.
    pub fn unit(&self) -> String {
        format!("{}{}", self.prefix, self.suffix)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ThemeSummary {
    pub id: ThemeId,
    pub name: String,
    pub items: usize,
    pub bau_items: usize,
    pub total: Cost,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HorizonSummary {
    pub horizon: Horizon,
    pub total: Cost,
    pub themes: Vec<ThemeSummary>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PortfolioSummary {
    pub horizons: Vec<HorizonSummary>,
}

pub fn summarize(portfolio: &Portfolio) -> PortfolioSummary {
    let horizons = Horizon::ALL
        .into_iter()
        .map(|horizon| HorizonSummary {
            horizon,
            total: horizon_total(portfolio, horizon),
            themes: portfolio
                .themes(horizon)
                .iter()
                .map(|theme| ThemeSummary {
                    id: theme.id.clone(),
                    name: theme.name.clone(),
                    items: theme.items.len(),
                    bau_items: theme.items.iter().filter(|item| item.bau).count(),
                    total: theme_total(theme),
                })
                .collect(),
        })
        .collect();
    PortfolioSummary { horizons }
}

impl PortfolioSummary {
    pub fn render_text(&self, format: &AmountFormat) -> String {
        let mut lines = Vec::new();
        for horizon in &self.horizons {
            lines.push(format!(
                "{}: {}",
                horizon.horizon.label(),
                format.format(horizon.total)
            ));
            for theme in &horizon.themes {
                lines.push(format!(
                    "  {} ({} items): {}",
                    theme.name,
                    theme.items,
                    format.format(theme.total)
                ));
            }
        }
        let mut text = lines.join("\n");
        text.push('\n');
        text
    }
}
