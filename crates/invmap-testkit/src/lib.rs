// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use invmap_app::{Cost, Horizon, Initiative, InitiativeId, Portfolio, Theme, ThemeId};

pub const COMPLIANCE_THEME: &str = "stabilize-cr";
pub const COMPLIANCE_ITEM: &str = "cr-1";

pub fn initiative(id: &str, name: &str, cost_hundredths: i64, bau: bool) -> Initiative {
    Initiative {
        id: InitiativeId::from(id),
        name: name.to_owned(),
        value: format!("{name} value"),
        cost: Cost::from_hundredths(cost_hundredths),
        bau,
    }
}

pub fn theme(id: &str, name: &str, items: Vec<Initiative>) -> Theme {
    Theme {
        id: ThemeId::from(id),
        name: name.to_owned(),
        value: format!("{name} description"),
        items,
    }
}

/// A small portfolio with hand-picked costs for exercising rollups.
///
/// Stabilize: `alpha` (1.5 + 2.0, plus a 9.9 BAU row) and `beta` (empty).
/// Enhance: `gamma` (0.25). Transform: nothing.
pub fn small_portfolio() -> Portfolio {
    Portfolio::default()
        .with_themes(
            Horizon::Stabilize,
            vec![
                theme(
                    "alpha",
                    "Alpha",
                    vec![
                        initiative("a-1", "Alpha one", 150, false),
                        initiative("a-2", "Alpha two", 200, false),
                        initiative("a-3", "Alpha run", 990, true),
                    ],
                ),
                theme("beta", "Beta", Vec::new()),
            ],
        )
        .with_themes(
            Horizon::Enhance,
            vec![theme(
                "gamma",
                "Gamma",
                vec![initiative("g-1", "Gamma one", 25, false)],
            )],
        )
}

pub fn theme_id(id: &str) -> ThemeId {
    ThemeId::from(id)
}

pub fn initiative_id(id: &str) -> InitiativeId {
    InitiativeId::from(id)
}
