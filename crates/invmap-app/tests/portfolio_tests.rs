// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use invmap_app::{
    AmountFormat, Cost, Horizon, Portfolio, PortfolioCommand, PortfolioEvent, horizon_total,
    theme_total,
};
use invmap_testkit::{
    COMPLIANCE_ITEM, COMPLIANCE_THEME, initiative_id, small_portfolio, theme_id,
};

fn compliance_total(portfolio: &Portfolio) -> Result<Cost> {
    let theme = portfolio
        .theme(&theme_id(COMPLIANCE_THEME))
        .context("compliance theme is seeded")?;
    Ok(theme_total(theme))
}

#[test]
fn compliance_scenario_tracks_totals_through_edits() -> Result<()> {
    let mut portfolio = Portfolio::from_seed();
    let theme = theme_id(COMPLIANCE_THEME);
    assert_eq!(compliance_total(&portfolio)?, Cost::from_hundredths(630));

    let events = portfolio.apply(PortfolioCommand::AddInitiative {
        theme: theme.clone(),
    });
    let Some(PortfolioEvent::InitiativeAdded { initiative, .. }) = events.first().cloned() else {
        anyhow::bail!("expected InitiativeAdded, got {events:?}");
    };
    assert_eq!(compliance_total(&portfolio)?, Cost::from_hundredths(630));

    portfolio.apply(PortfolioCommand::SetCost {
        theme: theme.clone(),
        initiative: initiative.clone(),
        raw: "4.0".to_owned(),
    });
    assert_eq!(compliance_total(&portfolio)?, Cost::from_hundredths(1030));

    portfolio.apply(PortfolioCommand::SetBau {
        theme: theme.clone(),
        initiative,
        bau: true,
    });
    assert_eq!(compliance_total(&portfolio)?, Cost::from_hundredths(630));

    portfolio.apply(PortfolioCommand::DeleteInitiative {
        theme,
        initiative: initiative_id(COMPLIANCE_ITEM),
    });
    assert_eq!(compliance_total(&portfolio)?, Cost::ZERO);
    Ok(())
}

#[test]
fn theme_total_ignores_bau_rows_regardless_of_cost() -> Result<()> {
    let mut portfolio = small_portfolio();
    let alpha = theme_id("alpha");
    let total = |portfolio: &Portfolio| -> Result<Cost> {
        Ok(theme_total(portfolio.theme(&alpha).context("alpha")?))
    };
    assert_eq!(total(&portfolio)?, Cost::from_hundredths(350));

    portfolio.apply(PortfolioCommand::SetCost {
        theme: alpha.clone(),
        initiative: initiative_id("a-3"),
        raw: "5000".to_owned(),
    });
    assert_eq!(total(&portfolio)?, Cost::from_hundredths(350));
    Ok(())
}

#[test]
fn horizon_total_is_sum_of_theme_totals() {
    let portfolio = small_portfolio();
    for horizon in Horizon::ALL {
        let expected: Cost = portfolio.themes(horizon).iter().map(theme_total).sum();
        assert_eq!(horizon_total(&portfolio, horizon), expected);
    }
    assert_eq!(
        horizon_total(&portfolio, Horizon::Stabilize),
        Cost::from_hundredths(350)
    );
    assert_eq!(horizon_total(&portfolio, Horizon::Transform), Cost::ZERO);
}

#[test]
fn add_then_delete_restores_item_count() -> Result<()> {
    let mut portfolio = small_portfolio();
    let beta = theme_id("beta");

    let events = portfolio.apply(PortfolioCommand::AddInitiative {
        theme: beta.clone(),
    });
    assert_eq!(portfolio.theme(&beta).context("beta")?.items.len(), 1);

    let Some(PortfolioEvent::InitiativeAdded { initiative, .. }) = events.first().cloned() else {
        anyhow::bail!("expected InitiativeAdded, got {events:?}");
    };
    let removed = portfolio.apply(PortfolioCommand::DeleteInitiative {
        theme: beta.clone(),
        initiative,
    });
    assert!(removed.contains(&PortfolioEvent::TotalsChanged {
        horizon: Horizon::Stabilize,
        theme: beta.clone(),
    }));
    assert!(portfolio.theme(&beta).context("beta")?.items.is_empty());
    Ok(())
}

#[test]
fn iter_themes_follows_fixed_horizon_order() {
    let portfolio = Portfolio::from_seed();
    let horizons: Vec<Horizon> = portfolio.iter_themes().map(|(horizon, _)| horizon).collect();
    assert_eq!(horizons.len(), 12);
    assert!(horizons.windows(2).all(|pair| pair[0] <= pair[1]));
    assert_eq!(
        portfolio.iter_themes().next().map(|(_, theme)| theme.id.as_str()),
        Some("stabilize-dpf")
    );
}

#[test]
fn fine_grained_costs_round_only_when_formatted() -> Result<()> {
    let mut portfolio = Portfolio::from_seed();
    let theme = theme_id(COMPLIANCE_THEME);
    let format = AmountFormat::default();

    portfolio.apply(PortfolioCommand::SetCost {
        theme: theme.clone(),
        initiative: initiative_id(COMPLIANCE_ITEM),
        raw: "0.149".to_owned(),
    });
    assert_eq!(format.format(compliance_total(&portfolio)?), "R0.1m");
    assert_eq!(
        format.format(horizon_total(&portfolio, Horizon::Stabilize)),
        "R16.6m"
    );

    let events = portfolio.apply(PortfolioCommand::AddInitiative {
        theme: theme.clone(),
    });
    let Some(PortfolioEvent::InitiativeAdded { initiative, .. }) = events.first().cloned() else {
        anyhow::bail!("expected InitiativeAdded, got {events:?}");
    };
    portfolio.apply(PortfolioCommand::SetCost {
        theme: theme.clone(),
        initiative,
        raw: "0.149".to_owned(),
    });
    assert_eq!(format.format(compliance_total(&portfolio)?), "R0.3m");
    Ok(())
}

#[test]
fn large_costs_are_kept() -> Result<()> {
    let mut portfolio = Portfolio::from_seed();
    portfolio.apply(PortfolioCommand::SetCost {
        theme: theme_id(COMPLIANCE_THEME),
        initiative: initiative_id(COMPLIANCE_ITEM),
        raw: "100000000000000".to_owned(),
    });
    assert_eq!(compliance_total(&portfolio)?, Cost::from_units(1e14));
    assert_eq!(
        AmountFormat::default().format(compliance_total(&portfolio)?),
        "R100000000000000.0m"
    );
    Ok(())
}
