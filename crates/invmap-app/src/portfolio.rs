// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::seed;
use crate::{Cost, Horizon, IdAllocator, Initiative, InitiativeId, Theme, ThemeId};

/// The live, editable investment map: three horizons, each owning its themes.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Portfolio {
    horizons: [Vec<Theme>; 3],
    ids: IdAllocator,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioCommand {
    AddInitiative {
        theme: ThemeId,
    },
    DeleteInitiative {
        theme: ThemeId,
        initiative: InitiativeId,
    },
    SetName {
        theme: ThemeId,
        initiative: InitiativeId,
        name: String,
    },
    SetValue {
        theme: ThemeId,
        initiative: InitiativeId,
        value: String,
    },
    SetCost {
        theme: ThemeId,
        initiative: InitiativeId,
        raw: String,
    },
    SetBau {
        theme: ThemeId,
        initiative: InitiativeId,
        bau: bool,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitiativeField {
    Name,
    Value,
    Cost,
    Bau,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PortfolioEvent {
    InitiativeAdded {
        theme: ThemeId,
        initiative: InitiativeId,
    },
    InitiativeRemoved {
        theme: ThemeId,
        initiative: InitiativeId,
    },
    InitiativeEdited {
        theme: ThemeId,
        initiative: InitiativeId,
        field: InitiativeField,
    },
    TotalsChanged {
        horizon: Horizon,
        theme: ThemeId,
    },
}

impl Portfolio {
    pub fn from_seed() -> Self {
        let mut portfolio = Self::default();
        for horizon in Horizon::ALL {
            portfolio.horizons[horizon.index()] = seed::themes_for(horizon)
                .iter()
                .map(seed::SeedTheme::to_theme)
                .collect();
        }
        portfolio
    }

    pub fn with_themes(mut self, horizon: Horizon, themes: Vec<Theme>) -> Self {
        self.horizons[horizon.index()] = themes;
        self
    }

    pub fn themes(&self, horizon: Horizon) -> &[Theme] {
        &self.horizons[horizon.index()]
    }

    /// Every theme in fixed horizon order, themes in stored order.
    pub fn iter_themes(&self) -> impl Iterator<Item = (Horizon, &Theme)> {
        Horizon::ALL.into_iter().flat_map(move |horizon| {
            self.themes(horizon)
                .iter()
                .map(move |theme| (horizon, theme))
        })
    }

    pub fn theme(&self, id: &ThemeId) -> Option<&Theme> {
        self.iter_themes()
            .map(|(_, theme)| theme)
            .find(|theme| &theme.id == id)
    }

    pub fn horizon_of(&self, id: &ThemeId) -> Option<Horizon> {
        self.iter_themes()
            .find(|(_, theme)| &theme.id == id)
            .map(|(horizon, _)| horizon)
    }

    pub fn initiative(&self, theme: &ThemeId, initiative: &InitiativeId) -> Option<&Initiative> {
        self.theme(theme)?.initiative(initiative)
    }

    fn locate_mut(&mut self, id: &ThemeId) -> Option<(Horizon, &mut Theme)> {
        let horizon = self.horizon_of(id)?;
        self.horizons[horizon.index()]
            .iter_mut()
            .find(|theme| &theme.id == id)
            .map(|theme| (horizon, theme))
    }

    pub fn apply(&mut self, command: PortfolioCommand) -> Vec<PortfolioEvent> {
        match command {
            PortfolioCommand::AddInitiative { theme } => self.add_initiative(theme),
            PortfolioCommand::DeleteInitiative { theme, initiative } => {
                self.delete_initiative(theme, initiative)
            }
            PortfolioCommand::SetName {
                theme,
                initiative,
                name,
            } => self.edit(theme, initiative, InitiativeField::Name, |item| {
                item.name = name;
            }),
            PortfolioCommand::SetValue {
                theme,
                initiative,
                value,
            } => self.edit(theme, initiative, InitiativeField::Value, |item| {
                item.value = value;
            }),
            PortfolioCommand::SetCost {
                theme,
                initiative,
                raw,
            } => self.edit(theme, initiative, InitiativeField::Cost, |item| {
                item.cost = Cost::parse_lenient(&raw);
            }),
            PortfolioCommand::SetBau {
                theme,
                initiative,
                bau,
            } => self.edit(theme, initiative, InitiativeField::Bau, |item| {
                item.bau = bau;
            }),
        }
    }

    fn add_initiative(&mut self, theme_id: ThemeId) -> Vec<PortfolioEvent> {
        let mut ids = std::mem::take(&mut self.ids);
        let added = self.locate_mut(&theme_id).map(|(_, theme)| {
            let id = ids.next_initiative_id(|candidate| theme.initiative(candidate).is_some());
            theme.items.push(Initiative::blank(id.clone()));
            id
        });
        self.ids = ids;

        match added {
            Some(initiative) => vec![PortfolioEvent::InitiativeAdded {
                theme: theme_id,
                initiative,
            }],
            None => Vec::new(),
        }
    }

    fn delete_initiative(
        &mut self,
        theme_id: ThemeId,
        initiative: InitiativeId,
    ) -> Vec<PortfolioEvent> {
        let Some((horizon, theme)) = self.locate_mut(&theme_id) else {
            return Vec::new();
        };
        let Some(index) = theme.items.iter().position(|item| item.id == initiative) else {
            return Vec::new();
        };
        theme.items.remove(index);
        vec![
            PortfolioEvent::InitiativeRemoved {
                theme: theme_id.clone(),
                initiative,
            },
            PortfolioEvent::TotalsChanged {
                horizon,
                theme: theme_id,
            },
        ]
    }

    fn edit(
        &mut self,
        theme_id: ThemeId,
        initiative: InitiativeId,
        field: InitiativeField,
        update: impl FnOnce(&mut Initiative),
    ) -> Vec<PortfolioEvent> {
        let Some((horizon, theme)) = self.locate_mut(&theme_id) else {
            return Vec::new();
        };
        let Some(item) = theme.initiative_mut(&initiative) else {
            return Vec::new();
        };
        update(item);

        let mut events = vec![PortfolioEvent::InitiativeEdited {
            theme: theme_id.clone(),
            initiative,
            field,
        }];
        if matches!(field, InitiativeField::Cost | InitiativeField::Bau) {
            events.push(PortfolioEvent::TotalsChanged {
                horizon,
                theme: theme_id,
            });
        }
        events
    }
}
