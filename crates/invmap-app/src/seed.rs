// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

//! The default investment map. Live state is copied out of these tables at
//! startup, so edits never touch them.

use crate::{Cost, Horizon, Initiative, InitiativeId, Theme, ThemeId};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedInitiative {
    pub id: &'static str,
    pub name: &'static str,
    pub value: &'static str,
    pub cost_hundredths: i64,
    pub bau: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedTheme {
    pub id: &'static str,
    pub name: &'static str,
    pub value: &'static str,
    pub items: &'static [SeedInitiative],
}

impl SeedInitiative {
    pub fn to_initiative(&self) -> Initiative {
        Initiative {
            id: InitiativeId::from(self.id),
            name: self.name.to_owned(),
            value: self.value.to_owned(),
            cost: Cost::from_hundredths(self.cost_hundredths),
            bau: self.bau,
        }
    }
}

impl SeedTheme {
    pub fn to_theme(&self) -> Theme {
        Theme {
            id: ThemeId::from(self.id),
            name: self.name.to_owned(),
            value: self.value.to_owned(),
            items: self.items.iter().map(SeedInitiative::to_initiative).collect(),
        }
    }
}

pub fn themes_for(horizon: Horizon) -> &'static [SeedTheme] {
    match horizon {
        Horizon::Stabilize => &STABILIZE,
        Horizon::Enhance => &ENHANCE,
        Horizon::Transform => &TRANSFORM,
    }
}

static STABILIZE: [SeedTheme; 4] = [
    SeedTheme {
        id: "stabilize-dpf",
        name: "Data & Platform Foundation",
        value: "Trusted, governed data & stable integrations. Fewer incidents, faster change, analytics‑ready datasets.",
        items: &[SeedInitiative {
            id: "dpf-1",
            name: "Snowflake & Matillion & Cloud & Datalab Support",
            value: "Foundational data and pipelines",
            cost_hundredths: 600,
            bau: false,
        }],
    },
    SeedTheme {
        id: "stabilize-cr",
        name: "Compliance & Reporting Readiness (Reg Ops)",
        value: "Zero‑surprise compliance. Monthly SARS & PAYE at scale, lower remediation effort, audit‑ready lineage.",
        items: &[SeedInitiative {
            id: "cr-1",
            name: "SARS, PAYE & AML/FATCA uplift",
            value: "Monthly reporting and compliance enhancements",
            cost_hundredths: 630,
            bau: false,
        }],
    },
    SeedTheme {
        id: "stabilize-decom",
        name: "Decommission & Simplify Estate",
        value: "Cut cost & complexity. Retire legacy (Xplan/FO), standardise on IG/RPP, fewer systems to support.",
        items: &[SeedInitiative {
            id: "decom-1",
            name: "Legacy retirement and consolidation",
            value: "Remove dependencies on Xplan & Front Office",
            cost_hundredths: 800,
            bau: false,
        }],
    },
    SeedTheme {
        id: "stabilize-omq",
        name: "Operating Model & Quality",
        value: "Predictable delivery & run. Single UAT, clear ownership, DSP→BAU, faster & safer releases.",
        items: &[SeedInitiative {
            id: "omq-1",
            name: "UAT consolidation & DSP exit",
            value: "Consolidate testing & enable BAU handover",
            cost_hundredths: 250,
            bau: false,
        }],
    },
];

static ENHANCE: [SeedTheme; 4] = [
    SeedTheme {
        id: "enhance-channel",
        name: "Channel Enablement (IG)",
        value: "Consistent, low‑friction comms. Governed templates, WA channel, adviser links; lower handling time & errors.",
        items: &[SeedInitiative {
            id: "channel-1",
            name: "Integrated channels & templates",
            value: "Standardised comms via IG & WA",
            cost_hundredths: 260,
            bau: false,
        }],
    },
    SeedTheme {
        id: "enhance-journey",
        name: "Journey Simplification & Data Quality",
        value: "Cleaner data, fewer handoffs. IG↔MOM flows, in‑app auth, consent alignment, enhanced leads.",
        items: &[SeedInitiative {
            id: "journey-1",
            name: "Simplify flows & auth",
            value: "Align IG and MOM processes",
            cost_hundredths: 1500,
            bau: false,
        }],
    },
    SeedTheme {
        id: "enhance-practice",
        name: "Practice & CRM Uplift",
        value: "Smoother practice ops & insight. PM features, portfolio/plan in MOM, reporting hub; less swivel‑chair.",
        items: &[SeedInitiative {
            id: "practice-1",
            name: "Practice management & reporting",
            value: "Enhance PM and CRM capabilities",
            cost_hundredths: 800,
            bau: false,
        }],
    },
    SeedTheme {
        id: "enhance-training",
        name: "Training & Self‑Help",
        value: "Deflect tickets & speed adoption. Standardised in‑app help, Digihelp & Service‑Guru support.",
        items: &[SeedInitiative {
            id: "training-1",
            name: "Self‑help tooling & content",
            value: "Digihelp, Service Guru & Whatfix (BAU)",
            cost_hundredths: 0,
            bau: true,
        }],
    },
];

static TRANSFORM: [SeedTheme; 4] = [
    SeedTheme {
        id: "transform-insight",
        name: "Insight‑Led Decisioning",
        value: "Decisions at the speed of question. NLP search, AI insights to frontline; self‑serve adoption.",
        items: &[SeedInitiative {
            id: "insight-1",
            name: "ThoughtSpot & AI Insights",
            value: "Deploy ThoughtSpot & AI‑augmented analytics",
            cost_hundredths: 210,
            bau: false,
        }],
    },
    SeedTheme {
        id: "transform-privacy",
        name: "Privacy‑Safe Data Collaboration",
        value: "Richer targeting without risk. Compliant sharing, audience enrichment, model‑ready data.",
        items: &[SeedInitiative {
            id: "privacy-1",
            name: "Omnisient Platform",
            value: "Implement secure data collaboration",
            cost_hundredths: 150,
            bau: false,
        }],
    },
    SeedTheme {
        id: "transform-reviews",
        name: "Always‑On Digital Reviews",
        value: "Persistent advice loop. WA‑scheduled reviews, next‑best action, higher completion.",
        items: &[SeedInitiative {
            id: "reviews-1",
            name: "WA‑based annual reviews",
            value: "Implement digital review journeys",
            cost_hundredths: 250,
            bau: false,
        }],
    },
    SeedTheme {
        id: "transform-shifts",
        name: "Strategic Platform Shifts",
        value: "Simpler strategic stack. IG‑centred FNA replacing legacy; integrated journeys; big‑ticket savings.",
        items: &[SeedInitiative {
            id: "shifts-1",
            name: "Platform consolidation & FNA shift",
            value: "IG‑centred FNA & integrated journeys",
            cost_hundredths: 2000,
            bau: false,
        }],
    },
];
