// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::iter::Sum;
use std::ops::Add;

use crate::ids::*;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Horizon {
    Stabilize,
    Enhance,
    Transform,
}

impl Horizon {
    pub const ALL: [Self; 3] = [Self::Stabilize, Self::Enhance, Self::Transform];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Stabilize => "Stabilize",
            Self::Enhance => "Enhance",
            Self::Transform => "Transform",
        }
    }

    pub const fn index(self) -> usize {
        match self {
            Self::Stabilize => 0,
            Self::Enhance => 1,
            Self::Transform => 2,
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "stabilize" => Some(Self::Stabilize),
            "enhance" => Some(Self::Enhance),
            "transform" => Some(Self::Transform),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Tab {
    Overview,
    Horizon(Horizon),
}

impl Tab {
    pub const ALL: [Self; 4] = [
        Self::Overview,
        Self::Horizon(Horizon::Stabilize),
        Self::Horizon(Horizon::Enhance),
        Self::Horizon(Horizon::Transform),
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Overview => "Overview",
            Self::Horizon(horizon) => horizon.label(),
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        if value.trim().eq_ignore_ascii_case("overview") {
            return Some(Self::Overview);
        }
        Horizon::parse(value).map(Self::Horizon)
    }

    pub const fn horizon(self) -> Option<Horizon> {
        match self {
            Self::Overview => None,
            Self::Horizon(horizon) => Some(horizon),
        }
    }
}

/// Non-negative amount in the display unit, kept at the precision it was entered with.
/// Rounding happens only when a total is formatted.
#[derive(Debug, Clone, Copy, Default, PartialEq, PartialOrd)]
pub struct Cost(f64);

impl Cost {
    pub const ZERO: Self = Self(0.0);

    pub fn from_hundredths(hundredths: i64) -> Self {
        Self::from_units(hundredths as f64 / 100.0)
    }

    pub fn from_units(value: f64) -> Self {
        if !value.is_finite() || value <= 0.0 {
            return Self::ZERO;
        }
        Self(value)
    }

    pub const fn as_units(self) -> f64 {
        self.0
    }

    /// Coerces free-form input the way a numeric text field does: the longest leading
    /// decimal number wins and anything unusable becomes zero.
    pub fn parse_lenient(raw: &str) -> Self {
        let trimmed = raw.trim_start();
        let end = numeric_prefix_len(trimmed);
        match trimmed[..end].parse::<f64>() {
            Ok(value) => Self::from_units(value),
            Err(_) => Self::ZERO,
        }
    }

    /// One decimal place from the exact binary value; exact ties round up.
    pub fn one_decimal(self) -> String {
        let quarters = self.0 * 4.0;
        if quarters.fract() == 0.0 && quarters % 2.0 == 1.0 {
            let tenths = (self.0 * 10.0).ceil() as u64;
            return format!("{}.{}", tenths / 10, tenths % 10);
        }
        format!("{:.1}", self.0)
    }
}

fn numeric_prefix_len(input: &str) -> usize {
    let bytes = input.as_bytes();
    let mut index = 0;
    if matches!(bytes.first(), Some(b'+' | b'-')) {
        index += 1;
    }

    let int_start = index;
    while bytes.get(index).is_some_and(u8::is_ascii_digit) {
        index += 1;
    }
    let mut digits = index - int_start;

    if bytes.get(index) == Some(&b'.') {
        let frac_start = index + 1;
        let mut frac_end = frac_start;
        while bytes.get(frac_end).is_some_and(u8::is_ascii_digit) {
            frac_end += 1;
        }
        digits += frac_end - frac_start;
        if digits > 0 {
            index = frac_end;
        }
    }

    if digits == 0 {
        return 0;
    }

    if matches!(bytes.get(index), Some(b'e' | b'E')) {
        let mut exp_end = index + 1;
        if matches!(bytes.get(exp_end), Some(b'+' | b'-')) {
            exp_end += 1;
        }
        let exp_digits_start = exp_end;
        while bytes.get(exp_end).is_some_and(u8::is_ascii_digit) {
            exp_end += 1;
        }
        if exp_end > exp_digits_start {
            index = exp_end;
        }
    }

    index
}

impl Add for Cost {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        let sum = self.0 + rhs.0;
        Self(if sum.is_finite() { sum } else { f64::MAX })
    }
}

impl Sum for Cost {
    fn sum<I: Iterator<Item = Self>>(iter: I) -> Self {
        iter.fold(Self::ZERO, Add::add)
    }
}

impl fmt::Display for Cost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for Cost {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.0)
    }
}

impl<'de> Deserialize<'de> for Cost {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        f64::deserialize(deserializer).map(Self::from_units)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Initiative {
    pub id: InitiativeId,
    pub name: String,
    pub value: String,
    pub cost: Cost,
    pub bau: bool,
}

impl Initiative {
    pub fn blank(id: InitiativeId) -> Self {
        Self {
            id,
            name: String::new(),
            value: String::new(),
            cost: Cost::ZERO,
            bau: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Theme {
    pub id: ThemeId,
    pub name: String,
    pub value: String,
    pub items: Vec<Initiative>,
}

impl Theme {
    pub fn initiative(&self, id: &InitiativeId) -> Option<&Initiative> {
        self.items.iter().find(|item| &item.id == id)
    }

    pub fn initiative_mut(&mut self, id: &InitiativeId) -> Option<&mut Initiative> {
        self.items.iter_mut().find(|item| &item.id == id)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EditField {
    Name,
    Value,
    Cost,
}

impl EditField {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Name => "initiative",
            Self::Value => "value",
            Self::Cost => "cost",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AppMode {
    Nav,
    Edit(EditField),
}

#[cfg(test)]
mod tests {
    use super::{Cost, Horizon, Tab};

    #[test]
    fn tab_parse_accepts_any_case() {
        assert_eq!(Tab::parse("overview"), Some(Tab::Overview));
        assert_eq!(Tab::parse(" ENHANCE "), Some(Tab::Horizon(Horizon::Enhance)));
        assert_eq!(Tab::parse("roadmap"), None);
    }

    #[test]
    fn lenient_cost_parse_coerces_garbage_to_zero() {
        assert_eq!(Cost::parse_lenient("abc"), Cost::ZERO);
        assert_eq!(Cost::parse_lenient(""), Cost::ZERO);
        assert_eq!(Cost::parse_lenient("."), Cost::ZERO);
        assert_eq!(Cost::parse_lenient("-2"), Cost::ZERO);
        assert_eq!(Cost::parse_lenient("inf"), Cost::ZERO);
        assert_eq!(Cost::parse_lenient("1e400"), Cost::ZERO);
    }

    #[test]
    fn lenient_cost_parse_uses_leading_number() {
        assert_eq!(Cost::parse_lenient("4abc"), Cost::from_hundredths(400));
        assert_eq!(Cost::parse_lenient("  2.25"), Cost::from_hundredths(225));
        assert_eq!(Cost::parse_lenient(".5"), Cost::from_hundredths(50));
        assert_eq!(Cost::parse_lenient("5."), Cost::from_hundredths(500));
        assert_eq!(Cost::parse_lenient("1e1x"), Cost::from_hundredths(1000));
        assert_eq!(Cost::parse_lenient("3e"), Cost::from_hundredths(300));
    }

    #[test]
    fn lenient_cost_parse_keeps_full_precision() {
        let cost = Cost::parse_lenient("0.149");
        assert_eq!(cost.as_units(), 0.149);
        assert_eq!(cost.one_decimal(), "0.1");
        assert_eq!(cost.to_string(), "0.149");
        assert_eq!(Cost::parse_lenient("0.004").as_units(), 0.004);

        let large = Cost::parse_lenient("100000000000000");
        assert_eq!(large.as_units(), 1e14);
        assert_eq!(large.one_decimal(), "100000000000000.0");
    }

    #[test]
    fn one_decimal_rounds_the_exact_value() {
        assert_eq!(Cost::from_hundredths(630).one_decimal(), "6.3");
        assert_eq!(Cost::from_units(0.25).one_decimal(), "0.3");
        assert_eq!(Cost::from_units(0.75).one_decimal(), "0.8");
        assert_eq!(Cost::from_units(0.05).one_decimal(), "0.1");
        assert_eq!(Cost::from_units(2.55).one_decimal(), "2.5");
        assert_eq!(Cost::ZERO.one_decimal(), "0.0");
    }

    #[test]
    fn display_trims_trailing_zero_fraction() {
        assert_eq!(Cost::from_hundredths(600).to_string(), "6");
        assert_eq!(Cost::from_hundredths(630).to_string(), "6.3");
        assert_eq!(Cost::from_hundredths(605).to_string(), "6.05");
        assert_eq!(Cost::ZERO.to_string(), "0");
    }

    #[test]
    fn sums_saturate_instead_of_overflowing() {
        let huge = Cost::from_units(f64::MAX);
        assert_eq!((huge + huge).as_units(), f64::MAX);
    }
}
