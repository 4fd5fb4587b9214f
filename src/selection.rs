//! Selection store: everything the user has entered so far

use crate::catalog::{BodyArea, Symptom};
use crate::error::InvalidArgument;
use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// One of the fixed personal-information fields
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum PersonalField {
    Age,
    Height,
    Weight,
    LastPeriod,
}

impl PersonalField {
    pub const ALL: [PersonalField; 4] = [
        PersonalField::Age,
        PersonalField::Height,
        PersonalField::Weight,
        PersonalField::LastPeriod,
    ];

    /// Wire name used by the presentation layer
    pub fn key(self) -> &'static str {
        match self {
            PersonalField::Age => "age",
            PersonalField::Height => "height",
            PersonalField::Weight => "weight",
            PersonalField::LastPeriod => "lastPeriod",
        }
    }

    /// Label used in the composed message
    pub fn label(self) -> &'static str {
        match self {
            PersonalField::Age => "Age",
            PersonalField::Height => "Height",
            PersonalField::Weight => "Weight",
            PersonalField::LastPeriod => "Last period date",
        }
    }
}

impl fmt::Display for PersonalField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for PersonalField {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "age" => Ok(PersonalField::Age),
            "height" => Ok(PersonalField::Height),
            "weight" => Ok(PersonalField::Weight),
            "lastPeriod" | "last_period" => Ok(PersonalField::LastPeriod),
            other => Err(InvalidArgument::UnknownField(other.to_string())),
        }
    }
}

/// Free-form personal details. Values are stored verbatim, empty when unset.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonalInfo {
    pub age: String,
    pub height: String,
    pub weight: String,
    pub last_period: String,
}

impl PersonalInfo {
    pub fn get(&self, field: PersonalField) -> &str {
        match field {
            PersonalField::Age => &self.age,
            PersonalField::Height => &self.height,
            PersonalField::Weight => &self.weight,
            PersonalField::LastPeriod => &self.last_period,
        }
    }

    pub fn set(&mut self, field: PersonalField, value: impl Into<String>) {
        let slot = match field {
            PersonalField::Age => &mut self.age,
            PersonalField::Height => &mut self.height,
            PersonalField::Weight => &mut self.weight,
            PersonalField::LastPeriod => &mut self.last_period,
        };
        *slot = value.into();
    }

    /// Field values in message order, `None` where empty
    pub fn entries(&self) -> impl Iterator<Item = (PersonalField, Option<&str>)> + '_ {
        PersonalField::ALL.into_iter().map(|field| {
            let value = self.get(field);
            (field, (!value.is_empty()).then_some(value))
        })
    }
}

/// Accumulated wizard selections.
///
/// Invariant: every selected symptom belongs to a selected area.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Selections {
    areas: BTreeSet<BodyArea>,
    symptoms: BTreeSet<Symptom>,
    personal: PersonalInfo,
    additional_info: String,
}

impl Selections {
    pub fn new() -> Self {
        Self::default()
    }

    /// Toggle an area. Deselecting drops every symptom under it.
    /// Returns whether the area is selected afterwards.
    pub fn toggle_area(&mut self, area: BodyArea) -> bool {
        if self.areas.remove(&area) {
            self.symptoms.retain(|symptom| symptom.area() != area);
            false
        } else {
            self.areas.insert(area);
            true
        }
    }

    /// Toggle a symptom whose area is currently selected.
    /// Returns whether the symptom is selected afterwards.
    pub fn toggle_symptom(&mut self, symptom: Symptom) -> Result<bool, InvalidArgument> {
        if !self.areas.contains(&symptom.area()) {
            return Err(InvalidArgument::AreaNotSelected(symptom.area()));
        }
        if self.symptoms.remove(&symptom) {
            Ok(false)
        } else {
            self.symptoms.insert(symptom);
            Ok(true)
        }
    }

    pub fn set_personal_info(&mut self, field: PersonalField, value: impl Into<String>) {
        self.personal.set(field, value);
    }

    pub fn set_additional_info(&mut self, text: impl Into<String>) {
        self.additional_info = text.into();
    }

    pub fn clear(&mut self) {
        *self = Self::default();
    }

    pub fn is_area_selected(&self, area: BodyArea) -> bool {
        self.areas.contains(&area)
    }

    pub fn is_symptom_selected(&self, symptom: &Symptom) -> bool {
        self.symptoms.contains(symptom)
    }

    /// Selected areas in catalog order
    pub fn areas(&self) -> impl Iterator<Item = BodyArea> + '_ {
        self.areas.iter().copied()
    }

    /// Selected symptoms in catalog order
    pub fn symptoms(&self) -> impl Iterator<Item = Symptom> + '_ {
        self.symptoms.iter().copied()
    }

    pub fn area_count(&self) -> usize {
        self.areas.len()
    }

    pub fn symptom_count(&self) -> usize {
        self.symptoms.len()
    }

    pub fn personal(&self) -> &PersonalInfo {
        &self.personal
    }

    pub fn additional_info(&self) -> &str {
        &self.additional_info
    }
}
