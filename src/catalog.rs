//! Static symptom catalog
//!
//! Body areas and the symptom labels offered for each, in display order.
//! Ordering of every selection set in the crate derives from this module.

use crate::error::InvalidArgument;
use serde::ser::{Serialize, SerializeStruct, Serializer};
use serde::Deserialize;
use std::fmt;
use std::str::FromStr;

/// A selectable body area. Declaration order is catalog order.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, serde::Serialize, Deserialize,
)]
pub enum BodyArea {
    Vaginal,
    Pelvic,
    Uterine,
    Breast,
    Urinary,
    General,
}

impl BodyArea {
    /// Every area, in catalog order
    pub const ALL: [BodyArea; 6] = [
        BodyArea::Vaginal,
        BodyArea::Pelvic,
        BodyArea::Uterine,
        BodyArea::Breast,
        BodyArea::Urinary,
        BodyArea::General,
    ];

    pub fn name(self) -> &'static str {
        match self {
            BodyArea::Vaginal => "Vaginal",
            BodyArea::Pelvic => "Pelvic",
            BodyArea::Uterine => "Uterine",
            BodyArea::Breast => "Breast",
            BodyArea::Urinary => "Urinary",
            BodyArea::General => "General",
        }
    }

    /// Symptom labels offered for this area, in catalog order
    pub fn symptoms(self) -> &'static [&'static str] {
        match self {
            BodyArea::Vaginal => &["Discharge", "Bleeding", "Itching", "Dryness", "Odor"],
            BodyArea::Pelvic => &["Pain", "Pressure", "Cramping", "Fullness"],
            BodyArea::Uterine => &[
                "Menstrual irregularities",
                "Heavy periods",
                "Spotting",
                "Missed periods",
            ],
            BodyArea::Breast => &[
                "Pain",
                "Lumps",
                "Discharge",
                "Tenderness",
                "Changes in appearance",
            ],
            BodyArea::Urinary => &[
                "Frequent urination",
                "Pain when urinating",
                "Urgency",
                "Incontinence",
            ],
            BodyArea::General => &[
                "Fatigue",
                "Fever",
                "Nausea",
                "Lower back pain",
                "Abdominal bloating",
            ],
        }
    }

    fn symptom_index(self, label: &str) -> Option<usize> {
        self.symptoms()
            .iter()
            .position(|candidate| candidate.eq_ignore_ascii_case(label.trim()))
    }
}

impl fmt::Display for BodyArea {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for BodyArea {
    type Err = InvalidArgument;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        BodyArea::ALL
            .into_iter()
            .find(|area| area.name().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| InvalidArgument::UnknownArea(s.to_string()))
    }
}

/// A catalog symptom: an area plus one of that area's labels.
///
/// Ordered by area, then by the label's position within the area, so a
/// `BTreeSet<Symptom>` iterates in catalog order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Symptom {
    area: BodyArea,
    index: usize,
}

impl Symptom {
    /// Look up `label` under `area`. Matching ignores ASCII case.
    pub fn new(area: BodyArea, label: &str) -> Result<Self, InvalidArgument> {
        area.symptom_index(label)
            .map(|index| Self { area, index })
            .ok_or_else(|| InvalidArgument::UnknownSymptom {
                area,
                label: label.to_string(),
            })
    }

    /// Parse raw area and label strings as received from the presentation layer
    pub fn parse(area: &str, label: &str) -> Result<Self, InvalidArgument> {
        Self::new(area.parse()?, label)
    }

    pub fn area(&self) -> BodyArea {
        self.area
    }

    pub fn label(&self) -> &'static str {
        self.area.symptoms()[self.index]
    }

    /// Area-qualified name, e.g. `Pelvic Pain`
    pub fn qualified_name(&self) -> String {
        format!("{} {}", self.area, self.label())
    }
}

impl fmt::Display for Symptom {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.area, self.label())
    }
}

impl Serialize for Symptom {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Symptom", 2)?;
        state.serialize_field("area", &self.area)?;
        state.serialize_field("label", self.label())?;
        state.end()
    }
}

/// Symptoms offered by the single-shot picker
pub const QUICK_PICKS: &[&str] = &[
    "Pelvic pain",
    "Irregular periods",
    "Heavy bleeding",
    "Missed period",
    "Vaginal discharge",
    "Vaginal itching",
    "Breast pain",
    "Painful urination",
];

/// Resolve a quick-pick label to its canonical catalog spelling
pub fn quick_pick(label: &str) -> Result<&'static str, InvalidArgument> {
    QUICK_PICKS
        .iter()
        .copied()
        .find(|candidate| candidate.eq_ignore_ascii_case(label.trim()))
        .ok_or_else(|| InvalidArgument::UnknownQuickPick(label.to_string()))
}
