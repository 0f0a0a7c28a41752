//! # Search Filter Module
//!
//! This module defines the set of optional criteria accepted by the extended
//! study program search. Every field is independent: an unset value, an empty
//! string, `false` or an empty list all mean "do not constrain on this
//! dimension". No cross-field consistency checking is performed.
//!
//! ## Key Components
//!
//! - `SearchFilters`: The filter set handed to the payload builder
//! - `SearchFiltersBuilder`: Builder pattern implementation for chained configuration
//! - `StudyType`: Undergraduate / postgraduate / both selector

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

/// Kind of study program to search for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StudyType {
    /// First degree programs ("grundständig")
    Undergraduate,
    /// Programs building on a first degree ("weiterführend")
    Postgraduate,
    /// Both of the above ("beides")
    Both,
}

impl StudyType {
    /// Numeric code used by the search form
    pub fn code(self) -> u8 {
        match self {
            StudyType::Undergraduate => 1,
            StudyType::Postgraduate => 2,
            StudyType::Both => 3,
        }
    }

    /// Look up a study type by its form code
    pub fn from_code(code: u8) -> Option<Self> {
        match code {
            1 => Some(StudyType::Undergraduate),
            2 => Some(StudyType::Postgraduate),
            3 => Some(StudyType::Both),
            _ => None,
        }
    }
}

impl fmt::Display for StudyType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            StudyType::Undergraduate => "undergraduate",
            StudyType::Postgraduate => "postgraduate",
            StudyType::Both => "both",
        };
        f.write_str(name)
    }
}

impl FromStr for StudyType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase();
        if let Ok(code) = normalized.parse::<u8>() {
            return Self::from_code(code)
                .ok_or_else(|| format!("unknown study type code: {}", code));
        }
        match normalized.as_str() {
            "undergraduate" | "grundständig" | "grundstaendig" => Ok(StudyType::Undergraduate),
            "postgraduate" | "weiterführend" | "weiterfuehrend" => Ok(StudyType::Postgraduate),
            "both" | "beides" => Ok(StudyType::Both),
            _ => Err(format!("unknown study type: {}", s)),
        }
    }
}

/// Optional criteria for the extended study program search
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchFilters {
    /// Free-text program name ("Fach")
    pub fach: Option<String>,

    /// Undergraduate, postgraduate or both
    pub study_type: Option<StudyType>,

    /// Exclude teacher training programs
    pub ohne_lehramt: bool,

    /// Admission modes, e.g. `O`, `X`, `A`, `E`
    pub zubesch: Vec<String>,

    /// Start semester
    pub zusemester: Option<String>,

    /// Study without Abitur, first vocational qualification route
    pub berufliche_qualifikation_1: bool,

    /// Study without Abitur, second vocational qualification route
    pub berufliche_qualifikation_2: bool,

    /// Study without Abitur, third vocational qualification route
    pub berufliche_qualifikation_3: bool,

    /// Degree codes, e.g. `37` for Master
    pub abschluss: Vec<String>,

    /// Teacher training type
    pub lehramt: Option<String>,

    /// Language of instruction
    pub sprache: Option<String>,

    /// Study forms: `b`, `d`, `a`, `c`, `p`, `f`, `i`, `t`, `v`
    pub studienformen: Vec<String>,

    /// Only programs with special study forms
    pub besand: bool,

    /// Master program types
    pub mastertyp: Vec<String>,

    /// International double degree programs only
    pub intdop: bool,

    /// Subject area codes (groups, areas and fields), e.g. `S230`
    pub sachgebiete: Vec<String>,

    /// Combine subject areas with AND instead of OR
    pub sachgrand: bool,

    /// Institution name
    pub name: Option<String>,

    /// Institution postal code
    pub plz: Option<String>,

    /// Institution location
    pub ort: Option<String>,

    /// Institution types keyed by form code; only `true` entries constrain
    pub hstype: BTreeMap<u32, bool>,

    /// Institutions with the right to award doctorates
    pub prom: bool,

    /// Institution networks
    pub verbund: bool,

    /// Sponsorship (public, church, private)
    pub traegerschaft: Option<String>,

    /// Federal state codes
    pub bundeslaender: Vec<String>,

    /// Radius in kilometres around `plz`
    pub plzdist: Option<u32>,
}

impl SearchFilters {
    /// Create a new builder
    pub fn builder() -> SearchFiltersBuilder {
        SearchFiltersBuilder::new()
    }
}

/// Builder for SearchFilters
#[derive(Debug, Default)]
pub struct SearchFiltersBuilder {
    filters: SearchFilters,
}

fn collect<I, S>(values: I) -> Vec<String>
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    values.into_iter().map(Into::into).collect()
}

impl SearchFiltersBuilder {
    /// Create a new builder with no constraints
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the free-text program name
    pub fn fach(mut self, fach: impl Into<String>) -> Self {
        self.filters.fach = Some(fach.into());
        self
    }

    /// Set the study type
    pub fn study_type(mut self, study_type: StudyType) -> Self {
        self.filters.study_type = Some(study_type);
        self
    }

    /// Exclude teacher training programs
    pub fn ohne_lehramt(mut self, on: bool) -> Self {
        self.filters.ohne_lehramt = on;
        self
    }

    /// Set the admission modes
    pub fn zubesch<I, S>(mut self, modes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.zubesch = collect(modes);
        self
    }

    /// Set the start semester
    pub fn zusemester(mut self, semester: impl Into<String>) -> Self {
        self.filters.zusemester = Some(semester.into());
        self
    }

    /// Set the three vocational qualification flags at once
    pub fn berufliche_qualifikation(mut self, first: bool, second: bool, third: bool) -> Self {
        self.filters.berufliche_qualifikation_1 = first;
        self.filters.berufliche_qualifikation_2 = second;
        self.filters.berufliche_qualifikation_3 = third;
        self
    }

    /// Set the degree codes
    pub fn abschluss<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.abschluss = collect(codes);
        self
    }

    /// Set the teacher training type
    pub fn lehramt(mut self, lehramt: impl Into<String>) -> Self {
        self.filters.lehramt = Some(lehramt.into());
        self
    }

    /// Set the language of instruction
    pub fn sprache(mut self, sprache: impl Into<String>) -> Self {
        self.filters.sprache = Some(sprache.into());
        self
    }

    /// Set the study forms
    pub fn studienformen<I, S>(mut self, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.studienformen = collect(forms);
        self
    }

    /// Only programs with special study forms
    pub fn besand(mut self, on: bool) -> Self {
        self.filters.besand = on;
        self
    }

    /// Set the master program types
    pub fn mastertyp<I, S>(mut self, types: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.mastertyp = collect(types);
        self
    }

    /// International double degree programs only
    pub fn intdop(mut self, on: bool) -> Self {
        self.filters.intdop = on;
        self
    }

    /// Set the subject area codes
    pub fn sachgebiete<I, S>(mut self, codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.sachgebiete = collect(codes);
        self
    }

    /// Combine subject areas with AND
    pub fn sachgrand(mut self, on: bool) -> Self {
        self.filters.sachgrand = on;
        self
    }

    /// Set the institution name
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.filters.name = Some(name.into());
        self
    }

    /// Set the institution postal code
    pub fn plz(mut self, plz: impl Into<String>) -> Self {
        self.filters.plz = Some(plz.into());
        self
    }

    /// Set the institution location
    pub fn ort(mut self, ort: impl Into<String>) -> Self {
        self.filters.ort = Some(ort.into());
        self
    }

    /// Switch a single institution type on or off
    pub fn institution_type(mut self, code: u32, on: bool) -> Self {
        self.filters.hstype.insert(code, on);
        self
    }

    /// Institutions with the right to award doctorates
    pub fn prom(mut self, on: bool) -> Self {
        self.filters.prom = on;
        self
    }

    /// Institution networks
    pub fn verbund(mut self, on: bool) -> Self {
        self.filters.verbund = on;
        self
    }

    /// Set the sponsorship
    pub fn traegerschaft(mut self, traegerschaft: impl Into<String>) -> Self {
        self.filters.traegerschaft = Some(traegerschaft.into());
        self
    }

    /// Set the federal state codes
    pub fn bundeslaender<I, S>(mut self, states: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.filters.bundeslaender = collect(states);
        self
    }

    /// Set the radius in kilometres around the postal code
    pub fn plzdist(mut self, km: u32) -> Self {
        self.filters.plzdist = Some(km);
        self
    }

    /// Build the filter set
    pub fn build(self) -> SearchFilters {
        self.filters
    }
}
