//! Form payload construction for the extended search form

use std::collections::BTreeMap;

use super::filters::SearchFilters;

/// Prefix of every search form field name
const FIELD_PREFIX: &str = "tx_szhrksearch_pi1";

/// A single form value: plain string or repeated multi-value field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormValue {
    /// Single value
    Single(String),
    /// Repeated field, one entry per element, order preserved
    Multi(Vec<String>),
}

impl FormValue {
    /// The single value, if this is not a multi-value field
    pub fn as_single(&self) -> Option<&str> {
        match self {
            FormValue::Single(value) => Some(value),
            FormValue::Multi(_) => None,
        }
    }

    /// The values of a multi-value field
    pub fn as_multi(&self) -> Option<&[String]> {
        match self {
            FormValue::Single(_) => None,
            FormValue::Multi(values) => Some(values),
        }
    }
}

/// Form field name -> value mapping sent to the search endpoint
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormPayload {
    fields: BTreeMap<String, FormValue>,
}

impl FormPayload {
    /// Look up a field by its full form name
    pub fn get(&self, key: &str) -> Option<&FormValue> {
        self.fields.get(key)
    }

    /// Whether a field is present
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Number of distinct fields
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether the payload has no fields at all
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Field names in sorted order
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Flatten into `(name, value)` pairs for url-encoding.
    ///
    /// Multi-value fields repeat their name once per element.
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs = Vec::with_capacity(self.fields.len());
        for (key, value) in &self.fields {
            match value {
                FormValue::Single(v) => pairs.push((key.clone(), v.clone())),
                FormValue::Multi(values) => {
                    pairs.extend(values.iter().map(|v| (key.clone(), v.clone())));
                }
            }
        }
        pairs
    }

    fn insert_single(&mut self, key: String, value: impl Into<String>) {
        self.fields.insert(key, FormValue::Single(value.into()));
    }

    fn insert_text(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value.filter(|v| !v.is_empty()) {
            self.insert_single(field_key(field), value);
        }
    }

    fn insert_number<N: ToString>(&mut self, field: &str, value: Option<N>) {
        if let Some(value) = value {
            self.insert_single(field_key(field), value.to_string());
        }
    }

    // The form treats a missing checkbox as unchecked, so `false` is never sent.
    fn insert_flag(&mut self, field: &str, on: bool) {
        if on {
            self.insert_single(field_key(field), "1");
        }
    }

    fn insert_list(&mut self, field: &str, values: &[String]) {
        if !values.is_empty() {
            self.fields
                .insert(format!("{}[]", field_key(field)), FormValue::Multi(values.to_vec()));
        }
    }
}

fn field_key(field: &str) -> String {
    format!("{}[{}]", FIELD_PREFIX, field)
}

/// Build the form payload for a filter set.
///
/// The control fields that mark the request as a search submission are
/// always present; every other field only appears when its filter is set.
pub fn build_payload(filters: &SearchFilters) -> FormPayload {
    let mut payload = FormPayload::default();

    payload.insert_single("gfi".to_string(), "1");
    payload.insert_single(field_key("search"), "1");
    payload.insert_single("genios".to_string(), "");
    payload.insert_single(field_key("view"), "");

    payload.insert_text("fach", filters.fach.as_deref());
    payload.insert_number("studtyp", filters.study_type.map(|t| t.code()));
    payload.insert_flag("ohnelehramt", filters.ohne_lehramt);
    payload.insert_list("zubesch", &filters.zubesch);
    payload.insert_text("zusemester", filters.zusemester.as_deref());

    payload.insert_flag("berufliche_qualifikation_1", filters.berufliche_qualifikation_1);
    payload.insert_flag("berufliche_qualifikation_2", filters.berufliche_qualifikation_2);
    payload.insert_flag("berufliche_qualifikation_3", filters.berufliche_qualifikation_3);

    payload.insert_list("abschluss", &filters.abschluss);
    payload.insert_text("lehramt", filters.lehramt.as_deref());
    payload.insert_text("sprache", filters.sprache.as_deref());
    payload.insert_list("besform", &filters.studienformen);
    payload.insert_flag("besand", filters.besand);
    payload.insert_list("master", &filters.mastertyp);
    payload.insert_flag("intdop", filters.intdop);
    payload.insert_list("sachgr", &filters.sachgebiete);
    payload.insert_flag("sachgrand", filters.sachgrand);

    payload.insert_text("name", filters.name.as_deref());
    payload.insert_text("plz", filters.plz.as_deref());
    payload.insert_text("ort", filters.ort.as_deref());

    for (code, active) in &filters.hstype {
        if *active {
            payload.insert_single(format!("{}[hstype][{}]", FIELD_PREFIX, code), "1");
        }
    }

    payload.insert_flag("prom", filters.prom);
    payload.insert_flag("verbund", filters.verbund);
    payload.insert_text("traegerschaft", filters.traegerschaft.as_deref());
    payload.insert_list("bundesland", &filters.bundeslaender);
    payload.insert_number("plzdist", filters.plzdist);

    payload
}
