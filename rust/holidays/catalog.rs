use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, LazyLock};
use tracing::{debug, error};

use crate::holidays::HolidayRule;
use crate::json::JSON;
use crate::AlmanacError;

// The one declarative source of the built-in rules. Every host compiles this same file in.
const BUILTIN_CATALOG_JSON: &str = include_str!("../../data/holiday_rules.json");

// A single memory allocated space for the built-in catalog, shared by every engine.
static BUILTIN_CATALOG: LazyLock<Arc<HolidayCatalog>> = LazyLock::new(|| {
    let parsed = HolidayCatalog::from_json(BUILTIN_CATALOG_JSON);
    debug_assert!(
        parsed.is_ok(),
        "built-in holiday catalog is invalid: {:?}",
        parsed.as_ref().err()
    );
    match parsed {
        Ok(catalog) => {
            debug!(rules = catalog.len(), "loaded built-in holiday catalog");
            Arc::new(catalog)
        }
        Err(e) => {
            error!(error = %e, "built-in holiday catalog is invalid, no holidays will resolve");
            Arc::new(HolidayCatalog::default())
        }
    }
});

/// An ordered, validated set of [`HolidayRule`] keyed by their identifiers.
///
/// Insertion order is preserved, so two hosts building a catalog from the same document
/// evaluate the rules in the same order.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "Vec<HolidayRule>", into = "Vec<HolidayRule>")]
pub struct HolidayCatalog {
    rules: IndexMap<String, HolidayRule>,
}

impl HolidayCatalog {
    /// Create a catalog, validating every rule and rejecting duplicate identifiers.
    pub fn try_new(rules: Vec<HolidayRule>) -> Result<Self, AlmanacError> {
        let mut map: IndexMap<String, HolidayRule> = IndexMap::with_capacity(rules.len());
        for rule in rules {
            rule.validate()?;
            if map.contains_key(&rule.id) {
                return Err(AlmanacError::DuplicateRule { id: rule.id });
            }
            map.insert(rule.id.clone(), rule);
        }
        Ok(Self { rules: map })
    }

    /// Return the catalog compiled into the crate.
    pub fn builtin() -> Arc<HolidayCatalog> {
        BUILTIN_CATALOG.clone()
    }

    /// Return the rule with the given identifier.
    pub fn get(&self, id: &str) -> Option<&HolidayRule> {
        self.rules.get(id)
    }

    /// Iterate over the rules in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = &HolidayRule> {
        self.rules.values()
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }
}

impl TryFrom<Vec<HolidayRule>> for HolidayCatalog {
    type Error = AlmanacError;

    fn try_from(rules: Vec<HolidayRule>) -> Result<Self, Self::Error> {
        Self::try_new(rules)
    }
}

impl From<HolidayCatalog> for Vec<HolidayRule> {
    fn from(catalog: HolidayCatalog) -> Self {
        catalog.rules.into_values().collect()
    }
}

impl JSON for HolidayCatalog {}
