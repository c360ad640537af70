use std::collections::BTreeMap;
use std::fmt;

/// Scores produced for one ligand or pose, keyed by `vina_*` field names.
pub type ScoreRecord = BTreeMap<String, f64>;

/// A single value in a molecule's associated data store.
#[derive(Debug, Clone, PartialEq)]
pub enum DataValue {
    Number(f64),
    Text(String),
}

impl DataValue {
    /// Returns the value as a float, parsing text values if needed.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Number(value) => Some(*value),
            Self::Text(text) => text.trim().parse().ok(),
        }
    }
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{}", value),
            Self::Text(text) => f.write_str(text),
        }
    }
}

/// Ordered key/value store attached to every molecule.
///
/// Properties read from SDF data items land here as text; scores merged by the
/// docking workflows land here as numbers.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MoleculeData {
    entries: BTreeMap<String, DataValue>,
}

impl MoleculeData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&DataValue> {
        self.entries.get(key)
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        self.entries.get(key).and_then(DataValue::as_f64)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn insert_number(&mut self, key: impl Into<String>, value: f64) {
        self.entries.insert(key.into(), DataValue::Number(value));
    }

    pub fn insert_text(&mut self, key: impl Into<String>, value: impl Into<String>) {
        self.entries.insert(key.into(), DataValue::Text(value.into()));
    }

    pub fn remove(&mut self, key: &str) -> Option<DataValue> {
        self.entries.remove(key)
    }

    /// Merges a score record, overwriting existing entries with the same key.
    pub fn merge_scores(&mut self, scores: &ScoreRecord) {
        for (key, value) in scores {
            self.insert_number(key.clone(), *value);
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DataValue)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn merge_scores_overwrites_and_keeps_other_entries() {
        let mut data = MoleculeData::new();
        data.insert_text("source", "zinc");
        data.insert_number("vina_affinity", -1.0);

        let mut scores = ScoreRecord::new();
        scores.insert("vina_affinity".to_string(), -7.2);
        scores.insert("vina_gauss".to_string(), 53.1);
        data.merge_scores(&scores);

        assert_eq!(data.len(), 3);
        assert_eq!(data.get_f64("vina_affinity"), Some(-7.2));
        assert_eq!(data.get_f64("vina_gauss"), Some(53.1));
        assert_eq!(data.get("source"), Some(&DataValue::Text("zinc".into())));
    }

    #[test]
    fn text_values_parse_as_numbers_when_possible() {
        assert_eq!(DataValue::Text(" -6.5 ".into()).as_f64(), Some(-6.5));
        assert_eq!(DataValue::Text("n/a".into()).as_f64(), None);
        assert_eq!(DataValue::Number(1.5).to_string(), "1.5");
    }

    #[test]
    fn iteration_is_key_ordered() {
        let mut data = MoleculeData::new();
        data.insert_number("vina_rmsd_ub", 2.0);
        data.insert_number("vina_affinity", -7.0);
        let keys: Vec<_> = data.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["vina_affinity", "vina_rmsd_ub"]);
    }
}
