use crate::models::Value;
use std::collections::BTreeMap;

///
/// Stored
/// relation fields keep the ids of the target records
///

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Stored {
    Value(Value),
    Ids { model: String, ids: Vec<i64> },
}

pub(crate) type Row = BTreeMap<String, Stored>;

///
/// Table
///

#[derive(Debug)]
pub(crate) struct Table {
    next_id: i64,
    rows: BTreeMap<i64, Row>,
}

impl Default for Table {
    fn default() -> Self {
        Self {
            next_id: 1,
            rows: BTreeMap::new(),
        }
    }
}

///
/// MemoryStore
/// rows of every model, ids allocated per model starting at 1
///

#[derive(Debug, Default)]
pub(crate) struct MemoryStore {
    tables: BTreeMap<String, Table>,
}

impl MemoryStore {
    pub(crate) fn insert(&mut self, model: &str) -> i64 {
        let table = self.tables.entry(model.to_string()).or_default();
        let id = table.next_id;
        table.next_id += 1;
        table.rows.insert(id, Row::new());

        id
    }

    pub(crate) fn contains(&self, model: &str, id: i64) -> bool {
        self.row(model, id).is_some()
    }

    pub(crate) fn row(&self, model: &str, id: i64) -> Option<&Row> {
        self.tables.get(model).and_then(|t| t.rows.get(&id))
    }

    pub(crate) fn ids(&self, model: &str) -> Vec<i64> {
        self.tables
            .get(model)
            .map(|t| t.rows.keys().copied().collect())
            .unwrap_or_default()
    }

    pub(crate) fn stored(&self, model: &str, id: i64, field: &str) -> Option<&Stored> {
        self.row(model, id).and_then(|row| row.get(field))
    }

    /// Ids held by a relation field of one row.
    pub(crate) fn linked(&self, model: &str, id: i64, field: &str) -> Vec<i64> {
        match self.stored(model, id, field) {
            Some(Stored::Ids { ids, .. }) => ids.clone(),
            _ => Vec::new(),
        }
    }

    /// Rows of `model` whose relation `field` points at `id`.
    pub(crate) fn referencing(&self, model: &str, field: &str, id: i64) -> Vec<i64> {
        self.tables
            .get(model)
            .map(|t| {
                t.rows
                    .iter()
                    .filter(|(_, row)| {
                        matches!(row.get(field), Some(Stored::Ids { ids, .. }) if ids.contains(&id))
                    })
                    .map(|(id, _)| *id)
                    .collect()
            })
            .unwrap_or_default()
    }

    pub(crate) fn set(&mut self, model: &str, id: i64, field: &str, stored: Stored) {
        if let Some(row) = self.tables.get_mut(model).and_then(|t| t.rows.get_mut(&id)) {
            row.insert(field.to_string(), stored);
        }
    }

    /// Delete rows and drop every relation entry pointing at them.
    pub(crate) fn remove(&mut self, model: &str, ids: &[i64]) -> usize {
        let Some(table) = self.tables.get_mut(model) else {
            return 0;
        };
        let removed = ids.iter().filter(|id| table.rows.remove(*id).is_some()).count();

        for row in self.tables.values_mut().flat_map(|t| t.rows.values_mut()) {
            for stored in row.values_mut() {
                if let Stored::Ids { model: target, ids: linked } = stored
                    && target == model
                {
                    linked.retain(|id| !ids.contains(id));
                }
            }
        }

        removed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_allocated_per_model() {
        let mut store = MemoryStore::default();

        assert_eq!(store.insert("User"), 1);
        assert_eq!(store.insert("User"), 2);
        assert_eq!(store.insert("Tag"), 1);
        assert_eq!(store.ids("User"), vec![1, 2]);
        assert!(store.ids("Post").is_empty());
    }

    #[test]
    fn removal_prunes_links() {
        let mut store = MemoryStore::default();
        let tag = store.insert("Tag");
        let post = store.insert("Post");
        store.set(
            "Post",
            post,
            "Tags",
            Stored::Ids {
                model: "Tag".into(),
                ids: vec![tag],
            },
        );
        assert_eq!(store.referencing("Post", "Tags", tag), vec![post]);

        assert_eq!(store.remove("Tag", &[tag, 99]), 1);
        assert!(store.linked("Post", post, "Tags").is_empty());
        assert!(!store.contains("Tag", tag));
    }
}
