// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

use std::{
    fs::File,
    io::{BufReader, Read},
    path::Path,
    sync::{PoisonError, RwLock, RwLockReadGuard},
};

use serde::de::DeserializeOwned;
use tracing::debug;

use crate::{IdAssignment, LoadError};

/// A record that carries an optional integer identifier.
pub trait Identified {
    fn id(&self) -> Option<i64>;
    fn set_id(&mut self, id: i64);
}

/// Ordered records of a single kind.
///
/// The dataset only ever grows: [`Dataset::append`] is the sole mutation, and the order of
/// records is the order in which they were loaded or appended.
pub struct Dataset<R> {
    records: RwLock<Vec<R>>,
}

impl<R: DeserializeOwned> Dataset<R> {
    /// Load a dataset from a file containing a JSON array.
    pub fn load(path: &Path) -> Result<Self, LoadError> {
        let path_name = path.display().to_string();

        if !path.exists() {
            return Err(LoadError::FileNotFound(path_name));
        }

        let file = File::open(path).map_err(|e| LoadError::FileOpen(path_name.clone(), e))?;
        Self::parse(BufReader::new(file), &path_name)
    }

    pub fn from_reader(reader: impl Read) -> Result<Self, LoadError> {
        Self::parse(reader, "<input>")
    }

    fn parse(reader: impl Read, source_name: &str) -> Result<Self, LoadError> {
        let records: Vec<R> =
            serde_json::from_reader(reader).map_err(|e| LoadError::Malformed {
                source_name: source_name.to_string(),
                message: e.to_string(),
            })?;

        debug!("Loaded {} records from {}", records.len(), source_name);

        Ok(Self::from_records(records))
    }
}

impl<R> Dataset<R> {
    pub fn from_records(records: Vec<R>) -> Self {
        Self {
            records: RwLock::new(records),
        }
    }

    pub fn len(&self) -> usize {
        self.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().is_empty()
    }

    /// A poisoned lock still holds a consistent vector, since a push either happened or not.
    fn read(&self) -> RwLockReadGuard<'_, Vec<R>> {
        self.records.read().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<R: Clone> Dataset<R> {
    pub fn records(&self) -> Vec<R> {
        self.read().clone()
    }

    /// Up to `count` records starting at `offset`. Running past the end truncates the result.
    pub fn slice(&self, offset: usize, count: usize) -> Vec<R> {
        let records = self.read();

        if offset >= records.len() {
            return vec![];
        }

        let end = offset.saturating_add(count).min(records.len());
        records[offset..end].to_vec()
    }

    /// The first record (in dataset order) satisfying the predicate.
    pub fn find(&self, predicate: impl Fn(&R) -> bool) -> Option<R> {
        self.read().iter().find(|record| predicate(record)).cloned()
    }

    pub fn filter(&self, predicate: impl Fn(&R) -> bool) -> Vec<R> {
        self.read()
            .iter()
            .filter(|record| predicate(record))
            .cloned()
            .collect()
    }
}

impl<R: Clone + Identified> Dataset<R> {
    /// Push a record to the end of the dataset and return the stored copy.
    ///
    /// The identifier is computed and assigned while holding the write lock, so concurrent
    /// appends in sequential mode never observe the same maximum.
    pub fn append(&self, mut record: R, id_assignment: &IdAssignment) -> R {
        let mut records = self.records.write().unwrap_or_else(PoisonError::into_inner);

        let id = id_assignment.next_id(&records);
        record.set_id(id);
        records.push(record.clone());

        debug!("Appended record with id {id}; dataset now has {} records", records.len());

        record
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use serde::Deserialize;

    use super::*;

    #[derive(Debug, Clone, PartialEq, Deserialize)]
    struct Item {
        id: Option<i64>,
        name: String,
    }

    impl Identified for Item {
        fn id(&self) -> Option<i64> {
            self.id
        }

        fn set_id(&mut self, id: i64) {
            self.id = Some(id);
        }
    }

    fn item(name: &str) -> Item {
        Item {
            id: None,
            name: name.to_string(),
        }
    }

    fn dataset(names: &[&str]) -> Dataset<Item> {
        Dataset::from_records(names.iter().map(|name| item(name)).collect())
    }

    fn names(items: &[Item]) -> Vec<&str> {
        items.iter().map(|item| item.name.as_str()).collect()
    }

    #[test]
    fn slice_within_and_past_bounds() {
        let dataset = dataset(&["a", "b", "c", "d", "e"]);

        assert_eq!(names(&dataset.slice(0, 2)), vec!["a", "b"]);
        assert_eq!(names(&dataset.slice(3, 10)), vec!["d", "e"]);
        assert_eq!(names(&dataset.slice(4, 1)), vec!["e"]);
        assert!(dataset.slice(5, 1).is_empty());
        assert!(dataset.slice(17, 3).is_empty());
        assert!(dataset.slice(1, 0).is_empty());
        assert_eq!(dataset.slice(2, usize::MAX).len(), 3);
    }

    #[test]
    fn slice_length_matches_min_of_count_and_remaining() {
        let dataset = dataset(&["a", "b", "c", "d", "e", "f", "g"]);
        let len = dataset.len();

        for offset in 0..=len + 2 {
            for count in 0..=len + 2 {
                let expected = count.min(len.saturating_sub(offset));
                assert_eq!(
                    dataset.slice(offset, count).len(),
                    expected,
                    "offset {offset}, count {count}"
                );
            }
        }
    }

    #[test]
    fn find_returns_first_match() {
        let dataset = Dataset::from_records(vec![
            Item {
                id: Some(1),
                name: "dup".to_string(),
            },
            Item {
                id: Some(2),
                name: "dup".to_string(),
            },
        ]);

        assert_eq!(dataset.find(|item| item.name == "dup").unwrap().id, Some(1));
        assert!(dataset.find(|item| item.name == "missing").is_none());
    }

    #[test]
    fn append_with_fixed_id() {
        let dataset = dataset(&["a"]);

        let first = dataset.append(item("b"), &IdAssignment::default());
        let second = dataset.append(item("c"), &IdAssignment::default());

        assert_eq!(first.id, Some(4732832));
        assert_eq!(second.id, Some(4732832));
        assert_eq!(names(&dataset.records()), vec!["a", "b", "c"]);
    }

    #[test]
    fn append_with_sequential_id() {
        let dataset = Dataset::from_records(vec![
            Item {
                id: Some(7),
                name: "a".to_string(),
            },
            item("b"),
        ]);

        let first = dataset.append(item("c"), &IdAssignment::Sequential);
        let second = dataset.append(item("d"), &IdAssignment::Sequential);

        assert_eq!(first.id, Some(8));
        assert_eq!(second.id, Some(9));
        assert_eq!(dataset.len(), 4);
    }

    #[test]
    fn concurrent_sequential_appends_get_distinct_ids() {
        let dataset = std::sync::Arc::new(dataset(&[]));

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let dataset = dataset.clone();
                std::thread::spawn(move || {
                    dataset
                        .append(item(&i.to_string()), &IdAssignment::Sequential)
                        .id
                })
            })
            .collect();

        let mut ids: Vec<_> = handles
            .into_iter()
            .map(|handle| handle.join().unwrap().unwrap())
            .collect();
        ids.sort();

        assert_eq!(ids, (1..=8).collect::<Vec<_>>());
    }

    #[test]
    fn load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"[{{"id": 3, "name": "x"}}, {{"name": "y"}}]"#).unwrap();

        let dataset: Dataset<Item> = Dataset::load(file.path()).unwrap();

        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.records()[1], item("y"));
    }

    #[test]
    fn load_failures() {
        let missing = Dataset::<Item>::load(Path::new("/definitely/not/here.json"));
        assert!(matches!(missing, Err(LoadError::FileNotFound(_))));

        let not_an_array = Dataset::<Item>::from_reader(r#"{"name": "x"}"#.as_bytes());
        assert!(matches!(not_an_array, Err(LoadError::Malformed { .. })));

        let truncated = Dataset::<Item>::from_reader("[{".as_bytes());
        assert!(matches!(truncated, Err(LoadError::Malformed { .. })));
    }
}
