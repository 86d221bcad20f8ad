// Copyright Exograph, Inc. All rights reserved.
//
// Use of this software is governed by the Business Source License
// included in the LICENSE file at the root of this repository.
//
// As of the Change Date specified in that file, in accordance with
// the Business Source License, use of this software will be governed
// by the Apache License, Version 2.0.

//! Lookups shared by the dataset services. None of these modify the dataset.

use thiserror::Error;

use crate::Dataset;

/// A validated `first`/`offset` pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Page {
    pub first: usize,
    pub offset: usize,
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum PageError {
    #[error("Argument 'first' must not be negative (got {0})")]
    NegativeFirst(i64),

    #[error("Argument 'offset' must not be negative (got {0})")]
    NegativeOffset(i64),
}

impl Page {
    pub fn new(first: i64, offset: i64) -> Result<Self, PageError> {
        let first = usize::try_from(first).map_err(|_| PageError::NegativeFirst(first))?;
        let offset = usize::try_from(offset).map_err(|_| PageError::NegativeOffset(offset))?;

        Ok(Self { first, offset })
    }
}

/// The first record whose field equals `value`, ignoring case.
pub fn find_by_exact_field<R: Clone>(
    dataset: &Dataset<R>,
    field: impl Fn(&R) -> Option<&str>,
    value: &str,
) -> Option<R> {
    let value = value.to_lowercase();
    dataset.find(|record| field(record).is_some_and(|candidate| candidate.to_lowercase() == value))
}

/// Records whose list-valued field contains `value` (case-sensitive).
pub fn filter_by_membership<R: Clone>(
    dataset: &Dataset<R>,
    field: impl Fn(&R) -> &[String],
    value: &str,
) -> Vec<R> {
    dataset.filter(|record| field(record).iter().any(|member| member == value))
}

/// Records whose numeric field is at least `threshold`. A record without the field never matches.
pub fn filter_by_threshold<R: Clone>(
    dataset: &Dataset<R>,
    field: impl Fn(&R) -> Option<f64>,
    threshold: f64,
) -> Vec<R> {
    dataset.filter(|record| field(record).is_some_and(|value| value >= threshold))
}

pub fn paginate<R: Clone>(dataset: &Dataset<R>, page: Page) -> Vec<R> {
    dataset.slice(page.offset, page.first)
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    #[derive(Debug, Clone)]
    struct Hero {
        name: Option<String>,
        tags: Vec<String>,
        stats: HashMap<String, f64>,
    }

    fn hero(name: &str, tags: &[&str], hp: Option<f64>) -> Hero {
        Hero {
            name: Some(name.to_string()),
            tags: tags.iter().map(|tag| tag.to_string()).collect(),
            stats: hp.into_iter().map(|hp| ("hp".to_string(), hp)).collect(),
        }
    }

    fn heroes() -> Dataset<Hero> {
        Dataset::from_records(vec![
            hero("Aatrox", &["Fighter", "Tank"], Some(650.0)),
            hero("Ahri", &["Mage", "Assassin"], Some(590.0)),
            Hero {
                name: None,
                tags: vec![],
                stats: HashMap::new(),
            },
            hero("Alistar", &["Tank", "Support"], Some(685.0)),
            hero("Zed", &["Assassin"], None),
        ])
    }

    fn names(heroes: &[Hero]) -> Vec<&str> {
        heroes.iter().filter_map(|hero| hero.name.as_deref()).collect()
    }

    #[test]
    fn exact_field_ignores_case() {
        let dataset = heroes();
        let by_name = |name: &str| find_by_exact_field(&dataset, |h| h.name.as_deref(), name);

        assert_eq!(by_name("ahri").unwrap().name.as_deref(), Some("Ahri"));
        assert_eq!(by_name("AHRI").unwrap().name.as_deref(), Some("Ahri"));
        assert!(by_name("Ahr").is_none());
        assert!(by_name("").is_none());
    }

    #[test]
    fn membership_is_exact_and_ordered() {
        let dataset = heroes();

        let tanks = filter_by_membership(&dataset, |h| h.tags.as_slice(), "Tank");
        assert_eq!(names(&tanks), vec!["Aatrox", "Alistar"]);

        assert!(filter_by_membership(&dataset, |h| h.tags.as_slice(), "tank").is_empty());
        assert!(filter_by_membership(&dataset, |h| h.tags.as_slice(), "Nonexistent").is_empty());
    }

    #[test]
    fn threshold_is_inclusive_and_skips_missing() {
        let dataset = heroes();
        let hp = |h: &Hero| h.stats.get("hp").copied();

        assert_eq!(
            names(&filter_by_threshold(&dataset, hp, 650.0)),
            vec!["Aatrox", "Alistar"]
        );
        assert_eq!(names(&filter_by_threshold(&dataset, hp, 0.0)).len(), 3);
        assert!(filter_by_threshold(&dataset, hp, 10_000.0).is_empty());
    }

    #[test]
    fn page_rejects_negative_values() {
        assert_eq!(Page::new(2, 0), Ok(Page { first: 2, offset: 0 }));
        assert_eq!(Page::new(-1, 0), Err(PageError::NegativeFirst(-1)));
        assert_eq!(Page::new(1, -3), Err(PageError::NegativeOffset(-3)));
    }

    #[test]
    fn paginate_uses_slice_semantics() {
        let dataset = heroes();

        let page = paginate(&dataset, Page::new(2, 3).unwrap());
        assert_eq!(names(&page), vec!["Alistar", "Zed"]);

        assert!(paginate(&dataset, Page::new(2, 5).unwrap()).is_empty());
    }
}
