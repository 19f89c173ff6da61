//! # Speaker Map

use std::collections::BTreeMap;

use crate::{
    errors::{CorpusError, CorpusResult},
    types::{SpeakerId, VcHashMap, index_to_id},
};

/// Bijective `{ speaker name <-> id }` mapping.
///
/// Ids are assigned densely, in first-seen order, starting at 0.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpeakerMap {
    name_to_id: VcHashMap<String, SpeakerId>,
    id_to_name: VcHashMap<SpeakerId, String>,
}

impl SpeakerMap {
    /// Build a speaker map from speaker names in corpus order.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut map = Self::default();
        for name in names {
            map.get_or_insert(name.as_ref());
        }
        map
    }

    /// Rebuild a speaker map, and its reverse, from a `{ name -> id }` map.
    ///
    /// Fails with [`CorpusError::CorruptSnapshot`] if two names share an id.
    pub fn from_name_map(name_to_id: &BTreeMap<String, SpeakerId>) -> CorpusResult<Self> {
        let mut map = Self::default();
        for (name, &id) in name_to_id {
            if let Some(other) = map.id_to_name.insert(id, name.clone()) {
                return Err(CorpusError::CorruptSnapshot(format!(
                    "speakers {other:?} and {name:?} share id {id}"
                )));
            }
            map.name_to_id.insert(name.clone(), id);
        }
        Ok(map)
    }

    /// The number of speakers.
    pub fn len(&self) -> usize {
        self.name_to_id.len()
    }

    /// Check if the map is empty.
    pub fn is_empty(&self) -> bool {
        self.name_to_id.is_empty()
    }

    /// Get the id of `name`, assigning the next id if it is new.
    pub fn get_or_insert(
        &mut self,
        name: &str,
    ) -> SpeakerId {
        if let Some(&id) = self.name_to_id.get(name) {
            return id;
        }
        let id = self.next_id();
        self.name_to_id.insert(name.to_string(), id);
        self.id_to_name.insert(id, name.to_string());
        id
    }

    /// Look up a speaker id by name.
    pub fn id(
        &self,
        name: &str,
    ) -> CorpusResult<SpeakerId> {
        self.name_to_id
            .get(name)
            .copied()
            .ok_or_else(|| CorpusError::UnknownSpeaker {
                name: name.to_string(),
            })
    }

    /// Look up a speaker name by id, through the reverse map.
    pub fn name(
        &self,
        id: SpeakerId,
    ) -> CorpusResult<&str> {
        self.id_to_name
            .get(&id)
            .map(String::as_str)
            .ok_or(CorpusError::UnknownSpeakerId { id })
    }

    /// A sorted copy of the `{ name -> id }` map.
    pub fn to_name_map(&self) -> BTreeMap<String, SpeakerId> {
        self.name_to_id
            .iter()
            .map(|(name, &id)| (name.clone(), id))
            .collect()
    }

    /// Iterate `(id, name)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (SpeakerId, &str)> {
        let mut pairs: Vec<(SpeakerId, &str)> = self
            .id_to_name
            .iter()
            .map(|(&id, name)| (id, name.as_str()))
            .collect();
        pairs.sort_unstable_by_key(|&(id, _)| id);
        pairs.into_iter()
    }

    fn next_id(&self) -> SpeakerId {
        // Loaded maps need not be dense.
        self.id_to_name
            .keys()
            .max()
            .map_or(0, |&max| max.saturating_add(1))
            .max(index_to_id(self.len()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_seen_order() {
        let map = SpeakerMap::from_names(["bob", "alice", "bob", "carol", "alice"]);
        assert_eq!(map.len(), 3);

        assert_eq!(map.id("bob").unwrap(), 0);
        assert_eq!(map.id("alice").unwrap(), 1);
        assert_eq!(map.id("carol").unwrap(), 2);

        let pairs: Vec<_> = map.iter().collect();
        assert_eq!(pairs, vec![(0, "bob"), (1, "alice"), (2, "carol")]);
    }

    #[test]
    fn test_bijection() {
        let map = SpeakerMap::from_names(["s1", "s2", "s3"]);
        for name in ["s1", "s2", "s3"] {
            assert_eq!(map.name(map.id(name).unwrap()).unwrap(), name);
        }
    }

    #[test]
    fn test_missing_lookups() {
        let map = SpeakerMap::from_names(["s1"]);
        assert!(matches!(
            map.id("nobody"),
            Err(CorpusError::UnknownSpeaker { name }) if name == "nobody"
        ));
        assert!(matches!(
            map.name(1),
            Err(CorpusError::UnknownSpeakerId { id: 1 })
        ));
    }

    #[test]
    fn test_name_map_round_trip() {
        let map = SpeakerMap::from_names(["x", "y"]);
        let rebuilt = SpeakerMap::from_name_map(&map.to_name_map()).unwrap();
        assert_eq!(rebuilt, map);
        assert_eq!(rebuilt.name(1).unwrap(), "y");
    }

    #[test]
    fn test_name_map_rejects_shared_ids() {
        let name_map: BTreeMap<String, SpeakerId> =
            [("a".to_string(), 0), ("b".to_string(), 0)].into_iter().collect();
        assert!(matches!(
            SpeakerMap::from_name_map(&name_map),
            Err(CorpusError::CorruptSnapshot(_))
        ));
    }

    #[test]
    fn test_insert_after_sparse_load() {
        let name_map: BTreeMap<String, SpeakerId> =
            [("a".to_string(), 0), ("b".to_string(), 5)].into_iter().collect();
        let mut map = SpeakerMap::from_name_map(&name_map).unwrap();
        assert_eq!(map.get_or_insert("c"), 6);
        assert_eq!(map.get_or_insert("a"), 0);
    }
}
