//! Entity extraction
//!
//! An entity locator is a fixed list of (tag family, tag) positions
//! decided once from the series definition. It holds no state and can be
//! shared across any number of concurrent writes.

use tracing::trace;

use crate::codec::marshal_tag_value;
use crate::model::{EntitySpec, TagFamilyForWrite, TagFamilySpec, TagValue};

use super::errors::{PartitionError, PartitionResult, MALFORMED_FAMILY_OFFSET, MALFORMED_TAG_OFFSET};
use super::shard::{shard_id, ShardId};

/// Ordered canonical tag values identifying one series
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Entity(Vec<Vec<u8>>);

impl Entity {
    pub fn new(components: Vec<Vec<u8>>) -> Self {
        Self(components)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn components(&self) -> &[Vec<u8>] {
        &self.0
    }

    /// Concatenates the components in order, without separators.
    pub fn marshal(&self) -> Vec<u8> {
        self.0.concat()
    }
}

/// Position of one tag in a write payload
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TagLocator {
    pub family_offset: usize,
    pub tag_offset: usize,
}

impl TagLocator {
    pub fn new(family_offset: usize, tag_offset: usize) -> Self {
        Self {
            family_offset,
            tag_offset,
        }
    }
}

/// Ordered tag positions forming the entity of a series
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EntityLocator(Vec<TagLocator>);

impl EntityLocator {
    pub fn new(locators: Vec<TagLocator>) -> Self {
        Self(locators)
    }

    /// Resolves entity tag names against the declared tag families.
    ///
    /// Each name resolves to the first family, then first tag, that
    /// carries it.
    pub fn from_spec(families: &[TagFamilySpec], entity: &EntitySpec) -> PartitionResult<Self> {
        entity
            .tag_names
            .iter()
            .map(|name| {
                find_tag_by_name(families, name)
                    .ok_or_else(|| PartitionError::EntityTagNotDefined(name.clone()))
            })
            .collect::<PartitionResult<Vec<_>>>()
            .map(Self)
    }

    pub fn locators(&self) -> &[TagLocator] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Extracts the entity from a write payload.
    ///
    /// Never returns a partial entity: the first failing lookup or
    /// marshal aborts the whole extraction.
    pub fn find(&self, value: &[TagFamilyForWrite]) -> PartitionResult<Entity> {
        let mut entity = Vec::with_capacity(self.0.len());
        for locator in &self.0 {
            let tag = get_tag_by_offset(value, locator.family_offset, locator.tag_offset)?;
            entity.push(marshal_tag_value(tag)?);
        }
        Ok(Entity(entity))
    }

    /// Extracts the entity and routes it to a shard.
    pub fn locate(
        &self,
        value: &[TagFamilyForWrite],
        shard_num: u32,
    ) -> PartitionResult<(Entity, ShardId)> {
        let entity = self.find(value)?;
        let id = shard_id(&entity.marshal(), shard_num)?;
        trace!(components = entity.len(), shard_id = id.get(), "ENTITY_LOCATED");
        Ok((entity, id))
    }
}

impl FromIterator<TagLocator> for EntityLocator {
    fn from_iter<I: IntoIterator<Item = TagLocator>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Returns the tag at the given position, bounds-checking both offsets.
pub fn get_tag_by_offset(
    value: &[TagFamilyForWrite],
    family_offset: usize,
    tag_offset: usize,
) -> PartitionResult<&TagValue> {
    let family = value
        .get(family_offset)
        .ok_or(PartitionError::MalformedElement(MALFORMED_FAMILY_OFFSET))?;
    family
        .tags
        .get(tag_offset)
        .ok_or(PartitionError::MalformedElement(MALFORMED_TAG_OFFSET))
}

fn find_tag_by_name(families: &[TagFamilySpec], name: &str) -> Option<TagLocator> {
    families.iter().enumerate().find_map(|(fi, family)| {
        family
            .tags
            .iter()
            .position(|tag| tag.name == name)
            .map(|ti| TagLocator::new(fi, ti))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::CodecError;
    use crate::model::{FieldType, TagSpec};

    fn payload(tags: &[&str]) -> Vec<TagFamilyForWrite> {
        vec![TagFamilyForWrite::new(
            tags.iter().map(|&t| TagValue::from(t)).collect(),
        )]
    }

    fn two_tag_locator() -> EntityLocator {
        EntityLocator::new(vec![TagLocator::new(0, 0), TagLocator::new(0, 1)])
    }

    #[test]
    fn test_find_in_declared_order() {
        let entity = two_tag_locator().find(&payload(&["alice", "svcA"])).unwrap();
        assert_eq!(
            entity.components(),
            &[b"alice".to_vec(), b"svcA".to_vec()]
        );
    }

    #[test]
    fn test_find_respects_locator_order() {
        let locator = EntityLocator::new(vec![TagLocator::new(0, 1), TagLocator::new(0, 0)]);
        let entity = locator.find(&payload(&["alice", "svcA"])).unwrap();
        assert_eq!(entity.components()[0], b"svcA".to_vec());
        assert_eq!(entity.components()[1], b"alice".to_vec());
    }

    #[test]
    fn test_tag_offset_out_of_range() {
        let err = two_tag_locator().find(&payload(&["alice"])).unwrap_err();
        assert_eq!(err, PartitionError::MalformedElement(MALFORMED_TAG_OFFSET));
    }

    #[test]
    fn test_family_offset_out_of_range() {
        let locator = EntityLocator::new(vec![TagLocator::new(2, 0)]);
        let err = locator.find(&payload(&["alice"])).unwrap_err();
        assert_eq!(err, PartitionError::MalformedElement(MALFORMED_FAMILY_OFFSET));
    }

    #[test]
    fn test_empty_payload() {
        let err = two_tag_locator().find(&[]).unwrap_err();
        assert_eq!(err.malformed_context(), Some(MALFORMED_FAMILY_OFFSET));
    }

    #[test]
    fn test_codec_error_forwarded() {
        let value = vec![TagFamilyForWrite::new(vec![
            TagValue::from("alice"),
            TagValue::Null,
        ])];
        let err = two_tag_locator().find(&value).unwrap_err();
        assert_eq!(err, PartitionError::Codec(CodecError::UnsupportedTagValue("null")));
    }

    #[test]
    fn test_empty_locator_gives_empty_entity() {
        let entity = EntityLocator::default().find(&[]).unwrap();
        assert!(entity.is_empty());
        assert!(entity.marshal().is_empty());
    }

    #[test]
    fn test_marshal_concatenates() {
        let entity = Entity::new(vec![b"ab".to_vec(), b"cd".to_vec()]);
        assert_eq!(entity.marshal(), b"abcd".to_vec());
    }

    #[test]
    fn test_locate_deterministic() {
        let locator = two_tag_locator();
        let value = payload(&["alice", "svcA"]);
        let (e1, s1) = locator.locate(&value, 16).unwrap();
        let (e2, s2) = locator.locate(&value, 16).unwrap();
        assert_eq!(e1, e2);
        assert_eq!(s1, s2);
        assert!(s1.get() < 16);
    }

    #[test]
    fn test_locate_uses_marshaled_entity() {
        let (entity, id) = two_tag_locator()
            .locate(&payload(&["alice", "svcA"]), 5)
            .unwrap();
        assert_eq!(id, shard_id(&entity.marshal(), 5).unwrap());
    }

    #[test]
    fn test_locate_zero_shards() {
        let err = two_tag_locator()
            .locate(&payload(&["alice", "svcA"]), 0)
            .unwrap_err();
        assert_eq!(err, PartitionError::InvalidShardNumber);
    }

    #[test]
    fn test_locate_propagates_find_error() {
        let err = two_tag_locator().locate(&payload(&[]), 4).unwrap_err();
        assert!(err.is_malformed());
    }

    #[test]
    fn test_from_spec() {
        let families = vec![
            TagFamilySpec::new(
                "searchable",
                vec![
                    TagSpec::new("trace_id", FieldType::String),
                    TagSpec::new("service_id", FieldType::String),
                ],
            ),
            TagFamilySpec::new(
                "data",
                vec![TagSpec::new("instance_id", FieldType::String)],
            ),
        ];
        let entity = EntitySpec {
            tag_names: vec!["instance_id".into(), "service_id".into()],
        };
        let locator = EntityLocator::from_spec(&families, &entity).unwrap();
        assert_eq!(
            locator.locators(),
            &[TagLocator::new(1, 0), TagLocator::new(0, 1)]
        );
    }

    #[test]
    fn test_from_spec_unknown_tag() {
        let families = vec![TagFamilySpec::new(
            "searchable",
            vec![TagSpec::new("service_id", FieldType::String)],
        )];
        let entity = EntitySpec {
            tag_names: vec!["endpoint".into()],
        };
        let err = EntityLocator::from_spec(&families, &entity).unwrap_err();
        assert_eq!(err, PartitionError::EntityTagNotDefined("endpoint".into()));
    }
}
