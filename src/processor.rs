//! Normalization of Mavenlink's response format.
//!
//! Mavenlink answers every collection request with an ordered `results`
//! list of `{key, id}` pointers and, next to it, one dictionary per entity
//! type mapping id to the full record:
//!
//! ```json
//! {
//!   "count": 2,
//!   "results": [{"key": "stories", "id": "7"}, {"key": "stories", "id": "3"}],
//!   "stories": {"3": {"id": "3", "assignee_ids": ["9"]}, "7": {"id": "7"}},
//!   "users": {"9": {"id": "9", "full_name": "Ada"}}
//! }
//! ```
//!
//! The functions here turn that into an ordered [`Page`] of entities and
//! optionally embed related records in place of their ids.
//!
//! See <http://developer.mavenlink.com/#response-format>.

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Result, ShapeError};
use crate::pagination::Page;

/// One record of a resource: field name to value.
pub type Entity = Map<String, Value>;

/// A raw page response, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawResponse {
    /// Total number of items in the resource.
    pub count: u64,
    /// Pointers to this page's entities, in server order.
    pub results: Vec<ResultRef>,
    /// Every other top-level key: entity dictionaries and any metadata.
    #[serde(flatten)]
    pub collections: Map<String, Value>,
}

/// A pointer into one of the response's entity dictionaries.
#[derive(Debug, Clone, Deserialize)]
pub struct ResultRef {
    pub id: Value,
}

/// How a relation field holding a single id is resolved.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SingleIdLookup {
    /// Look the field's value up as an id, like each element of an id list.
    #[default]
    ById,
    /// Look the field's *name* up in the related dictionary.
    ///
    /// Earlier releases of this client resolved single ids this way. Only
    /// use it when a caller depends on that result.
    ByFieldName,
}

/// Describes a field whose ids point into another dictionary of the
/// same response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Relation {
    /// Field on the entity holding an id or a list of ids.
    pub related_field: String,
    /// Dictionary the ids refer to.
    pub related_object: String,
    /// Store the resolved value under this key instead, removing the
    /// original field.
    pub rename_to: Option<String>,
    pub single_lookup: SingleIdLookup,
}

impl Relation {
    /// Resolve `related_field` through the `related_object` dictionary.
    pub fn new(related_field: impl Into<String>, related_object: impl Into<String>) -> Self {
        Self {
            related_field: related_field.into(),
            related_object: related_object.into(),
            rename_to: None,
            single_lookup: SingleIdLookup::default(),
        }
    }

    /// Move the resolved value to `name`.
    #[must_use]
    pub fn rename_to(mut self, name: impl Into<String>) -> Self {
        self.rename_to = Some(name.into());
        self
    }

    /// Choose how single-id fields are resolved.
    #[must_use]
    pub fn single_lookup(mut self, lookup: SingleIdLookup) -> Self {
        self.single_lookup = lookup;
        self
    }
}

impl RawResponse {
    /// Read a fetched JSON document as a page response.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::Malformed`] if `count` or `results` is missing
    /// or has the wrong type.
    pub fn from_value(value: Value) -> core::result::Result<Self, ShapeError> {
        serde_json::from_value(value).map_err(|e| ShapeError::Malformed(e.to_string()))
    }

    /// Get the entity dictionary called `name`.
    ///
    /// # Errors
    ///
    /// Returns [`ShapeError::MissingCollection`] if it is absent or not an
    /// object.
    pub fn collection(&self, name: &str) -> core::result::Result<&Map<String, Value>, ShapeError> {
        self.collections
            .get(name)
            .and_then(Value::as_object)
            .ok_or_else(|| ShapeError::MissingCollection(name.to_string()))
    }

    /// Get an owned copy of entity `id` from dictionary `collection`.
    ///
    /// # Errors
    ///
    /// Fails if the dictionary or the entry is missing, or the entry is not
    /// an object.
    pub fn entity(&self, collection: &str, id: &str) -> core::result::Result<Entity, ShapeError> {
        let value = self
            .collection(collection)?
            .get(id)
            .ok_or_else(|| ShapeError::MissingEntity {
                collection: collection.to_string(),
                id: id.to_string(),
            })?;

        value
            .as_object()
            .cloned()
            .ok_or_else(|| ShapeError::NotAnObject {
                collection: collection.to_string(),
                id: id.to_string(),
            })
    }
}

/// Normalize a raw page into its entities, in `results` order.
///
/// Entities present in the dictionary but absent from `results` are left
/// out. `meta.total_pages` is derived from `count` and the length of
/// `results`.
///
/// # Errors
///
/// Returns a shape error if `entity_name` is missing or a result id has no
/// entry.
pub fn process_result(raw: &RawResponse, entity_name: &str) -> Result<Page<Entity>> {
    let data = raw
        .results
        .iter()
        .map(|result| {
            let id = id_key(&result.id, "results")?;
            raw.entity(entity_name, &id)
        })
        .collect::<core::result::Result<Vec<_>, _>>()?;

    Ok(Page::new(data, raw.count))
}

/// Normalize a raw page and embed the records `relation` points at.
///
/// Each entity's `related_field` is resolved against
/// `raw[related_object]`. Absent and blank fields (`null`, `false`, `""`,
/// `0`) are left alone; a list
/// of ids resolves to a list of records in the same order; a single id
/// resolves according to [`Relation::single_lookup`].
///
/// See <http://developer.mavenlink.com/#includes>.
///
/// # Errors
///
/// Returns a shape error if any lookup fails.
pub fn process_result_with_relation(
    raw: &RawResponse,
    entity_name: &str,
    relation: &Relation,
) -> Result<Page<Entity>> {
    let mut page = process_result(raw, entity_name)?;

    for item in &mut page.data {
        let resolved = match item.get(&relation.related_field) {
            None => continue,
            Some(value) if is_blank(value) => continue,
            Some(Value::Array(ids)) => ids
                .iter()
                .map(|id| {
                    let id = id_key(id, &relation.related_field)?;
                    raw.entity(&relation.related_object, &id).map(Value::Object)
                })
                .collect::<core::result::Result<Vec<_>, _>>()
                .map(Value::Array)?,
            Some(single) => {
                let id = match relation.single_lookup {
                    SingleIdLookup::ById => id_key(single, &relation.related_field)?,
                    SingleIdLookup::ByFieldName => relation.related_field.clone(),
                };
                Value::Object(raw.entity(&relation.related_object, &id)?)
            }
        };

        match &relation.rename_to {
            Some(name) => {
                item.remove(&relation.related_field);
                item.insert(name.clone(), resolved);
            }
            None => {
                item.insert(relation.related_field.clone(), resolved);
            }
        }
    }

    Ok(page)
}

/// True for values that carry no id: `null`, `false`, `""` and zero.
///
/// An empty list is not blank; it resolves to an empty list.
pub(crate) fn is_blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::Bool(b) => !b,
        Value::String(s) => s.is_empty(),
        Value::Number(n) => n.as_f64() == Some(0.0),
        Value::Array(_) | Value::Object(_) => false,
    }
}

/// Dictionary key for an id value.
fn id_key(id: &Value, field: &str) -> core::result::Result<String, ShapeError> {
    match id {
        Value::String(s) => Ok(s.clone()),
        Value::Number(n) => Ok(n.to_string()),
        other => Err(ShapeError::InvalidId {
            field: field.to_string(),
            value: other.to_string(),
        }),
    }
}
