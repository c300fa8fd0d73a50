//! In-memory registry backed by a JSON seed document.
//!
//! The seed holds the registry rows and a flat map of addressable
//! documents. Document values whose ref appears in the map behave as
//! lazily resolvable pointers; a ref with no backing document surfaces as
//! a resolution failure, which is how broken upstream data is simulated
//! and served.

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use waypost_engine::{FieldPath, HotelRecord, PlainRecord, Pointer, SourceError, Tree};

use super::HotelIndex;

#[derive(Debug, Deserialize)]
struct Seed {
    hotels: Vec<SeedHotel>,
    #[serde(default)]
    documents: HashMap<String, Value>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct SeedHotel {
    address: String,
    #[serde(default)]
    manager: Option<Value>,
    #[serde(default)]
    created: Option<Value>,
    data_uri: String,
}

/// In-memory implementation of [`HotelIndex`].
pub struct MemoryIndex {
    hotels: Vec<Arc<SeededHotel>>,
}

impl MemoryIndex {
    /// Build an index from a JSON seed document.
    pub fn from_json(seed: &str) -> Result<Self, serde_json::Error> {
        let seed: Seed = serde_json::from_str(seed)?;
        let documents = Arc::new(seed.documents);
        let hotels = seed
            .hotels
            .into_iter()
            .map(|hotel| {
                Arc::new(SeededHotel {
                    address: hotel.address,
                    manager: hotel.manager,
                    created: hotel.created,
                    data_ref: hotel.data_uri,
                    documents: Arc::clone(&documents),
                })
            })
            .collect();
        Ok(Self { hotels })
    }

    /// Number of registry rows.
    pub fn len(&self) -> usize {
        self.hotels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hotels.is_empty()
    }
}

#[async_trait]
impl HotelIndex for MemoryIndex {
    async fn all_hotels(&self) -> Result<Vec<Arc<dyn HotelRecord>>, SourceError> {
        Ok(self
            .hotels
            .iter()
            .map(|hotel| Arc::clone(hotel) as Arc<dyn HotelRecord>)
            .collect())
    }

    async fn hotel(&self, address: &str) -> Result<Option<Arc<dyn HotelRecord>>, SourceError> {
        Ok(self
            .hotels
            .iter()
            .find(|hotel| hotel.address == address)
            .map(|hotel| Arc::clone(hotel) as Arc<dyn HotelRecord>))
    }
}

/// One registry row plus a handle on the shared document store.
struct SeededHotel {
    address: String,
    manager: Option<Value>,
    created: Option<Value>,
    data_ref: String,
    documents: Arc<HashMap<String, Value>>,
}

#[async_trait]
impl HotelRecord for SeededHotel {
    fn address(&self) -> &str {
        &self.address
    }

    async fn attribute(&self, name: &str) -> Result<Option<Value>, SourceError> {
        Ok(match name {
            "manager" => self.manager.clone(),
            "created" => self.created.clone(),
            _ => None,
        })
    }

    async fn to_plain_object(&self, fields: &[FieldPath]) -> Result<PlainRecord, SourceError> {
        let root = self.documents.get(&self.data_ref).ok_or_else(|| {
            SourceError::Index(format!("registry entry {} cannot be read", self.data_ref))
        })?;
        let root = root
            .as_object()
            .ok_or_else(|| SourceError::Index(format!("registry entry {} is malformed", self.data_ref)))?;

        let requested: Vec<&str> = fields
            .iter()
            .map(|field| field.split('.').next().unwrap_or(field))
            .collect();

        let mut contents = BTreeMap::new();
        for (key, value) in root {
            let node = match value.as_str() {
                // A string backed by a document in the store is a pointer
                // slot; resolve it only when its group was requested.
                Some(reference) => match self.documents.get(reference) {
                    Some(document) if requested.contains(&key.as_str()) => {
                        Tree::pointer(Pointer::resolved(reference, Tree::from(document.clone())))
                    }
                    Some(_) => Tree::pointer(Pointer::unresolved(reference)),
                    // A dangling ref cannot resolve when its group is
                    // requested; otherwise it stays a plain leaf.
                    None if requested.contains(&key.as_str()) && reference.contains("://") => {
                        return Err(SourceError::Document(format!("ref not found: {reference}")));
                    }
                    None => Tree::from(value.clone()),
                },
                None => Tree::from(value.clone()),
            };
            contents.insert(key.clone(), node);
        }

        Ok(PlainRecord {
            address: self.address.clone(),
            data: Pointer::resolved(&self.data_ref, Tree::Object(contents)),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn seed() -> String {
        json!({
            "hotels": [
                {"address": "0x01", "manager": "0xaa", "dataUri": "json://root-1"},
            ],
            "documents": {
                "json://root-1": {
                    "dataFormatVersion": "0.2.0",
                    "descriptionUri": "json://desc-1",
                    "notificationsUri": "https://notifications.example.com",
                },
                "json://desc-1": {"name": "Grand Hotel"},
            },
        })
        .to_string()
    }

    #[tokio::test]
    async fn enumerates_in_seed_order() {
        let index = MemoryIndex::from_json(&seed()).unwrap();
        let hotels = index.all_hotels().await.unwrap();
        assert_eq!(hotels.len(), 1);
        assert_eq!(hotels[0].address(), "0x01");
    }

    #[tokio::test]
    async fn materializes_only_requested_groups() {
        let index = MemoryIndex::from_json(&seed()).unwrap();
        let hotel = index.hotel("0x01").await.unwrap().unwrap();

        let plain = hotel
            .to_plain_object(&["descriptionUri.name".to_string()])
            .await
            .unwrap();
        let contents = plain.data.contents().unwrap();

        match contents.get("descriptionUri") {
            Some(Tree::Pointer(pointer)) => {
                assert!(pointer.contents().is_some());
            }
            other => panic!("expected a resolved pointer, got {other:?}"),
        }
        // unrequested plain-URL attribute stays a leaf
        assert_eq!(
            contents.get("notificationsUri"),
            Some(&Tree::Leaf(json!("https://notifications.example.com")))
        );
    }

    #[tokio::test]
    async fn unrequested_groups_stay_unresolved() {
        let index = MemoryIndex::from_json(&seed()).unwrap();
        let hotel = index.hotel("0x01").await.unwrap().unwrap();

        let plain = hotel.to_plain_object(&[]).await.unwrap();
        let contents = plain.data.contents().unwrap();
        match contents.get("descriptionUri") {
            Some(Tree::Pointer(pointer)) => assert!(pointer.contents().is_none()),
            other => panic!("expected an unresolved pointer, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn missing_root_document_is_an_index_error() {
        let index = MemoryIndex::from_json(
            &json!({
                "hotels": [{"address": "0x02", "dataUri": "json://missing"}],
                "documents": {},
            })
            .to_string(),
        )
        .unwrap();
        let hotel = index.hotel("0x02").await.unwrap().unwrap();

        let err = hotel
            .to_plain_object(&["descriptionUri.name".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Index(_)));
    }

    #[tokio::test]
    async fn dangling_group_ref_is_a_document_error() {
        let index = MemoryIndex::from_json(
            &json!({
                "hotels": [{"address": "0x03", "dataUri": "json://root-3"}],
                "documents": {
                    "json://root-3": {"descriptionUri": "json://gone"},
                },
            })
            .to_string(),
        )
        .unwrap();
        let hotel = index.hotel("0x03").await.unwrap().unwrap();

        let err = hotel
            .to_plain_object(&["descriptionUri.name".to_string()])
            .await
            .unwrap_err();
        assert!(matches!(err, SourceError::Document(_)));
    }

    #[tokio::test]
    async fn unknown_address_is_none() {
        let index = MemoryIndex::from_json(&seed()).unwrap();
        assert!(index.hotel("0xff").await.unwrap().is_none());
    }
}
