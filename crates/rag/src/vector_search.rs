//! Vector Search thin adapter (§4.10). Grounded on
//! `rag/src/vector_store.rs`.

use async_trait::async_trait;
use qdrant_client::qdrant::value::Kind;
use qdrant_client::qdrant::{
    condition::ConditionOneOf, r#match::MatchValue, Condition, FieldCondition, Filter, Match,
    Range, SearchPointsBuilder,
};
use qdrant_client::Qdrant;

use qprep_config::VectorIndexConfig;
use qprep_core::{CoreError, Embedding, SearchFilter, SearchHit, VectorSearch};

pub struct QdrantVectorSearch {
    client: Qdrant,
    collection: String,
}

impl QdrantVectorSearch {
    pub fn connect(config: &VectorIndexConfig, endpoint: &str) -> Result<Self, CoreError> {
        let mut builder = Qdrant::from_url(endpoint);
        if let Some(api_key) = &config.api_key {
            builder = builder.api_key(api_key.clone());
        }
        let client = builder
            .build()
            .map_err(|e| CoreError::VectorSearchBackend(e.to_string()))?;

        Ok(Self {
            client,
            collection: config.name.clone(),
        })
    }
}

fn build_filter(filter: &SearchFilter) -> Filter {
    let mut must = Vec::new();

    if let Some(category) = &filter.category_eq {
        must.push(Condition {
            condition_one_of: Some(ConditionOneOf::Field(FieldCondition {
                key: "category".to_string(),
                r#match: Some(Match {
                    match_value: Some(MatchValue::Keyword(category.clone())),
                }),
                ..Default::default()
            })),
        });
    }

    if let Some(price_lte) = filter.price_lte {
        must.push(Condition {
            condition_one_of: Some(ConditionOneOf::Field(FieldCondition {
                key: "price".to_string(),
                range: Some(Range {
                    lte: Some(price_lte),
                    ..Default::default()
                }),
                ..Default::default()
            })),
        });
    }

    Filter {
        must,
        ..Default::default()
    }
}

#[async_trait]
impl VectorSearch for QdrantVectorSearch {
    async fn search(
        &self,
        embedding: &Embedding,
        top_k: usize,
        filter: Option<&SearchFilter>,
    ) -> Result<Vec<SearchHit>, CoreError> {
        let mut builder =
            SearchPointsBuilder::new(&self.collection, embedding.as_slice().to_vec(), top_k as u64)
                .with_payload(true);

        if let Some(filter) = filter {
            builder = builder.filter(build_filter(filter));
        }

        let response = self
            .client
            .search_points(builder)
            .await
            .map_err(|e| CoreError::VectorSearchBackend(e.to_string()))?;

        let hits = response
            .result
            .into_iter()
            .map(|point| {
                let mut metadata = serde_json::Map::new();
                for (key, value) in point.payload {
                    if let Some(Kind::StringValue(s)) = value.kind {
                        metadata.insert(key, serde_json::Value::String(s));
                    }
                }

                let id = point
                    .id
                    .map(|pid| match pid.point_id_options {
                        Some(qdrant_client::qdrant::point_id::PointIdOptions::Uuid(u)) => u,
                        Some(qdrant_client::qdrant::point_id::PointIdOptions::Num(n)) => n.to_string(),
                        None => String::new(),
                    })
                    .unwrap_or_default();

                SearchHit {
                    id,
                    score: point.score,
                    metadata: serde_json::Value::Object(metadata),
                }
            })
            .collect();

        Ok(hits)
    }
}
