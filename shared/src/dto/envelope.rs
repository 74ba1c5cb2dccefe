//! # Collection Envelopes
//!
//! The API serializes collections with reference-preserving JSON, which wraps
//! arrays as `{ "$values": [...] }`. Some endpoints return the envelope, some
//! a plain array, and the product listing nests the envelope under `data`.

use serde::{Deserialize, Serialize};

/// `{ "$values": [...] }`. Missing `$values` decodes as an empty list.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ValuesEnvelope<T> {
    #[serde(rename = "$values", default = "Vec::new")]
    pub values: Vec<T>,
}

/// A collection that is either wrapped in `$values` or sent as a plain array.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(untagged)]
pub enum ListPayload<T> {
    Plain(Vec<T>),
    Wrapped(ValuesEnvelope<T>),
}

impl<T> ListPayload<T> {
    pub fn into_vec(self) -> Vec<T> {
        match self {
            ListPayload::Plain(items) => items,
            ListPayload::Wrapped(envelope) => envelope.values,
        }
    }
}

/// `{ "data": { "$values": [...] } }`. Missing `data` decodes as an empty list.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DataEnvelope<T> {
    #[serde(default = "Option::default")]
    pub data: Option<ValuesEnvelope<T>>,
}

impl<T> DataEnvelope<T> {
    pub fn into_vec(self) -> Vec<T> {
        self.data.map(|d| d.values).unwrap_or_default()
    }
}
