//! JSON bodies exchanged over HTTP
//!
//! JSON has no literal for infinities or NaN. Vector elements are written as
//! numbers when finite and as the strings `"inf"`, `"-inf"` and `"NaN"`
//! otherwise; both forms are accepted on input.

use crate::types::BackendKind;
use serde::{Deserialize, Serialize};

/// Request body for `POST /add`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddRequest {
    #[serde(with = "ieee_vec")]
    pub array1: Vec<f32>,
    #[serde(with = "ieee_vec")]
    pub array2: Vec<f32>,
}

/// Success body for `POST /add`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AddResponse {
    #[serde(with = "ieee_vec")]
    pub result: Vec<f32>,
    /// `"Accelerated"` or `"Scalar"`
    pub computation_mode: BackendKind,
}

/// Error body: `{"error": {"code": "...", "message": "..."}}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: ErrorDetail,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorDetail {
    pub code: String,
    pub message: String,
}

impl ErrorBody {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: ErrorDetail {
                code: code.into(),
                message: message.into(),
            },
        }
    }
}

/// `f32` vectors with non-finite elements carried as string tags.
pub mod ieee_vec {
    use serde::de::Error as _;
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};

    pub const INF: &str = "inf";
    pub const NEG_INF: &str = "-inf";
    pub const NAN: &str = "NaN";

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Element {
        Number(f32),
        Tag(String),
    }

    pub fn serialize<S>(values: &[f32], serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        let mut seq = serializer.serialize_seq(Some(values.len()))?;
        for &v in values {
            if v.is_finite() {
                seq.serialize_element(&v)?;
            } else if v.is_nan() {
                seq.serialize_element(NAN)?;
            } else if v > 0.0 {
                seq.serialize_element(INF)?;
            } else {
                seq.serialize_element(NEG_INF)?;
            }
        }
        seq.end()
    }

    pub fn deserialize<'de, D>(deserializer: D) -> Result<Vec<f32>, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<Element>::deserialize(deserializer)?
            .into_iter()
            .map(|e| match e {
                Element::Number(v) => Ok(v),
                Element::Tag(tag) => match tag.as_str() {
                    INF => Ok(f32::INFINITY),
                    NEG_INF => Ok(f32::NEG_INFINITY),
                    NAN => Ok(f32::NAN),
                    other => Err(D::Error::custom(format!(
                        "invalid float tag {other:?}, expected a number, \"inf\", \"-inf\" or \"NaN\""
                    ))),
                },
            })
            .collect()
    }
}
