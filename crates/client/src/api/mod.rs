//! Typed operations per backend resource.
//!
//! Each module extends [`crate::ApiClient`] with the operations for one
//! resource. Raw payloads come back as `serde_json::Value` and pass through
//! [`crate::conversions`] before anything else sees them.

pub mod categories;
pub mod customers;
pub mod orders;
pub mod plans;
pub mod products;

/// Some endpoints return a bare payload, others wrap it in a
/// `{"message": ..., "data": ...}` envelope; both decode transparently.
#[derive(Debug, serde::Deserialize)]
#[serde(untagged)]
pub(crate) enum MaybeWrapped<T> {
    Wrapped { data: T },
    Direct(T),
}

impl<T> MaybeWrapped<T> {
    pub(crate) fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Direct(value) => value,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::Value;

    #[test]
    fn test_direct_payload_decodes() {
        let wrapped: MaybeWrapped<Vec<Value>> =
            serde_json::from_str("[1, 2]").expect("deserialize");
        assert_eq!(wrapped.into_inner().len(), 2);
    }

    #[test]
    fn test_enveloped_payload_decodes() {
        let wrapped: MaybeWrapped<Vec<Value>> =
            serde_json::from_str(r#"{"message": "ok", "data": [1, 2, 3]}"#)
                .expect("deserialize");
        assert_eq!(wrapped.into_inner().len(), 3);
    }
}
