//! Versioned wire-format type registry
//!
//! Chain runtimes evolve; the shape of the data on the wire is selected by an
//! integer spec version. A [`TypeRegistry`] holds, per spec name, an ordered
//! list of version ranges and the type definitions valid inside each range.
//! Misconfigured tables (overlaps, gaps, a bounded final range) are rejected
//! when the registry is built, never at lookup time, so a bad table cannot
//! silently misdecode wire data.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use serde_json::{json, Value};

use crate::error::TypesError;

/// A set of wire-format type definitions, keyed by type name
pub type TypeSet = serde_json::Map<String, Value>;

/// One version range and the type definitions valid inside it.
///
/// Bounds are inclusive; `max: None` means the range is open-ended upward.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct VersionRange {
    pub min: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
    pub types: TypeSet,
}

/// Immutable registry of versioned type definitions.
///
/// Built once at process start; reads are lock-free and safe from any number
/// of threads.
///
/// # Examples
/// ```
/// use lib_didresolver::TypeRegistry;
///
/// let registry = TypeRegistry::bundled();
/// let low = registry.types_for("dock-main-runtime", 10).unwrap();
/// let high = registry.types_for("dock-main-runtime", 23).unwrap();
/// assert_ne!(low, high);
/// ```
#[derive(Debug, Clone)]
pub struct TypeRegistry {
    specs: HashMap<String, Vec<VersionRange>>,
}

impl TypeRegistry {
    /// Validates and builds a registry from a range table.
    ///
    /// Per spec name, the ranges are sorted by `min` and must tile the
    /// version line without overlap or gap from the lowest `min` upward; the
    /// final range must be open-ended.
    ///
    /// # Errors
    /// [`TypesError`] naming the first violation found.
    pub fn new(table: HashMap<String, Vec<VersionRange>>) -> Result<Self, TypesError> {
        let mut specs = HashMap::with_capacity(table.len());
        for (name, mut ranges) in table {
            if ranges.is_empty() {
                return Err(TypesError::Empty(name));
            }
            ranges.sort_by_key(|range| range.min);

            for range in &ranges {
                if let Some(max) = range.max {
                    if max < range.min {
                        return Err(TypesError::Inverted {
                            min: range.min,
                            max,
                        });
                    }
                }
            }
            for pair in ranges.windows(2) {
                let (prev, next) = (&pair[0], &pair[1]);
                match prev.max {
                    // an open-ended range covers everything above it
                    None => return Err(TypesError::Overlap(next.min)),
                    Some(max) if next.min <= max => return Err(TypesError::Overlap(next.min)),
                    Some(max) if next.min > max + 1 => return Err(TypesError::Gap(max + 1)),
                    Some(_) => {}
                }
            }
            if let Some(last) = ranges.last() {
                if last.max.is_some() {
                    return Err(TypesError::BoundedTail(name));
                }
            }
            specs.insert(name, ranges);
        }
        Ok(Self { specs })
    }

    /// The type definitions applicable to `version` of `spec`.
    ///
    /// # Errors
    /// [`TypesError::UnknownSpec`] when no table is registered under `spec`;
    /// [`TypesError::UnsupportedVersion`] when `version` predates the lowest
    /// registered range. There is no silent fallback to a default set.
    pub fn types_for(&self, spec: &str, version: u32) -> Result<&TypeSet, TypesError> {
        let ranges = self
            .specs
            .get(spec)
            .ok_or_else(|| TypesError::UnknownSpec(spec.to_string()))?;
        ranges
            .iter()
            .find(|range| {
                range.min <= version && range.max.map_or(true, |max| version <= max)
            })
            .map(|range| &range.types)
            .ok_or_else(|| TypesError::UnsupportedVersion {
                spec: spec.to_string(),
                version,
            })
    }

    /// The registered spec names, sorted
    pub fn specs(&self) -> Vec<&str> {
        let mut specs: Vec<&str> = self.specs.keys().map(String::as_str).collect();
        specs.sort();
        specs
    }

    /// The static table compiled into the crate, covering the dock main and
    /// test runtimes
    pub fn bundled() -> Self {
        let mut table = HashMap::new();
        table.insert(
            "dock-main-runtime".to_string(),
            vec![
                VersionRange {
                    min: 0,
                    max: Some(22),
                    types: object(json!({
                        "Did": "[u8; 32]",
                        "AccumulatorId": "[u8; 32]",
                        "BlobId": "[u8; 32]",
                        "Accumulator": {
                            "_enum": {
                                "Positive": "AccumulatorCommon",
                                "Universal": "UniversalAccumulator"
                            }
                        },
                        "StateChange": {
                            "_enum": {
                                "AddBlob": "Blob",
                                "AddAccumulator": "AddAccumulator"
                            }
                        }
                    })),
                },
                VersionRange {
                    min: 23,
                    max: None,
                    types: object(json!({
                        "Did": "[u8; 32]",
                        "AccumulatorId": "[u8; 32]",
                        "BlobId": "[u8; 32]",
                        "Accumulator": {
                            "_enum": {
                                "Positive": "AccumulatorCommon",
                                "Universal": "UniversalAccumulator",
                                "KBUniversal": "KBUniversalAccumulator"
                            }
                        },
                        "StateChange": {
                            "_enum": {
                                "AddBlob": "Blob",
                                "AddAccumulator": "AddAccumulator",
                                "RemoveAccumulator": "RemoveAccumulator",
                                "AddServiceEndpoint": "AddServiceEndpoint"
                            }
                        },
                        "ServiceEndpoint": {
                            "types": "ServiceEndpointType",
                            "origins": "Vec<Bytes>"
                        }
                    })),
                },
            ],
        );
        table.insert(
            "dock-test-runtime".to_string(),
            vec![
                VersionRange {
                    min: 1,
                    max: Some(44),
                    types: object(json!({
                        "Did": "[u8; 32]",
                        "BlobId": "[u8; 32]",
                        "Blob": { "id": "BlobId", "blob": "Vec<u8>" }
                    })),
                },
                VersionRange {
                    min: 45,
                    max: Some(58),
                    types: object(json!({
                        "Did": "[u8; 32]",
                        "BlobId": "[u8; 32]",
                        "Blob": { "id": "BlobId", "blob": "BoundedBytes" },
                        "AccumulatorId": "[u8; 32]"
                    })),
                },
                VersionRange {
                    min: 59,
                    max: None,
                    types: object(json!({
                        "Did": "[u8; 32]",
                        "BlobId": "[u8; 32]",
                        "Blob": { "id": "BlobId", "blob": "BoundedBytes" },
                        "AccumulatorId": "[u8; 32]",
                        "OffchainSignatureParams": "Vec<u8>"
                    })),
                },
            ],
        );
        Self::new(table).expect("bundled table tiles every version range; qed")
    }
}

fn object(value: Value) -> TypeSet {
    match value {
        Value::Object(map) => map,
        _ => unreachable!("object() is only called with json! object literals"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn range(min: u32, max: Option<u32>) -> VersionRange {
        VersionRange {
            min,
            max,
            types: object(json!({ "Marker": format!("v{min}") })),
        }
    }

    fn table(name: &str, ranges: Vec<VersionRange>) -> HashMap<String, Vec<VersionRange>> {
        HashMap::from([(name.to_string(), ranges)])
    }

    #[test]
    fn test_unique_match_per_version() {
        let registry = TypeRegistry::new(table(
            "spec",
            vec![range(0, Some(22)), range(23, None)],
        ))
        .unwrap();

        for version in 0..=22 {
            assert_eq!(
                registry.types_for("spec", version).unwrap()["Marker"],
                json!("v0")
            );
        }
        for version in [23, 24, 100, u32::MAX] {
            assert_eq!(
                registry.types_for("spec", version).unwrap()["Marker"],
                json!("v23")
            );
        }
    }

    #[test]
    fn test_below_lowest_min() {
        let registry = TypeRegistry::new(table("spec", vec![range(5, None)])).unwrap();
        assert_eq!(
            registry.types_for("spec", 4).unwrap_err(),
            TypesError::UnsupportedVersion {
                spec: "spec".to_string(),
                version: 4
            }
        );
        assert!(registry.types_for("spec", 5).is_ok());
    }

    #[test]
    fn test_unknown_spec() {
        let registry = TypeRegistry::new(table("spec", vec![range(0, None)])).unwrap();
        assert_eq!(
            registry.types_for("other", 0).unwrap_err(),
            TypesError::UnknownSpec("other".to_string())
        );
    }

    #[test]
    fn test_rejects_overlap() {
        let err = TypeRegistry::new(table(
            "spec",
            vec![range(0, Some(23)), range(23, None)],
        ))
        .unwrap_err();
        assert_eq!(err, TypesError::Overlap(23));

        // an open-ended range followed by anything overlaps
        let err = TypeRegistry::new(table("spec", vec![range(0, None), range(24, None)]))
            .unwrap_err();
        assert_eq!(err, TypesError::Overlap(24));
    }

    #[test]
    fn test_rejects_gap() {
        let err = TypeRegistry::new(table(
            "spec",
            vec![range(0, Some(10)), range(12, None)],
        ))
        .unwrap_err();
        assert_eq!(err, TypesError::Gap(11));
    }

    #[test]
    fn test_rejects_inverted() {
        let err = TypeRegistry::new(table("spec", vec![range(10, Some(5))])).unwrap_err();
        assert_eq!(err, TypesError::Inverted { min: 10, max: 5 });
    }

    #[test]
    fn test_rejects_bounded_tail() {
        let err = TypeRegistry::new(table("spec", vec![range(0, Some(10))])).unwrap_err();
        assert_eq!(err, TypesError::BoundedTail("spec".to_string()));
    }

    #[test]
    fn test_rejects_empty_spec() {
        let err = TypeRegistry::new(table("spec", vec![])).unwrap_err();
        assert_eq!(err, TypesError::Empty("spec".to_string()));
    }

    #[test]
    fn test_unsorted_input_is_sorted() {
        let registry = TypeRegistry::new(table(
            "spec",
            vec![range(23, None), range(0, Some(22))],
        ))
        .unwrap();
        assert_eq!(
            registry.types_for("spec", 3).unwrap()["Marker"],
            json!("v0")
        );
    }

    #[test]
    fn test_bundled_boundaries() {
        let registry = TypeRegistry::bundled();
        let low = registry.types_for("dock-main-runtime", 10).unwrap();
        let boundary = registry.types_for("dock-main-runtime", 22).unwrap();
        let high = registry.types_for("dock-main-runtime", 23).unwrap();
        assert_eq!(low, boundary);
        assert_ne!(low, high);
        assert_eq!(registry.specs(), vec!["dock-main-runtime", "dock-test-runtime"]);

        // the test runtime predates nothing below version 1
        assert_eq!(
            registry.types_for("dock-test-runtime", 0).unwrap_err(),
            TypesError::UnsupportedVersion {
                spec: "dock-test-runtime".to_string(),
                version: 0
            }
        );
    }
}
