//! Blob interpreter tests: feedstock-output and import-map payloads.

use chandb::blob::{parse_feedstock_blob, parse_import_map_blob};
use chandb::error::BlobError;

// --- feedstock-output blobs ---

#[test]
fn test_feedstock_blob_single_key() {
    let feedstocks =
        parse_feedstock_blob(br#"{"feedstocks": ["feedstock1", "feedstock2"]}"#).unwrap();
    assert_eq!(feedstocks, vec!["feedstock1", "feedstock2"]);
}

#[test]
fn test_feedstock_blob_empty_list() {
    let feedstocks = parse_feedstock_blob(br#"{"feedstocks": []}"#).unwrap();
    assert!(feedstocks.is_empty());
}

#[test]
fn test_feedstock_blob_zero_keys_rejected() {
    let err = parse_feedstock_blob(b"{}").unwrap_err();
    assert!(matches!(err, BlobError::AmbiguousShape { found: 0 }));
}

#[test]
fn test_feedstock_blob_two_keys_rejected() {
    let err = parse_feedstock_blob(br#"{"a": ["x"], "b": ["y"]}"#).unwrap_err();
    assert!(matches!(err, BlobError::AmbiguousShape { found: 2 }));
}

#[test]
fn test_feedstock_blob_invalid_json() {
    let err = parse_feedstock_blob(b"not json at all").unwrap_err();
    assert!(matches!(err, BlobError::Json(_)));
}

// --- import-map blobs ---

#[test]
fn test_import_map_inversion() {
    let blob = br#"{
        "np": {"elements": ["numpy"]},
        "np.linalg": {"elements": ["numpy"]},
        "scipy.stats": {"elements": ["scipy"]}
    }"#;
    let map = parse_import_map_blob(blob).unwrap();
    assert_eq!(map.len(), 2);
    assert_eq!(map["numpy"], vec!["np", "np.linalg"]);
    assert_eq!(map["scipy"], vec!["scipy.stats"]);
}

#[test]
fn test_import_map_shared_import() {
    // One import provided by two packages lands under both.
    let blob = br#"{"cv2": {"elements": ["opencv", "opencv-python"]}}"#;
    let map = parse_import_map_blob(blob).unwrap();
    assert_eq!(map["opencv"], vec!["cv2"]);
    assert_eq!(map["opencv-python"], vec!["cv2"]);
}

#[test]
fn test_import_map_missing_elements_rejected() {
    let err = parse_import_map_blob(br#"{"np": {"items": ["numpy"]}}"#).unwrap_err();
    assert!(matches!(err, BlobError::Json(_)));
}

#[test]
fn test_import_map_empty_blob() {
    let map = parse_import_map_blob(b"{}").unwrap();
    assert!(map.is_empty());
}
