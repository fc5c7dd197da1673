use std::fmt;
use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::Path;

use tracing::info;

use crate::game_tree::{GameTree, NodeId};

#[derive(Debug)]
pub enum StorageError {
    Io(std::io::Error),
    Format(serde_json::Error),
    Corrupt,
    /// JSON has no encoding for NaN or infinities.
    NonFinite(NodeId),
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Io(e) => write!(f, "io error: {e}"),
            StorageError::Format(e) => write!(f, "malformed tree file: {e}"),
            StorageError::Corrupt => write!(f, "tree structure is inconsistent"),
            StorageError::NonFinite(id) => write!(f, "node {id} has a non-finite value"),
        }
    }
}

impl std::error::Error for StorageError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            StorageError::Io(e) => Some(e),
            StorageError::Format(e) => Some(e),
            StorageError::Corrupt | StorageError::NonFinite(_) => None,
        }
    }
}

impl From<std::io::Error> for StorageError {
    fn from(e: std::io::Error) -> Self {
        StorageError::Io(e)
    }
}

impl From<serde_json::Error> for StorageError {
    fn from(e: serde_json::Error) -> Self {
        StorageError::Format(e)
    }
}

fn ensure_finite(tree: &GameTree) -> Result<(), StorageError> {
    match tree.nodes().iter().position(|n| !n.value.is_finite()) {
        Some(id) => Err(StorageError::NonFinite(id)),
        None => Ok(()),
    }
}

/// Fails before writing anything if a node value could not be read back.
pub fn to_writer<W: Write>(tree: &GameTree, writer: W) -> Result<(), StorageError> {
    ensure_finite(tree)?;
    serde_json::to_writer(writer, tree)?;
    Ok(())
}

pub fn from_reader<R: Read>(reader: R) -> Result<GameTree, StorageError> {
    let tree: GameTree = serde_json::from_reader(reader)?;
    if !tree.is_well_formed() {
        return Err(StorageError::Corrupt);
    }
    Ok(tree)
}

pub fn save_tree(tree: &GameTree, path: impl AsRef<Path>) -> Result<(), StorageError> {
    let path = path.as_ref();
    ensure_finite(tree)?;
    let mut writer = BufWriter::new(File::create(path)?);
    to_writer(tree, &mut writer)?;
    writer.flush()?;
    info!(path = %path.display(), nodes = tree.len(), "saved move tree");
    Ok(())
}

pub fn load_tree(path: impl AsRef<Path>) -> Result<GameTree, StorageError> {
    let path = path.as_ref();
    let tree = from_reader(BufReader::new(File::open(path)?))?;
    info!(path = %path.display(), nodes = tree.len(), "loaded move tree");
    Ok(tree)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::turn::Move;

    fn sample_tree() -> GameTree {
        let mut tree = GameTree::new();
        tree.insert_sequence(&[Move::play(1, (2, 2)), Move::play(2, (6, 6))], 1.0);
        tree.insert_sequence(&[Move::play(1, (2, 2)), Move::pass(2)], 0.0);
        tree.insert_sequence(&[Move::play(1, (4, 4))], 0.25);
        tree.update_aggregate_values();
        tree
    }

    #[test]
    fn file_roundtrip_is_exact() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        let tree = sample_tree();

        save_tree(&tree, &path).unwrap();
        let restored = load_tree(&path).unwrap();

        assert_eq!(restored, tree);
        assert_eq!(restored.to_string(), tree.to_string());
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_tree(dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, StorageError::Io(_)));
    }

    #[test]
    fn garbage_is_format_error() {
        let err = from_reader("not json".as_bytes()).unwrap_err();
        assert!(matches!(err, StorageError::Format(_)));
    }

    fn corrupted(edit: impl FnOnce(&mut serde_json::Value)) -> StorageError {
        let mut buf = Vec::new();
        to_writer(&sample_tree(), &mut buf).unwrap();
        let mut value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        edit(&mut value);
        from_reader(value.to_string().as_bytes()).unwrap_err()
    }

    #[test]
    fn child_listed_twice_is_rejected() {
        let err = corrupted(|v| v["nodes"][1]["children"] = serde_json::json!([2, 2, 3]));
        assert!(matches!(err, StorageError::Corrupt));
    }

    #[test]
    fn duplicate_sibling_move_is_rejected() {
        let err = corrupted(|v| v["nodes"][3]["mv"] = v["nodes"][2]["mv"].clone());
        assert!(matches!(err, StorageError::Corrupt));
    }

    #[test]
    fn wrong_depth_is_rejected() {
        let err = corrupted(|v| v["nodes"][2]["depth"] = serde_json::json!(40));
        assert!(matches!(err, StorageError::Corrupt));
    }

    #[test]
    fn non_finite_value_is_not_written() {
        let mut tree = sample_tree();
        let leaf = tree.insert_sequence(&[Move::play(1, (0, 0))], f64::INFINITY);

        let mut buf = Vec::new();
        let err = to_writer(&tree, &mut buf).unwrap_err();
        assert!(matches!(err, StorageError::NonFinite(id) if id == leaf));
        assert!(buf.is_empty());

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tree.json");
        assert!(matches!(save_tree(&tree, &path), Err(StorageError::NonFinite(_))));
        assert!(!path.exists());
    }

    #[test]
    fn inconsistent_tree_is_rejected() {
        let mut buf = Vec::new();
        to_writer(&sample_tree(), &mut buf).unwrap();
        let mut value: serde_json::Value = serde_json::from_slice(&buf).unwrap();
        value["nodes"][1]["parent"] = serde_json::json!(3);

        let err = from_reader(value.to_string().as_bytes()).unwrap_err();
        assert!(matches!(err, StorageError::Corrupt));
    }
}
