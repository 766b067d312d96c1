//! Asset loading: the player model is the only asset the game waits on.
//!
//! Models are identified by a content hash of the file bytes. Only glTF
//! metadata is read (meshes, nodes, scene name); geometry stays with whatever
//! renderer consumes the handle.
//!
//! # Invariants
//! - A load either yields a handle or an error; it never panics on bad input.
//! - The same bytes always produce the same [`AssetId`].

use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::path::PathBuf;

/// Content-addressed asset ID computed from the asset data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct AssetId(pub u64);

impl AssetId {
    pub fn of_bytes(bytes: &[u8]) -> Self {
        let digest = Sha256::digest(bytes);
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        Self(u64::from_le_bytes(head))
    }
}

/// A loaded player model, ready to hand to a renderer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModelHandle {
    pub id: AssetId,
    pub name: String,
    pub mesh_count: usize,
    pub node_count: usize,
    /// Uniform scale applied when the model is placed.
    pub scale: f32,
}

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("glTF parse error: {0}")]
    GltfParse(String),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported glTF version {0}")]
    UnsupportedVersion(String),
}

/// Source of the player model. Loading happens once, before the frame loop.
pub trait ModelLoader {
    fn load_player_model(&mut self) -> Result<ModelHandle, AssetError>;
}

const GLB_MAGIC: &[u8; 4] = b"glTF";
const GLB_CHUNK_JSON: u32 = 0x4E4F_534A;
const GLB_HEADER_LEN: usize = 12;
const GLB_CHUNK_HEADER_LEN: usize = 8;

/// Loads a `.gltf` (JSON) or `.glb` (binary container) file from disk.
#[derive(Debug, Clone)]
pub struct GltfModelLoader {
    path: PathBuf,
    scale: f32,
}

impl GltfModelLoader {
    pub fn new(path: impl Into<PathBuf>, scale: f32) -> Self {
        Self {
            path: path.into(),
            scale,
        }
    }
}

impl ModelLoader for GltfModelLoader {
    fn load_player_model(&mut self) -> Result<ModelHandle, AssetError> {
        let bytes = std::fs::read(&self.path).map_err(|source| AssetError::Io {
            path: self.path.clone(),
            source,
        })?;
        let fallback = self
            .path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or("model");
        let handle = parse_model(&bytes, fallback, self.scale)?;
        tracing::info!(
            name = %handle.name,
            meshes = handle.mesh_count,
            nodes = handle.node_count,
            "player model loaded"
        );
        Ok(handle)
    }
}

/// Stand-in used when no model file is configured: a unit box car.
#[derive(Debug, Clone, Copy)]
pub struct PlaceholderModel {
    pub scale: f32,
}

impl ModelLoader for PlaceholderModel {
    fn load_player_model(&mut self) -> Result<ModelHandle, AssetError> {
        let name = "placeholder_box";
        Ok(ModelHandle {
            id: AssetId::of_bytes(name.as_bytes()),
            name: name.into(),
            mesh_count: 1,
            node_count: 1,
            scale: self.scale,
        })
    }
}

/// Extract model metadata from glTF JSON or GLB bytes.
pub fn parse_model(bytes: &[u8], fallback_name: &str, scale: f32) -> Result<ModelHandle, AssetError> {
    let json_bytes = if bytes.starts_with(GLB_MAGIC) {
        glb_json_chunk(bytes)?
    } else {
        bytes
    };
    let json: serde_json::Value = serde_json::from_slice(json_bytes)?;

    let version = json
        .get("asset")
        .and_then(|a| a.get("version"))
        .and_then(|v| v.as_str())
        .ok_or_else(|| AssetError::GltfParse("missing asset.version".into()))?;
    if !version.starts_with('2') {
        return Err(AssetError::UnsupportedVersion(version.into()));
    }

    let count = |key: &str| {
        json.get(key)
            .and_then(|v| v.as_array())
            .map_or(0, |a| a.len())
    };

    let scene_index = json.get("scene").and_then(|s| s.as_u64()).unwrap_or(0) as usize;
    let name = json
        .get("scenes")
        .and_then(|s| s.get(scene_index))
        .and_then(|s| s.get("name"))
        .and_then(|n| n.as_str())
        .unwrap_or(fallback_name)
        .to_string();

    Ok(ModelHandle {
        id: AssetId::of_bytes(bytes),
        name,
        mesh_count: count("meshes"),
        node_count: count("nodes"),
        scale,
    })
}

fn read_u32(bytes: &[u8], offset: usize) -> Result<u32, AssetError> {
    bytes
        .get(offset..offset + 4)
        .and_then(|b| b.try_into().ok())
        .map(u32::from_le_bytes)
        .ok_or_else(|| AssetError::GltfParse(format!("GLB truncated at byte {offset}")))
}

/// Slice out the JSON chunk of a GLB container.
fn glb_json_chunk(bytes: &[u8]) -> Result<&[u8], AssetError> {
    let version = read_u32(bytes, 4)?;
    if version != 2 {
        return Err(AssetError::UnsupportedVersion(version.to_string()));
    }
    let total = read_u32(bytes, 8)? as usize;
    if total > bytes.len() {
        return Err(AssetError::GltfParse(format!(
            "GLB declares {total} bytes but only {} present",
            bytes.len()
        )));
    }
    let chunk_len = read_u32(bytes, GLB_HEADER_LEN)? as usize;
    let chunk_type = read_u32(bytes, GLB_HEADER_LEN + 4)?;
    if chunk_type != GLB_CHUNK_JSON {
        return Err(AssetError::GltfParse("first GLB chunk is not JSON".into()));
    }
    let start = GLB_HEADER_LEN + GLB_CHUNK_HEADER_LEN;
    bytes
        .get(start..start + chunk_len)
        .ok_or_else(|| AssetError::GltfParse("GLB JSON chunk overruns the file".into()))
}

pub fn crate_info() -> &'static str {
    "gemdrive-assets v0.1.0"
}
