//! Error types for controller setup and content validation.

use thiserror::Error;

use super::data::KindId;

/// Fatal construction errors. The controller cannot run without input or a
/// way to spawn merge results, so these fail the build instead of being
/// absorbed at runtime.
#[derive(Debug, Error)]
pub enum SetupError {
    #[error("merge controller requires a pointer input source")]
    MissingInput,
    #[error("merge controller requires an item factory")]
    MissingFactory,
}

/// Problems found while loading or validating a kind library.
#[derive(Debug, Error)]
pub enum ContentError {
    #[error("failed to read kind library: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to parse kind library: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("kind {referenced_by:?} merges into unknown kind {kind:?}")]
    UnknownKind { kind: KindId, referenced_by: KindId },
    #[error("merge chain starting at kind {0:?} loops back on itself")]
    MergeCycle(KindId),
}
