mod block;
/// Unity class ids with a structural role.
pub mod class;
mod commit;
mod component;
mod document;
mod edit;
mod error;
mod guid;
mod hierarchy;
mod ids;
mod prefab;
mod property;
mod refs;
mod subtree;
mod templates;
mod text;
mod validate;

/// Block header and block container types.
pub use block::{BLOCK_MARKER, Block, BlockHeader};
/// Atomic commit protocol and edit session.
pub use commit::{CommitFs, CommitOptions, StdFs, UnityFile, backup_path, write_atomic, write_atomic_with};
/// Component add/remove/copy operations.
pub use component::{AddComponentOutcome, CopyComponentOutcome, RemoveComponentOutcome, add_component, copy_component, remove_component};
/// Ordered block document and lookup helpers.
pub use document::{Document, Selector, UNITY_PREAMBLE, read_unity_file};
/// Property edit operations.
pub use edit::{EditOutcome, TransformEdit, TransformOutcome, edit_component, edit_game_object, edit_transform, euler_to_quaternion, parse_vector};
/// Error and result aliases.
pub use error::{ErrorKind, Result, UnityError};
/// GUID cache interface and helpers.
pub use guid::{GuidCache, GuidResolver, generate_guid, meta_path, prefab_meta, read_meta_guid};
/// GameObject hierarchy operations.
pub use hierarchy::{CreateOutcome, DeleteOutcome, DuplicateOutcome, ReparentOutcome, create_game_object, delete_game_object, duplicate_game_object, reparent};
/// fileId allocation.
pub use ids::{ID_RANGE, IdAllocator, next_id};
/// Prefab variant and unpack operations.
pub use prefab::{SkippedModification, UnpackOutcome, VariantOutcome, create_variant, unpack_prefab};
/// Scoped property modification.
pub use property::{PropertyPath, apply_modification, effective_value, normalize_property};
/// Reference parsing and remapping.
pub use refs::{FileRef, references, remap, rename_anchor};
/// Subtree collection.
pub use subtree::{Subtree, collect};
/// Built-in component templates.
pub use templates::{BuiltinComponent, builtin_component};
/// YAML scalar rendering.
pub use text::yaml_scalar;
/// Integrity report and commit validation.
pub use validate::{IntegrityIssue, is_valid_guid, validate, validate_structure};
