use thiserror::Error;

/// Crate-local result type.
pub type Result<T> = std::result::Result<T, UnityError>;

/// Coarse error classification surfaced in operation results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
	/// File, object, component, transform or parent is absent.
	NotFound,
	/// Target already exists and may not be duplicated.
	AlreadyExists,
	/// Caller-supplied argument is malformed or out of range.
	InvalidInput,
	/// Requested mutation would break the hierarchy or ownership model.
	StructuralViolation,
	/// Cross-file reference could not be resolved.
	UnresolvedReference,
	/// Post-mutation integrity check rejected the document.
	ValidationFailed,
	/// Read or write failure.
	IoFailure,
}

impl ErrorKind {
	/// Stable snake_case label.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::NotFound => "not_found",
			Self::AlreadyExists => "already_exists",
			Self::InvalidInput => "invalid_input",
			Self::StructuralViolation => "structural_violation",
			Self::UnresolvedReference => "unresolved_reference",
			Self::ValidationFailed => "validation_failed",
			Self::IoFailure => "io_failure",
		}
	}
}

/// Errors produced while loading, editing, validating and writing Unity documents.
#[derive(Debug, Error)]
pub enum UnityError {
	/// Filesystem failure.
	#[error("io: {0}")]
	Io(#[from] std::io::Error),
	/// Input file does not exist.
	#[error("file not found: {path}")]
	FileNotFound {
		/// Offending path.
		path: String,
	},
	/// A `--- !u!` line did not match the block header grammar.
	#[error("malformed block header at line {line}: {text:?}")]
	MalformedHeader {
		/// 1-based line number.
		line: usize,
		/// Header text as found.
		text: String,
	},
	/// No GameObject matched the selector.
	#[error("GameObject not found: {selector}")]
	GameObjectNotFound {
		/// Name or fileId used for the lookup.
		selector: String,
	},
	/// GameObject has no Transform or RectTransform component.
	#[error("GameObject {game_object} has no Transform")]
	TransformNotFound {
		/// Owning GameObject fileId.
		game_object: i64,
	},
	/// No block carries the requested fileId.
	#[error("no object with fileID {file_id}")]
	ObjectNotFound {
		/// Requested fileId.
		file_id: i64,
	},
	/// Parent lookup for create/reparent failed.
	#[error("parent not found: {selector}")]
	ParentNotFound {
		/// Name or fileId used for the lookup.
		selector: String,
	},
	/// No PrefabInstance matched the selector.
	#[error("PrefabInstance not found: {selector}")]
	PrefabInstanceNotFound {
		/// Name or fileId used for the lookup.
		selector: String,
	},
	/// Property path does not address anything in the block.
	#[error("property {path} not found on fileID {file_id}")]
	PropertyNotFound {
		/// Block fileId.
		file_id: i64,
		/// Requested property path.
		path: String,
	},
	/// Component already present and only one instance is allowed.
	#[error("{game_object} already has a {component}")]
	ComponentExists {
		/// Target GameObject fileId.
		game_object: i64,
		/// Component type name.
		component: String,
	},
	/// Output asset already exists.
	#[error("file already exists: {path}")]
	FileExists {
		/// Offending path.
		path: String,
	},
	/// Object name is empty.
	#[error("name must not be empty")]
	EmptyName,
	/// Array index out of range for a property path.
	#[error("index {index} out of range for {path} (len={len})")]
	IndexOutOfRange {
		/// Property path.
		path: String,
		/// Requested index.
		index: usize,
		/// Current sequence length.
		len: usize,
	},
	/// Vector literal did not parse as `x,y,z`.
	#[error("invalid vector {value:?}, expected x,y,z")]
	InvalidVector {
		/// User-provided literal.
		value: String,
	},
	/// Generic malformed argument.
	#[error("invalid argument: {message}")]
	InvalidArgument {
		/// Description of the problem.
		message: String,
	},
	/// Reparent would make a Transform its own ancestor.
	#[error("cannot parent {child} under {target}: target is the object itself or one of its descendants")]
	HierarchyCycle {
		/// Transform being moved.
		child: i64,
		/// Requested new father Transform.
		target: i64,
	},
	/// Component operation targeted a GameObject or Transform block.
	#[error("fileID {file_id} is a {type_name}; use delete/duplicate for GameObjects and Transforms")]
	ProtectedComponent {
		/// Targeted fileId.
		file_id: i64,
		/// Block type name.
		type_name: String,
	},
	/// Operation requires a GUID cache but none was supplied.
	#[error("no GUID cache available; set a project root or pass a cache file")]
	GuidCacheMissing,
	/// GUID is not present in the cache.
	#[error("guid {guid} not found in GUID cache")]
	GuidNotFound {
		/// Unresolved GUID.
		guid: String,
	},
	/// Component name is neither built-in nor a known script.
	#[error("unknown component or script: {name}")]
	ScriptNotFound {
		/// Requested component name.
		name: String,
	},
	/// Source asset could not be read or has no usable meta file.
	#[error("cannot read source asset {path}: {reason}")]
	SourceUnreadable {
		/// Source asset path.
		path: String,
		/// Underlying reason.
		reason: String,
	},
	/// Rendered document failed the commit validation pass.
	#[error("validation failed: {reason}")]
	Validation {
		/// Human-readable failure reason.
		reason: String,
	},
}

impl UnityError {
	/// Classification used in structured operation results.
	pub fn kind(&self) -> ErrorKind {
		match self {
			Self::Io(_) => ErrorKind::IoFailure,
			Self::FileNotFound { .. }
			| Self::GameObjectNotFound { .. }
			| Self::TransformNotFound { .. }
			| Self::ObjectNotFound { .. }
			| Self::ParentNotFound { .. }
			| Self::PrefabInstanceNotFound { .. }
			| Self::PropertyNotFound { .. } => ErrorKind::NotFound,
			Self::ComponentExists { .. } | Self::FileExists { .. } => ErrorKind::AlreadyExists,
			Self::MalformedHeader { .. }
			| Self::EmptyName
			| Self::IndexOutOfRange { .. }
			| Self::InvalidVector { .. }
			| Self::InvalidArgument { .. } => ErrorKind::InvalidInput,
			Self::HierarchyCycle { .. } | Self::ProtectedComponent { .. } => ErrorKind::StructuralViolation,
			Self::GuidCacheMissing | Self::GuidNotFound { .. } | Self::ScriptNotFound { .. } | Self::SourceUnreadable { .. } => {
				ErrorKind::UnresolvedReference
			}
			Self::Validation { .. } => ErrorKind::ValidationFailed,
		}
	}
}
