use std::collections::{HashMap, HashSet};
use std::fmt;

use crate::unity::refs::references;
use crate::unity::{Document, Result, UnityError, class};

/// One violated document invariant.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum IntegrityIssue {
	/// A block uses fileId 0.
	ZeroFileId,
	/// Two blocks share a fileId.
	DuplicateFileId {
		/// Repeated id.
		file_id: i64,
	},
	/// Local reference to an id no block carries.
	DanglingReference {
		/// Block holding the reference.
		from: i64,
		/// Missing target.
		to: i64,
	},
	/// `child.m_Father` names `father`, but `father.m_Children` does not list it.
	MissingChildEntry {
		/// Father Transform.
		father: i64,
		/// Child Transform.
		child: i64,
	},
	/// `father.m_Children` lists `child`, whose `m_Father` points elsewhere.
	ChildFatherMismatch {
		/// Listing Transform.
		father: i64,
		/// Listed Transform.
		child: i64,
	},
	/// Component's `m_GameObject` owner does not list it.
	UnlistedComponent {
		/// Owner named by the component.
		game_object: i64,
		/// Component id.
		component: i64,
	},
	/// GameObject lists a component owned by another object.
	ForeignComponent {
		/// Listing GameObject.
		game_object: i64,
		/// Component id.
		component: i64,
	},
	/// Transform is its own ancestor.
	HierarchyCycle {
		/// Transform on the cycle.
		transform: i64,
	},
}

impl fmt::Display for IntegrityIssue {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Self::ZeroFileId => f.write_str("block with fileID 0"),
			Self::DuplicateFileId { file_id } => write!(f, "duplicate fileID {file_id}"),
			Self::DanglingReference { from, to } => write!(f, "{from} references missing fileID {to}"),
			Self::MissingChildEntry { father, child } => write!(f, "{father} does not list child {child}"),
			Self::ChildFatherMismatch { father, child } => write!(f, "{father} lists {child} whose m_Father differs"),
			Self::UnlistedComponent { game_object, component } => write!(f, "{game_object} does not list component {component}"),
			Self::ForeignComponent { game_object, component } => write!(f, "{game_object} lists component {component} owned elsewhere"),
			Self::HierarchyCycle { transform } => write!(f, "hierarchy cycle through {transform}"),
		}
	}
}

impl Document {
	/// Check the id, reference, hierarchy and ownership invariants.
	///
	/// Stripped fathers and owners are prefab-instance placeholders and are not reported.
	pub fn integrity_issues(&self) -> Vec<IntegrityIssue> {
		let mut issues = Vec::new();
		let mut seen = HashSet::new();
		for block in self.blocks() {
			if block.file_id == 0 {
				issues.push(IntegrityIssue::ZeroFileId);
			} else if !seen.insert(block.file_id) {
				issues.push(IntegrityIssue::DuplicateFileId { file_id: block.file_id });
			}
		}

		for block in self.blocks() {
			for found in references(block.text()) {
				if found.is_local() && !seen.contains(&found.file_id) {
					issues.push(IntegrityIssue::DanglingReference {
						from: block.file_id,
						to: found.file_id,
					});
				}
			}
		}

		let children: HashMap<i64, Vec<i64>> = self
			.blocks()
			.iter()
			.filter(|block| block.is_transform() && !block.stripped)
			.map(|block| (block.file_id, block.children_ids()))
			.collect();
		let components: HashMap<i64, Vec<i64>> = self
			.blocks()
			.iter()
			.filter(|block| block.is_game_object() && !block.stripped)
			.map(|block| (block.file_id, block.component_ids()))
			.collect();

		for block in self.blocks().iter().filter(|block| block.is_transform() && !block.stripped) {
			let father = block.father_id();
			if let Some(listed) = children.get(&father) {
				if !listed.contains(&block.file_id) {
					issues.push(IntegrityIssue::MissingChildEntry {
						father,
						child: block.file_id,
					});
				}
			}
			for child in children.get(&block.file_id).into_iter().flatten() {
				if let Some(child_block) = self.get(*child).filter(|item| !item.stripped) {
					if child_block.father_id() != block.file_id {
						issues.push(IntegrityIssue::ChildFatherMismatch {
							father: block.file_id,
							child: *child,
						});
					}
				}
			}
		}

		for (game_object, listed) in &components {
			for component in listed {
				if let Some(found) = self.get(*component) {
					if found.game_object_id() != *game_object {
						issues.push(IntegrityIssue::ForeignComponent {
							game_object: *game_object,
							component: *component,
						});
					}
				}
			}
		}
		for block in self.blocks() {
			if block.stripped || block.is_game_object() || block.class_id == class::PREFAB_INSTANCE {
				continue;
			}
			let owner = block.game_object_id();
			if let Some(listed) = components.get(&owner) {
				if !listed.contains(&block.file_id) {
					issues.push(IntegrityIssue::UnlistedComponent {
						game_object: owner,
						component: block.file_id,
					});
				}
			}
		}

		for start in children.keys() {
			let mut visited = HashSet::new();
			let mut current = *start;
			while current != 0 && visited.insert(current) {
				current = self.get(current).filter(|block| block.is_transform()).map_or(0, |block| block.father_id());
				if current == *start {
					issues.push(IntegrityIssue::HierarchyCycle { transform: *start });
					break;
				}
			}
		}

		issues
	}
}

/// Whether `guid` is 32 lowercase hex characters.
pub fn is_valid_guid(guid: &str) -> bool {
	guid.len() == 32 && guid.bytes().all(|byte| byte.is_ascii_digit() || (b'a'..=b'f').contains(&byte))
}

/// Structural checks on the text about to be written.
pub fn validate_structure(doc: &Document) -> Result<()> {
	if !doc.preamble.contains("%YAML 1.1") || !doc.preamble.contains("%TAG !u! tag:unity3d.com,2011:") {
		return Err(UnityError::Validation {
			reason: "missing %YAML/%TAG header".to_owned(),
		});
	}

	let rendered = doc.render();
	let reparsed = Document::parse(&rendered).map_err(|err| UnityError::Validation {
		reason: format!("output does not re-parse: {err}"),
	})?;
	let expected: Vec<i64> = doc.blocks().iter().map(|block| block.file_id).collect();
	let actual: Vec<i64> = reparsed.blocks().iter().map(|block| block.file_id).collect();
	if expected != actual {
		return Err(UnityError::Validation {
			reason: format!("unbalanced block markers: expected {} blocks, found {}", expected.len(), actual.len()),
		});
	}

	if let Some(bad) = references(&rendered).into_iter().filter_map(|found| found.guid).find(|guid| !is_valid_guid(guid)) {
		return Err(UnityError::Validation {
			reason: format!("malformed guid {bad:?}"),
		});
	}

	let mut seen = HashSet::new();
	for id in expected {
		if id == 0 || !seen.insert(id) {
			return Err(UnityError::Validation {
				reason: format!("fileID {id} is zero or not unique"),
			});
		}
	}
	Ok(())
}

/// Structural checks plus rejection of integrity issues absent from `baseline`.
pub fn validate(doc: &Document, baseline: &HashSet<IntegrityIssue>) -> Result<()> {
	validate_structure(doc)?;
	if let Some(issue) = doc.integrity_issues().into_iter().find(|issue| !baseline.contains(issue)) {
		return Err(UnityError::Validation { reason: issue.to_string() });
	}
	Ok(())
}
