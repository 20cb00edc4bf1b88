use log::info;

use crate::unity::text::yaml_scalar;
use crate::unity::{Document, FileRef, Result, Selector, UnityError, apply_modification, effective_value, normalize_property};

/// Result of a single-property edit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EditOutcome {
	/// Edited block.
	pub file_id: i64,
	/// Property as stored (after `m_` normalization).
	pub property: String,
	/// Serialized value written.
	pub value: String,
}

/// Local transform components to overwrite; `None` leaves a component alone.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct TransformEdit {
	/// `m_LocalPosition`.
	pub position: Option<[f64; 3]>,
	/// Euler angles in degrees, stored as `m_LocalRotation` and `m_LocalEulerAnglesHint`.
	pub rotation: Option<[f64; 3]>,
	/// `m_LocalScale`.
	pub scale: Option<[f64; 3]>,
}

impl TransformEdit {
	/// Whether nothing would change.
	pub fn is_empty(&self) -> bool {
		self.position.is_none() && self.rotation.is_none() && self.scale.is_none()
	}
}

/// Result of [`edit_transform`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TransformOutcome {
	/// Edited Transform.
	pub transform: i64,
	/// Position written.
	pub position: Option<[f64; 3]>,
	/// Quaternion written, `[x, y, z, w]`.
	pub rotation: Option<[f64; 4]>,
	/// Scale written.
	pub scale: Option<[f64; 3]>,
}

/// Parse an `x,y,z` literal.
pub fn parse_vector(value: &str) -> Result<[f64; 3]> {
	let invalid = || UnityError::InvalidVector { value: value.to_owned() };
	let parts: Vec<f64> = value
		.split(',')
		.map(|part| part.trim().parse::<f64>().ok().filter(|item| item.is_finite()))
		.collect::<Option<_>>()
		.ok_or_else(invalid)?;
	<[f64; 3]>::try_from(parts).map_err(|_| invalid())
}

/// Unity's `Quaternion.Euler`: degrees applied Z, then X, then Y.
pub fn euler_to_quaternion(euler: [f64; 3]) -> [f64; 4] {
	let [x, y, z] = euler.map(|deg| deg.to_radians() * 0.5);
	let (sx, cx) = x.sin_cos();
	let (sy, cy) = y.sin_cos();
	let (sz, cz) = z.sin_cos();
	[
		sx * cy * cz + cx * sy * sz,
		cx * sy * cz - sx * cy * sz,
		cx * cy * sz - sx * sy * cz,
		cx * cy * cz + sx * sy * sz,
	]
}

/// Float as Unity writes it: at most 7 decimals, no trailing zeros, no `-0`.
fn number(value: f64) -> String {
	let rounded = (value * 1e7).round() / 1e7;
	if rounded == 0.0 { "0".to_owned() } else { rounded.to_string() }
}

fn vector3([x, y, z]: [f64; 3]) -> String {
	format!("{{x: {}, y: {}, z: {}}}", number(x), number(y), number(z))
}

fn quaternion([x, y, z, w]: [f64; 4]) -> String {
	format!("{{x: {}, y: {}, z: {}, w: {}}}", number(x), number(y), number(z), number(w))
}

fn flag(property: &str, value: &str) -> Result<&'static str> {
	match value.trim().to_ascii_lowercase().as_str() {
		"1" | "true" => Ok("1"),
		"0" | "false" => Ok("0"),
		_ => Err(UnityError::InvalidArgument {
			message: format!("{property} expects true/false or 1/0, got {value:?}"),
		}),
	}
}

fn write_property(doc: &mut Document, file_id: i64, property: &str, value: &str, object_reference: Option<&FileRef>) -> Result<()> {
	let block = doc.require_mut(file_id)?;
	let text = apply_modification(block.text(), property, value, object_reference)?;
	block.set_text(text)
}

/// Set one GameObject property (`m_Name`, `m_TagString`, `m_Layer`, `m_IsActive`, ...).
pub fn edit_game_object(doc: &mut Document, selector: &Selector, property: &str, value: &str) -> Result<EditOutcome> {
	let block = doc.resolve_game_object(selector)?;
	let file_id = block.file_id;
	let property = normalize_property(block.text(), property);

	let value = match property.as_str() {
		"m_Name" if value.trim().is_empty() => return Err(UnityError::EmptyName),
		"m_Name" | "m_TagString" => yaml_scalar(value),
		"m_Layer" => match value.trim().parse::<u8>() {
			Ok(layer) if layer < 32 => layer.to_string(),
			_ => {
				return Err(UnityError::InvalidArgument {
					message: format!("layer must be 0..31, got {value:?}"),
				});
			}
		},
		"m_IsActive" => flag(&property, value)?.to_owned(),
		_ => value.to_owned(),
	};

	write_property(doc, file_id, &property, &value, None)?;
	info!("set {property} on {file_id}");
	Ok(EditOutcome { file_id, property, value })
}

/// Overwrite local position, rotation and/or scale of a GameObject's Transform.
pub fn edit_transform(doc: &mut Document, selector: &Selector, edit: &TransformEdit) -> Result<TransformOutcome> {
	if edit.is_empty() {
		return Err(UnityError::InvalidArgument {
			message: "nothing to change: give a position, rotation or scale".to_owned(),
		});
	}
	let transform = doc
		.resolve_transform(selector)
		.filter(|id| doc.get(*id).is_some_and(|block| !block.stripped))
		.ok_or_else(|| UnityError::GameObjectNotFound {
			selector: selector.to_string(),
		})?;

	if let Some(position) = edit.position {
		write_property(doc, transform, "m_LocalPosition", &vector3(position), None)?;
	}
	let rotation = edit.rotation.map(|euler| (euler, euler_to_quaternion(euler)));
	if let Some((euler, quat)) = rotation {
		write_property(doc, transform, "m_LocalRotation", &quaternion(quat), None)?;
		write_property(doc, transform, "m_LocalEulerAnglesHint", &vector3(euler), None)?;
	}
	if let Some(scale) = edit.scale {
		write_property(doc, transform, "m_LocalScale", &vector3(scale), None)?;
	}

	info!("edited transform {transform}");
	Ok(TransformOutcome {
		transform,
		position: edit.position,
		rotation: rotation.map(|(_, quat)| quat),
		scale: edit.scale,
	})
}

/// Apply a property path edit to any non-placeholder block.
pub fn edit_component(
	doc: &mut Document,
	component: i64,
	property: &str,
	value: &str,
	object_reference: Option<&FileRef>,
) -> Result<EditOutcome> {
	let block = doc.require(component)?;
	if block.stripped {
		return Err(UnityError::InvalidArgument {
			message: format!("fileID {component} is a prefab placeholder; edit the PrefabInstance instead"),
		});
	}
	let property = normalize_property(block.text(), property);
	write_property(doc, component, &property, value, object_reference)?;

	let written = effective_value(value, object_reference);
	info!("set {property} on {component}");
	Ok(EditOutcome {
		file_id: component,
		property,
		value: written,
	})
}
