use std::collections::HashMap;

use unidoc_testkit::fixture_text;

use crate::unity::{Document, GuidCache};

fn basic() -> Document {
	Document::parse(&fixture_text("basic.unity")).expect("fixture parses")
}

fn scripts() -> GuidCache {
	GuidCache::new(
		"/project",
		HashMap::from([
			("0a1b2c3d4e5f60718293a4b5c6d7e8f9".to_owned(), "Assets/Scripts/PlayerController.cs".to_owned()),
			("9e8d7c6b5a4938271605f4e3d2c1b0a9".to_owned(), "Assets/Scripts/LootDrop.cs".to_owned()),
		]),
	)
}

mod add {
	use super::{basic, scripts};
	use crate::unity::{GuidResolver, Selector, UnityError, add_component};

	#[test]
	fn builtin_is_registered_on_owner() {
		let mut doc = basic();
		let out = add_component(&mut doc, &Selector::parse("Enemy"), "boxcollider", None).expect("add");
		assert_eq!(out.class_id, 65);
		assert_eq!(out.type_name, "BoxCollider");
		assert_eq!(doc.require(300).expect("enemy").component_ids(), vec![301, out.component]);
		assert_eq!(doc.require(out.component).expect("collider").game_object_id(), 300);
		assert_eq!(doc.integrity_issues(), Vec::new());
	}

	#[test]
	fn repeatable_builtin_may_be_added_twice() {
		let mut doc = basic();
		let out = add_component(&mut doc, &Selector::parse("World"), "BoxCollider", None).expect("second collider");
		assert_eq!(doc.require(100).expect("world").component_ids(), vec![101, 102, out.component]);
	}

	#[test]
	fn single_instance_builtin_already_exists() {
		let mut doc = basic();
		let before = doc.render();
		let err = add_component(&mut doc, &Selector::parse("Player"), "Rigidbody", None).expect_err("one rigidbody");
		assert!(matches!(err, UnityError::ComponentExists { game_object: 200, .. }));
		assert_eq!(doc.render(), before);
	}

	#[test]
	fn script_by_name_path_or_guid() {
		let cache = scripts();
		let resolver: &dyn GuidResolver = &cache;
		for name in ["LootDrop", "Assets/Scripts/LootDrop.cs", "9e8d7c6b5a4938271605f4e3d2c1b0a9"] {
			let mut doc = basic();
			let out = add_component(&mut doc, &Selector::parse("Enemy"), name, Some(resolver)).expect("script");
			assert_eq!(out.class_id, 114);
			assert_eq!(out.script_guid.as_deref(), Some("9e8d7c6b5a4938271605f4e3d2c1b0a9"));
			let block = doc.require(out.component).expect("script block");
			assert_eq!(block.field_ref("m_Script").and_then(|found| found.guid).as_deref(), Some("9e8d7c6b5a4938271605f4e3d2c1b0a9"));
		}
	}

	#[test]
	fn unresolved_scripts() {
		let cache = scripts();
		let resolver: &dyn GuidResolver = &cache;
		let mut doc = basic();
		let enemy = Selector::parse("Enemy");
		assert!(matches!(
			add_component(&mut doc, &enemy, "LootDrop", None),
			Err(UnityError::GuidCacheMissing)
		));
		assert!(matches!(
			add_component(&mut doc, &enemy, "Teleporter", Some(resolver)),
			Err(UnityError::ScriptNotFound { .. })
		));
		assert!(matches!(
			add_component(&mut doc, &enemy, "ffffffffffffffffffffffffffffffff", Some(resolver)),
			Err(UnityError::GuidNotFound { .. })
		));
	}
}

mod remove {
	use super::basic;
	use crate::unity::{UnityError, remove_component};

	#[test]
	fn clears_owner_entry_and_references() {
		let mut doc = basic();
		let out = remove_component(&mut doc, 502).expect("remove");
		assert_eq!(out.game_object, 500);
		assert_eq!(out.type_name, "MeshFilter");
		assert!(doc.get(502).is_none());
		assert_eq!(doc.require(500).expect("sword").component_ids(), vec![501]);
		assert_eq!(doc.require(203).expect("script").field("weapon").as_deref(), Some("{fileID: 0}"));
		assert_eq!(doc.integrity_issues(), Vec::new());
	}

	#[test]
	fn game_objects_and_transforms_are_protected() {
		let mut doc = basic();
		let before = doc.render();
		for id in [200, 201] {
			assert!(matches!(remove_component(&mut doc, id), Err(UnityError::ProtectedComponent { .. })), "{id}");
		}
		assert!(matches!(remove_component(&mut doc, 777), Err(UnityError::ObjectNotFound { file_id: 777 })));
		assert_eq!(doc.render(), before);
	}
}

mod copy {
	use super::basic;
	use crate::unity::{Selector, UnityError, copy_component};

	#[test]
	fn copy_is_owned_by_target() {
		let mut doc = basic();
		let out = copy_component(&mut doc, 203, &Selector::parse("Enemy")).expect("copy");
		assert_eq!(out.type_name, "MonoBehaviour");
		let block = doc.require(out.component).expect("copy block");
		assert_eq!(block.game_object_id(), 300);
		assert_eq!(block.field("speed").as_deref(), Some("4.5"));
		assert_eq!(block.field_id("cameraTarget"), 401);
		assert_eq!(doc.require(300).expect("enemy").component_ids(), vec![301, out.component]);
		assert_eq!(doc.integrity_issues(), Vec::new());
	}

	#[test]
	fn single_instance_copy_already_exists() {
		let mut doc = basic();
		assert!(matches!(
			copy_component(&mut doc, 202, &Selector::Id(200)),
			Err(UnityError::ComponentExists { .. })
		));
		copy_component(&mut doc, 202, &Selector::Id(300)).expect("enemy has no rigidbody");
	}

	#[test]
	fn transforms_cannot_be_copied() {
		let mut doc = basic();
		assert!(matches!(
			copy_component(&mut doc, 301, &Selector::Id(400)),
			Err(UnityError::ProtectedComponent { .. })
		));
	}
}
