use unidoc_testkit::fixture_text;

use crate::unity::Document;

fn basic() -> Document {
	Document::parse(&fixture_text("basic.unity")).expect("fixture parses")
}

fn assert_clean(doc: &Document) {
	assert_eq!(doc.integrity_issues(), Vec::new());
}

mod create {
	use super::{assert_clean, basic};
	use crate::unity::{Document, Selector, UNITY_PREAMBLE, UnityError, create_game_object};

	#[test]
	fn root_object_joins_scene_roots() {
		let mut doc = basic();
		let out = create_game_object(&mut doc, "Lamp", None).expect("create");
		assert_eq!(out.father, 0);
		assert_eq!(doc.require(out.game_object).expect("go").name().as_deref(), Some("Lamp"));
		assert_eq!(doc.require(out.transform).expect("transform").father_id(), 0);
		assert_eq!(doc.require(9999).expect("roots").sequence_ids("m_Roots"), vec![101, 401, out.transform]);
		assert_clean(&doc);
	}

	#[test]
	fn child_object_is_listed_under_parent() {
		let mut doc = basic();
		let out = create_game_object(&mut doc, "Lamp", Some(&Selector::parse("World"))).expect("create");
		assert_eq!(out.father, 101);
		assert_eq!(doc.require(101).expect("world").children_ids(), vec![201, 301, out.transform]);
		assert_eq!(doc.require(out.transform).expect("transform").type_name, "Transform");
		assert_clean(&doc);
	}

	#[test]
	fn rect_transform_parent_yields_rect_transform() {
		let text = format!(
			"{UNITY_PREAMBLE}--- !u!1 &1\nGameObject:\n  m_Component:\n  - component: {{fileID: 2}}\n  m_Name: Canvas\n--- !u!224 &2\nRectTransform:\n  m_GameObject: {{fileID: 1}}\n  m_Children: []\n  m_Father: {{fileID: 0}}\n"
		);
		let mut doc = Document::parse(&text).expect("parses");
		let out = create_game_object(&mut doc, "Button", Some(&Selector::Id(1))).expect("create");
		let transform = doc.require(out.transform).expect("transform");
		assert_eq!(transform.class_id, 224);
		assert_eq!(transform.type_name, "RectTransform");
		assert_eq!(doc.require(2).expect("canvas").children_ids(), vec![out.transform]);
		assert_clean(&doc);
	}

	#[test]
	fn rejects_empty_name_and_unknown_parent() {
		let mut doc = basic();
		let before = doc.render();
		assert!(matches!(create_game_object(&mut doc, "  ", None), Err(UnityError::EmptyName)));
		assert!(matches!(
			create_game_object(&mut doc, "Lamp", Some(&Selector::parse("Nowhere"))),
			Err(UnityError::ParentNotFound { .. })
		));
		assert_eq!(doc.render(), before);
	}
}

mod delete {
	use super::{assert_clean, basic};
	use crate::unity::{Selector, UnityError, delete_game_object};

	#[test]
	fn removes_subtree_and_nulls_references() {
		let mut doc = basic();
		let out = delete_game_object(&mut doc, &Selector::parse("Sword")).expect("delete");
		assert_eq!(out.removed, vec![500, 501, 502]);
		assert!(doc.get(500).is_none());
		assert!(doc.require(201).expect("player transform").children_ids().is_empty());

		let script = doc.require(203).expect("player script");
		assert_eq!(script.field("weapon").as_deref(), Some("{fileID: 0}"));
		assert_eq!(script.sequence_ids("inventory"), vec![0, 0]);
		assert_clean(&doc);
	}

	#[test]
	fn root_object_leaves_scene_roots() {
		let mut doc = basic();
		delete_game_object(&mut doc, &Selector::Id(400)).expect("delete");
		assert_eq!(doc.require(9999).expect("roots").sequence_ids("m_Roots"), vec![101]);
		assert_eq!(doc.require(203).expect("player script").field("cameraTarget").as_deref(), Some("{fileID: 0}"));
		assert_clean(&doc);
	}

	#[test]
	fn nested_subtree_goes_with_its_root() {
		let mut doc = basic();
		let out = delete_game_object(&mut doc, &Selector::parse("Player")).expect("delete");
		assert_eq!(out.removed.len(), 7);
		assert_eq!(doc.len(), 9);
		assert_eq!(doc.require(101).expect("world").children_ids(), vec![301]);
		assert_clean(&doc);
	}

	#[test]
	fn unknown_object_is_not_found() {
		let mut doc = basic();
		assert!(matches!(
			delete_game_object(&mut doc, &Selector::parse("Ghost")),
			Err(UnityError::GameObjectNotFound { .. })
		));
	}
}

mod duplicate {
	use std::collections::HashSet;

	use super::{assert_clean, basic};
	use crate::unity::{Document, Selector, UNITY_PREAMBLE, UnityError, duplicate_game_object};

	#[test]
	fn single_object_gets_numbered_copy() {
		let text = format!(
			"{UNITY_PREAMBLE}--- !u!1 &5\nGameObject:\n  m_Component:\n  - component: {{fileID: 10}}\n  m_Name: Player\n--- !u!4 &10\nTransform:\n  m_GameObject: {{fileID: 5}}\n  m_Children: []\n  m_Father: {{fileID: 0}}\n"
		);
		let mut doc = Document::parse(&text).expect("parses");
		let out = duplicate_game_object(&mut doc, &Selector::Id(5), None).expect("duplicate");
		assert_eq!(out.name, "Player (1)");
		assert_eq!(out.created.len(), 2);
		assert!(!out.created.contains(&5) && !out.created.contains(&10));

		let clone = doc.require(out.game_object).expect("clone");
		assert_eq!(clone.name().as_deref(), Some("Player (1)"));
		assert_eq!(clone.component_ids(), vec![out.transform.expect("clone transform")]);
		assert_eq!(doc.require(5).expect("original").name().as_deref(), Some("Player"));
		assert_clean(&doc);
	}

	#[test]
	fn clones_whole_subtree_with_internal_refs() {
		let mut doc = basic();
		let before = doc.ids();
		let out = duplicate_game_object(&mut doc, &Selector::parse("Player"), None).expect("duplicate");
		assert_eq!(out.created.len(), 7);
		let created: HashSet<i64> = out.created.iter().copied().collect();
		assert!(created.is_disjoint(&before));

		let clone_transform = out.transform.expect("clone transform");
		assert_eq!(doc.require(101).expect("world").children_ids(), vec![201, clone_transform, 301]);
		assert_eq!(doc.require(clone_transform).expect("transform").father_id(), 101);

		let script = doc
			.blocks()
			.iter()
			.find(|block| created.contains(&block.file_id) && block.class_id == 114)
			.expect("cloned script");
		assert_eq!(script.field("cameraTarget").as_deref(), Some("{fileID: 401}"));
		let weapon = script.field_id("weapon");
		assert!(created.contains(&weapon));
		assert_eq!(doc.require(weapon).expect("cloned mesh filter").field("m_Mesh"), doc.require(502).expect("mesh filter").field("m_Mesh"));
		assert_clean(&doc);
	}

	#[test]
	fn repeated_duplicates_pick_next_free_number() {
		let mut doc = basic();
		let first = duplicate_game_object(&mut doc, &Selector::parse("Enemy"), None).expect("first");
		assert_eq!(first.name, "Enemy (1)");
		let second = duplicate_game_object(&mut doc, &Selector::parse("Enemy (1)"), None).expect("second");
		assert_eq!(second.name, "Enemy (2)");
		let third = duplicate_game_object(&mut doc, &Selector::parse("Enemy"), None).expect("third");
		assert_eq!(third.name, "Enemy (3)");
		assert_clean(&doc);
	}

	#[test]
	fn root_copy_joins_scene_roots_after_original() {
		let mut doc = basic();
		let out = duplicate_game_object(&mut doc, &Selector::parse("Main Camera"), Some("Second Camera")).expect("duplicate");
		assert_eq!(out.name, "Second Camera");
		let clone_transform = out.transform.expect("clone transform");
		assert_eq!(doc.require(9999).expect("roots").sequence_ids("m_Roots"), vec![101, 401, clone_transform]);
		assert_clean(&doc);
	}

	#[test]
	fn explicit_empty_name_is_rejected() {
		let mut doc = basic();
		assert!(matches!(
			duplicate_game_object(&mut doc, &Selector::parse("Player"), Some("")),
			Err(UnityError::EmptyName)
		));
	}
}

mod reparent {
	use super::{assert_clean, basic};
	use crate::unity::{Selector, UnityError, reparent};

	#[test]
	fn moves_between_fathers() {
		let mut doc = basic();
		let out = reparent(&mut doc, &Selector::parse("Enemy"), Some(&Selector::parse("Player"))).expect("reparent");
		assert_eq!((out.transform, out.old_father, out.new_father), (301, 101, 201));
		assert_eq!(doc.require(101).expect("world").children_ids(), vec![201]);
		assert_eq!(doc.require(201).expect("player").children_ids(), vec![501, 301]);
		assert_eq!(doc.require(301).expect("enemy").father_id(), 201);
		assert_clean(&doc);
	}

	#[test]
	fn moves_to_scene_root() {
		let mut doc = basic();
		let out = reparent(&mut doc, &Selector::parse("Player"), None).expect("reparent");
		assert_eq!(out.new_father, 0);
		assert_eq!(doc.require(201).expect("player").father_id(), 0);
		assert_eq!(doc.require(9999).expect("roots").sequence_ids("m_Roots"), vec![101, 401, 201]);
		assert_clean(&doc);
	}

	#[test]
	fn descendant_target_is_a_cycle() {
		let mut doc = basic();
		let before = doc.render();
		let err = reparent(&mut doc, &Selector::parse("Player"), Some(&Selector::parse("Sword"))).expect_err("cycle");
		assert!(matches!(err, UnityError::HierarchyCycle { child: 201, target: 501 }));
		let err = reparent(&mut doc, &Selector::parse("Player"), Some(&Selector::Id(201))).expect_err("self");
		assert!(matches!(err, UnityError::HierarchyCycle { .. }));
		assert_eq!(doc.render(), before);
	}

	#[test]
	fn same_father_is_a_no_op() {
		let mut doc = basic();
		let before = doc.render();
		reparent(&mut doc, &Selector::parse("Enemy"), Some(&Selector::parse("World"))).expect("reparent");
		assert_eq!(doc.render(), before);
	}
}

mod placeholder_father {
	use unidoc_testkit::fixture_text;

	use super::assert_clean;
	use crate::unity::{Document, Selector, UnityError, create_game_object, duplicate_game_object, reparent};

	fn hat_scene() -> Document {
		let doc = Document::parse(&fixture_text("hat_scene.unity")).expect("fixture parses");
		assert_clean(&doc);
		doc
	}

	#[test]
	fn create_under_stripped_transform() {
		let mut doc = hat_scene();
		let placeholder = doc.require(2001).expect("placeholder").text().to_owned();
		let out = create_game_object(&mut doc, "Feather", Some(&Selector::Id(2001))).expect("create");
		assert_eq!(out.father, 2001);
		assert_eq!(doc.require(out.transform).expect("transform").father_id(), 2001);
		assert_eq!(doc.require(2001).expect("placeholder").text(), placeholder);
		assert_clean(&doc);
	}

	#[test]
	fn duplicate_of_object_added_under_instance() {
		let mut doc = hat_scene();
		let out = duplicate_game_object(&mut doc, &Selector::parse("Hat"), None).expect("duplicate");
		assert_eq!(out.name, "Hat (1)");
		assert_eq!(out.father, 2001);
		let transform = out.transform.expect("cloned transform");
		assert_eq!(doc.require(transform).expect("clone").father_id(), 2001);
		assert_clean(&doc);
	}

	#[test]
	fn reparent_onto_stripped_transform() {
		let mut doc = hat_scene();
		let out = reparent(&mut doc, &Selector::parse("Spawner"), Some(&Selector::Id(2001))).expect("reparent");
		assert_eq!((out.old_father, out.new_father), (101, 2001));
		assert_eq!(doc.require(101).expect("arena").children_ids(), vec![2001]);
		assert_eq!(doc.require(301).expect("spawner").father_id(), 2001);
		assert_clean(&doc);
	}

	#[test]
	fn rejected_father_leaves_document_untouched() {
		let text = fixture_text("hat_scene.unity").replace("  m_Children: []\n  m_Father: {fileID: 2001}\n", "  m_Father: {fileID: 2001}\n");
		let mut doc = Document::parse(&text).expect("parses");
		let before = doc.render();
		let err = reparent(&mut doc, &Selector::parse("Spawner"), Some(&Selector::parse("Hat"))).expect_err("no children list");
		assert!(matches!(err, UnityError::InvalidArgument { .. }));
		assert_eq!(doc.render(), before);
		assert!(create_game_object(&mut doc, "Feather", Some(&Selector::parse("Hat"))).is_err());
		assert_eq!(doc.render(), before);
	}
}
