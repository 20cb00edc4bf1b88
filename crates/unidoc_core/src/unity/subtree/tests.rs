mod scene {
	use unidoc_testkit::fixture_text;

	use crate::unity::{Document, UnityError, collect};

	fn basic() -> Document {
		Document::parse(&fixture_text("basic.unity")).expect("fixture parses")
	}

	#[test]
	fn collects_components_and_descendants() {
		let doc = basic();
		let subtree = collect(&doc, 200).expect("player subtree");
		assert_eq!(subtree.root_transform, Some(201));
		assert_eq!(subtree.father, 101);
		assert_eq!(subtree.ids, vec![200, 201, 202, 203, 500, 501, 502]);
	}

	#[test]
	fn leaf_object_collects_itself_and_components() {
		let doc = basic();
		let subtree = collect(&doc, 400).expect("camera subtree");
		assert_eq!(subtree.ids, vec![400, 401, 402]);
		assert_eq!(subtree.father, 0);
	}

	#[test]
	fn non_game_object_is_rejected() {
		let doc = basic();
		assert!(matches!(collect(&doc, 201), Err(UnityError::GameObjectNotFound { .. })));
	}
}

mod corrupt {
	use crate::unity::{Document, UNITY_PREAMBLE, collect};

	#[test]
	fn cyclic_children_terminate() {
		let text = format!(
			"{UNITY_PREAMBLE}--- !u!1 &1\nGameObject:\n  m_Component:\n  - component: {{fileID: 2}}\n  m_Name: A\n--- !u!4 &2\nTransform:\n  m_GameObject: {{fileID: 1}}\n  m_Children:\n  - {{fileID: 4}}\n  m_Father: {{fileID: 4}}\n--- !u!1 &3\nGameObject:\n  m_Component:\n  - component: {{fileID: 4}}\n  m_Name: B\n--- !u!4 &4\nTransform:\n  m_GameObject: {{fileID: 3}}\n  m_Children:\n  - {{fileID: 2}}\n  m_Father: {{fileID: 2}}\n"
		);
		let doc = Document::parse(&text).expect("parses");
		let subtree = collect(&doc, 1).expect("walk ends");
		assert_eq!(subtree.ids, vec![1, 2, 3, 4]);
	}
}

mod nested_prefab {
	use crate::unity::{Document, UNITY_PREAMBLE, collect};

	#[test]
	fn nested_instance_and_additions_are_included() {
		let text = format!(
			"{UNITY_PREAMBLE}--- !u!1 &1\nGameObject:\n  m_Component:\n  - component: {{fileID: 2}}\n  m_Name: Holder\n--- !u!4 &2\nTransform:\n  m_GameObject: {{fileID: 1}}\n  m_Children:\n  - {{fileID: 11}}\n  m_Father: {{fileID: 0}}\n--- !u!1001 &10\nPrefabInstance:\n  m_Modification:\n    m_TransformParent: {{fileID: 2}}\n  m_SourcePrefab: {{fileID: 100100000, guid: 5f1e2d3c4b5a69788796a5b4c3d2e1f0, type: 3}}\n--- !u!4 &11 stripped\nTransform:\n  m_CorrespondingSourceObject: {{fileID: 1101, guid: 5f1e2d3c4b5a69788796a5b4c3d2e1f0, type: 3}}\n  m_PrefabInstance: {{fileID: 10}}\n--- !u!1 &12 stripped\nGameObject:\n  m_CorrespondingSourceObject: {{fileID: 1100, guid: 5f1e2d3c4b5a69788796a5b4c3d2e1f0, type: 3}}\n  m_PrefabInstance: {{fileID: 10}}\n--- !u!114 &13\nMonoBehaviour:\n  m_GameObject: {{fileID: 12}}\n  m_Enabled: 1\n--- !u!1 &20\nGameObject:\n  m_Component:\n  - component: {{fileID: 21}}\n  m_Name: Other\n--- !u!4 &21\nTransform:\n  m_GameObject: {{fileID: 20}}\n  m_Children: []\n  m_Father: {{fileID: 0}}\n"
		);
		let doc = Document::parse(&text).expect("parses");
		let subtree = collect(&doc, 1).expect("holder subtree");
		let mut ids = subtree.ids.clone();
		ids.sort_unstable();
		assert_eq!(ids, vec![1, 2, 10, 11, 12, 13]);
	}
}
