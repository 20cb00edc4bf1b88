mod scalars {
	use crate::unity::text::{key_value, unquote, yaml_scalar};

	#[test]
	fn key_value_requires_exact_key() {
		assert_eq!(key_value("  m_Name: Player", "m_Name"), Some("Player"));
		assert_eq!(key_value("  m_Name:", "m_Name"), Some(""));
		assert_eq!(key_value("  m_NameHint: x", "m_Name"), None);
		assert_eq!(key_value("  m_Layer: 3   ", "m_Layer"), Some("3"));
	}

	#[test]
	fn plain_names_stay_plain() {
		assert_eq!(yaml_scalar("Player"), "Player");
		assert_eq!(yaml_scalar("Main Camera"), "Main Camera");
		assert_eq!(yaml_scalar("it's"), "it's");
	}

	#[test]
	fn ambiguous_names_are_single_quoted() {
		assert_eq!(yaml_scalar("a: b"), "'a: b'");
		assert_eq!(yaml_scalar("-dash"), "'-dash'");
		assert_eq!(yaml_scalar("{braces}"), "'{braces}'");
		assert_eq!(yaml_scalar("'quoted'"), "'''quoted'''");
	}

	#[test]
	fn unquote_reverses_quoting() {
		assert_eq!(unquote("'it''s'"), "it's");
		assert_eq!(unquote("\"say \\\"hi\\\"\""), "say \"hi\"");
		assert_eq!(unquote("plain"), "plain");
	}
}

mod sequences {
	use crate::unity::text::LineBuf;

	const TRANSFORM: &str = "--- !u!4 &1\nTransform:\n  m_Children:\n  - {fileID: 10}\n  - {fileID: 20}\n  m_Father: {fileID: 0}\n";

	#[test]
	fn sequence_ids_in_order() {
		let buf = LineBuf::new(TRANSFORM);
		assert_eq!(buf.sequence_ids("m_Children"), vec![10, 20]);
		assert!(buf.sequence_ids("m_Missing").is_empty());
	}

	#[test]
	fn insert_after_places_item_next_to_anchor() {
		let mut buf = LineBuf::new(TRANSFORM);
		assert!(buf.insert_item("m_Children", "{fileID: 15}", Some(10)));
		assert_eq!(buf.sequence_ids("m_Children"), vec![10, 15, 20]);
		assert!(buf.insert_item("m_Children", "{fileID: 30}", None));
		assert_eq!(buf.sequence_ids("m_Children"), vec![10, 15, 20, 30]);
	}

	#[test]
	fn inline_empty_sequence_expands_and_collapses() {
		let text = "--- !u!4 &1\nTransform:\n  m_Children: []\n  m_Father: {fileID: 0}\n";
		let mut buf = LineBuf::new(text);
		assert!(buf.insert_item("m_Children", "{fileID: 5}", None));
		assert_eq!(
			buf.render(),
			"--- !u!4 &1\nTransform:\n  m_Children:\n  - {fileID: 5}\n  m_Father: {fileID: 0}\n"
		);

		assert_eq!(buf.remove_items("m_Children", 5), 1);
		assert_eq!(buf.render(), text);
	}

	#[test]
	fn multi_line_items_keep_continuations() {
		let text = "--- !u!1001 &1\nPrefabInstance:\n  m_Modification:\n    m_Modifications:\n    - target: {fileID: 1}\n      propertyPath: m_Name\n    - target: {fileID: 2}\n      propertyPath: m_Layer\n    m_RemovedComponents: []\n";
		let buf = LineBuf::new(text);
		let line = buf.find_field("m_Modifications").expect("nested key found");
		let seq = buf.sequence(line);
		assert_eq!(seq.items, vec![4..6, 6..8]);
		assert_eq!(seq.item_indent, 4);
	}

	#[test]
	fn nested_end_covers_deeper_lines() {
		let buf = LineBuf::new("--- !u!114 &1\nMonoBehaviour:\n  stats:\n    health: 100\n    armor: 5\n  speed: 1\n");
		assert_eq!(buf.nested_end(2), 5);
	}

	#[test]
	fn render_preserves_missing_trailing_newline() {
		let text = "--- !u!1 &1\nGameObject:\n  m_Name: A";
		assert_eq!(LineBuf::new(text).render(), text);
	}
}

mod folding {
	use crate::unity::text::{LineBuf, continuation_end, fold_lines};

	const SCRIPT: &str = "--- !u!114 &1\nMonoBehaviour:\n  note: 'first\n    second'\n  stats:\n    hp: 1\n";

	#[test]
	fn continuation_stops_at_sibling_keys() {
		let buf = LineBuf::new(SCRIPT);
		assert_eq!(continuation_end(&buf.lines, 2), 4);
		assert_eq!(continuation_end(&buf.lines, 4), 5);
		assert_eq!(buf.folded_value(2, "note").as_deref(), Some("'first second'"));
	}

	#[test]
	fn blank_lines_fold_to_newlines() {
		assert_eq!(fold_lines("'a", ["", "  b'"]), "'a\nb'");
		assert_eq!(fold_lines("plain", std::iter::empty()), "plain");
	}

	#[test]
	fn multi_line_values_are_written_folded() {
		let mut buf = LineBuf::new(SCRIPT);
		buf.set_line_value(2, "note", "'x\ny'");
		assert_eq!(buf.render(), "--- !u!114 &1\nMonoBehaviour:\n  note: 'x\n\n    y'\n  stats:\n    hp: 1\n");
		assert_eq!(buf.folded_value(2, "note").as_deref(), Some("'x\ny'"));

		buf.set_line_value(2, "note", "short");
		assert_eq!(buf.render(), "--- !u!114 &1\nMonoBehaviour:\n  note: short\n  stats:\n    hp: 1\n");
	}
}
