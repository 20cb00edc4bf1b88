//! Unity class ids that carry a structural role for the editing engine.

/// `GameObject`.
pub const GAME_OBJECT: u32 = 1;
/// `Transform`.
pub const TRANSFORM: u32 = 4;
/// `MonoBehaviour`.
pub const MONO_BEHAVIOUR: u32 = 114;
/// `RectTransform`.
pub const RECT_TRANSFORM: u32 = 224;
/// `PrefabInstance`.
pub const PREFAB_INSTANCE: u32 = 1001;
/// `SceneRoots` (Unity 2022+ scenes).
pub const SCENE_ROOTS: u32 = 1660057539;

/// Whether the class provides hierarchy links (`m_Father`/`m_Children`).
pub fn is_transform(class_id: u32) -> bool {
	matches!(class_id, TRANSFORM | RECT_TRANSFORM)
}
