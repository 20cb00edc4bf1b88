use crate::unity::text::yaml_scalar;
use crate::unity::{FileRef, class};

/// Minimal serialized form of a built-in Unity component.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BuiltinComponent {
	/// Type name written below the header.
	pub name: &'static str,
	/// Unity class id.
	pub class_id: u32,
	/// Whether a GameObject may carry at most one.
	pub single: bool,
	body: &'static str,
}

impl BuiltinComponent {
	/// Serialized block for a new instance owned by `game_object`.
	pub fn render(&self, file_id: i64, game_object: i64) -> String {
		format!("{}{}", component_header(self.class_id, self.name, file_id, game_object), self.body)
	}
}

const BUILTINS: &[BuiltinComponent] = &[
	BuiltinComponent {
		name: "BoxCollider",
		class_id: 65,
		single: false,
		body: "  m_Material: {fileID: 0}\n  m_IsTrigger: 0\n  m_Enabled: 1\n  serializedVersion: 3\n  m_Size: {x: 1, y: 1, z: 1}\n  m_Center: {x: 0, y: 0, z: 0}\n",
	},
	BuiltinComponent {
		name: "SphereCollider",
		class_id: 135,
		single: false,
		body: "  m_Material: {fileID: 0}\n  m_IsTrigger: 0\n  m_Enabled: 1\n  serializedVersion: 3\n  m_Radius: 0.5\n  m_Center: {x: 0, y: 0, z: 0}\n",
	},
	BuiltinComponent {
		name: "CapsuleCollider",
		class_id: 136,
		single: false,
		body: "  m_Material: {fileID: 0}\n  m_IsTrigger: 0\n  m_Enabled: 1\n  serializedVersion: 2\n  m_Radius: 0.5\n  m_Height: 2\n  m_Direction: 1\n  m_Center: {x: 0, y: 0, z: 0}\n",
	},
	BuiltinComponent {
		name: "MeshCollider",
		class_id: 64,
		single: false,
		body: "  m_Material: {fileID: 0}\n  m_IsTrigger: 0\n  m_Enabled: 1\n  serializedVersion: 5\n  m_Convex: 0\n  m_CookingOptions: 30\n  m_Mesh: {fileID: 0}\n",
	},
	BuiltinComponent {
		name: "Rigidbody",
		class_id: 54,
		single: true,
		body: "  serializedVersion: 4\n  m_Mass: 1\n  m_Drag: 0\n  m_AngularDrag: 0.05\n  m_CenterOfMass: {x: 0, y: 0, z: 0}\n  m_InertiaTensor: {x: 1, y: 1, z: 1}\n  m_InertiaRotation: {x: 0, y: 0, z: 0, w: 1}\n  m_ImplicitCom: 1\n  m_ImplicitTensor: 1\n  m_UseGravity: 1\n  m_IsKinematic: 0\n  m_Interpolate: 0\n  m_Constraints: 0\n  m_CollisionDetection: 0\n",
	},
	BuiltinComponent {
		name: "Rigidbody2D",
		class_id: 50,
		single: true,
		body: "  m_BodyType: 0\n  m_Simulated: 1\n  m_UseFullKinematicContacts: 0\n  m_UseAutoMass: 0\n  m_Mass: 1\n  m_LinearDrag: 0\n  m_AngularDrag: 0.05\n  m_GravityScale: 1\n  m_Material: {fileID: 0}\n  m_Interpolate: 0\n  m_SleepingMode: 1\n  m_CollisionDetection: 0\n  m_Constraints: 0\n",
	},
	BuiltinComponent {
		name: "BoxCollider2D",
		class_id: 61,
		single: false,
		body: "  m_Enabled: 1\n  m_Density: 1\n  m_Material: {fileID: 0}\n  m_IsTrigger: 0\n  m_UsedByEffector: 0\n  m_UsedByComposite: 0\n  m_Offset: {x: 0, y: 0}\n  serializedVersion: 2\n  m_Size: {x: 1, y: 1}\n  m_EdgeRadius: 0\n",
	},
	BuiltinComponent {
		name: "CircleCollider2D",
		class_id: 58,
		single: false,
		body: "  m_Enabled: 1\n  m_Density: 1\n  m_Material: {fileID: 0}\n  m_IsTrigger: 0\n  m_UsedByEffector: 0\n  m_UsedByComposite: 0\n  m_Offset: {x: 0, y: 0}\n  serializedVersion: 2\n  m_Radius: 0.5\n",
	},
	BuiltinComponent {
		name: "MeshFilter",
		class_id: 33,
		single: true,
		body: "  m_Mesh: {fileID: 0}\n",
	},
	BuiltinComponent {
		name: "MeshRenderer",
		class_id: 23,
		single: true,
		body: "  m_Enabled: 1\n  m_CastShadows: 1\n  m_ReceiveShadows: 1\n  m_DynamicOccludee: 1\n  m_MotionVectors: 1\n  m_LightProbeUsage: 1\n  m_ReflectionProbeUsage: 1\n  m_RenderingLayerMask: 1\n  m_RendererPriority: 0\n  m_Materials: []\n  m_StaticBatchInfo:\n    firstSubMesh: 0\n    subMeshCount: 0\n  m_StaticBatchRoot: {fileID: 0}\n  m_ProbeAnchor: {fileID: 0}\n  m_LightProbeVolumeOverride: {fileID: 0}\n  m_SortingLayerID: 0\n  m_SortingLayer: 0\n  m_SortingOrder: 0\n  m_AdditionalVertexStreams: {fileID: 0}\n",
	},
	BuiltinComponent {
		name: "Camera",
		class_id: 20,
		single: true,
		body: "  m_Enabled: 1\n  serializedVersion: 2\n  m_ClearFlags: 1\n  m_BackGroundColor: {r: 0.19215687, g: 0.3019608, b: 0.4745098, a: 0}\n  m_projectionMatrixMode: 1\n  m_NormalizedViewPortRect:\n    serializedVersion: 2\n    x: 0\n    y: 0\n    width: 1\n    height: 1\n  near clip plane: 0.3\n  far clip plane: 1000\n  field of view: 60\n  orthographic: 0\n  orthographic size: 5\n  m_Depth: 0\n  m_CullingMask:\n    serializedVersion: 2\n    m_Bits: 4294967295\n  m_RenderingPath: -1\n  m_TargetTexture: {fileID: 0}\n  m_TargetDisplay: 0\n  m_HDR: 1\n  m_AllowMSAA: 1\n  m_OcclusionCulling: 1\n",
	},
	BuiltinComponent {
		name: "Light",
		class_id: 108,
		single: true,
		body: "  m_Enabled: 1\n  serializedVersion: 10\n  m_Type: 2\n  m_Shape: 0\n  m_Color: {r: 1, g: 1, b: 1, a: 1}\n  m_Intensity: 1\n  m_Range: 10\n  m_SpotAngle: 30\n  m_InnerSpotAngle: 21.80208\n  m_CookieSize: 10\n  m_Shadows:\n    m_Type: 0\n    m_Resolution: -1\n    m_Strength: 1\n    m_Bias: 0.05\n    m_NormalBias: 0.4\n    m_NearPlane: 0.2\n  m_Cookie: {fileID: 0}\n  m_DrawHalo: 0\n  m_Flare: {fileID: 0}\n  m_RenderMode: 0\n  m_CullingMask:\n    serializedVersion: 2\n    m_Bits: 4294967295\n  m_Lightmapping: 4\n  m_BounceIntensity: 1\n",
	},
	BuiltinComponent {
		name: "AudioSource",
		class_id: 82,
		single: false,
		body: "  m_Enabled: 1\n  serializedVersion: 4\n  OutputAudioMixerGroup: {fileID: 0}\n  m_audioClip: {fileID: 0}\n  m_PlayOnAwake: 1\n  m_Volume: 1\n  m_Pitch: 1\n  Loop: 0\n  Mute: 0\n  Spatialize: 0\n  Priority: 128\n  DopplerLevel: 1\n  MinDistance: 1\n  MaxDistance: 500\n  Pan2D: 0\n  rolloffMode: 0\n  BypassEffects: 0\n  BypassListenerEffects: 0\n  BypassReverbZones: 0\n",
	},
	BuiltinComponent {
		name: "AudioListener",
		class_id: 81,
		single: true,
		body: "  m_Enabled: 1\n",
	},
	BuiltinComponent {
		name: "Animator",
		class_id: 95,
		single: true,
		body: "  serializedVersion: 5\n  m_Enabled: 1\n  m_Avatar: {fileID: 0}\n  m_Controller: {fileID: 0}\n  m_CullingMode: 0\n  m_UpdateMode: 0\n  m_ApplyRootMotion: 0\n  m_LinearVelocityBlending: 0\n  m_StabilizeFeet: 0\n  m_WarningMessage: \n  m_HasTransformHierarchy: 1\n  m_AllowConstantClipSamplingOptimization: 1\n  m_KeepAnimatorStateOnDisable: 0\n",
	},
	BuiltinComponent {
		name: "CharacterController",
		class_id: 143,
		single: true,
		body: "  m_Material: {fileID: 0}\n  m_IsTrigger: 0\n  m_Enabled: 1\n  serializedVersion: 3\n  m_Height: 2\n  m_Radius: 0.5\n  m_SlopeLimit: 45\n  m_StepOffset: 0.3\n  m_SkinWidth: 0.08\n  m_MinMoveDistance: 0.001\n  m_Center: {x: 0, y: 0, z: 0}\n",
	},
	BuiltinComponent {
		name: "SpriteRenderer",
		class_id: 212,
		single: true,
		body: "  m_Enabled: 1\n  m_CastShadows: 0\n  m_ReceiveShadows: 0\n  m_Materials:\n  - {fileID: 10754, guid: 0000000000000000f000000000000000, type: 0}\n  m_SortingLayerID: 0\n  m_SortingLayer: 0\n  m_SortingOrder: 0\n  m_Sprite: {fileID: 0}\n  m_Color: {r: 1, g: 1, b: 1, a: 1}\n  m_FlipX: 0\n  m_FlipY: 0\n  m_DrawMode: 0\n  m_Size: {x: 1, y: 1}\n  m_MaskInteraction: 0\n  m_SpriteSortPoint: 0\n",
	},
	BuiltinComponent {
		name: "Canvas",
		class_id: 223,
		single: true,
		body: "  m_Enabled: 1\n  serializedVersion: 3\n  m_RenderMode: 0\n  m_Camera: {fileID: 0}\n  m_PlaneDistance: 100\n  m_PixelPerfect: 0\n  m_ReceivesEvents: 1\n  m_OverrideSorting: 0\n  m_OverridePixelPerfect: 0\n  m_SortingBucketNormalizedSize: 0\n  m_AdditionalShaderChannelsFlag: 0\n  m_SortingLayerID: 0\n  m_SortingOrder: 0\n  m_TargetDisplay: 0\n",
	},
	BuiltinComponent {
		name: "CanvasGroup",
		class_id: 225,
		single: true,
		body: "  m_Enabled: 1\n  m_Alpha: 1\n  m_Interactable: 1\n  m_BlocksRaycasts: 1\n  m_IgnoreParentGroups: 0\n",
	},
];

/// Built-in component by type name, case-insensitively.
pub fn builtin_component(name: &str) -> Option<&'static BuiltinComponent> {
	BUILTINS.iter().find(|item| item.name.eq_ignore_ascii_case(name))
}

/// Built-in component by class id.
pub(crate) fn builtin_by_class(class_id: u32) -> Option<&'static BuiltinComponent> {
	BUILTINS.iter().find(|item| item.class_id == class_id)
}

fn component_header(class_id: u32, type_name: &str, file_id: i64, game_object: i64) -> String {
	format!(
		"--- !u!{class_id} &{file_id}\n{type_name}:\n  m_ObjectHideFlags: 0\n  m_CorrespondingSourceObject: {{fileID: 0}}\n  m_PrefabInstance: {{fileID: 0}}\n  m_PrefabAsset: {{fileID: 0}}\n  m_GameObject: {}\n",
		FileRef::local(game_object)
	)
}

/// New GameObject owning `components`.
pub(crate) fn game_object(file_id: i64, name: &str, components: &[i64]) -> String {
	let listed: String = components.iter().map(|id| format!("  - component: {}\n", FileRef::local(*id))).collect();
	format!(
		"--- !u!{} &{file_id}\nGameObject:\n  m_ObjectHideFlags: 0\n  m_CorrespondingSourceObject: {{fileID: 0}}\n  m_PrefabInstance: {{fileID: 0}}\n  m_PrefabAsset: {{fileID: 0}}\n  serializedVersion: 6\n  m_Component:\n{listed}  m_Layer: 0\n  m_Name: {}\n  m_TagString: Untagged\n  m_Icon: {{fileID: 0}}\n  m_NavMeshLayer: 0\n  m_StaticEditorFlags: 0\n  m_IsActive: 1\n",
		class::GAME_OBJECT,
		yaml_scalar(name)
	)
}

/// New identity Transform (or RectTransform) under `father`.
pub(crate) fn transform(file_id: i64, game_object: i64, father: i64, rect: bool) -> String {
	let (class_id, type_name) = if rect { (class::RECT_TRANSFORM, "RectTransform") } else { (class::TRANSFORM, "Transform") };
	let mut out = format!(
		"{}  serializedVersion: 2\n  m_LocalRotation: {{x: 0, y: 0, z: 0, w: 1}}\n  m_LocalPosition: {{x: 0, y: 0, z: 0}}\n  m_LocalScale: {{x: 1, y: 1, z: 1}}\n  m_ConstrainProportionsScale: 0\n  m_Children: []\n  m_Father: {}\n  m_LocalEulerAnglesHint: {{x: 0, y: 0, z: 0}}\n",
		component_header(class_id, type_name, file_id, game_object),
		FileRef::local(father)
	);
	if rect {
		out.push_str("  m_AnchorMin: {x: 0.5, y: 0.5}\n  m_AnchorMax: {x: 0.5, y: 0.5}\n  m_AnchoredPosition: {x: 0, y: 0}\n  m_SizeDelta: {x: 100, y: 100}\n  m_Pivot: {x: 0.5, y: 0.5}\n");
	}
	out
}

/// New MonoBehaviour bound to the script asset `guid`.
pub(crate) fn mono_behaviour(file_id: i64, game_object: i64, script_guid: &str) -> String {
	format!(
		"{}  m_Enabled: 1\n  m_EditorHideFlags: 0\n  m_Script: {}\n  m_Name: \n  m_EditorClassIdentifier: \n",
		component_header(class::MONO_BEHAVIOUR, "MonoBehaviour", file_id, game_object),
		FileRef::external(11500000, script_guid, 3)
	)
}

/// PrefabInstance of `source_guid` whose only override renames the root GameObject.
pub(crate) fn variant_instance(file_id: i64, source_guid: &str, root_game_object: i64, name: &str) -> String {
	format!(
		"--- !u!{} &{file_id}\nPrefabInstance:\n  m_ObjectHideFlags: 0\n  serializedVersion: 2\n  m_Modification:\n    serializedVersion: 3\n    m_TransformParent: {{fileID: 0}}\n    m_Modifications:\n    - target: {}\n      propertyPath: m_Name\n      value: {}\n      objectReference: {{fileID: 0}}\n    m_RemovedComponents: []\n    m_RemovedGameObjects: []\n    m_AddedGameObjects: []\n    m_AddedComponents: []\n  m_SourcePrefab: {}\n",
		class::PREFAB_INSTANCE,
		FileRef::external(root_game_object, source_guid, 3),
		yaml_scalar(name),
		FileRef::external(100100000, source_guid, 3)
	)
}

/// Stripped placeholder for a source-prefab object owned by `prefab_instance`.
pub(crate) fn stripped(class_id: u32, type_name: &str, file_id: i64, source: FileRef, prefab_instance: i64) -> String {
	format!(
		"--- !u!{class_id} &{file_id} stripped\n{type_name}:\n  m_CorrespondingSourceObject: {source}\n  m_PrefabInstance: {}\n  m_PrefabAsset: {{fileID: 0}}\n",
		FileRef::local(prefab_instance)
	)
}
