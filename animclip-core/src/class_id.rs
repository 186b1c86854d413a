use serde::{Deserialize, Serialize};

use crate::error::FormatError;

macro_rules! class_ids {
    ($($variant:ident = $id:literal),* $(,)?) => {
        /// Runtime type tag of an animated component.
        ///
        /// Closed set; decoding an id outside it is a format error.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(into = "i32", try_from = "i32")]
        pub enum ClassIdType {
            $($variant = $id),*
        }

        impl ClassIdType {
            /// Every known tag, in ascending id order.
            pub const ALL: &'static [ClassIdType] = &[$(ClassIdType::$variant),*];

            /// Symbolic name of the tag.
            pub fn name(self) -> &'static str {
                match self {
                    $(ClassIdType::$variant => stringify!($variant)),*
                }
            }
        }

        impl TryFrom<i32> for ClassIdType {
            type Error = FormatError;

            fn try_from(id: i32) -> Result<Self, Self::Error> {
                match id {
                    $($id => Ok(ClassIdType::$variant),)*
                    other => Err(FormatError::UnknownClassId(other)),
                }
            }
        }
    };
}

class_ids! {
    Object = 0,
    GameObject = 1,
    Component = 2,
    LevelGameManager = 3,
    Transform = 4,
    TimeManager = 5,
    GlobalGameManager = 6,
    Behaviour = 8,
    GameManager = 9,
    AudioManager = 11,
    InputManager = 13,
    EditorExtension = 18,
    Physics2DSettings = 19,
    Camera = 20,
    Material = 21,
    MeshRenderer = 23,
    Renderer = 25,
    Texture = 27,
    Texture2D = 28,
    OcclusionCullingSettings = 29,
    GraphicsSettings = 30,
    MeshFilter = 33,
    OcclusionPortal = 41,
    Mesh = 43,
    Skybox = 45,
    QualitySettings = 47,
    Shader = 48,
    TextAsset = 49,
    Rigidbody2D = 50,
    Collider2D = 53,
    Rigidbody = 54,
    PhysicsManager = 55,
    Collider = 56,
    Joint = 57,
    CircleCollider2D = 58,
    HingeJoint = 59,
    PolygonCollider2D = 60,
    BoxCollider2D = 61,
    PhysicsMaterial2D = 62,
    MeshCollider = 64,
    BoxCollider = 65,
    CompositeCollider2D = 66,
    EdgeCollider2D = 68,
    CapsuleCollider2D = 70,
    ComputeShader = 72,
    AnimationClip = 74,
    ConstantForce = 75,
    TagManager = 78,
    AudioListener = 81,
    AudioSource = 82,
    AudioClip = 83,
    RenderTexture = 84,
    CustomRenderTexture = 86,
    Cubemap = 89,
    Avatar = 90,
    AnimatorController = 91,
    RuntimeAnimatorController = 93,
    ScriptMapper = 94,
    Animator = 95,
    TrailRenderer = 96,
    DelayedCallManager = 98,
    TextMesh = 102,
    RenderSettings = 104,
    Light = 108,
    CGProgram = 109,
    BaseAnimationTrack = 110,
    Animation = 111,
    MonoBehaviour = 114,
    MonoScript = 115,
    MonoManager = 116,
    Texture3D = 117,
    NewAnimationTrack = 118,
    Projector = 119,
    LineRenderer = 120,
    Flare = 121,
    Halo = 122,
    LensFlare = 123,
    FlareLayer = 124,
    HaloLayer = 125,
    NavMeshProjectSettings = 126,
    Font = 128,
    PlayerSettings = 129,
    NamedObject = 130,
    PhysicMaterial = 134,
    SphereCollider = 135,
    CapsuleCollider = 136,
    SkinnedMeshRenderer = 137,
    FixedJoint = 138,
    BuildSettings = 141,
    AssetBundle = 142,
    CharacterController = 143,
    CharacterJoint = 144,
    SpringJoint = 145,
    WheelCollider = 146,
    ResourceManager = 147,
    PreloadData = 150,
    ConfigurableJoint = 153,
    TerrainCollider = 154,
    TerrainData = 156,
    LightmapSettings = 157,
    WebCamTexture = 158,
    EditorSettings = 159,
    EditorUserSettings = 162,
    AudioReverbFilter = 164,
    AudioHighPassFilter = 165,
    AudioChorusFilter = 166,
    AudioReverbZone = 167,
    AudioEchoFilter = 168,
    AudioLowPassFilter = 169,
    AudioDistortionFilter = 170,
    SparseTexture = 171,
    AudioBehaviour = 180,
    AudioFilter = 181,
    WindZone = 182,
    Cloth = 183,
    SubstanceArchive = 184,
    ProceduralMaterial = 185,
    ProceduralTexture = 186,
    Texture2DArray = 187,
    CubemapArray = 188,
    OffMeshLink = 191,
    OcclusionArea = 192,
    Tree = 193,
    NavMeshAgent = 195,
    NavMeshSettings = 196,
    ParticleSystem = 198,
    ParticleSystemRenderer = 199,
    ShaderVariantCollection = 200,
    LODGroup = 205,
    BlendTree = 206,
    Motion = 207,
    NavMeshObstacle = 208,
    SortingGroup = 210,
    SpriteRenderer = 212,
    Sprite = 213,
    CachedSpriteAtlas = 214,
    ReflectionProbe = 215,
    Terrain = 218,
    LightProbeGroup = 220,
    AnimatorOverrideController = 221,
    CanvasRenderer = 222,
    Canvas = 223,
    RectTransform = 224,
    CanvasGroup = 225,
    BillboardAsset = 226,
    BillboardRenderer = 227,
    SpeedTreeWindAsset = 228,
    AnchoredJoint2D = 229,
    Joint2D = 230,
    SpringJoint2D = 231,
    DistanceJoint2D = 232,
    HingeJoint2D = 233,
    SliderJoint2D = 234,
    WheelJoint2D = 235,
    ClusterInputManager = 236,
    BaseVideoTexture = 237,
    NavMeshData = 238,
    AudioMixer = 240,
    AudioMixerController = 241,
    AudioMixerGroupController = 243,
    AudioMixerEffectController = 244,
    AudioMixerSnapshotController = 245,
    PhysicsUpdateBehaviour2D = 246,
    ConstantForce2D = 247,
    Effector2D = 248,
    AreaEffector2D = 249,
    PointEffector2D = 250,
    PlatformEffector2D = 251,
    SurfaceEffector2D = 252,
    BuoyancyEffector2D = 253,
    RelativeJoint2D = 254,
    FixedJoint2D = 255,
    FrictionJoint2D = 256,
    TargetJoint2D = 257,
    LightProbes = 258,
    LightProbeProxyVolume = 259,
    SampleClip = 271,
    AudioMixerSnapshot = 272,
    AudioMixerGroup = 273,
    AssetBundleManifest = 290,
    RuntimeInitializeOnLoadManager = 300,
    UnityConnectSettings = 310,
    AvatarMask = 319,
    PlayableDirector = 320,
    VideoPlayer = 328,
    VideoClip = 329,
    ParticleSystemForceField = 330,
    SpriteMask = 331,
    WorldAnchor = 362,
    OcclusionCullingData = 363,
    TilemapRenderer = 483,
    PrefabInstance = 1001,
    EditorExtensionImpl = 1002,
    AssetImporter = 1003,
    AnimatorStateTransition = 1101,
    AnimatorState = 1102,
    HumanTemplate = 1105,
    AnimatorStateMachine = 1107,
    PreviewAnimationClip = 1108,
    AnimatorTransition = 1109,
    LightmapParameters = 1113,
    TilemapCollider2D = 19719996,
    Grid = 156049354,
    Tilemap = 1839735485,
}

impl ClassIdType {
    /// Raw integer tag as stored in binary records and exports.
    pub fn as_i32(self) -> i32 {
        self as i32
    }
}

impl From<ClassIdType> for i32 {
    fn from(id: ClassIdType) -> Self {
        id.as_i32()
    }
}
