//! Frame flow of the delivery game.
//!
//! [`DeliveryFlow`] is the headless controller: it owns the generated meshes,
//! the height field, the simulation and the airship, and turns one frame of
//! input into one [`Frame`] for an external renderer. Windowing, key polling
//! and draw submission live outside this crate.
//!
//! # Lifecycle
//!
//! Each frame follows this pattern:
//! 1. Commands from the input layer (`toggle_aim_mode`, `drop_parcel`)
//! 2. [`DeliveryFlow::tick`] moves the airship by the steering vector
//! 3. The simulation advances parcels and resolves landings and hits
//! 4. Scene blueprints are composed into a flat draw list
//! 5. The renderer draws the returned [`Frame`]

use std::{collections::BTreeMap, path::Path};

use cgmath::{InnerSpace, Vector3};

use crate::{
    camera::{Camera, CameraUniform, Projection},
    config::SceneConfig,
    data_structures::{
        instance::{Instance, InstanceRaw},
        model::{Material, MeshId, MeshLibrary, TextureHandle},
        scene_graph::{self, Decoration, DrawItem, SceneNode},
        terrain::HeightField,
    },
    error::{Result, SimulationError},
    resources::{self, mesh, texture::TextureRegistry},
    simulation::{ParcelId, Simulation, StepReport},
};

pub const HEIGHT_MAP_FILE: &str = "heightmap.jpg";
pub const TREE_POSITION: [f32; 2] = [20.0, 20.0];
pub const TARGET_COUNT: usize = 5;
/// Houses sit this far above the ground sample at their centre.
pub const TARGET_LIFT: f32 = 2.0;
pub const STAR_OFFSET: [f32; 3] = [0.0, 14.0, 0.0];
pub const ORNAMENT_OFFSETS: [[f32; 3]; 5] = [
    [3.5, 5.0, 4.6],
    [-2.5, 5.5, 4.9],
    [-1.8, 8.0, 4.4],
    [1.5, 9.0, 3.5],
    [-0.8, 11.5, 2.8],
];
pub const LIGHT_DIRECTION: [f32; 3] = [-0.5, -1.0, -0.5];

/// Texture handles for everything in the scene.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct SceneTextures {
    pub grass: TextureHandle,
    pub bark: TextureHandle,
    pub leaves: TextureHandle,
    pub airship: TextureHandle,
    pub airship_normal: TextureHandle,
    pub house: TextureHandle,
    pub parcel: TextureHandle,
    pub height_map: TextureHandle,
    pub ornaments: [TextureHandle; 5],
    pub star: TextureHandle,
}

impl SceneTextures {
    /// Loads the stock texture set. Missing files leave placeholder handles.
    pub fn load(registry: &mut TextureRegistry) -> Self {
        Self {
            grass: registry.load("grass.jpg", true),
            bark: registry.load("tree_bark.jpg", true),
            leaves: registry.load("tree_leaves.jpg", true),
            airship: registry.load("airship_tex.jpg", true),
            airship_normal: registry.load("airship_normal.jpg", false),
            house: registry.load("house_tex.jpg", true),
            parcel: registry.load("parcel_tex.jpg", true),
            height_map: registry.load(HEIGHT_MAP_FILE, false),
            ornaments: [1, 2, 3, 4, 5].map(|i| registry.load(&format!("ball_tree{}.jpg", i), true)),
            star: registry.load("star.jpg", true),
        }
    }
}

/// Ids of the shared meshes inside the [`MeshLibrary`].
#[derive(Clone, Debug, PartialEq)]
pub struct SceneMeshes {
    pub terrain: MeshId,
    pub trunk: MeshId,
    pub branches: [MeshId; 3],
    pub balloon: MeshId,
    pub gondola: MeshId,
    pub parcel: MeshId,
    pub house_body: MeshId,
    pub house_roof: MeshId,
    pub decorations: Vec<Decoration>,
}

impl SceneMeshes {
    fn build(
        library: &mut MeshLibrary,
        textures: &SceneTextures,
        config: &SceneConfig,
    ) -> std::result::Result<Self, crate::error::GeometryError> {
        let leaves = Material::new(textures.leaves);
        let house = Material::new(textures.house);

        let terrain = library.insert(mesh::terrain_tiled(
            config.terrain.grid_width,
            config.terrain.grid_depth,
            config.terrain.uv_tiling,
            Material::new(textures.grass),
        )?);
        let trunk = library.insert(mesh::cylinder(1.5, 15.0, 32, Material::new(textures.bark))?);
        let branches = [
            library.insert(mesh::cone(6.0, 6.0, 32, leaves)?),
            library.insert(mesh::cone(5.0, 5.0, 32, leaves)?),
            library.insert(mesh::cone(4.0, 4.0, 32, leaves)?),
        ];
        let balloon = library.insert(mesh::ellipsoid(
            5.0,
            3.0,
            3.0,
            32,
            32,
            Material::new(textures.airship).with_normal_map(textures.airship_normal),
        )?);
        let gondola = library.insert(mesh::cube(2.0, Material::new(textures.airship))?);
        let parcel = library.insert(mesh::cube(1.0, Material::new(textures.parcel))?);
        let house_body = library.insert(mesh::cube(4.0, house)?);
        // Four segments turn the cone into a pyramid roof.
        let house_roof = library.insert(mesh::cone(3.5, 3.0, 4, house)?);

        let mut decorations = vec![Decoration {
            mesh: library.insert(mesh::ellipsoid(0.6, 3.0, 0.6, 24, 24, Material::new(textures.star))?),
            offset: STAR_OFFSET.into(),
        }];
        for (i, offset) in ORNAMENT_OFFSETS.iter().enumerate() {
            let texture = textures.ornaments[i % textures.ornaments.len()];
            decorations.push(Decoration {
                mesh: library.insert(mesh::ellipsoid(0.4, 0.4, 0.4, 24, 24, Material::new(texture))?),
                offset: (*offset).into(),
            });
        }

        Ok(Self {
            terrain,
            trunk,
            branches,
            balloon,
            gondola,
            parcel,
            house_body,
            house_roof,
            decorations,
        })
    }
}

/// Directional key state, mapped to a movement vector in world space.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct Steering {
    pub forward: bool,
    pub backward: bool,
    pub left: bool,
    pub right: bool,
    pub ascend: bool,
    pub descend: bool,
}

impl Steering {
    /// Forward is -Z, right is +X. Opposite keys cancel out.
    pub fn movement(&self) -> Vector3<f32> {
        let forward = -Vector3::unit_z();
        let right = forward.cross(Vector3::unit_y()).normalize();
        let axis = |pos: bool, neg: bool| pos as i32 as f32 - neg as i32 as f32;
        forward * axis(self.forward, self.backward)
            + right * axis(self.right, self.left)
            + Vector3::unit_y() * axis(self.ascend, self.descend)
    }
}

/// Input for one frame.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct FrameInput {
    /// Seconds since the previous frame.
    pub dt: f32,
    /// Unscaled movement direction, usually [`Steering::movement`].
    pub movement: Vector3<f32>,
}

/// Everything the renderer needs for one frame.
#[derive(Clone, Debug)]
pub struct Frame {
    /// Terrain draw, scaled horizontally; the renderer displaces it by the height map.
    pub terrain: DrawItem,
    /// All other meshes. Inactive parcels and destroyed houses are omitted.
    pub draws: Vec<DrawItem>,
    pub score: u32,
    pub aim_mode: bool,
    pub camera: CameraUniform,
    pub light_direction: [f32; 3],
    pub report: StepReport,
}

impl Frame {
    /// Groups the draw list into per-mesh instance data for instanced drawing.
    pub fn instance_batches(&self) -> BTreeMap<MeshId, Vec<InstanceRaw>> {
        let mut batches: BTreeMap<MeshId, Vec<InstanceRaw>> = BTreeMap::new();
        for item in &self.draws {
            batches.entry(item.mesh).or_default().push(item.transform.to_raw());
        }
        batches
    }
}

pub struct DeliveryFlow {
    config: SceneConfig,
    library: MeshLibrary,
    textures: TextureRegistry,
    handles: SceneTextures,
    meshes: SceneMeshes,
    height_field: HeightField,
    simulation: Simulation,
    tree: SceneNode,
    tree_position: Vector3<f32>,
    airship: SceneNode,
    airship_position: Vector3<f32>,
    house: SceneNode,
    projection: Projection,
    aim_mode: bool,
}

impl DeliveryFlow {
    /// Loads textures and the height map from `asset_dir` and builds the level.
    /// Missing assets are logged and replaced by placeholders.
    pub fn load(asset_dir: &Path, config: SceneConfig) -> Result<Self> {
        let mut textures = TextureRegistry::with_root(asset_dir);
        let handles = SceneTextures::load(&mut textures);
        let height_field = resources::load_height_field(&asset_dir.join(HEIGHT_MAP_FILE), config.terrain);
        Self::new(height_field, textures, handles, config)
    }

    pub fn new(
        height_field: HeightField,
        textures: TextureRegistry,
        handles: SceneTextures,
        config: SceneConfig,
    ) -> Result<Self> {
        let mut library = MeshLibrary::new();
        let meshes = SceneMeshes::build(&mut library, &handles, &config)?;
        log::info!("Generated {} meshes", library.len());

        let tree = scene_graph::tree(meshes.trunk, meshes.branches, &meshes.decorations);
        let airship = scene_graph::airship(meshes.balloon, meshes.gondola);
        let house = scene_graph::house(meshes.house_body, meshes.house_roof);

        let [tree_x, tree_z] = TREE_POSITION;
        let tree_position = Vector3::new(tree_x, height_field.sample(tree_x, tree_z), tree_z);

        let mut simulation = Simulation::new(config.physics);
        for i in 0..TARGET_COUNT {
            let x = i as f32 * 15.0 - 30.0;
            let z = i as f32 * 10.0 - 20.0;
            let y = height_field.sample(x, z) + TARGET_LIFT;
            simulation.add_target(Vector3::new(x, y, z), meshes.house_body, meshes.house_roof)?;
        }

        Ok(Self {
            library,
            textures,
            handles,
            meshes,
            height_field,
            simulation,
            tree,
            tree_position,
            airship,
            airship_position: config.flight.start,
            house,
            projection: Projection::new(&config.camera),
            aim_mode: false,
            config,
        })
    }

    pub fn config(&self) -> &SceneConfig {
        &self.config
    }

    pub fn library(&self) -> &MeshLibrary {
        &self.library
    }

    pub fn textures(&self) -> &TextureRegistry {
        &self.textures
    }

    pub fn texture_handles(&self) -> &SceneTextures {
        &self.handles
    }

    pub fn meshes(&self) -> &SceneMeshes {
        &self.meshes
    }

    pub fn height_field(&self) -> &HeightField {
        &self.height_field
    }

    pub fn simulation(&self) -> &Simulation {
        &self.simulation
    }

    pub fn tree_position(&self) -> Vector3<f32> {
        self.tree_position
    }

    pub fn airship_position(&self) -> Vector3<f32> {
        self.airship_position
    }

    pub fn aim_mode(&self) -> bool {
        self.aim_mode
    }

    pub fn score(&self) -> u32 {
        self.simulation.score()
    }

    pub fn toggle_aim_mode(&mut self) {
        self.aim_mode = !self.aim_mode;
        log::debug!("aim mode {}", if self.aim_mode { "on" } else { "off" });
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    /// Spawns a parcel at an arbitrary world position.
    pub fn spawn_parcel(&mut self, at: Vector3<f32>) -> std::result::Result<ParcelId, SimulationError> {
        self.simulation.spawn_parcel(at, self.meshes.parcel)
    }

    /// Drops a parcel from below the gondola.
    pub fn drop_parcel(&mut self) -> std::result::Result<ParcelId, SimulationError> {
        self.spawn_parcel(self.airship_position + self.config.flight.drop_offset)
    }

    /// Advances the game by one frame and returns what to draw.
    pub fn tick(&mut self, input: FrameInput) -> Frame {
        self.airship_position += input.movement * self.config.flight.speed * input.dt;
        let report = self.simulation.step(input.dt, &self.height_field);
        self.compose(report)
    }

    fn compose(&self, report: StepReport) -> Frame {
        let mut draws = Vec::new();
        self.tree.compose_into(&self.tree_position.into(), &mut draws);
        self.airship
            .compose_into(&self.airship_position.into(), &mut draws);
        for target in self.simulation.standing_targets() {
            self.house.compose_into(&target.position.into(), &mut draws);
        }
        for parcel in self.simulation.active_parcels() {
            draws.push(DrawItem {
                mesh: parcel.mesh,
                transform: parcel.position.into(),
            });
        }

        let scale = self.config.terrain.scale;
        let camera = Camera::follow(self.airship_position, self.aim_mode, &self.config.camera);
        Frame {
            terrain: DrawItem {
                mesh: self.meshes.terrain,
                transform: Instance::new().with_scale(scale, 1.0, scale),
            },
            draws,
            score: self.simulation.score(),
            aim_mode: self.aim_mode,
            camera: CameraUniform::new(&camera, &self.projection),
            light_direction: Vector3::from(LIGHT_DIRECTION).normalize().into(),
            report,
        }
    }
}
