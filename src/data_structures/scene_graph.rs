//! Hierarchical placement of composite objects.
//!
//! A [`SceneNode`] is a blueprint: an optional mesh, a transform relative to
//! its parent, and children. Blueprints are built once; [`SceneNode::compose`]
//! walks one from a root transform and flattens it into [`DrawItem`]s. World
//! transforms are recomputed on every call and never stored, since the roots
//! (airship, parcels) move every frame.

use cgmath::Vector3;

use crate::data_structures::{instance::Instance, model::MeshId};

/// Branch offsets from the tree root: the first cone sits 5 units up, each
/// further cone is stacked on the one below.
pub const BRANCH_STEPS: [f32; 3] = [5.0, 3.0, 2.5];
pub const GONDOLA_OFFSET: [f32; 3] = [0.0, -3.0, 0.0];
pub const BALLOON_YAW_DEGREES: f32 = 90.0;
pub const ROOF_OFFSET: [f32; 3] = [0.0, 2.0, 0.0];
pub const ROOF_YAW_DEGREES: f32 = 45.0;

/// A mesh placed in world space for this frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshId,
    pub transform: Instance,
}

#[derive(Clone, Debug, PartialEq)]
pub struct SceneNode {
    pub mesh: Option<MeshId>,
    pub local: Instance,
    pub children: Vec<SceneNode>,
}

impl SceneNode {
    /// A transform-only node grouping its children.
    pub fn group(local: Instance) -> Self {
        Self {
            mesh: None,
            local,
            children: Vec::new(),
        }
    }

    pub fn leaf(mesh: MeshId, local: Instance) -> Self {
        Self {
            mesh: Some(mesh),
            local,
            children: Vec::new(),
        }
    }

    pub fn with_child(mut self, child: SceneNode) -> Self {
        self.children.push(child);
        self
    }

    pub fn add_child(&mut self, child: SceneNode) {
        self.children.push(child);
    }

    /// Flattens the blueprint below `root` into draw items, parents before
    /// children.
    pub fn compose(&self, root: &Instance) -> Vec<DrawItem> {
        let mut out = Vec::new();
        self.compose_into(root, &mut out);
        out
    }

    pub fn compose_into(&self, parent: &Instance, out: &mut Vec<DrawItem>) {
        let world = parent * &self.local;
        if let Some(mesh) = self.mesh {
            out.push(DrawItem {
                mesh,
                transform: world,
            });
        }
        for child in &self.children {
            child.compose_into(&world, out);
        }
    }

    pub fn mesh_count(&self) -> usize {
        self.mesh.iter().count() + self.children.iter().map(SceneNode::mesh_count).sum::<usize>()
    }
}

/// An ornament hung on the tree.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Decoration {
    pub mesh: MeshId,
    /// Offset from the tree root, not from any branch.
    pub offset: Vector3<f32>,
}

/// Trunk with three stacked branch cones and decorations.
///
/// Branches chain off each other; decorations are children of the root so
/// their placement does not depend on the branches.
pub fn tree(trunk: MeshId, branches: [MeshId; 3], decorations: &[Decoration]) -> SceneNode {
    let mut stack: Option<SceneNode> = None;
    for (mesh, step) in branches.iter().zip(BRANCH_STEPS).rev() {
        let mut node = SceneNode::leaf(*mesh, Instance::from_translation(0.0, step, 0.0));
        if let Some(upper) = stack.take() {
            node.add_child(upper);
        }
        stack = Some(node);
    }

    let mut root = SceneNode::group(Instance::new()).with_child(SceneNode::leaf(trunk, Instance::new()));
    if let Some(branches) = stack {
        root.add_child(branches);
    }
    for decoration in decorations {
        root.add_child(SceneNode::leaf(decoration.mesh, decoration.offset.into()));
    }
    root
}

/// Balloon yawed a quarter turn, gondola hanging below the root.
pub fn airship(balloon: MeshId, gondola: MeshId) -> SceneNode {
    SceneNode::group(Instance::new())
        .with_child(SceneNode::leaf(
            balloon,
            Instance::new().with_yaw(BALLOON_YAW_DEGREES),
        ))
        .with_child(SceneNode::leaf(gondola, Vector3::from(GONDOLA_OFFSET).into()))
}

/// House body with the pyramid roof turned so its edges line up with the walls.
pub fn house(body: MeshId, roof: MeshId) -> SceneNode {
    SceneNode::leaf(body, Instance::new()).with_child(SceneNode::leaf(
        roof,
        Instance::from(Vector3::from(ROOF_OFFSET)).with_yaw(ROOF_YAW_DEGREES),
    ))
}
