use airdrop::{
    cgmath::{Rotation, Vector3},
    data_structures::{
        instance::Instance,
        model::MeshId,
        scene_graph::{self, Decoration, SceneNode},
    },
};

use crate::common::test_utils::*;

mod common;

const TRUNK: MeshId = MeshId(1);
const BRANCHES: [MeshId; 3] = [MeshId(2), MeshId(3), MeshId(4)];
const STAR: MeshId = MeshId(5);
const BALL: MeshId = MeshId(6);

fn decorations() -> Vec<Decoration> {
    vec![
        Decoration {
            mesh: STAR,
            offset: Vector3::new(0.0, 14.0, 0.0),
        },
        Decoration {
            mesh: BALL,
            offset: Vector3::new(3.5, 5.0, 4.6),
        },
    ]
}

#[test]
fn tree_branches_stack_on_each_other() {
    let tree = scene_graph::tree(TRUNK, BRANCHES, &decorations());
    assert_eq!(tree.mesh_count(), 6);

    let root = Instance::from_translation(20.0, 3.0, 20.0);
    let draws = tree.compose(&root);
    let meshes: Vec<MeshId> = draws.iter().map(|d| d.mesh).collect();
    assert_eq!(meshes, vec![TRUNK, BRANCHES[0], BRANCHES[1], BRANCHES[2], STAR, BALL]);

    assert_vec_close(draws[0].transform.position, Vector3::new(20.0, 3.0, 20.0));
    assert_vec_close(draws[1].transform.position, Vector3::new(20.0, 8.0, 20.0));
    assert_vec_close(draws[2].transform.position, Vector3::new(20.0, 11.0, 20.0));
    assert_vec_close(draws[3].transform.position, Vector3::new(20.0, 13.5, 20.0));
}

#[test]
fn decorations_hang_from_the_tree_root() {
    let tree = scene_graph::tree(TRUNK, BRANCHES, &decorations());
    let root = Instance::from_translation(-7.0, 1.5, 2.0);
    let draws = tree.compose(&root);

    assert_vec_close(draws[4].transform.position, Vector3::new(-7.0, 15.5, 2.0));
    assert_vec_close(draws[5].transform.position, Vector3::new(-3.5, 6.5, 6.6));

    // moving the branches leaves the ornaments where they are
    let mut tree = tree;
    for child in tree.children.iter_mut().filter(|c| c.mesh == Some(BRANCHES[0])) {
        child.local.position.y += 10.0;
    }
    let moved = tree.compose(&root);
    assert_vec_close(moved[1].transform.position, Vector3::new(-7.0, 16.5, 2.0));
    assert_eq!(moved[4], draws[4]);
    assert_eq!(moved[5], draws[5]);
}

#[test]
fn airship_gondola_hangs_below_and_balloon_is_turned() {
    let airship = scene_graph::airship(MeshId(7), MeshId(8));
    let draws = airship.compose(&Instance::from_translation(0.0, 30.0, 0.0));
    assert_eq!(draws.len(), 2);

    let balloon = &draws[0];
    assert_eq!(balloon.mesh, MeshId(7));
    assert_vec_close(balloon.transform.position, Vector3::new(0.0, 30.0, 0.0));
    // long axis (x) now points along -z
    assert_vec_close(
        balloon.transform.rotation.rotate_vector(Vector3::unit_x()),
        -Vector3::unit_z(),
    );

    let gondola = &draws[1];
    assert_eq!(gondola.mesh, MeshId(8));
    assert_vec_close(gondola.transform.position, Vector3::new(0.0, 27.0, 0.0));
    assert_vec_close(
        gondola.transform.rotation.rotate_vector(Vector3::unit_x()),
        Vector3::unit_x(),
    );
}

#[test]
fn house_roof_sits_on_top_at_forty_five_degrees() {
    let house = scene_graph::house(MeshId(9), MeshId(10));
    let draws = house.compose(&Instance::from_translation(-30.0, 4.0, -20.0));
    assert_eq!(draws.len(), 2);
    assert_eq!(draws[0].mesh, MeshId(9));
    assert_vec_close(draws[1].transform.position, Vector3::new(-30.0, 6.0, -20.0));

    let half = std::f32::consts::FRAC_1_SQRT_2;
    assert_vec_close(
        draws[1].transform.rotation.rotate_vector(Vector3::unit_x()),
        Vector3::new(half, 0.0, -half),
    );
}

#[test]
fn children_inherit_parent_rotation_and_scale() {
    let node = SceneNode::group(Instance::new().with_yaw(90.0)).with_child(SceneNode::leaf(
        MeshId(0),
        Instance::from_translation(1.0, 0.0, 0.0),
    ));
    let root = Instance::from_translation(5.0, 0.0, 0.0).with_scale(2.0, 2.0, 2.0);
    let draws = node.compose(&root);

    assert_eq!(draws.len(), 1);
    assert_vec_close(draws[0].transform.position, Vector3::new(5.0, 0.0, -2.0));
    assert_vec_close(draws[0].transform.scale, Vector3::new(2.0, 2.0, 2.0));

    // the composed matrix agrees with the chained instances
    let matrix = (&root * &node.local * Instance::from_translation(1.0, 0.0, 0.0)).to_matrix();
    assert_eq!(matrix, draws[0].transform.to_matrix());
}
