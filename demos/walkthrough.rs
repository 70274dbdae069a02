//! Runs each part of the library once and logs what it produced. Try with
//! `RUST_LOG=debug cargo run --example walkthrough`.

use geomotion::{
    animation::{animate, ChannelLayout, Motion, SkeletonBuilder},
    curve::{sample_uniform, BezierCurve},
    gm_error::GmError,
    mesh::{subdivide_n, EdgeGraph, QuadMesh},
    options::{CurveOptions, PlaybackOptions, SubdivideOptions},
};
use log::info;
use nalgebra_glm as glm;

const PLAYBACK: &str = "
interpolate: true
seam: wrap
";

fn skeleton() -> Result<(), GmError> {
    let mut b = SkeletonBuilder::new();
    let layout = ChannelLayout::from_names(
        b.next_channel(),
        &["Xposition", "Yposition", "Zposition", "Zrotation", "Xrotation", "Yrotation"],
    )?;
    let hips = b.root("Hips", glm::Vec3::zeros(), layout)?;
    let layout =
        ChannelLayout::from_names(b.next_channel(), &["Zrotation", "Xrotation", "Yrotation"])?;
    let chest = b.joint(hips, "Chest", glm::vec3(0.0, 1.0, 0.0), layout)?;
    b.end_site(chest, "Head", glm::vec3(0.0, 1.0, 0.0))?;
    let skeleton = b.build()?;

    let motion = Motion::new(
        0.5,
        vec![
            vec![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
            vec![1.0, 0.0, 0.0, 0.0, 0.0, 0.0, 45.0, 0.0, 0.0],
            vec![2.0, 0.0, 0.0, 0.0, 0.0, 0.0, 90.0, 0.0, 0.0],
        ],
    )?;
    motion.check(&skeleton)?;

    let options = PlaybackOptions::from_yaml(PLAYBACK)?;
    for step in 0..8u8 {
        let time = f32::from(step) * 0.2;
        let pose = animate(&skeleton, &motion, time, &options)?;
        let head = skeleton.find("Head").and_then(|i| pose.position(i));
        info!("t={time:.1} head at {head:?}");
    }
    Ok(())
}

fn curve() -> Result<(), GmError> {
    let curve = BezierCurve::default();
    let options = CurveOptions::default();
    let table = curve.arc_length_table(options.steps);
    info!("curve length {:.3}", table.total_length());
    for s in sample_uniform(&curve, &table, options.spacing)? {
        info!(
            "length {:.2} t {:.3} at {:?} tangent {:?}",
            s.length, s.t, s.position, s.frame.tangent
        );
    }
    Ok(())
}

fn mesh() -> Result<(), GmError> {
    let cube = QuadMesh::cube(2.0);
    let options = SubdivideOptions::from_yaml("levels: 2")?;
    let smooth = subdivide_n(&cube, &options)?;
    let graph = EdgeGraph::new(&smooth)?;
    info!(
        "{} vertices {} edges {} faces, euler characteristic {}",
        smooth.vertex_count(),
        graph.len(),
        smooth.face_count(),
        graph.euler_characteristic(&smooth)
    );
    Ok(())
}

fn main() -> Result<(), GmError> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .init();
    skeleton()?;
    curve()?;
    mesh()?;
    Ok(())
}
