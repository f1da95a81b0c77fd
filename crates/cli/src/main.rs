mod provenance;
mod scene;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use polars::prelude::*;
use ringclip::api::{Frame, LayerStack, Point};
use serde::Serialize;
use serde_json::{json, Value};
use std::path::{Path, PathBuf};
use tracing_subscriber::fmt::SubscriberBuilder;

use provenance::{build_info, write_sidecar, Payload};
use scene::{nth, orientation_name, SceneFile, ShapeDto};

#[derive(Parser)]
#[command(name = "ringclip")]
#[command(about = "Clip, rasterize and query polygon-with-hole scenes")]
struct Cmd {
    /// Optional run tag; propagated to logs and provenance sidecars
    #[arg(long)]
    tag: Option<String>,

    #[command(subcommand)]
    action: Action,
}

#[derive(Subcommand)]
enum Action {
    /// Intersect two scene layers and write the resulting shapes as JSON
    Clip {
        #[arg(long)]
        scene: PathBuf,
        /// Index of the subject layer in the scene
        #[arg(long)]
        subject: usize,
        /// Index of the clip layer in the scene
        #[arg(long)]
        clip: usize,
        #[arg(long)]
        out: PathBuf,
    },
    /// Write the frame-bounded fill spans of all visible layers (.csv or .parquet)
    Raster {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        width: i32,
        #[arg(long)]
        height: i32,
        #[arg(long)]
        out: PathBuf,
    },
    /// Print containment of points and orientation of one layer
    Query {
        #[arg(long)]
        scene: PathBuf,
        #[arg(long)]
        layer: usize,
        #[arg(long, requires = "y", conflicts_with = "points")]
        x: Option<i32>,
        #[arg(long, requires = "x")]
        y: Option<i32>,
        /// CSV with integer columns `x` and `y`
        #[arg(long)]
        points: Option<PathBuf>,
    },
    /// Print a small provenance JSON block
    Report,
}

fn main() -> Result<()> {
    SubscriberBuilder::default().with_target(false).init();
    let cmd = Cmd::parse();
    let tag = cmd.tag.as_deref();
    match cmd.action {
        Action::Clip {
            scene,
            subject,
            clip,
            out,
        } => clip_cmd(&scene, subject, clip, &out, tag).map(|_| ()),
        Action::Raster {
            scene,
            width,
            height,
            out,
        } => raster_cmd(&scene, Frame::new(width, height), &out, tag).map(|_| ()),
        Action::Query {
            scene,
            layer,
            x,
            y,
            points,
        } => {
            let pts = match (x, y, points) {
                (Some(x), Some(y), None) => vec![Point::new(x, y)],
                (None, None, Some(path)) => read_points(&path)?,
                _ => bail!("query needs either --x/--y or --points"),
            };
            let doc = query_cmd(&scene, layer, &pts)?;
            println!("{}", serde_json::to_string_pretty(&doc)?);
            Ok(())
        }
        Action::Report => report(tag),
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("creating {}", parent.display()))?;
        }
    }
    Ok(())
}

#[derive(Serialize)]
struct ClipPiece {
    name: String,
    #[serde(flatten)]
    shape: ShapeDto,
}

fn clip_cmd(
    scene_path: &Path,
    subject: usize,
    clip: usize,
    out: &Path,
    tag: Option<&str>,
) -> Result<PathBuf> {
    tracing::info!(scene = %scene_path.display(), subject, clip, out = %out.display(), "clip");
    let (mut stack, ids) = SceneFile::read(scene_path)?.build()?;
    let pieces = stack.clip_layers(nth(&ids, subject)?, nth(&ids, clip)?)?;
    let shapes = pieces
        .iter()
        .map(|&id| {
            let layer = stack.layer(id)?;
            Ok(ClipPiece {
                name: layer.name.clone(),
                shape: ShapeDto::from(&layer.shape),
            })
        })
        .collect::<Result<Vec<_>>>()?;
    tracing::info!(pieces = shapes.len(), "clip done");

    let doc = json!({ "subject": subject, "clip": clip, "shapes": shapes });
    ensure_parent(out)?;
    std::fs::write(out, serde_json::to_vec_pretty(&doc)?)
        .with_context(|| format!("writing {}", out.display()))?;
    let params = json!({
        "command": "clip",
        "scene": scene_path.to_string_lossy(),
        "subject": subject,
        "clip": clip,
        "pieces": shapes.len(),
    });
    write_sidecar(out, Payload::new(params).tagged(tag))
}

/// One row per span: `layer, name, y, x_start, x_end`.
fn spans_table(stack: &LayerStack, frame: Frame) -> Result<DataFrame> {
    let mut layer = Vec::new();
    let mut name = Vec::new();
    let (mut y, mut x_start, mut x_end) = (Vec::new(), Vec::new(), Vec::new());
    for (id, spans) in stack.render(frame) {
        let layer_name = &stack.layer(id)?.name;
        for s in spans {
            layer.push(id.0);
            name.push(layer_name.clone());
            y.push(s.y);
            x_start.push(s.x_start);
            x_end.push(s.x_end);
        }
    }
    let df = df!(
        "layer" => layer,
        "name" => name,
        "y" => y,
        "x_start" => x_start,
        "x_end" => x_end,
    )?;
    Ok(df)
}

fn write_table(df: &mut DataFrame, out: &Path) -> Result<()> {
    ensure_parent(out)?;
    let file =
        std::fs::File::create(out).with_context(|| format!("creating {}", out.display()))?;
    match out.extension().and_then(|e| e.to_str()) {
        Some("csv") => {
            CsvWriter::new(file).include_header(true).finish(df)?;
        }
        Some("parquet") => {
            ParquetWriter::new(file).finish(df)?;
        }
        other => bail!("unsupported table extension {other:?}; use .csv or .parquet"),
    }
    Ok(())
}

fn raster_cmd(scene_path: &Path, frame: Frame, out: &Path, tag: Option<&str>) -> Result<PathBuf> {
    tracing::info!(
        scene = %scene_path.display(),
        width = frame.width,
        height = frame.height,
        out = %out.display(),
        "raster"
    );
    if frame.width <= 0 || frame.height <= 0 {
        bail!("frame must be positive, got {}x{}", frame.width, frame.height);
    }
    let (stack, _) = SceneFile::read(scene_path)?.build()?;
    let mut df = spans_table(&stack, frame)?;
    tracing::info!(rows = df.height(), "spans");
    write_table(&mut df, out)?;
    let params = json!({
        "command": "raster",
        "scene": scene_path.to_string_lossy(),
        "width": frame.width,
        "height": frame.height,
        "rows": df.height(),
    });
    write_sidecar(out, Payload::new(params).tagged(tag))
}

/// Integer query points from a CSV with `x` and `y` columns.
fn read_points(path: &Path) -> Result<Vec<Point>> {
    let df = LazyCsvReader::new(path)
        .with_infer_schema_length(Some(100))
        .finish()
        .with_context(|| format!("reading {}", path.display()))?
        .select([
            col("x").cast(DataType::Int32),
            col("y").cast(DataType::Int32),
        ])
        .collect()?;
    let xs = df.column("x")?.i32()?;
    let ys = df.column("y")?.i32()?;
    xs.into_iter()
        .zip(ys.into_iter())
        .enumerate()
        .map(|(row, p)| match p {
            (Some(x), Some(y)) => Ok(Point::new(x, y)),
            _ => bail!("{}: row {row} has a missing coordinate", path.display()),
        })
        .collect()
}

fn query_cmd(scene_path: &Path, layer: usize, points: &[Point]) -> Result<Value> {
    tracing::info!(scene = %scene_path.display(), layer, points = points.len(), "query");
    let (stack, ids) = SceneFile::read(scene_path)?.build()?;
    let l = stack.layer(nth(&ids, layer)?)?;
    let shape = l.shape.resolved();
    let results: Vec<Value> = points
        .iter()
        .map(|&p| {
            let c = shape.classify(p);
            json!({
                "x": p.x,
                "y": p.y,
                "containment": format!("{c:?}").to_lowercase(),
                "contains": shape.contains(p),
            })
        })
        .collect();
    Ok(json!({
        "layer": layer,
        "name": l.name,
        "orientation": orientation_name(shape.outer.orientation()),
        "holes": shape.inners.len(),
        "points": results,
    }))
}

fn report(tag: Option<&str>) -> Result<()> {
    let obj = json!({
        "build": build_info(),
        "tag": tag,
        "tolerances": {
            "boundary_snap": ringclip::api::BOUNDARY_SNAP,
            "perturb_eps": ringclip::api::PERTURB_EPS,
            "perturb_offset": ringclip::api::PERTURB_OFFSET,
            "perturb_max_attempts": ringclip::api::PERTURB_MAX_ATTEMPTS,
            "merge_distance": ringclip::api::MERGE_DISTANCE,
            "collinear_tolerance": ringclip::api::COLLINEAR_TOLERANCE,
            "zoom": [ringclip::api::ZOOM_MIN, ringclip::api::ZOOM_MAX],
        },
    });
    println!("{}", serde_json::to_string_pretty(&obj)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const SCENE: &str = r#"{
        "layers": [
            { "name": "frame", "outer": [[0,0],[100,0],[100,100],[0,100]],
              "inners": [[[25,25],[75,25],[75,75],[25,75]]] },
            { "name": "right", "outer": [[50,-10],[200,-10],[200,200],[50,200]],
              "visible": false }
        ]
    }"#;

    fn scene_file(dir: &Path) -> PathBuf {
        let path = dir.join("scene.json");
        fs::write(&path, SCENE).unwrap();
        path
    }

    #[test]
    fn clip_writes_shapes_and_sidecar() {
        let dir = tempdir().unwrap();
        let scene = scene_file(dir.path());
        let out = dir.path().join("out/clip.json");
        let sidecar = clip_cmd(&scene, 0, 1, &out, Some("t1")).unwrap();
        assert_eq!(sidecar, dir.path().join("out/clip.provenance.json"));

        let doc: Value = serde_json::from_slice(&fs::read(&out).unwrap()).unwrap();
        let shapes = doc["shapes"].as_array().unwrap();
        assert_eq!(shapes.len(), 1);
        assert_eq!(shapes[0]["name"], "Clip Layer 0");
        assert_eq!(shapes[0]["outer"].as_array().unwrap().len(), 8);
        assert!(shapes[0]["inners"].as_array().unwrap().is_empty());
    }

    #[test]
    fn clip_rejects_same_layer_and_bad_index() {
        let dir = tempdir().unwrap();
        let scene = scene_file(dir.path());
        let out = dir.path().join("clip.json");
        assert!(clip_cmd(&scene, 0, 0, &out, None).is_err());
        assert!(clip_cmd(&scene, 0, 5, &out, None).is_err());
        assert!(!out.exists());
    }

    #[test]
    fn raster_writes_csv_of_visible_layers() {
        let dir = tempdir().unwrap();
        let scene = scene_file(dir.path());
        let out = dir.path().join("spans.csv");
        raster_cmd(&scene, Frame::new(640, 480), &out, None).unwrap();
        let text = fs::read_to_string(&out).unwrap();
        let mut lines = text.lines();
        assert_eq!(lines.next(), Some("layer,name,y,x_start,x_end"));
        let rows: Vec<&str> = lines.collect();
        assert!(!rows.is_empty());
        assert!(rows.iter().all(|r| r.starts_with("0,frame,")));
        assert!(dir.path().join("spans.provenance.json").exists());
    }

    #[test]
    fn raster_rejects_unknown_extension_and_empty_frame() {
        let dir = tempdir().unwrap();
        let scene = scene_file(dir.path());
        assert!(raster_cmd(&scene, Frame::new(10, 10), &dir.path().join("s.txt"), None).is_err());
        assert!(raster_cmd(&scene, Frame::new(0, 10), &dir.path().join("s.csv"), None).is_err());
    }

    #[test]
    fn query_reads_points_and_classifies() {
        let dir = tempdir().unwrap();
        let scene = scene_file(dir.path());
        let csv = dir.path().join("points.csv");
        fs::write(&csv, "x,y\n10,10\n50,50\n100,50\n300,300\n").unwrap();
        let pts = read_points(&csv).unwrap();
        assert_eq!(pts.len(), 4);

        let doc = query_cmd(&scene, 0, &pts).unwrap();
        assert_eq!(doc["orientation"], "counter_clockwise");
        assert_eq!(doc["holes"], 1);
        let got: Vec<&str> = doc["points"]
            .as_array()
            .unwrap()
            .iter()
            .map(|p| p["containment"].as_str().unwrap())
            .collect();
        assert_eq!(got, ["inside", "outside", "boundary", "outside"]);
    }
}
