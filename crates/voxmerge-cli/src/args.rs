use std::path::PathBuf;

use glam::{DVec3, IVec3};
use voxmerge_core::constants::FILL_FULL;
use voxmerge_core::math::{is_allocatable, is_placeable, parse_dvec3, parse_ivec3};
use voxmerge_merge::MergeOperation;

use crate::error::JobError;
use crate::job::{load_job, MergeJob};

pub const USAGE: &str = "\
Usage: voxmerge <COMMAND> [OPTIONS]

Commands:
  merge     Merge two voxel volumes
  generate  Write a synthetic asteroid volume
  inspect   Print size, placement and content of a volume

merge:
  --job <file>            RON merge job (paths relative to the file)
  --a <file>              Volume A
  --b <file>              Volume B
  --op <operation>        union_volume_a_to_b | union_volume_b_to_a |
                          union_material_a_to_b | union_material_b_to_a |
                          subtract_volume_a_minus_b | subtract_volume_b_minus_a
  --out <dir>             Directory for the merged volume
  --name <name>           Entity name / file stem (default: merged)
  --remove-originals      Delete A and B after the result is saved
  --json <file>           Also write the result report as JSON

generate:
  --out <file>            Output volume file
  --size <x,y,z>          Volume size in cells (default: 64,64,64)
  --origin <x,y,z>        World position of cell (0,0,0) (default: 0,0,0)
  --material <name|id>    Material of the content (default: Rock)
  --fill <0-255>          Fill amount (default: 255)
  --shape <box|sphere>    Content shape (default: sphere)

inspect:
  voxmerge inspect <file>
";

/// Shape of a generated asteroid.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shape {
    Box,
    Sphere,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GenerateArgs {
    pub out: PathBuf,
    pub size: IVec3,
    pub origin: DVec3,
    pub material: String,
    pub fill: u8,
    pub shape: Shape,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Merge {
        job: MergeJob,
        json: Option<PathBuf>,
    },
    Generate(GenerateArgs),
    Inspect {
        path: PathBuf,
    },
    Help,
}

/// Parse the command line, excluding the program name.
pub fn parse_args(args: &[String]) -> Result<Command, JobError> {
    let Some(command) = args.first() else {
        return Ok(Command::Help);
    };
    let rest = &args[1..];
    match command.as_str() {
        "merge" => parse_merge(rest),
        "generate" => parse_generate(rest),
        "inspect" => match rest {
            [path] => Ok(Command::Inspect {
                path: PathBuf::from(path),
            }),
            _ => Err(usage("inspect takes exactly one file")),
        },
        "--help" | "-h" | "help" => Ok(Command::Help),
        other => Err(usage(&format!("unknown command: {other}"))),
    }
}

fn parse_merge(args: &[String]) -> Result<Command, JobError> {
    let mut job_path: Option<PathBuf> = None;
    let mut volume_a: Option<PathBuf> = None;
    let mut volume_b: Option<PathBuf> = None;
    let mut operation: Option<MergeOperation> = None;
    let mut output_dir: Option<PathBuf> = None;
    let mut name: Option<String> = None;
    let mut remove_originals = false;
    let mut json: Option<PathBuf> = None;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--job" => job_path = Some(value(args, &mut i)?.into()),
            "--a" => volume_a = Some(value(args, &mut i)?.into()),
            "--b" => volume_b = Some(value(args, &mut i)?.into()),
            "--op" => {
                let text = value(args, &mut i)?;
                operation = Some(text.parse().map_err(|e: String| usage(&e))?);
            }
            "--out" => output_dir = Some(value(args, &mut i)?.into()),
            "--name" => name = Some(value(args, &mut i)?.to_string()),
            "--remove-originals" => remove_originals = true,
            "--json" => json = Some(value(args, &mut i)?.into()),
            other => return Err(usage(&format!("unknown merge argument: {other}"))),
        }
        i += 1;
    }

    let job = match job_path {
        Some(path) => {
            if volume_a.is_some() || volume_b.is_some() || operation.is_some() || output_dir.is_some() {
                return Err(usage("--job cannot be combined with --a, --b, --op or --out"));
            }
            let mut job = load_job(&path)?;
            if let Some(name) = name {
                job.name = name;
            }
            job.remove_originals |= remove_originals;
            job
        }
        None => MergeJob {
            volume_a: volume_a.ok_or_else(|| usage("merge requires --a"))?,
            volume_b: volume_b.ok_or_else(|| usage("merge requires --b"))?,
            operation: operation.ok_or_else(|| usage("merge requires --op"))?,
            output_dir: output_dir.ok_or_else(|| usage("merge requires --out"))?,
            name: name.unwrap_or_else(|| "merged".to_string()),
            remove_originals,
        },
    };

    Ok(Command::Merge { job, json })
}

fn parse_generate(args: &[String]) -> Result<Command, JobError> {
    let mut out: Option<PathBuf> = None;
    let mut size = IVec3::splat(64);
    let mut origin = DVec3::ZERO;
    let mut material = "Rock".to_string();
    let mut fill = FILL_FULL;
    let mut shape = Shape::Sphere;

    let mut i = 0;
    while i < args.len() {
        match args[i].as_str() {
            "--out" => out = Some(value(args, &mut i)?.into()),
            "--size" => size = parse_ivec3(value(args, &mut i)?)?,
            "--origin" => origin = parse_dvec3(value(args, &mut i)?)?,
            "--material" => material = value(args, &mut i)?.to_string(),
            "--fill" => {
                let text = value(args, &mut i)?;
                fill = text
                    .parse()
                    .map_err(|_| usage(&format!("invalid --fill value: {text}")))?;
            }
            "--shape" => {
                shape = match value(args, &mut i)? {
                    "box" => Shape::Box,
                    "sphere" => Shape::Sphere,
                    other => return Err(usage(&format!("unknown shape: {other}"))),
                }
            }
            other => return Err(usage(&format!("unknown generate argument: {other}"))),
        }
        i += 1;
    }

    if !is_allocatable(size) {
        return Err(usage(&format!("--size {size} is too large or not positive")));
    }
    if !is_placeable(origin) {
        return Err(usage(&format!("--origin {origin} is out of range")));
    }

    Ok(Command::Generate(GenerateArgs {
        out: out.ok_or_else(|| usage("generate requires --out"))?,
        size,
        origin,
        material,
        fill,
        shape,
    }))
}

/// Consume the value following the flag at `args[*i]`.
fn value<'a>(args: &'a [String], i: &mut usize) -> Result<&'a str, JobError> {
    let flag = &args[*i];
    *i += 1;
    args.get(*i)
        .map(String::as_str)
        .ok_or_else(|| usage(&format!("{flag} requires a value")))
}

fn usage(message: &str) -> JobError {
    JobError::Usage(message.to_string())
}
