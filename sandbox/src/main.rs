// Copyright 2025 eraflo
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

//! Interpolates between two orientations given as Euler angles and prints
//! every intermediate step.

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use versor_core::math::{degrees_to_radians, radians_to_degrees};
use versor_core::{Quaternion, Scalar, Vec3};

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Precision {
    F32,
    F64,
}

#[derive(Parser, Debug)]
#[command(about = "Slerp between two orientations", long_about = None)]
struct Args {
    /// Starting orientation as comma-separated roll,pitch,yaw
    #[arg(long, default_value = "0.66,1.3,0.76", allow_hyphen_values = true)]
    from: String,

    /// Target orientation as comma-separated roll,pitch,yaw
    #[arg(long, default_value = "0.85,0.33,1.6", allow_hyphen_values = true)]
    to: String,

    /// Number of interpolation intervals (prints steps + 1 samples)
    #[arg(long, default_value_t = 2, value_parser = clap::value_parser!(u32).range(1..))]
    steps: u32,

    /// Floating-point precision used for the computation
    #[arg(long, value_enum, default_value_t = Precision::F32)]
    precision: Precision,

    /// Read and print angles in degrees instead of radians
    #[arg(long)]
    degrees: bool,
}

/// One interpolated sample.
#[derive(Debug, Clone, Copy)]
struct Sample<T: Scalar> {
    t: T,
    rotation: Quaternion<T>,
    euler: Vec3<T>,
}

fn parse_angles<T: Scalar>(input: &str, degrees: bool) -> Result<Vec3<T>> {
    let angles: Vec3<T> = input
        .parse()
        .with_context(|| format!("Failed to parse Euler angles from '{input}'"))?;
    if degrees {
        Ok(Vec3::new(
            degrees_to_radians(angles.x),
            degrees_to_radians(angles.y),
            degrees_to_radians(angles.z),
        ))
    } else {
        Ok(angles)
    }
}

fn interpolate<T: Scalar>(from: Vec3<T>, to: Vec3<T>, steps: u32) -> Result<Vec<Sample<T>>> {
    let start = Quaternion::from_euler_angles(from);
    let end = Quaternion::from_euler_angles(to);
    log::debug!("Start rotation: {start}, end rotation: {end}");

    let count = T::from_u32(steps).context("Step count is not representable")?;
    (0..=steps)
        .map(|i| {
            let t = T::from_u32(i).context("Step index is not representable")? / count;
            let rotation = Quaternion::slerp(start, end, t);
            Ok(Sample {
                t,
                rotation,
                euler: rotation.to_euler_angles(),
            })
        })
        .collect()
}

fn run<T: Scalar>(args: &Args) -> Result<()> {
    let from = parse_angles::<T>(&args.from, args.degrees).context("Invalid --from value")?;
    let to = parse_angles::<T>(&args.to, args.degrees).context("Invalid --to value")?;
    log::info!(
        "Interpolating {from} -> {to} over {} steps ({:?})",
        args.steps,
        args.precision
    );

    for sample in interpolate(from, to, args.steps)? {
        let euler = if args.degrees {
            Vec3::new(
                radians_to_degrees(sample.euler.x),
                radians_to_degrees(sample.euler.y),
                radians_to_degrees(sample.euler.z),
            )
        } else {
            sample.euler
        };
        println!(
            "t = {:.3}  q = {:.6}  euler = {:.6}",
            sample.t, sample.rotation, euler
        );
    }
    Ok(())
}

fn main() -> Result<()> {
    use env_logger::{Builder, Env};

    Builder::from_env(Env::default().default_filter_or("info")).init();

    let args = Args::parse();
    match args.precision {
        Precision::F32 => run::<f32>(&args),
        Precision::F64 => run::<f64>(&args),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Args::command().debug_assert();
    }

    #[test]
    fn default_arguments() {
        let args = Args::parse_from(["versor-sandbox"]);
        assert_eq!(args.steps, 2);
        assert_eq!(args.precision, Precision::F32);
        assert!(!args.degrees);
    }

    #[test]
    fn zero_steps_is_rejected() {
        assert!(Args::try_parse_from(["versor-sandbox", "--steps", "0"]).is_err());
    }

    #[test]
    fn parse_angles_converts_degrees() {
        let angles = parse_angles::<f64>("180, 90, -45", true).unwrap();
        assert!((angles.x - std::f64::consts::PI).abs() < 1e-12);
        assert!((angles.y - std::f64::consts::FRAC_PI_2).abs() < 1e-12);
        assert!((angles.z + std::f64::consts::FRAC_PI_4).abs() < 1e-12);
    }

    #[test]
    fn parse_angles_reports_bad_input() {
        assert!(parse_angles::<f32>("1.0, 2.0", false).is_err());
        assert!(parse_angles::<f32>("1.0, nope, 2.0", false).is_err());
    }

    #[test]
    fn interpolation_hits_both_endpoints() {
        let from = Vec3::new(0.66, 1.3, 0.76);
        let to = Vec3::new(0.85, 0.33, 1.6);
        let samples = interpolate::<f64>(from, to, 4).unwrap();
        assert_eq!(samples.len(), 5);
        assert_eq!(samples[0].t, 0.0);
        assert_eq!(samples[4].t, 1.0);

        let start = Quaternion::from_euler_angles(from);
        let end = Quaternion::from_euler_angles(to);
        assert!(samples[0].rotation.dot(start).abs() > 1.0 - 1e-9);
        assert!(samples[4].rotation.dot(end).abs() > 1.0 - 1e-9);
        assert!((samples[0].euler - from).length() < 1e-9);
    }
}
