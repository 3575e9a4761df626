use std::{
    path::{Path, PathBuf},
    time::Duration,
};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand};
use linviz::{
    error::SystemError,
    grid,
    image::Image,
    picture,
    preset::Preset,
    render::{self, RenderOptions},
    system::LinearSystem,
    transform::{self, PointSet},
};
use nalgebra::DMatrix;

#[derive(Parser, Debug)]
#[command(author, version, about = "Visualizes linear transforms and linear systems", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Animate a grid morphing from the identity to a linear transform
    Transform {
        #[command(flatten)]
        matrix: MatrixArgs,

        /// Number of interpolation steps (the animation has one more frame)
        #[arg(long, default_value_t = 30)]
        steps: usize,

        /// Where to write the GIF
        #[arg(long, default_value = "animation.gif")]
        gif: PathBuf,

        /// Also write every frame as a PNG file into this directory
        #[arg(long)]
        frames: Option<PathBuf>,

        /// How long each frame is shown, in milliseconds
        #[arg(long, default_value_t = 100)]
        delay_ms: u64,

        #[arg(long, default_value_t = 600)]
        size: u32,
    },
    /// Draw the demo grid before and after a linear transform
    Grid {
        #[command(flatten)]
        matrix: MatrixArgs,

        /// Output directory
        #[arg(long, default_value = ".")]
        out: PathBuf,

        #[arg(long, default_value_t = 600)]
        size: u32,
    },
    /// Draw each equation of a 2x2 system as a line
    RowPicture {
        #[command(flatten)]
        picture: PictureArgs,
    },
    /// Draw the columns of a 2x2 system and the combination that yields the right-hand side
    ColumnPicture {
        #[command(flatten)]
        picture: PictureArgs,
    },
    /// Draw the combinations of the columns of a 2x2 matrix
    ColumnSpace {
        #[command(flatten)]
        picture: PictureArgs,
    },
    /// Draw each equation of a 3x3 system as a plane
    #[command(name = "row-picture-3d")]
    RowPicture3d {
        #[command(flatten)]
        picture: PictureArgs,
    },
    /// Solve a linear system and print the solution
    Solve {
        #[command(flatten)]
        system: SystemArgs,
    },
}

#[derive(Args, Debug)]
struct MatrixArgs {
    /// One of the built-in transforms
    #[arg(long, value_enum, conflicts_with = "matrix")]
    preset: Option<Preset>,

    /// The transform's entries, row by row
    #[arg(long, num_args = 4, value_names = ["A11", "A12", "A21", "A22"], allow_negative_numbers = true)]
    matrix: Option<Vec<f64>>,
}

impl MatrixArgs {
    /// Returns the selected matrix and a name for it. Defaults to the example preset.
    fn matrix(&self) -> (DMatrix<f64>, String) {
        match &self.matrix {
            Some(entries) => (DMatrix::from_row_slice(2, 2, entries), "custom".to_string()),
            None => {
                let preset = self.preset.unwrap_or(Preset::Example);
                let m = preset.matrix();
                (
                    DMatrix::from_column_slice(2, 2, m.as_slice()),
                    preset.name().to_string(),
                )
            }
        }
    }
}

#[derive(Args, Debug)]
struct SystemArgs {
    /// Coefficients of the system, row by row (4 or 9 values)
    #[arg(long, num_args = 4..=9, allow_negative_numbers = true, requires = "rhs")]
    matrix: Option<Vec<f64>>,

    /// Right-hand side of the system (2 or 3 values)
    #[arg(long, num_args = 2..=3, allow_negative_numbers = true, requires = "matrix")]
    rhs: Option<Vec<f64>>,
}

impl SystemArgs {
    fn system(&self) -> Result<Option<LinearSystem>> {
        match (&self.matrix, &self.rhs) {
            (Some(a), Some(b)) => Ok(Some(LinearSystem::from_rows(a, b)?)),
            _ => Ok(None),
        }
    }
}

#[derive(Args, Debug)]
struct PictureArgs {
    #[command(flatten)]
    system: SystemArgs,

    /// Output PNG file
    #[arg(long)]
    out: Option<PathBuf>,

    #[arg(long, default_value_t = 600)]
    size: u32,
}

impl PictureArgs {
    fn render(
        &self,
        default_system: LinearSystem,
        default_out: &str,
        draw: fn(&LinearSystem, &RenderOptions) -> Result<Image, SystemError>,
    ) -> Result<()> {
        let sys = self.system.system()?.unwrap_or(default_system);
        let opts = RenderOptions::default().size(self.size, self.size);
        let image = draw(&sys, &opts)?;
        let out = self
            .out
            .clone()
            .unwrap_or_else(|| PathBuf::from(default_out));
        image
            .save(&out)
            .with_context(|| format!("failed to write {}", out.display()))?;
        log::info!("wrote {}", out.display());
        Ok(())
    }
}

fn main() -> Result<()> {
    linviz::init_logger!();

    let cli = Cli::parse();
    log::debug!("running with: {cli:?}");

    match cli.command {
        Command::Transform {
            matrix,
            steps,
            gif,
            frames,
            delay_ms,
            size,
        } => cmd_transform(
            &matrix,
            steps,
            &gif,
            frames.as_deref(),
            Duration::from_millis(delay_ms),
            size,
        ),
        Command::Grid { matrix, out, size } => cmd_grid(&matrix, &out, size),
        Command::RowPicture { picture: args } => args.render(
            LinearSystem::demo_2d(),
            "2d-row-picture.png",
            picture::row_picture_2d,
        ),
        Command::ColumnPicture { picture: args } => args.render(
            LinearSystem::demo_2d(),
            "2d-column-picture.png",
            picture::column_picture_2d,
        ),
        Command::ColumnSpace { picture: args } => args.render(
            LinearSystem::demo_2d(),
            "2d-column-space.png",
            picture::column_space_2d,
        ),
        Command::RowPicture3d { picture: args } => args.render(
            LinearSystem::demo_3d(),
            "3d-row-picture.png",
            picture::row_picture_3d,
        ),
        Command::Solve { system } => cmd_solve(&system),
    }
}

fn cmd_transform(
    matrix: &MatrixArgs,
    steps: usize,
    gif: &Path,
    frames: Option<&Path>,
    delay: Duration,
    size: u32,
) -> Result<()> {
    let (a, name) = matrix.matrix();
    let points = grid::demo_grid();
    let colors = grid::colors(&points);
    let seq = transform::generate(&a, &points, steps)?;

    let opts = RenderOptions::default()
        .size(size, size)
        .frame_delay(delay)
        .title(format!("{name} transform"));
    let anim = render::render_sequence(&seq, &colors, &opts)?;

    if let Some(dir) = frames {
        let paths = anim
            .save_frames(dir, "frame")
            .with_context(|| format!("failed to write frames to {}", dir.display()))?;
        log::info!("wrote {} frames to {}", paths.len(), dir.display());
    }
    anim.save_gif(gif)
        .with_context(|| format!("failed to write {}", gif.display()))?;
    log::info!("wrote {}", gif.display());
    Ok(())
}

fn cmd_grid(matrix: &MatrixArgs, out: &Path, size: u32) -> Result<()> {
    let (a, name) = matrix.matrix();
    let points = grid::demo_grid();
    let colors = grid::colors(&points);
    let transformed: PointSet = transform::apply(&a, &points)?;

    let stills = [
        ("grid-original.png", &points, "original grid".to_string()),
        (
            "grid-transformed.png",
            &transformed,
            format!("{name} transform"),
        ),
    ];
    std::fs::create_dir_all(out)?;
    for (file, set, title) in stills {
        let opts = RenderOptions::default().size(size, size).title(title);
        let path = out.join(file);
        render::render_still(set, &colors, &opts)?
            .save(&path)
            .with_context(|| format!("failed to write {}", path.display()))?;
        log::info!("wrote {}", path.display());
    }
    Ok(())
}

fn print_system(sys: &LinearSystem) -> Result<()> {
    let names: &[&str] = match sys.size() {
        2 => &["x", "y"],
        _ => &["u", "v", "w"],
    };
    for i in 0..sys.size() {
        let (coeffs, rhs) = sys.equation(i);
        println!("  {}", picture::format_equation(&coeffs, names, rhs));
    }
    let x = sys.solve()?;
    let solution = names
        .iter()
        .zip(x.iter())
        .map(|(name, v)| format!("{name} = {v}"))
        .collect::<Vec<_>>()
        .join(", ");
    println!("=> {solution}");
    Ok(())
}

fn cmd_solve(system: &SystemArgs) -> Result<()> {
    match system.system()? {
        Some(sys) => print_system(&sys),
        None => {
            print_system(&LinearSystem::demo_2d())?;
            println!();
            print_system(&LinearSystem::demo_3d())
        }
    }
}
