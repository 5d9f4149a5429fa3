use anyhow::Result;
use badge_mesh::shape::default_badge_mesh;
use badge_mesh::{badge_layout, corner_stops, read_stl_file, registration_knobs};
use badge_mesh::{write_binary_stl, BadgeShape, TriMesh};
use badge_pdf::{Config, SheetLayout, PAGE_HEIGHT_MM, PAGE_WIDTH_MM};
use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Create acetate badge sheets for 3D printed badges: a print-ready
/// PDF with registration marks, the matching registration jig STL, and
/// a layout STL with every badge in its sheet position.
#[derive(Parser)]
#[command(name = "badgemaker", about = "Create 3D printed badges with PDF layouts", version)]
struct Cli {
    /// CSV file containing badge text data (columns: line1, line2, line3)
    csv_file: PathBuf,

    /// Badge STL file to use as template (uses the default badge shape if omitted)
    stl_file: Option<PathBuf>,

    /// Configuration JSON file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Output file prefix
    #[arg(short, long, default_value = "badge_")]
    prefix: String,

    /// Registration jig style
    #[arg(long, value_enum, default_value = "knobs")]
    jig: JigArg,
}

#[derive(Clone, Copy, ValueEnum)]
enum JigArg {
    /// Cylindrical knobs at the PDF registration mark positions
    Knobs,
    /// L-shaped corner stops for the acetate sheet edges
    Stops,
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => Config::load(path).await?,
        None => Config::default(),
    };
    log::info!(
        "using PDF offsets: x={:.2}mm, y={:.2}mm",
        config.pdf_offsets.x_offset,
        config.pdf_offsets.y_offset
    );

    let badge_mesh: TriMesh = match &cli.stl_file {
        Some(path) => {
            println!("Loading badge STL: {}", path.display());
            read_stl_file(path)?
        }
        None => {
            println!("No STL file provided, using default badge shape");
            default_badge_mesh()
        }
    };
    let shape = BadgeShape::from_mesh(&badge_mesh)?;
    println!(
        "Badge dimensions: {:.1}mm × {:.1}mm",
        shape.width_mm, shape.height_mm
    );

    let records = badge_pdf::load_from_csv(&cli.csv_file).await?;
    if records.is_empty() {
        println!("No badge rows found in {}", cli.csv_file.display());
        return Ok(());
    }

    let layout = SheetLayout::plan(shape.width_mm, shape.height_mm, records.len())?;
    if records.len() > layout.capacity {
        log::warn!(
            "only {} of {} badges fit on one page; the rest are dropped",
            layout.capacity,
            records.len()
        );
    }

    let marks = SheetLayout::registration_marks();
    let jig = match cli.jig {
        JigArg::Knobs => registration_knobs(&marks, PAGE_WIDTH_MM, PAGE_HEIGHT_MM),
        JigArg::Stops => corner_stops(PAGE_WIDTH_MM, PAGE_HEIGHT_MM),
    };
    let registration_path = format!("{}registration.stl", cli.prefix);
    tokio::fs::write(&registration_path, write_binary_stl(&jig, "registration")?).await?;
    println!("Registration jig → {registration_path}");

    let pdf_path = format!("{}badges.pdf", cli.prefix);
    badge_pdf::generate_pdf(&records, &shape, &config, &layout, &pdf_path).await?;
    println!("Generated {} badges → {pdf_path}", layout.slots.len());

    let layout_mesh = badge_layout(
        &badge_mesh,
        &layout.centers(),
        PAGE_WIDTH_MM,
        PAGE_HEIGHT_MM,
    )?;
    let layout_path = format!("{}layout.stl", cli.prefix);
    tokio::fs::write(&layout_path, write_binary_stl(&layout_mesh, "layout")?).await?;
    println!("Badge layout → {layout_path}");

    Ok(())
}
