//! sheetsplice CLI - merge and split structured spreadsheets
//!
//! # Main Commands
//!
//! ```bash
//! sheetsplice serve                          # Start HTTP server (port 3000)
//! sheetsplice merge jan.xlsx feb.xlsx        # Merge files into one workbook
//! sheetsplice split report.xlsx --rows 100   # Split into a zip of parts
//! ```
//!
//! # Debug Commands (for development)
//!
//! ```bash
//! sheetsplice inspect report.xlsx            # Show parsed grid structure
//! ```

use clap::{Parser, Subcommand};
use sheetsplice::{merge_files, read_grid, split_file, InputFile};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "sheetsplice")]
#[command(
    about = "Merge and split spreadsheets that carry instruction and header rows",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Merge several spreadsheet files into one workbook
    Merge {
        /// Input files, merged in the order given (first file's
        /// instructions and header win)
        inputs: Vec<PathBuf>,

        /// Output file (default: merged_<date>.xlsx in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Split one spreadsheet file into a zip archive of row-bounded parts
    Split {
        /// Input file
        input: PathBuf,

        /// Maximum data rows per part
        #[arg(short, long)]
        rows: usize,

        /// Output archive (default: <basename>_split.zip in the current directory)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Parse a spreadsheet file and show its grid structure
    Inspect {
        /// Input file
        input: PathBuf,
    },

    /// Start HTTP server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,
    },
}

#[tokio::main]
async fn main() {
    // Load .env file (if present)
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Merge { inputs, output } => cmd_merge(&inputs, output.as_deref()),
        Commands::Split {
            input,
            rows,
            output,
        } => cmd_split(&input, rows, output.as_deref()),
        Commands::Inspect { input } => cmd_inspect(&input),
        Commands::Serve { port } => sheetsplice::server::start_server(port).await,
    };

    if let Err(e) = result {
        eprintln!("❌ Error: {}", e);
        std::process::exit(1);
    }
}

fn cmd_merge(inputs: &[PathBuf], output: Option<&Path>) -> Result<(), Box<dyn std::error::Error>> {
    let files = load_inputs(inputs)?;

    eprintln!("📄 Merging {} files", files.len());
    let result = merge_files(&files)?;

    let out_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&result.file_name));
    fs::write(&out_path, &result.bytes)?;

    eprintln!(
        "✅ Wrote {} ({} data rows from {} files)",
        out_path.display(),
        result.summary.data_row_count,
        result.summary.source_count
    );
    Ok(())
}

fn cmd_split(
    input: &Path,
    rows: usize,
    output: Option<&Path>,
) -> Result<(), Box<dyn std::error::Error>> {
    let file = load_input(input)?;

    eprintln!("📄 Splitting {} ({} rows per part)", input.display(), rows);
    let result = split_file(&file, rows)?;

    let out_path = output
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from(&result.file_name));
    fs::write(&out_path, &result.bytes)?;

    eprintln!(
        "✅ Wrote {} ({} parts, {} data rows)",
        out_path.display(),
        result.summary.part_count,
        result.summary.data_row_count
    );
    Ok(())
}

fn cmd_inspect(input: &Path) -> Result<(), Box<dyn std::error::Error>> {
    let file = load_input(input)?;

    eprintln!("📄 Inspecting: {}", input.display());
    let grid = read_grid(&file.name, &file.bytes)?;

    eprintln!("   Instructions: {} rows", grid.instructions.len());
    for row in &grid.instructions {
        let text: Vec<String> = row.iter().map(|c| c.display_text()).collect();
        eprintln!("     | {}", text.join(" | "));
    }
    eprintln!(
        "   Header: {}",
        grid.header
            .iter()
            .map(|c| c.display_text())
            .collect::<Vec<_>>()
            .join(", ")
    );
    eprintln!("✅ {} data rows", grid.data_row_count());
    Ok(())
}

fn load_inputs(paths: &[PathBuf]) -> Result<Vec<InputFile>, Box<dyn std::error::Error>> {
    paths.iter().map(|p| load_input(p)).collect()
}

fn load_input(path: &Path) -> Result<InputFile, Box<dyn std::error::Error>> {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().to_string())
        .unwrap_or_else(|| path.display().to_string());
    let bytes = fs::read(path)?;
    Ok(InputFile::new(name, bytes))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_merge_command_writes_output_file() {
        let dir = tempfile::tempdir().unwrap();
        let a = dir.path().join("a.csv");
        let b = dir.path().join("b.csv");
        fs::write(&a, "I1\nI2\nH1,H2\na,b").unwrap();
        fs::write(&b, "X1\nX2\nZ1,Z2\nc,d").unwrap();

        let out = dir.path().join("merged.xlsx");
        cmd_merge(&[a, b], Some(&out)).unwrap();

        let bytes = fs::read(&out).unwrap();
        let grid = read_grid("merged.xlsx", &bytes).unwrap();
        assert_eq!(grid.data_row_count(), 2);
    }

    #[test]
    fn test_split_command_writes_archive() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("report.csv");
        fs::write(&input, "I1\nI2\nH1,H2\na,b\nc,d\ne,f").unwrap();

        let out = dir.path().join("report_split.zip");
        cmd_split(&input, 1, Some(&out)).unwrap();

        let bytes = fs::read(&out).unwrap();
        let archive = zip::ZipArchive::new(std::io::Cursor::new(bytes)).unwrap();
        assert_eq!(archive.len(), 3);
    }

    #[test]
    fn test_short_input_fails_with_readable_message() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("short.csv");
        fs::write(&input, "I1\nH1").unwrap();

        let err = cmd_split(&input, 1, None).unwrap_err();
        assert!(err.to_string().contains("too short"));
    }
}
