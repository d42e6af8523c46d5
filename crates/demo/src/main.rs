// File: crates/demo/src/main.rs
// Summary: Demo loads survey responses (CSV or JSON), mounts the area chart and writes HTML/SVG/PNG outputs.

use anyhow::{Context, Result};
use chart_core::{theme, AreaChart, ChartConfig, Document, RawRecord};
use chart_render_skia::{render_to_png, RenderOptions};
use clap::{Parser, ValueEnum};
use serde_json::{Map, Value};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

const MOUNT_ID: &str = "area-chart";

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
enum Format {
    Csv,
    Json,
}

#[derive(Parser, Debug)]
#[command(name = "areachart-demo", about = "Render survey responses per day as an area chart")]
struct Args {
    /// Input file with one record per survey response.
    input: String,
    /// Input format; inferred from the extension when omitted.
    #[arg(long, value_enum)]
    format: Option<Format>,
    #[arg(long, default_value = "target/out")]
    out_dir: PathBuf,
    /// JSON file overriding the chart layout.
    #[arg(long)]
    config: Option<PathBuf>,
    #[arg(long, default_value = "light")]
    theme: String,
    #[arg(long)]
    no_png: bool,
    /// Also write the per-day counts as aggregate.json.
    #[arg(long)]
    dump_aggregate: bool,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();
    let (path, used_alt) = resolve_path(&args.input)?;
    info!(input = %path.display(), "using input file");
    if used_alt {
        info!("extension swapped between .csv/.cvs");
    }

    let format = args.format.unwrap_or_else(|| infer_format(&path));
    let records = match format {
        Format::Csv => load_survey_csv(&path),
        Format::Json => load_survey_json(&path),
    }
    .with_context(|| format!("failed to load '{}'", path.display()))?;
    info!(records = records.len(), ?format, "loaded survey responses");

    let config = match &args.config {
        Some(p) => {
            let text = std::fs::read_to_string(p).with_context(|| format!("reading {}", p.display()))?;
            ChartConfig::from_json(&text).with_context(|| format!("parsing config {}", p.display()))?
        }
        None => ChartConfig::default(),
    };

    let mut doc = Document::with_mount_points([MOUNT_ID]);
    let chart = AreaChart::with_config(&mut doc, MOUNT_ID, records, config)?;
    let frame = chart.frame();
    info!(
        points = chart.display_data().len(),
        from = %frame.x_domain.0,
        to = %frame.x_domain.1,
        max = frame.y_domain.1,
        "chart drawn"
    );

    std::fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("creating {}", args.out_dir.display()))?;

    let html = args.out_dir.join("area_chart.html");
    std::fs::write(&html, doc.to_html()).with_context(|| format!("writing {}", html.display()))?;
    println!("Wrote {}", html.display());

    let svg = args.out_dir.join("area_chart.svg");
    std::fs::write(&svg, chart.to_svg_file(&doc)).with_context(|| format!("writing {}", svg.display()))?;
    println!("Wrote {}", svg.display());

    if !args.no_png {
        let chosen = theme::find(&args.theme);
        if !chosen.name.eq_ignore_ascii_case(&args.theme) {
            warn!(requested = %args.theme, "unknown theme, using light");
        }
        let opts = RenderOptions { theme: chosen, ..RenderOptions::default() };
        let png = args.out_dir.join("area_chart.png");
        render_to_png(frame, &opts, &png)?;
        println!("Wrote {}", png.display());
    }

    if args.dump_aggregate {
        let out = args.out_dir.join("aggregate.json");
        let json = serde_json::to_string_pretty(chart.display_data())?;
        std::fs::write(&out, json).with_context(|| format!("writing {}", out.display()))?;
        println!("Wrote {}", out.display());
    }

    Ok(())
}

/// Resolve path, trying .csv/.cvs swap if needed.
/// Returns (actual_path, used_alt)
fn resolve_path(raw: &str) -> Result<(PathBuf, bool)> {
    let p = Path::new(raw);
    if p.exists() {
        return Ok((p.to_path_buf(), false));
    }
    if let Some(alt) = swap_ext(p) {
        if alt.exists() {
            return Ok((alt, true));
        }
    }
    anyhow::bail!("file not found: {}", p.display());
}

fn swap_ext(p: &Path) -> Option<PathBuf> {
    let ext = p.extension()?.to_str()?.to_ascii_lowercase();
    let alt = match ext.as_str() {
        "csv" => "cvs",
        "cvs" => "csv",
        _ => return None,
    };
    Some(p.with_extension(alt))
}

fn infer_format(p: &Path) -> Format {
    match p.extension().and_then(|e| e.to_str()) {
        Some(e) if e.eq_ignore_ascii_case("json") => Format::Json,
        _ => Format::Csv,
    }
}

fn load_survey_json(path: &Path) -> Result<Vec<RawRecord>> {
    let text = std::fs::read_to_string(path).with_context(|| format!("opening {}", path.display()))?;
    Ok(chart_core::parse_records_json(&text)?)
}

fn load_survey_csv(path: &Path) -> Result<Vec<RawRecord>> {
    let rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;
    read_survey_csv(rdr)
}

/// Every row becomes a record; the `survey` column is validated, the rest pass through as strings.
fn read_survey_csv<R: std::io::Read>(mut rdr: csv::Reader<R>) -> Result<Vec<RawRecord>> {
    let headers = rdr.headers()?.iter().map(|h| h.to_lowercase()).collect::<Vec<_>>();
    if !headers.iter().any(|h| h == "survey") {
        anyhow::bail!("missing 'survey' column (headers: {:?})", headers);
    }

    let mut out = Vec::new();
    for (index, rec) in rdr.records().enumerate() {
        let rec = rec?;
        let mut obj = Map::new();
        for (h, cell) in headers.iter().zip(rec.iter()) {
            let v = if cell.is_empty() { Value::Null } else { Value::String(cell.to_string()) };
            obj.insert(h.clone(), v);
        }
        out.push(RawRecord::from_value(index, Value::Object(obj))?);
    }
    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chart_core::{SurveyTime, ValidationError};

    fn reader(text: &str) -> csv::Reader<&[u8]> {
        csv::ReaderBuilder::new().trim(csv::Trim::All).from_reader(text.as_bytes())
    }

    #[test]
    fn csv_rows_become_records() {
        let recs = read_survey_csv(reader("survey,answer\n2024-01-01,yes\n2024-01-02,no\n")).unwrap();
        assert_eq!(recs.len(), 2);
        assert_eq!(recs[0].survey, SurveyTime::from_ymd(2024, 1, 1).unwrap());
        assert_eq!(recs[1].fields.get("answer"), Some(&Value::String("no".into())));
    }

    #[test]
    fn csv_blank_survey_reports_row_index() {
        let err = read_survey_csv(reader("survey,answer\n2024-01-01,yes\n,no\n")).unwrap_err();
        let v = err.downcast_ref::<ValidationError>().expect("validation error");
        assert!(matches!(v, ValidationError::MissingSurvey { index: 1 }));
    }

    #[test]
    fn csv_without_survey_column_fails() {
        assert!(read_survey_csv(reader("date,answer\n2024-01-01,yes\n")).is_err());
    }

    #[test]
    fn format_and_extension_helpers() {
        assert_eq!(infer_format(Path::new("a/b.JSON")), Format::Json);
        assert_eq!(infer_format(Path::new("a/b.csv")), Format::Csv);
        assert_eq!(swap_ext(Path::new("x.cvs")), Some(PathBuf::from("x.csv")));
        assert_eq!(swap_ext(Path::new("x.txt")), None);
    }
}
