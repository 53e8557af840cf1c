use std::path::Path;

use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use stampcut::io::writers::report::{RunReport, write_run_report};
use stampcut::{
    BatchReport, CanvasSize, ClassifierKind, ClassifierRule, DirectorySink, ExtractionParams,
    GridArea, GridSpec, Margin, StampSpec, analyze_sheet, extract_stamps, grid_stamps,
    load_manifest, load_sheet, rect_stamps,
};

use super::args::CliArgs;
use super::errors::AppError;

fn parse_size(size: &str) -> Result<CanvasSize, AppError> {
    let parsed: CanvasSize = size.parse().map_err(|_| AppError::InvalidSize {
        size: size.to_string(),
    })?;
    if parsed.width == 0 || parsed.height == 0 {
        return Err(AppError::ZeroSize {
            size: size.to_string(),
        });
    }
    Ok(parsed)
}

fn parse_grid(args: &CliArgs) -> Result<Option<GridSpec>, AppError> {
    match (args.rows, args.cols) {
        (Some(rows), Some(cols)) => Ok(Some(GridSpec::new(rows, cols))),
        (None, None) => Ok(None),
        (Some(_), None) => Err(AppError::MissingArgument {
            arg: "--cols".to_string(),
        }),
        (None, Some(_)) => Err(AppError::MissingArgument {
            arg: "--rows".to_string(),
        }),
    }
}

fn build_rules(args: &CliArgs) -> Vec<ClassifierRule> {
    let primary = match args.classifier {
        ClassifierKind::Channel => ClassifierRule::ChannelThreshold {
            threshold: args.threshold,
        },
        ClassifierKind::MeanSpread => ClassifierRule::MeanSpread {
            threshold: args.threshold,
            spread: args.spread,
        },
    };
    std::iter::once(primary)
        .chain(
            args.fallback_thresholds
                .iter()
                .map(|&t| primary.with_threshold(t)),
        )
        .collect()
}

fn build_margin(args: &CliArgs) -> Margin {
    if let Some(ratio) = args.margin_ratio {
        Margin::Ratio(ratio)
    } else if let Some(px) = args.margin_px {
        Margin::Pixels(px)
    } else if let Some(px) = args.grow_px {
        Margin::Grow(px)
    } else {
        Margin::None
    }
}

/// Builds the extraction parameters from processing flags.
pub(crate) fn build_params(args: &CliArgs) -> Result<ExtractionParams, AppError> {
    Ok(ExtractionParams {
        grid: parse_grid(args)?,
        grid_area: if args.grid_over_content {
            GridArea::Content
        } else {
            GridArea::Image
        },
        margin: build_margin(args),
        rules: build_rules(args),
        alpha_floor: args.alpha_floor,
        min_foreground: args.min_foreground,
        padding: args.padding,
        canvas: parse_size(&args.canvas)?,
        fit: args.fit.as_deref().map(parse_size).transpose()?,
        filter: args.resample,
        empty_policy: args.empty,
        format: args.format,
    })
}

/// Stamps from `--rect` when given, otherwise one per grid cell.
pub(crate) fn build_stamps(
    args: &CliArgs,
    grid: Option<GridSpec>,
) -> Result<Vec<StampSpec>, AppError> {
    if !args.rects.is_empty() {
        return Ok(rect_stamps(&args.rects, &args.names, &args.prefix));
    }
    let grid = grid.ok_or(AppError::MissingArgument {
        arg: "--rows/--cols or --rect".to_string(),
    })?;
    let total = grid.cell_count();
    if args.names.len() > total {
        warn!(
            "{} names given for {} cells; extra names are ignored",
            args.names.len(),
            total
        );
    }
    Ok(grid_stamps(grid, &args.names, &args.prefix))
}

/// Resolves parameters and stamps from the manifest when one is given,
/// falling back to the processing flags otherwise.
pub(crate) fn build_job(args: &CliArgs) -> Result<(ExtractionParams, Vec<StampSpec>), AppError> {
    let (params, stamps) = match &args.manifest {
        Some(path) => {
            info!("Loading manifest: {:?}", path);
            let manifest = load_manifest(path)?;
            let mut params = manifest.params;
            if params.grid.is_none() {
                params.grid = parse_grid(args)?;
            }
            let stamps = if manifest.stamps.is_empty() {
                build_stamps(args, params.grid)?
            } else {
                manifest.stamps
            };
            (params, stamps)
        }
        None => {
            let params = build_params(args)?;
            let stamps = build_stamps(args, params.grid)?;
            (params, stamps)
        }
    };
    params.validate()?;
    Ok((params, stamps))
}

fn print_summary(report: &BatchReport) {
    println!(
        "Attempted: {}, Succeeded: {}, Empty: {}, Skipped: {}, Failed: {}",
        report.attempted, report.succeeded, report.empty, report.skipped, report.failed
    );
    for (output, error) in report
        .stamps
        .iter()
        .filter_map(|r| r.error.as_ref().map(|e| (&r.output, e)))
    {
        println!("  {}: {}", output, error);
    }
}

fn run_analysis(input: &Path, params: &ExtractionParams) -> Result<(), Box<dyn std::error::Error>> {
    let sheet = load_sheet(input)?;
    let analysis = analyze_sheet(&sheet, params)?;

    println!("Sheet: {}x{}", analysis.width, analysis.height);
    match analysis.content {
        Some(content) => println!("Content bounds: {}", content),
        None => println!("Content bounds: none"),
    }
    println!("Grid area: {}", analysis.grid_area);
    for cell in &analysis.cells {
        println!(
            "r{}c{} {}: {} foreground px",
            cell.cell.row + 1,
            cell.cell.col + 1,
            cell.region,
            cell.foreground
        );
    }
    println!(
        "Occupied cells: {}/{}",
        analysis.occupied(params.min_foreground).count(),
        analysis.cells.len()
    );
    Ok(())
}

pub fn run(args: CliArgs) -> Result<(), Box<dyn std::error::Error>> {
    if args.log {
        let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("debug"));
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }

    let input = args.input.clone().ok_or(AppError::MissingArgument {
        arg: "--input".to_string(),
    })?;

    if args.analyze {
        let mut params = match &args.manifest {
            Some(path) => load_manifest(path)?.params,
            None => build_params(&args)?,
        };
        if params.grid.is_none() {
            params.grid = parse_grid(&args)?;
        }
        return run_analysis(&input, &params);
    }

    let output_dir = args.output_dir.clone().ok_or(AppError::MissingArgument {
        arg: "--output-dir".to_string(),
    })?;
    let (params, stamps) = build_job(&args)?;

    info!("Input sheet: {:?}", input);
    info!("Output directory: {:?}", output_dir);
    let sheet = load_sheet(&input)?;
    let mut sink = DirectorySink::create(&output_dir, params.format)?;
    let report = extract_stamps(&sheet, &stamps, &params, &mut sink)?;

    if let Some(path) = &args.report {
        write_run_report(path, &RunReport::new(&input, &params, &report))?;
    }
    print_summary(&report);
    Ok(())
}
