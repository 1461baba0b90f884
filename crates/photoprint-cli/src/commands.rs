//! Subcommand implementations.

use std::ffi::OsString;
use std::fs;
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};
use photoprint_core::compose::{render_preview, render_print, CompositeOptions};
use photoprint_core::decode::{decode_file, read_header};
use photoprint_core::encode::{encode, OutputFormat};
use photoprint_core::paper::{MIN_PREVIEW_HEIGHT, MIN_PREVIEW_WIDTH};
use photoprint_core::{
    compute_placement_with_policy, Canvas, DecodedImage, FilterType, LayoutMode,
    OrientationPolicy, PaperSize, PlacementGeometry, PrintSettings,
};
use serde::Serialize;

use crate::config::ConfigStore;
use crate::print::{list_printers, PrintJob};
use crate::JobArgs;

/// Saved settings with this invocation's overrides applied.
#[derive(Debug, Clone, PartialEq)]
pub struct Job {
    pub settings: PrintSettings,
    pub mode: LayoutMode,
}

pub fn resolve(saved: &PrintSettings, args: &JobArgs) -> Job {
    let mut settings = saved.clone();
    if let Some(paper) = args.paper {
        settings.paper_size = paper;
    }
    if let Some(dpi) = args.dpi {
        settings.dpi = dpi;
    }
    if let Some(quality) = args.quality {
        settings.quality = quality.into();
    }
    if let Some(policy) = args.policy {
        settings.orientation_policy = policy.into();
    }
    let mode = args.mode.map_or(settings.last_scale_mode, LayoutMode::from);
    settings.last_scale_mode = mode;
    Job { settings, mode }
}

/// Resolve the job and remember an explicitly chosen mode.
fn start_job(store: &mut ConfigStore, args: &JobArgs) -> Job {
    let job = resolve(store.settings(), args);
    if let Some(mode) = args.mode {
        if let Err(e) = store.update(|s| s.last_scale_mode = mode.into()) {
            tracing::warn!(error = %e, "could not remember layout mode");
        }
    }
    job
}

#[derive(Debug, Serialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

/// What `photoprint layout` prints.
#[derive(Debug, Serialize)]
pub struct LayoutReport {
    pub image: Size,
    pub paper: PaperSize,
    pub dpi: u32,
    pub mode: LayoutMode,
    pub policy: OrientationPolicy,
    pub canvas: Canvas,
    /// Size of the raster that will be sent to the printer.
    pub raster: Canvas,
    pub geometry: PlacementGeometry,
}

pub fn layout_report(image_width: u32, image_height: u32, job: &Job) -> Result<LayoutReport> {
    let settings = &job.settings;
    let canvas = Canvas::for_print(settings.paper_size, settings.dpi)?;
    let geometry = compute_placement_with_policy(
        image_width as f64,
        image_height as f64,
        canvas.width as f64,
        canvas.height as f64,
        job.mode,
        settings.orientation_policy,
    )?;
    let raster = if geometry.rotate_image_90 {
        canvas
    } else {
        Canvas {
            width: geometry.working_width as u32,
            height: geometry.working_height as u32,
        }
    };

    Ok(LayoutReport {
        image: Size {
            width: image_width,
            height: image_height,
        },
        paper: settings.paper_size,
        dpi: settings.dpi,
        mode: job.mode,
        policy: settings.orientation_policy,
        canvas,
        raster,
        geometry,
    })
}

pub fn layout(store: &mut ConfigStore, image: &Path, args: &JobArgs) -> Result<()> {
    let job = start_job(store, args);
    let bytes = fs::read(image).with_context(|| format!("cannot read {}", image.display()))?;
    let meta = read_header(&bytes).with_context(|| format!("cannot decode {}", image.display()))?;
    let (width, height) = meta.oriented_dimensions();

    let report = layout_report(width, height, &job)?;
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

fn load_photo(image: &Path) -> Result<DecodedImage> {
    let photo = decode_file(image).with_context(|| format!("cannot load {}", image.display()))?;
    tracing::info!(
        path = %image.display(),
        width = photo.width,
        height = photo.height,
        "loaded photo"
    );
    Ok(photo)
}

/// Encode by the output's extension and write it.
pub fn write_raster(raster: &DecodedImage, output: &Path, settings: &PrintSettings) -> Result<()> {
    let format = OutputFormat::from_path(output)?;
    let bytes = encode(raster, format, settings.quality.jpeg_quality())?;
    fs::write(output, bytes).with_context(|| format!("cannot write {}", output.display()))?;
    tracing::info!(path = %output.display(), %format, "wrote raster");
    Ok(())
}

pub fn preview(
    store: &mut ConfigStore,
    image: &Path,
    output: &Path,
    (width, height): (u32, u32),
    args: &JobArgs,
) -> Result<()> {
    let job = start_job(store, args);
    let photo = load_photo(image)?;

    let widget = (width.max(MIN_PREVIEW_WIDTH), height.max(MIN_PREVIEW_HEIGHT));
    if widget != (width, height) {
        tracing::warn!(
            width = widget.0,
            height = widget.1,
            "preview widget enlarged to its minimum size"
        );
    }

    let options = CompositeOptions {
        filter: FilterType::Bilinear,
        ..CompositeOptions::from_settings(&job.settings, job.mode)
    };
    let raster = render_preview(&photo, widget.0, widget.1, job.settings.paper_size, &options)?;
    write_raster(&raster, output, &job.settings)?;
    println!("Preview {}x{} -> {}", raster.width, raster.height, output.display());
    Ok(())
}

pub fn render(store: &mut ConfigStore, image: &Path, output: &Path, args: &JobArgs) -> Result<()> {
    let job = start_job(store, args);
    let photo = load_photo(image)?;
    let raster = render_print(&photo, &job.settings, job.mode)?;
    write_raster(&raster, output, &job.settings)?;
    println!("Rendered {}x{} -> {}", raster.width, raster.height, output.display());
    Ok(())
}

pub fn print(
    store: &mut ConfigStore,
    image: &Path,
    printer: Option<String>,
    copies: u32,
    dry_run: bool,
    args: &JobArgs,
) -> Result<()> {
    let job = start_job(store, args);
    let photo = load_photo(image)?;
    let raster = render_print(&photo, &job.settings, job.mode)?;

    let mut file = tempfile::Builder::new()
        .prefix("photoprint-")
        .suffix(".png")
        .tempfile()
        .context("cannot create temporary print file")?;
    let png = encode(&raster, OutputFormat::Png, 100)?;
    file.write_all(&png)?;
    file.flush()?;

    let printer = printer
        .as_deref()
        .map(str::trim)
        .filter(|name| !name.is_empty());
    let request = print_request(&raster, &job.settings, printer, copies);

    if dry_run {
        let args: Vec<String> = request
            .lp_args(file.path())
            .iter()
            .map(|a: &OsString| a.to_string_lossy().into_owned())
            .collect();
        println!("lp {}", args.join(" "));
        return Ok(());
    }

    let reply = request.submit(file.path())?;
    if let Some(name) = printer {
        store.update(|s| s.printer_name = name.to_string())?;
    }
    if reply.is_empty() {
        println!("Sent {} to the printer", image.display());
    } else {
        println!("{reply}");
    }
    Ok(())
}

/// Spooler job for a finished raster; an explicit printer beats the saved one.
fn print_request<'a>(
    raster: &DecodedImage,
    settings: &'a PrintSettings,
    printer: Option<&'a str>,
    copies: u32,
) -> PrintJob<'a> {
    PrintJob {
        printer: printer.or(settings.printer()),
        copies,
        paper: settings.paper_size,
        landscape: raster.is_landscape(),
    }
}

pub fn printers(store: &ConfigStore) -> Result<()> {
    let saved = store.settings().printer();
    let printers = list_printers(saved)?;
    if printers.is_empty() {
        println!("No printers found");
        return Ok(());
    }
    for entry in &printers {
        let mark = if entry.selected { '*' } else { ' ' };
        println!("{mark} {}", entry.name);
    }
    if let Some(name) = saved {
        if !printers.iter().any(|entry| entry.selected) {
            tracing::warn!(printer = name, "saved printer is not known to the spooler");
        }
    }
    Ok(())
}

pub fn config_show(store: &ConfigStore) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(store.settings())?);
    Ok(())
}

pub fn config_set(store: &mut ConfigStore, key: &str, value: &str) -> Result<()> {
    store.set(key, value)?;
    println!("{} = {}", key, store.settings().get(key)?);
    Ok(())
}
