//! `dosa classify`: one classification pass over an edge file, with a per-cell summary.

use std::fmt::Write;
use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use chrono::Weekday;
use log::{info, warn};

use dosa_core::{
    ClassificationMode, CondensedGraph, Corners, Pass, Registry, Scenario, WeekdayMask, WidthRange, R2,
};

use crate::dataset::{read_edges, read_json, write_json};

#[derive(Debug, Clone, clap::Args)]
pub struct ClassifyArgs {
    /// Edge list (JSON array of edges; `.gz` is decompressed)
    #[arg(short, long)]
    pub edges: PathBuf,

    /// Scenario file with `config`, `filters` and `regions` (JSON)
    #[arg(short, long)]
    pub scenario: Option<PathBuf>,

    /// Extra region as `x0,y0,x1,y1` (draw-start and draw-end corners); repeatable
    #[arg(short, long = "region", value_parser = parse_corners, allow_hyphen_values = true)]
    pub regions: Vec<Corners>,

    /// Number of region slots (overrides the scenario)
    #[arg(long)]
    pub capacity: Option<usize>,

    /// Rendered-edge cap for subsampling, 0 for none (overrides the scenario)
    #[arg(long)]
    pub target_count: Option<usize>,

    /// Classification mode as any of `w` (within), `b` (between), `g` (background), e.g. `wb`;
    /// `-` for none (overrides the scenario)
    #[arg(short, long, value_parser = parse_mode)]
    pub mode: Option<ClassificationMode>,

    /// Weekdays to include: a bitmask (bit 0 = Monday) or names like `mon,tue,sat`
    #[arg(short, long, value_parser = parse_weekdays)]
    pub weekdays: Option<WeekdayMask>,

    /// Write the full pass (visible edges, matrix, totals) as JSON
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Write the condensed region graph as JSON
    #[arg(short, long)]
    pub graph: Option<PathBuf>,

    /// Link width range for the condensed graph
    #[arg(long, default_value = "1")]
    pub min_width: f64,
    #[arg(long, default_value = "10")]
    pub max_width: f64,
}

pub fn parse_corners(s: &str) -> Result<Corners> {
    let coords = s
        .split(',')
        .map(|c| c.trim().parse::<f64>().with_context(|| format!("invalid coordinate {:?}", c)))
        .collect::<Result<Vec<_>>>()?;
    match coords.as_slice() {
        &[x0, y0, x1, y1] => Ok(Corners { a: R2::new(x0, y0), b: R2::new(x1, y1) }),
        _ => bail!("expected x0,y0,x1,y1, got {:?}", s),
    }
}

pub fn parse_mode(s: &str) -> Result<ClassificationMode> {
    let mut mode = ClassificationMode::default();
    for c in s.chars() {
        match c {
            'w' => mode.within = true,
            'b' => mode.between = true,
            'g' => mode.background = true,
            '-' => {}
            _ => bail!("unknown mode flag {:?} in {:?}; expected w, b, g", c, s),
        }
    }
    Ok(mode)
}

pub fn parse_weekdays(s: &str) -> Result<WeekdayMask> {
    if let Ok(bits) = s.parse::<u8>() {
        if bits > WeekdayMask::ALL.0 {
            bail!("weekday mask {} has bits above Sunday", bits);
        }
        return Ok(WeekdayMask(bits));
    }
    let days = s
        .split(',')
        .map(|d| d.trim().parse::<Weekday>().map_err(|_| anyhow::anyhow!("invalid weekday {:?}", d)))
        .collect::<Result<Vec<_>>>()?;
    Ok(WeekdayMask::from_days(days))
}

/// Human-readable per-cell counts.
pub fn summarize(pass: &Pass, registry: &Registry) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "regions: {}/{}", registry.len(), registry.capacity());
    for region in registry.active() {
        let _ = writeln!(out, "  R{}: {}", region.slot, region.rect);
    }
    let _ = writeln!(
        out,
        "visible: {} of {} edges ({} rendered, stride {})",
        pass.total_visible, pass.total_edges, pass.visible.len(), pass.stride,
    );
    for (attribution, count) in pass.matrix.non_zero() {
        let share = count as f64 / pass.total_visible as f64;
        let _ = writeln!(out, "  {}: {} ({:.1}%)", attribution, count, share * 100.);
    }
    out
}

pub fn run(args: ClassifyArgs) -> Result<()> {
    let mut scenario: Scenario = match &args.scenario {
        Some(path) => read_json(path)?,
        None => Scenario::default(),
    };
    if let Some(capacity) = args.capacity {
        scenario.config.capacity = capacity;
    }
    if let Some(target_count) = args.target_count {
        scenario.config.target_count = target_count;
    }
    if let Some(mode) = args.mode {
        scenario.filters.mode = mode;
    }
    if let Some(weekdays) = args.weekdays {
        scenario.filters.weekdays = weekdays;
    }
    scenario.regions.extend(args.regions.iter().copied());

    let (mut engine, declined) = scenario.engine().context("invalid scenario config")?;
    for e in &declined {
        warn!("region declined: {}", e);
    }
    engine.load(read_edges(&args.edges)?);
    info!("mode {}, weekdays {}", engine.filters().mode, engine.filters().weekdays);

    engine.recompute();
    print!("{}", summarize(engine.last_pass(), engine.registry()));

    if let Some(path) = &args.output {
        write_json(path, engine.last_pass())?;
        info!("wrote pass to {}", path.display());
    }
    if let Some(path) = &args.graph {
        let range = WidthRange { min: args.min_width, max: args.max_width };
        let graph = CondensedGraph::new(engine.last_pass(), engine.registry(), range);
        write_json(path, &graph)?;
        info!("wrote graph ({} nodes, {} links) to {}", graph.nodes.len(), graph.links.len(), path.display());
    }
    Ok(())
}
