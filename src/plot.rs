//! Summary charts drawn from the normalized table
//!
//! Charts are written as SVG.

use crate::error::{PbpError, Result};
use crate::model::{DistanceBucket, Month, NormalizedRow, Outcome};
use chrono::NaiveDate;
use plotters::coord::Shift;
use plotters::prelude::*;
use std::collections::BTreeMap;
use std::path::Path;

const BOX_PLOT_SIZE: (u32, u32) = (1000, 600);
const HEATMAP_SIZE: (u32, u32) = (1100, 600);

fn plot_err<E: std::fmt::Display>(e: E) -> PbpError {
    PbpError::Plot(e.to_string())
}

/// Months drawn in the box plot; the few October games are left out
pub const BOX_PLOT_MONTHS: [Month; 6] = [
    Month::November,
    Month::December,
    Month::January,
    Month::February,
    Month::March,
    Month::April,
];

/// Points from made shots per game in one season, grouped by month from November to April
pub fn monthly_game_totals(rows: &[NormalizedRow], season: u16) -> Vec<(Month, Vec<u32>)> {
    let mut per_game: BTreeMap<(Month, NaiveDate), u32> = BTreeMap::new();

    for row in rows {
        if row.season != season || row.outcome != Outcome::Make {
            continue;
        }
        match row.month {
            Some(month) if BOX_PLOT_MONTHS.contains(&month) => {
                *per_game.entry((month, row.date)).or_default() += row.points as u32;
            }
            _ => {}
        }
    }

    let mut months: Vec<(Month, Vec<u32>)> = Vec::new();
    for ((month, _date), points) in per_game {
        match months.last_mut() {
            Some((m, totals)) if *m == month => totals.push(points),
            _ => months.push((month, vec![points])),
        }
    }
    months
}

/// Shot attempts per season and distance band
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttemptGrid {
    pub seasons: Vec<u16>,
    /// `counts[season_idx][band_idx]`, bands in `DistanceBucket::BANDS` order
    pub counts: Vec<[usize; 7]>,
}

impl AttemptGrid {
    pub fn max(&self) -> usize {
        self.counts.iter().flatten().copied().max().unwrap_or(0)
    }

    pub fn get(&self, season: u16, bucket: DistanceBucket) -> Option<usize> {
        let s = self.seasons.iter().position(|x| *x == season)?;
        let b = DistanceBucket::BANDS.iter().position(|x| *x == bucket)?;
        Some(self.counts[s][b])
    }
}

/// Count attempts, leaving out free throws and at-rim shots
pub fn attempts_by_season_and_distance(rows: &[NormalizedRow]) -> AttemptGrid {
    let mut by_season: BTreeMap<u16, [usize; 7]> = BTreeMap::new();

    for row in rows {
        if let Some(band) = DistanceBucket::BANDS.iter().position(|b| *b == row.distance) {
            by_season.entry(row.season).or_default()[band] += 1;
        }
    }

    AttemptGrid {
        seasons: by_season.keys().copied().collect(),
        counts: by_season.into_values().collect(),
    }
}

/// "2005-06" style label for a season's end year
pub fn season_label(season: u16) -> String {
    format!("{}-{:02}", season.saturating_sub(1), season % 100)
}

fn draw_box_plot<DB: DrawingBackend>(
    root: &DrawingArea<DB, Shift>,
    groups: &[(Month, Vec<u32>)],
    title: &str,
) -> Result<()> {
    let labels: Vec<&str> = groups.iter().map(|(m, _)| m.name()).collect();
    let top = groups
        .iter()
        .flat_map(|(_, totals)| totals.iter())
        .copied()
        .max()
        .unwrap_or(0) as f32;

    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 24))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(50)
        .build_cartesian_2d(labels[..].into_segmented(), 0f32..top + 5.0)
        .map_err(plot_err)?;

    chart
        .configure_mesh()
        .x_desc("Month")
        .y_desc("Points")
        .draw()
        .map_err(plot_err)?;

    chart
        .draw_series(groups.iter().zip(labels.iter()).map(|((_, totals), label)| {
            let quartiles = Quartiles::new(totals);
            Boxplot::new_vertical(SegmentValue::CenterOf(label), &quartiles)
                .width(40)
                .style(BLUE)
        }))
        .map_err(plot_err)?;

    Ok(())
}

/// Box plot of per-game points by month for one season
pub fn render_box_plot(rows: &[NormalizedRow], season: u16, title: &str, path: &Path) -> Result<()> {
    let groups = monthly_game_totals(rows, season);
    if groups.is_empty() {
        return Err(PbpError::Plot(format!("No made shots in season {}", season)));
    }

    let root = SVGBackend::new(path, BOX_PLOT_SIZE).into_drawing_area();
    draw_box_plot(&root, &groups, title)?;
    root.present().map_err(plot_err)?;

    log::info!("Box plot for season {} saved to {}", season, path.display());
    Ok(())
}

fn draw_heatmap<DB: DrawingBackend>(root: &DrawingArea<DB, Shift>, grid: &AttemptGrid, title: &str) -> Result<()> {
    let seasons = grid.seasons.len();
    let bands = DistanceBucket::BANDS.len();
    let max = grid.max().max(1) as f64;

    // Labels go at cell centres
    let centres = |n: usize| (0..n).map(|i| i as f64 + 0.5).collect::<Vec<f64>>();

    root.fill(&WHITE).map_err(plot_err)?;

    let mut chart = ChartBuilder::on(root)
        .caption(title, ("sans-serif", 20))
        .margin(20)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(
            (0f64..seasons as f64).with_key_points(centres(seasons)),
            (0f64..bands as f64).with_key_points(centres(bands)),
        )
        .map_err(plot_err)?;

    let season_tick = |x: &f64| {
        grid.seasons
            .get(x.floor() as usize)
            .map(|s| s.to_string())
            .unwrap_or_default()
    };
    let band_tick = |y: &f64| {
        DistanceBucket::BANDS
            .get(y.floor() as usize)
            .map(|b| b.label().to_string())
            .unwrap_or_default()
    };

    chart
        .configure_mesh()
        .disable_mesh()
        .x_labels(seasons)
        .y_labels(bands)
        .x_label_formatter(&season_tick)
        .y_label_formatter(&band_tick)
        .x_desc("Season")
        .y_desc("Distance (ft)")
        .draw()
        .map_err(plot_err)?;

    let cells = grid.counts.iter().enumerate().flat_map(|(x, row)| {
        row.iter().enumerate().map(move |(y, count)| (x as f64, y as f64, *count))
    });

    chart
        .draw_series(cells.map(|(x, y, count)| {
            let heat = count as f64 / max;
            let color = HSLColor(0.0, 0.85, 0.95 - 0.55 * heat);
            Rectangle::new([(x, y), (x + 1.0, y + 1.0)], color.filled())
        }))
        .map_err(plot_err)?;

    Ok(())
}

/// Heatmap of shot attempts by season and distance band
pub fn render_heatmap(rows: &[NormalizedRow], title: &str, path: &Path) -> Result<()> {
    let grid = attempts_by_season_and_distance(rows);
    if grid.seasons.is_empty() {
        return Err(PbpError::Plot("No shot attempts with a distance".to_string()));
    }

    let root = SVGBackend::new(path, HEATMAP_SIZE).into_drawing_area();
    draw_heatmap(&root, &grid, title)?;
    root.present().map_err(plot_err)?;

    log::info!("Heatmap saved to {}", path.display());
    Ok(())
}
