//! Plain-text reports for the terminal.

use crate::comparison::{Comparison, ModeBreakdown, NationalTrend};
use crate::dataset::{Agency, Categories};
use crate::ranking::{MAX_PEERS, RankingPipeline};
use core::fmt::Display;
use owo_colors::{OwoColorize, Style};
use std::io::{Result, Write};

const NAME_WIDTH: usize = 40;
const VALUE_WIDTH: usize = 10;

fn paint(text: impl Display, style: Style, colors: bool) -> String {
    if colors { text.style(style).to_string() } else { text.to_string() }
}

fn heading() -> Style {
    Style::new().bold()
}

fn truncate(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        text.to_string()
    } else {
        let mut truncated: String = text.chars().take(width.saturating_sub(1)).collect();
        truncated.push('…');
        truncated
    }
}

/// Group the integer part of a value in thousands, e.g. `1234567` as `1,234,567`.
fn format_count(value: f64) -> String {
    #[expect(clippy::cast_possible_truncation, reason = "reported totals fit comfortably in i64")]
    let rounded = value.round() as i64;
    let digits = rounded.unsigned_abs().to_string();

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if rounded < 0 {
        grouped.push('-');
    }
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }

    grouped
}

/// Shorten a total to three significant figures with a K/M/B suffix.
fn format_compact(value: f64) -> String {
    let magnitude = value.abs();
    let (scaled, suffix) = if magnitude >= 1e9 {
        (value / 1e9, "B")
    } else if magnitude >= 1e6 {
        (value / 1e6, "M")
    } else if magnitude >= 1e3 {
        (value / 1e3, "K")
    } else {
        return format!("{value:.0}");
    };

    if scaled.abs() >= 100.0 {
        format!("{scaled:.0}{suffix}")
    } else if scaled.abs() >= 10.0 {
        format!("{scaled:.1}{suffix}")
    } else {
        format!("{scaled:.2}{suffix}")
    }
}

fn format_trend_value(value: Option<f64>, is_ratio: bool) -> String {
    match value {
        None => "-".to_string(),
        Some(v) if is_ratio => format!("{v:.2}"),
        Some(v) => format_compact(v),
    }
}

/// A label column followed by one right-aligned column per value.
fn trend_line(label: &str, values: &[Option<f64>], is_ratio: bool) -> String {
    let mut line = format!("{:<NAME_WIDTH$}", truncate(label, NAME_WIDTH));
    for value in values {
        line.push_str(&format!(" {:>VALUE_WIDTH$}", format_trend_value(*value, is_ratio)));
    }
    line
}

fn describe_agency(agency: &Agency) -> String {
    match (agency.city.is_empty(), agency.state.is_empty()) {
        (false, false) => format!("{} {} ({}, {})", agency.id, agency.name, agency.city, agency.state),
        (true, false) => format!("{} {} ({})", agency.id, agency.name, agency.state),
        _ => format!("{} {}", agency.id, agency.name),
    }
}

/// Write the ranked candidates, most similar first, marking those in the peer selection.
pub fn write_ranking<W: Write>(out: &mut W, pipeline: &RankingPipeline, limit: Option<usize>, colors: bool) -> Result<()> {
    if let Some(home) = pipeline.home_agency() {
        writeln!(out, "{} {}", paint("Home agency:", heading(), colors), describe_agency(home))?;
    }

    let criteria = pipeline.criteria().iter().map(ToString::to_string).collect::<Vec<_>>();
    if criteria.is_empty() {
        writeln!(out, "{} none, every candidate ties", paint("Criteria:", heading(), colors))?;
    } else {
        writeln!(out, "{} {}", paint("Criteria:", heading(), colors), criteria.join(", "))?;
    }

    let total = pipeline.candidate_count();
    let shown = limit.map_or(total, |limit| limit.min(total));
    writeln!(out, "{} {shown} of {total}", paint("Candidates:", heading(), colors))?;
    writeln!(out)?;

    if total == 0 {
        writeln!(out, "No agencies match the current filters.")?;
        return Ok(());
    }

    let header = format!(
        "{:>4}  {:1}  {:<7} {:<NAME_WIDTH$} {:<5} {:>15} {:>13} {:>8}",
        "Rank", "", "NTD ID", "Agency", "State", "Ridership", "Population", "Distance"
    );
    writeln!(out, "{}", paint(header, heading(), colors))?;

    for (rank, candidate) in pipeline.ranked().take(shown).enumerate() {
        let agency = candidate.agency;
        let selected = pipeline.selection().contains(agency.id);
        let line = format!(
            "{:>4}  {:1}  {:<7} {:<NAME_WIDTH$} {:<5} {:>15} {:>13} {:>8.4}",
            rank + 1,
            if selected { "*" } else { "" },
            agency.id.to_string(),
            truncate(&agency.name, NAME_WIDTH),
            agency.state,
            format_count(agency.ridership),
            agency.population.map_or_else(|| "-".to_string(), format_count),
            candidate.distance,
        );

        if selected {
            writeln!(out, "{}", paint(line, Style::new().green(), colors))?;
        } else {
            writeln!(out, "{line}")?;
        }
    }

    Ok(())
}

/// Write the current peer selection in ascending identifier order.
pub fn write_selection<W: Write>(out: &mut W, pipeline: &RankingPipeline, colors: bool) -> Result<()> {
    let selection = pipeline.selection();
    writeln!(
        out,
        "{} {} of {MAX_PEERS}",
        paint("Selected peers:", heading(), colors),
        selection.len()
    )?;

    for id in selection.iter() {
        if let Some(agency) = pipeline.universe().get(id) {
            writeln!(out, "  {}", describe_agency(agency))?;
        }
    }

    Ok(())
}

/// Write a year-by-year table for the home agency, each peer and the peer average.
pub fn write_comparison<W: Write>(out: &mut W, comparison: &Comparison, colors: bool) -> Result<()> {
    writeln!(
        out,
        "{} {} ({})",
        paint("Metric:", heading(), colors),
        comparison.metric,
        comparison.metric.description()
    )?;
    writeln!(out)?;

    if comparison.years.is_empty() {
        writeln!(out, "No yearly data for the selected agencies.")?;
        return Ok(());
    }

    let is_ratio = comparison.metric.is_ratio();
    let row = |label: &str, values: &[Option<f64>]| trend_line(label, values, is_ratio);

    let mut header = format!("{:<NAME_WIDTH$}", "Agency");
    for year in &comparison.years {
        header.push_str(&format!(" {year:>VALUE_WIDTH$}"));
    }
    writeln!(out, "{}", paint(header, heading(), colors))?;

    let home_label = format!("{} {}", comparison.home.id, comparison.home.name);
    writeln!(out, "{}", paint(row(&home_label, &comparison.home.values), Style::new().cyan(), colors))?;

    for peer in &comparison.peers {
        writeln!(out, "{}", row(&format!("{} {}", peer.id, peer.name), &peer.values))?;
    }

    if !comparison.peers.is_empty() {
        writeln!(out, "{}", paint(row("Peer average", &comparison.peer_average), Style::new().bold(), colors))?;
    }

    if let Some((year, gap)) = comparison.latest_gap() {
        let sign = if gap >= 0.0 { "+" } else { "-" };
        writeln!(out)?;
        writeln!(
            out,
            "{} {sign}{} in {year}",
            paint("Home vs. peer average:", heading(), colors),
            format_trend_value(Some(gap.abs()), is_ratio)
        )?;
    }

    Ok(())
}

/// Write the latest-year per-mode table for the home agency and each peer.
pub fn write_mode_breakdown<W: Write>(out: &mut W, breakdown: &ModeBreakdown, colors: bool) -> Result<()> {
    writeln!(
        out,
        "{} {} by mode ({})",
        paint("Metric:", heading(), colors),
        breakdown.metric,
        breakdown.metric.description()
    )?;
    writeln!(out)?;

    if breakdown.modes.is_empty() {
        writeln!(out, "No mode data for the selected agencies.")?;
        return Ok(());
    }

    let is_ratio = breakdown.metric.is_ratio();
    let mut header = format!("{:<NAME_WIDTH$}", "Agency");
    for mode in &breakdown.modes {
        header.push_str(&format!(" {:>VALUE_WIDTH$}", mode.code()));
    }
    writeln!(out, "{}", paint(header, heading(), colors))?;

    let home_line = trend_line(&format!("{} {}", breakdown.home.id, breakdown.home.name), &breakdown.home.values, is_ratio);
    writeln!(out, "{}", paint(home_line, Style::new().cyan(), colors))?;
    for peer in &breakdown.peers {
        writeln!(out, "{}", trend_line(&format!("{} {}", peer.id, peer.name), &peer.values, is_ratio))?;
    }

    writeln!(out)?;
    for mode in &breakdown.modes {
        writeln!(out, "  {:<3} {}", mode.code(), mode.name())?;
    }

    Ok(())
}

/// Write national values per mode and year, followed by every mode combined.
pub fn write_national_trend<W: Write>(out: &mut W, trend: &NationalTrend, colors: bool) -> Result<()> {
    writeln!(out, "{} {}", paint("National context:", heading(), colors), trend.metric)?;

    if trend.years.is_empty() {
        writeln!(out, "No national totals in the dataset.")?;
        return Ok(());
    }

    let is_ratio = trend.metric.is_ratio();
    let mut header = format!("{:<NAME_WIDTH$}", "Mode");
    for year in &trend.years {
        header.push_str(&format!(" {year:>VALUE_WIDTH$}"));
    }
    writeln!(out, "{}", paint(header, heading(), colors))?;

    for (mode, values) in &trend.rows {
        writeln!(out, "{}", trend_line(&format!("{} {}", mode.code(), mode.name()), values, is_ratio))?;
    }
    writeln!(out, "{}", paint(trend_line("All modes", &trend.all_modes, is_ratio), Style::new().bold(), colors))?;

    Ok(())
}

/// Write the choices available to each filter.
pub fn write_categories<W: Write>(out: &mut W, categories: &Categories, colors: bool) -> Result<()> {
    let sections: [(&str, Vec<String>); 4] = [
        ("Reporter types", categories.reporter_types.iter().cloned().collect()),
        ("Organization types", categories.organization_types.iter().cloned().collect()),
        ("States", categories.states.iter().cloned().collect()),
        (
            "Modes",
            categories
                .modes
                .iter()
                .map(|mode| format!("{:<3} {}", mode.code(), mode.name()))
                .collect(),
        ),
    ];

    for (title, values) in sections {
        writeln!(out, "{} ({})", paint(title, heading(), colors), values.len())?;
        for value in values {
            writeln!(out, "  {value}")?;
        }
        writeln!(out)?;
    }

    writeln!(
        out,
        "{} {}",
        paint("Metro areas:", heading(), colors),
        categories.uza_names.len()
    )?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparison::{compare, mode_breakdown, national_trend};
    use crate::dataset::{AgencyId, AgencyModeRecord, AgencyModes, ModeCode, ModeTotal, NationalModeTotals, Universe, YearlyRecord, YearlySeries};
    use crate::metrics::{SimilarityCriterion, TrendMetric};
    use crate::ranking::{PeerSelection, TieBreak};

    fn agency(id: u32, name: &str, ridership: f64) -> Agency {
        let mut agency = Agency::new(AgencyId::new(id), name);
        agency.city = "Springfield".to_string();
        agency.state = "IL".to_string();
        agency.ridership = ridership;
        agency.population = Some(250_000.0);
        agency.modes = [ModeCode::new("MB")].into_iter().collect();
        agency
    }

    fn pipeline() -> RankingPipeline {
        let universe = Universe::new(vec![
            agency(10, "Home Transit", 1_000_000.0),
            agency(20, "Near Transit", 990_000.0),
            agency(30, "Far Transit", 10.0),
        ])
        .unwrap();
        RankingPipeline::new(universe, AgencyId::new(10), [SimilarityCriterion::Ridership], TieBreak::InputOrder).unwrap()
    }

    fn render(f: impl FnOnce(&mut Vec<u8>) -> Result<()>) -> String {
        let mut buf = Vec::new();
        f(&mut buf).unwrap();
        String::from_utf8(buf).unwrap()
    }

    #[test]
    fn test_format_count() {
        assert_eq!(format_count(0.0), "0");
        assert_eq!(format_count(999.0), "999");
        assert_eq!(format_count(1_000.0), "1,000");
        assert_eq!(format_count(1_234_567.4), "1,234,567");
        assert_eq!(format_count(-12_345.0), "-12,345");
    }

    #[test]
    fn test_format_compact() {
        assert_eq!(format_compact(512.0), "512");
        assert_eq!(format_compact(1_500.0), "1.50K");
        assert_eq!(format_compact(25_300_000.0), "25.3M");
        assert_eq!(format_compact(412_000_000.0), "412M");
        assert_eq!(format_compact(2_000_000_000.0), "2.00B");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("abcdefghij", 5), "abcd…");
    }

    #[test]
    fn test_ranking_marks_selection() {
        let mut pipeline = pipeline();
        let _ = pipeline.toggle_peer(AgencyId::new(20)).unwrap();
        let text = render(|buf| write_ranking(buf, &pipeline, None, false));

        assert!(text.contains("Home agency: 00010 Home Transit (Springfield, IL)"));
        assert!(text.contains("Criteria: ridership"));
        assert!(text.contains("Candidates: 2 of 2"));

        let near = text.lines().find(|line| line.contains("Near Transit")).unwrap();
        assert!(near.contains('*'));
        assert!(near.trim_start().starts_with('1'));
        let far = text.lines().find(|line| line.contains("Far Transit")).unwrap();
        assert!(!far.contains('*'));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_ranking_limit() {
        let text = render(|buf| write_ranking(buf, &pipeline(), Some(1), false));
        assert!(text.contains("Candidates: 1 of 2"));
        assert!(!text.contains("Far Transit"));
    }

    #[test]
    fn test_ranking_colors() {
        let text = render(|buf| write_ranking(buf, &pipeline(), None, true));
        assert!(text.contains('\u{1b}'));
    }

    #[test]
    fn test_selection() {
        let mut pipeline = pipeline();
        pipeline.select_top(5);
        let text = render(|buf| write_selection(buf, &pipeline, false));
        assert!(text.starts_with("Selected peers: 2 of 19"));
        assert!(text.contains("00020 Near Transit"));
    }

    #[test]
    fn test_comparison_table() {
        let pipeline = pipeline();
        let mut home = YearlyRecord::new(AgencyId::new(10), 2023);
        home.ridership = 1_200_000.0;
        let mut peer = YearlyRecord::new(AgencyId::new(20), 2023);
        peer.ridership = 1_000_000.0;
        let series = YearlySeries::new(vec![home, peer]);

        let mut selection = PeerSelection::new(AgencyId::new(10));
        let _ = selection.toggle(AgencyId::new(20));

        let comparison = compare(pipeline.universe(), &series, &selection, TrendMetric::Ridership).unwrap();
        let text = render(|buf| write_comparison(buf, &comparison, false));

        assert!(text.contains("Metric: ridership"));
        assert!(text.contains("2023"));
        assert!(text.contains("1.20M"));
        assert!(text.contains("Peer average"));
        assert!(text.contains("Home vs. peer average: +200K in 2023"));
    }

    #[test]
    fn test_comparison_without_data() {
        let pipeline = pipeline();
        let comparison = compare(
            pipeline.universe(),
            &YearlySeries::default(),
            &PeerSelection::new(AgencyId::new(10)),
            TrendMetric::FarePerTrip,
        )
        .unwrap();
        let text = render(|buf| write_comparison(buf, &comparison, false));
        assert!(text.contains("No yearly data"));
    }

    #[test]
    fn test_mode_breakdown_table() {
        let pipeline = pipeline();
        let mut bus = AgencyModeRecord::new(AgencyId::new(10), "MB");
        bus.ridership = 900_000.0;
        let mut rail = AgencyModeRecord::new(AgencyId::new(20), "LR");
        rail.ridership = 45_000.0;
        let modes = AgencyModes::new([bus, rail]);

        let mut selection = PeerSelection::new(AgencyId::new(10));
        let _ = selection.toggle(AgencyId::new(20));

        let breakdown = mode_breakdown(pipeline.universe(), &modes, &selection, TrendMetric::Ridership).unwrap();
        let text = render(|buf| write_mode_breakdown(buf, &breakdown, false));

        assert!(text.contains("Metric: ridership by mode"));
        let home = text.lines().find(|line| line.contains("Home Transit")).unwrap();
        assert!(home.contains("900K"));
        assert!(home.contains('-'));
        let peer = text.lines().find(|line| line.contains("Near Transit")).unwrap();
        assert!(peer.contains("45.0K"));
        assert!(text.contains("LR  Light Rail"));
    }

    #[test]
    fn test_mode_breakdown_without_data() {
        let pipeline = pipeline();
        let breakdown =
            mode_breakdown(pipeline.universe(), &AgencyModes::default(), &PeerSelection::new(AgencyId::new(10)), TrendMetric::Ridership)
                .unwrap();
        let text = render(|buf| write_mode_breakdown(buf, &breakdown, false));
        assert!(text.contains("No mode data"));
    }

    #[test]
    fn test_national_trend_table() {
        let mut total = ModeTotal::new(2023, "MB");
        total.ridership = 4_100_000_000.0;
        total.operating_expenses = 26_000_000_000.0;
        let trend = national_trend(&NationalModeTotals::new([total]), &[], TrendMetric::CostPerTrip);
        let text = render(|buf| write_national_trend(buf, &trend, false));

        assert!(text.starts_with("National context: cost_per_trip"));
        assert!(text.contains("MB Bus"));
        let all = text.lines().find(|line| line.starts_with("All modes")).unwrap();
        assert!(all.contains("6.34"));
    }

    #[test]
    fn test_national_trend_without_data() {
        let trend = national_trend(&NationalModeTotals::default(), &[], TrendMetric::Ridership);
        let text = render(|buf| write_national_trend(buf, &trend, false));
        assert!(text.contains("No national totals"));
    }

    #[test]
    fn test_categories() {
        let pipeline = pipeline();
        let text = render(|buf| write_categories(buf, &pipeline.universe().categories(), false));
        assert!(text.contains("States (1)"));
        assert!(text.contains("  IL"));
        assert!(text.contains("MB  Bus"));
        assert!(text.contains("Metro areas: 0"));
    }
}
