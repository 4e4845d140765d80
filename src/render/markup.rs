//! Vector markup for stitched paths
//!
//! Produces the inner elements of an SVG document, one per line. The caller
//! wraps them in a root element (see [`crate::render::document`]).

use crate::algorithm::extraction::SegmentKind;
use crate::algorithm::stitching::StitchedPath;
use crate::spatial::tiles::Color;
use std::fmt::Write;

/// Format a coordinate or length for markup
///
/// Negative zero is written as `0`.
pub fn number(value: f64) -> String {
    format!("{}", value + 0.0)
}

/// Escape a colour for use inside a double-quoted attribute
pub fn attribute(color: &Color) -> String {
    let mut escaped = String::with_capacity(color.as_str().len());
    for c in color.as_str().chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '"' => escaped.push_str("&quot;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Path data for a curve path, already scaled to output units
///
/// Paths holding at least one full cubic arc become `M x y C ...`; shorter
/// ones fall back to a polyline `M x y L ...`. A lone point yields only the
/// move command and an empty path yields an empty string.
pub fn path_data(path: &StitchedPath, scale: f64) -> String {
    let Some(start) = path.points.first() else {
        return String::new();
    };
    let start = start.scaled(scale);
    let mut data = format!("M {} {}", number(start.x), number(start.y));

    if path.points.len() >= 4 {
        for arc in path.cubic_arcs() {
            data.push_str(" C");
            for point in arc {
                let point = point.scaled(scale);
                let _ = write!(data, " {} {}", number(point.x), number(point.y));
            }
        }
    } else {
        for point in path.points.iter().skip(1) {
            let point = point.scaled(scale);
            let _ = write!(data, " L {} {}", number(point.x), number(point.y));
        }
    }

    data
}

/// Markup for stitched paths in background-then-foreground order
///
/// Every element is indented four spaces and ends with a newline. Curve
/// paths with fewer than two points are omitted since they draw nothing.
pub fn paths_to_markup(paths: &[StitchedPath], scale: f64) -> String {
    let mut markup = String::new();

    for path in paths.iter().filter(|path| path.style.secondary_width > 0.0) {
        push_element(
            &mut markup,
            path,
            &path.style.secondary_color,
            path.style.secondary_total_weight * scale,
            scale,
        );
    }

    for path in paths {
        push_element(
            &mut markup,
            path,
            &path.style.primary_color,
            path.style.primary_weight * scale,
            scale,
        );
    }

    markup
}

fn push_element(markup: &mut String, path: &StitchedPath, color: &Color, width: f64, scale: f64) {
    match path.kind {
        SegmentKind::Point => {
            let Some(center) = path.points.first() else {
                return;
            };
            let center = center.scaled(scale);
            let _ = writeln!(
                markup,
                "    <circle cx=\"{}\" cy=\"{}\" r=\"{}\" fill=\"{}\"/>",
                number(center.x),
                number(center.y),
                number(width / 2.0),
                attribute(color)
            );
        }
        SegmentKind::Bezier => {
            if path.points.len() < 2 {
                return;
            }
            let _ = writeln!(
                markup,
                "    <path d=\"{}\" fill=\"none\" stroke=\"{}\" stroke-width=\"{}\" \
                 stroke-linecap=\"round\" stroke-linejoin=\"round\"/>",
                path_data(path, scale),
                attribute(color),
                number(width)
            );
        }
    }
}
