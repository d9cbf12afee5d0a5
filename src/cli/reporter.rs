// SPDX-License-Identifier: Apache-2.0
// Copyright (c) 2025 Polyframe Inc.

//! CLI output reporter with colored formatting

use crate::section::Section;
use crate::utils::Precision;
use colored::*;
use std::time::Duration;

/// CLI reporter for formatted output
pub struct Reporter;

impl Reporter {
    /// Report a single section with per-contour details
    pub fn report_section(
        source: &str,
        section: &Section,
        duration: Duration,
        hull_precision: Option<Precision>,
    ) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Section:".bold(), source.cyan());
        println!(
            "  {} n = ({:.4}, {:.4}, {:.4}), d = {:.4}",
            "Plane:".bright_black(),
            section.plane.normal.x,
            section.plane.normal.y,
            section.plane.normal.z,
            section.plane.constant
        );
        println!("{}", "━".repeat(80).bright_black());

        if section.is_empty() {
            println!("{} {}", "⚠️ ".yellow(), "Plane does not cut the mesh".yellow());
        }

        println!(
            "  {} {}",
            "Segments:".bright_black(),
            section.segment_count.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Contours:".bright_black(),
            section.contours.len().to_string().cyan()
        );
        println!("  {} {:.6}", "Area:".bright_black(), section.area());
        println!("  {} {:.6}", "Perimeter:".bright_black(), section.perimeter());

        let hulls = hull_precision.map(|precision| section.hulls(precision));
        for (i, contour) in section.contours.iter().enumerate() {
            let status = if contour.closed {
                "closed".green()
            } else {
                "open".yellow()
            };
            print!(
                "    #{:<3} {:>6} points  {}  area {:.6}",
                i,
                contour.len(),
                status,
                contour.area()
            );
            match hulls.as_ref().map(|h| h[i].len()) {
                Some(corners) => println!("  hull {} corners", corners),
                None => println!(),
            }
        }

        println!(
            "\n  {} {}",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report a sweep as one table row per plane
    pub fn report_sweep(source: &str, offsets: &[f64], sections: &[Section], duration: Duration) {
        println!("\n{}", "━".repeat(80).bright_black());
        println!("{} {}", "Sweep:".bold(), source.cyan());
        println!("{}", "━".repeat(80).bright_black());
        println!(
            "  {:>12} {:>10} {:>10} {:>14} {:>14}",
            "offset".bold(),
            "segments".bold(),
            "contours".bold(),
            "area".bold(),
            "perimeter".bold()
        );

        for (offset, section) in offsets.iter().zip(sections) {
            let row = format!(
                "  {:>12.5} {:>10} {:>10} {:>14.6} {:>14.6}",
                offset,
                section.segment_count,
                section.contours.len(),
                section.area(),
                section.perimeter()
            );
            if section.is_empty() {
                println!("{}", row.bright_black());
            } else {
                println!("{}", row);
            }
        }

        println!(
            "\n  {} {} ({} planes)",
            "Time:".bright_black(),
            Self::format_duration(duration).yellow(),
            sections.len()
        );
        println!("{}", "━".repeat(80).bright_black());
    }

    /// Report a generated mesh
    pub fn report_mesh(name: &str, vertices: usize, triangles: usize, closed: bool) {
        println!("{} {}", "Generated:".bold(), name.cyan());
        println!(
            "  {} {}",
            "Vertices:".bright_black(),
            vertices.to_string().cyan()
        );
        println!(
            "  {} {}",
            "Triangles:".bright_black(),
            triangles.to_string().cyan()
        );
        let closed = if closed { "yes".green() } else { "no".yellow() };
        println!("  {} {}", "Closed:".bright_black(), closed);
    }

    /// Report error
    pub fn report_error(message: &str) {
        eprintln!("\n{} {}", "❌ Error:".red().bold(), message);
    }

    /// Report warning
    pub fn report_warning(message: &str) {
        println!("\n{} {}", "⚠️  Warning:".yellow().bold(), message);
    }

    /// Print success message
    pub fn success(message: &str) {
        println!("{} {}", "✅".green(), message.green());
    }

    /// Format duration for display
    pub fn format_duration(duration: Duration) -> String {
        let micros = duration.as_micros();

        if micros < 1_000 {
            format!("{}µs", micros)
        } else if micros < 1_000_000 {
            format!("{:.2}ms", micros as f64 / 1_000.0)
        } else {
            format!("{:.2}s", micros as f64 / 1_000_000.0)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_duration() {
        assert_eq!(
            Reporter::format_duration(Duration::from_micros(500)),
            "500µs"
        );
        assert_eq!(
            Reporter::format_duration(Duration::from_millis(5)),
            "5.00ms"
        );
        assert_eq!(Reporter::format_duration(Duration::from_secs(2)), "2.00s");
    }
}
