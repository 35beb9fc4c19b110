//! Small display helpers shared across the workflow.
use std::path::PathBuf;

/// Render a byte count in a compact human-readable form.
pub fn format_bytes(bytes: usize) -> String {
    const UNITS: [&str; 4] = ["B", "kB", "MB", "GB"];
    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1000.0 && unit < UNITS.len() - 1 {
        value /= 1000.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{bytes} B")
    } else {
        format!("{value:.2} {}", UNITS[unit])
    }
}

/// Join paths for log output.
pub fn display_paths(paths: &[PathBuf]) -> String {
    paths
        .iter()
        .map(|path| path.display().to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_picks_the_unit() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(999), "999 B");
        assert_eq!(format_bytes(1000), "1.00 kB");
        assert_eq!(format_bytes(1536), "1.54 kB");
        assert_eq!(format_bytes(2_450_000), "2.45 MB");
    }

    #[test]
    fn display_paths_joins_in_order() {
        let paths = [PathBuf::from("a.js"), PathBuf::from("dist/b.js")];
        assert_eq!(display_paths(&paths), "a.js, dist/b.js");
    }
}
