//! City datasets and coordinate bounds.
//!
//! A dataset is an ordered sequence of cities; the order defines the cyclic
//! visitation sequence used by the trainer. Datasets are stored as text files
//! under a data directory and resolved by name, either as plain `x y` rows or
//! as TSPLIB files with a `NODE_COORD_SECTION`.

use crate::error::{Result, SomTourError};
use log::debug;
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

/// A city on the shared 2-D plane. Coordinates carry no assumed unit.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct City {
    /// Horizontal coordinate.
    pub x: f64,
    /// Vertical coordinate.
    pub y: f64,
}

impl City {
    /// Creates a new city.
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned rectangular region of the plane.
///
/// Derived from a dataset's coordinate extents rather than hardcoded, so the
/// engine stays dataset-agnostic.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    /// Smallest x coordinate.
    pub min_x: f64,
    /// Smallest y coordinate.
    pub min_y: f64,
    /// Largest x coordinate.
    pub max_x: f64,
    /// Largest y coordinate.
    pub max_y: f64,
}

impl Bounds {
    /// Computes the tightest bounds enclosing every city.
    pub fn of(cities: &[City]) -> Result<Self> {
        if cities.is_empty() {
            return Err(SomTourError::EmptyInput(
                "cannot compute bounds of an empty dataset".to_string(),
            ));
        }

        let mut bounds = Bounds {
            min_x: f64::INFINITY,
            min_y: f64::INFINITY,
            max_x: f64::NEG_INFINITY,
            max_y: f64::NEG_INFINITY,
        };
        for city in cities {
            bounds.min_x = bounds.min_x.min(city.x);
            bounds.min_y = bounds.min_y.min(city.y);
            bounds.max_x = bounds.max_x.max(city.x);
            bounds.max_y = bounds.max_y.max(city.y);
        }
        Ok(bounds)
    }

    /// Expands each side by `factor` times the extent of its axis.
    pub fn padded(&self, factor: f64) -> Self {
        let dx = self.width() * factor;
        let dy = self.height() * factor;
        Self {
            min_x: self.min_x - dx,
            min_y: self.min_y - dy,
            max_x: self.max_x + dx,
            max_y: self.max_y + dy,
        }
    }

    /// Extent along the x axis.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    /// Extent along the y axis.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }

    /// Whether the point lies within the bounds (inclusive).
    pub fn contains(&self, x: f64, y: f64) -> bool {
        x >= self.min_x && x <= self.max_x && y >= self.min_y && y <= self.max_y
    }
}

/// Loads a named city set from the data directory.
///
/// The name resolves to `<data_dir>/<name>.txt` or `<data_dir>/<name>.tsp`,
/// tried in that order.
pub fn load_dataset(name: &str, data_dir: &Path) -> Result<Vec<City>> {
    let candidates = [
        data_dir.join(format!("{name}.txt")),
        data_dir.join(format!("{name}.tsp")),
    ];
    let path = candidates
        .iter()
        .find(|p| p.is_file())
        .ok_or_else(|| SomTourError::DatasetNotFound(data_dir.join(name)))?;

    let cities = parse_dataset(path)?;
    if cities.is_empty() {
        return Err(SomTourError::EmptyInput(format!(
            "dataset '{name}' contains no cities"
        )));
    }

    debug!("Loaded {} cities from {:?}", cities.len(), path);
    Ok(cities)
}

/// Parses a dataset file, plain or TSPLIB.
fn parse_dataset(path: &Path) -> Result<Vec<City>> {
    let file = File::open(path)?;
    let lines: Vec<String> = BufReader::new(file)
        .lines()
        .collect::<std::io::Result<_>>()?;

    let tsplib = lines
        .iter()
        .any(|l| l.trim() == "NODE_COORD_SECTION");
    if tsplib {
        parse_tsplib(path, &lines)
    } else {
        parse_plain(path, &lines)
    }
}

/// Plain format: one `x y` (or `x,y`) pair per line, `#` comments.
fn parse_plain(path: &Path, lines: &[String]) -> Result<Vec<City>> {
    let mut cities = Vec::new();
    for (number, line) in lines.iter().enumerate() {
        let row = line.trim();
        if row.is_empty() || row.starts_with('#') {
            continue;
        }
        let fields: Vec<&str> = row
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|f| !f.is_empty())
            .collect();
        if fields.len() != 2 {
            return Err(SomTourError::Parse {
                path: path.to_path_buf(),
                line: number + 1,
                message: format!("expected 2 coordinates, found {}", fields.len()),
            });
        }
        cities.push(City::new(
            parse_coordinate(path, number, fields[0])?,
            parse_coordinate(path, number, fields[1])?,
        ));
    }
    Ok(cities)
}

/// TSPLIB format: `id x y` rows between `NODE_COORD_SECTION` and `EOF`.
fn parse_tsplib(path: &Path, lines: &[String]) -> Result<Vec<City>> {
    let mut cities = Vec::new();
    let mut in_coords = false;
    for (number, line) in lines.iter().enumerate() {
        let row = line.trim();
        if !in_coords {
            in_coords = row == "NODE_COORD_SECTION";
            continue;
        }
        if row.is_empty() || row == "EOF" {
            break;
        }
        let fields: Vec<&str> = row.split_whitespace().collect();
        if fields.len() != 3 {
            return Err(SomTourError::Parse {
                path: path.to_path_buf(),
                line: number + 1,
                message: format!("expected 'id x y', found {} fields", fields.len()),
            });
        }
        cities.push(City::new(
            parse_coordinate(path, number, fields[1])?,
            parse_coordinate(path, number, fields[2])?,
        ));
    }
    Ok(cities)
}

fn parse_coordinate(path: &Path, line_index: usize, field: &str) -> Result<f64> {
    field.parse().map_err(|_| SomTourError::Parse {
        path: path.to_path_buf(),
        line: line_index + 1,
        message: format!("invalid coordinate '{field}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::tempdir;

    fn write_file(dir: &Path, name: &str, contents: &str) {
        let mut file = File::create(dir.join(name)).unwrap();
        file.write_all(contents.as_bytes()).unwrap();
    }

    #[test]
    fn test_load_plain() {
        let dir = tempdir().unwrap();
        write_file(
            dir.path(),
            "triangle.txt",
            "# three cities\n0 0\n10.5 0\n5 8.25\n",
        );

        let cities = load_dataset("triangle", dir.path()).unwrap();
        assert_eq!(cities.len(), 3);
        assert_eq!(cities[1], City::new(10.5, 0.0));
    }

    #[test]
    fn test_load_comma_separated() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "pair.txt", "1.0, 2.0\n3.0, 4.0\n");

        let cities = load_dataset("pair", dir.path()).unwrap();
        assert_eq!(cities, vec![City::new(1.0, 2.0), City::new(3.0, 4.0)]);
    }

    #[test]
    fn test_load_tsplib() {
        let dir = tempdir().unwrap();
        write_file(
            dir.path(),
            "mini.tsp",
            "NAME: mini\nTYPE: TSP\nDIMENSION: 2\nNODE_COORD_SECTION\n1 100.0 200.0\n2 300.0 400.0\nEOF\n",
        );

        let cities = load_dataset("mini", dir.path()).unwrap();
        assert_eq!(cities, vec![City::new(100.0, 200.0), City::new(300.0, 400.0)]);
    }

    #[test]
    fn test_missing_dataset() {
        let dir = tempdir().unwrap();
        let err = load_dataset("nowhere", dir.path()).unwrap_err();
        assert!(matches!(err, SomTourError::DatasetNotFound(_)));
    }

    #[test]
    fn test_malformed_row() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "bad.txt", "0 0\n1 abc\n");

        let err = load_dataset("bad", dir.path()).unwrap_err();
        assert!(matches!(err, SomTourError::Parse { line: 2, .. }));
    }

    #[test]
    fn test_empty_dataset() {
        let dir = tempdir().unwrap();
        write_file(dir.path(), "empty.txt", "# nothing here\n");

        let err = load_dataset("empty", dir.path()).unwrap_err();
        assert!(matches!(err, SomTourError::EmptyInput(_)));
    }

    #[test]
    fn test_bounds() {
        let cities = vec![
            City::new(-1.0, 4.0),
            City::new(3.0, 0.0),
            City::new(2.0, 2.0),
        ];
        let bounds = Bounds::of(&cities).unwrap();
        assert_eq!(bounds.min_x, -1.0);
        assert_eq!(bounds.max_x, 3.0);
        assert_eq!(bounds.min_y, 0.0);
        assert_eq!(bounds.max_y, 4.0);
        assert_eq!(bounds.width(), 4.0);
        assert_eq!(bounds.height(), 4.0);
    }

    #[test]
    fn test_bounds_padding() {
        let bounds = Bounds {
            min_x: 0.0,
            min_y: 0.0,
            max_x: 10.0,
            max_y: 20.0,
        };
        let padded = bounds.padded(0.1);
        assert_eq!(padded.min_x, -1.0);
        assert_eq!(padded.max_x, 11.0);
        assert_eq!(padded.min_y, -2.0);
        assert_eq!(padded.max_y, 22.0);
    }

    #[test]
    fn test_bounds_of_empty() {
        assert!(Bounds::of(&[]).is_err());
    }

    #[test]
    fn test_single_city_bounds() {
        let bounds = Bounds::of(&[City::new(5.0, 7.0)]).unwrap();
        assert_eq!(bounds.width(), 0.0);
        assert!(bounds.contains(5.0, 7.0));
    }
}
