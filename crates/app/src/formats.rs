//! Parsers for the ad-hoc problem and control text formats
//!
//! A problem file carries directives (`WORLD_DIMENSIONS:`, `MAP`,
//! `INITIAL_DIR:`, `INITIAL_POS:`, `NUM_WAYPOINTS:`, `WAYPOINTS`) followed by
//! their payload rows. A control file is a command count followed by one
//! `turn acceleration hold waypoint_id` row per command, with waypoint id 0
//! meaning "no waypoint".

use control::ControlCommand;
use simcore::Waypoint;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FormatError {
    #[error("missing {0}")]
    MissingDirective(&'static str),
    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },
    #[error("expected {expected} {what}, found {found}")]
    CountMismatch {
        what: &'static str,
        expected: usize,
        found: usize,
    },
}

/// A parsed problem instance. The map grid and waypoint geometry are carried
/// through for presentation; only the initial pose feeds the simulation.
#[derive(Debug, Clone)]
pub struct Problem {
    pub world_width: u32,
    pub world_height: u32,
    /// Obstacle grid, `#` = blocked. Row 0 is the top of the map text.
    pub map: Vec<Vec<char>>,
    pub initial_heading_deg: f64,
    pub initial_position: [f64; 2],
    pub waypoints: Vec<Waypoint>,
}

fn field<'a>(fields: &[&'a str], idx: usize, line: usize) -> Result<&'a str, FormatError> {
    fields.get(idx).copied().ok_or(FormatError::Malformed {
        line,
        reason: format!("expected at least {} fields", idx + 1),
    })
}

fn num_f64(fields: &[&str], idx: usize, line: usize) -> Result<f64, FormatError> {
    let raw = field(fields, idx, line)?;
    raw.parse().map_err(|_| FormatError::Malformed {
        line,
        reason: format!("not a number: {raw:?}"),
    })
}

fn num_u32(fields: &[&str], idx: usize, line: usize) -> Result<u32, FormatError> {
    let raw = field(fields, idx, line)?;
    raw.parse().map_err(|_| FormatError::Malformed {
        line,
        reason: format!("not an integer: {raw:?}"),
    })
}

#[derive(Clone, Copy)]
enum Fill {
    Directives,
    Map,
    Waypoints,
}

pub fn parse_problem(text: &str) -> Result<Problem, FormatError> {
    let mut dims: Option<(u32, u32)> = None;
    let mut map: Vec<Vec<char>> = Vec::new();
    let mut map_rows_expected = 0usize;
    let mut initial_heading_deg = None;
    let mut initial_position = None;
    let mut num_waypoints: Option<usize> = None;
    let mut waypoints: Vec<Waypoint> = Vec::new();
    let mut fill = Fill::Directives;

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let fields: Vec<&str> = raw.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        match fill {
            Fill::Directives => match fields[0] {
                "WORLD_DIMENSIONS:" => {
                    dims = Some((num_u32(&fields, 1, line)?, num_u32(&fields, 2, line)?));
                }
                "MAP" => {
                    if dims.is_none() {
                        return Err(FormatError::Malformed {
                            line,
                            reason: "MAP before WORLD_DIMENSIONS:".to_string(),
                        });
                    }
                    fill = Fill::Map;
                }
                "INITIAL_DIR:" => initial_heading_deg = Some(num_f64(&fields, 1, line)?),
                "INITIAL_POS:" => {
                    initial_position =
                        Some([num_f64(&fields, 1, line)?, num_f64(&fields, 2, line)?]);
                }
                "NUM_WAYPOINTS:" => num_waypoints = Some(num_u32(&fields, 1, line)? as usize),
                "WAYPOINTS" => {
                    if num_waypoints.is_none() {
                        return Err(FormatError::Malformed {
                            line,
                            reason: "WAYPOINTS before NUM_WAYPOINTS:".to_string(),
                        });
                    }
                    fill = Fill::Waypoints;
                }
                other => {
                    return Err(FormatError::Malformed {
                        line,
                        reason: format!("unknown directive {other:?}"),
                    });
                }
            },
            Fill::Map => {
                // The first row fixes the grid size; the map may be coarser
                // than the world, with each cell covering a square of
                // world-units.
                if map_rows_expected == 0 {
                    let (world_w, world_h) = dims.unwrap_or((0, 0));
                    let map_width = fields[0].len() as u32;
                    let scale = if map_width > 0 { world_w / map_width } else { 0 };
                    if scale == 0 {
                        return Err(FormatError::Malformed {
                            line,
                            reason: format!("map row wider than the {world_w}-unit world"),
                        });
                    }
                    map_rows_expected = (world_h / scale) as usize;
                }
                map.push(fields[0].chars().collect());
                if map.len() >= map_rows_expected {
                    fill = Fill::Directives;
                }
            }
            Fill::Waypoints => {
                let id = num_u32(&fields, 0, line)?;
                waypoints.push(Waypoint {
                    id,
                    x: num_f64(&fields, 1, line)?,
                    y: num_f64(&fields, 2, line)?,
                    radius: num_f64(&fields, 3, line)?,
                });
                if waypoints.len() >= num_waypoints.unwrap_or(0) {
                    fill = Fill::Directives;
                }
            }
        }
    }

    let (world_width, world_height) = dims.ok_or(FormatError::MissingDirective(
        "WORLD_DIMENSIONS: directive",
    ))?;
    let expected = num_waypoints.unwrap_or(0);
    if waypoints.len() != expected {
        return Err(FormatError::CountMismatch {
            what: "waypoints",
            expected,
            found: waypoints.len(),
        });
    }

    Ok(Problem {
        world_width,
        world_height,
        map,
        initial_heading_deg: initial_heading_deg
            .ok_or(FormatError::MissingDirective("INITIAL_DIR: directive"))?,
        initial_position: initial_position
            .ok_or(FormatError::MissingDirective("INITIAL_POS: directive"))?,
        waypoints,
    })
}

pub fn parse_controls(text: &str) -> Result<Vec<ControlCommand>, FormatError> {
    let mut expected: Option<usize> = None;
    let mut commands = Vec::new();

    for (i, raw) in text.lines().enumerate() {
        let line = i + 1;
        let fields: Vec<&str> = raw.split_whitespace().collect();
        if fields.is_empty() {
            continue;
        }

        match expected {
            None => expected = Some(num_u32(&fields, 0, line)? as usize),
            Some(n) => {
                if commands.len() >= n {
                    break;
                }
                let mut cmd = ControlCommand::new(
                    num_f64(&fields, 0, line)?,
                    num_f64(&fields, 1, line)?,
                    num_f64(&fields, 2, line)?,
                );
                // The format writes waypoint ids as numbers, 0 meaning none.
                let waypoint = num_f64(&fields, 3, line)? as u32;
                if waypoint != 0 {
                    cmd = cmd.with_waypoint(waypoint);
                }
                commands.push(cmd);
            }
        }
    }

    let n = expected.ok_or(FormatError::MissingDirective("control command count"))?;
    if commands.len() != n {
        return Err(FormatError::CountMismatch {
            what: "control commands",
            expected: n,
            found: commands.len(),
        });
    }
    Ok(commands)
}
