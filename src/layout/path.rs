use serde::{Serialize, Serializer};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One drawing primitive of a ribbon outline.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathCommand {
    MoveTo(Point),
    CurveTo { c1: Point, c2: Point, to: Point },
    LineTo(Point),
    Close,
}

/// The closed outline of a ribbon between two columns.
///
/// The outline always has the same five commands: move to the source top, cubic
/// to the target top, line down to the target bottom, cubic back to the source
/// bottom, close. Both cubics put their control points on the vertical line
/// through the horizontal midpoint, which gives the S-shaped band.
#[derive(Debug, Clone, PartialEq)]
pub struct RibbonPath {
    commands: Vec<PathCommand>,
}

impl RibbonPath {
    /// Builds the outline between the vertical band `source` at `x1` and the
    /// band `target` at `x2`. Bands are `(top, bottom)` pairs and need not have
    /// the same width.
    pub fn between(x1: f64, source: (f64, f64), x2: f64, target: (f64, f64)) -> Self {
        let mx = (x1 + x2) / 2.0;
        let (s_top, s_bottom) = source;
        let (t_top, t_bottom) = target;

        let commands = vec![
            PathCommand::MoveTo(Point::new(x1, s_top)),
            PathCommand::CurveTo {
                c1: Point::new(mx, s_top),
                c2: Point::new(mx, t_top),
                to: Point::new(x2, t_top),
            },
            PathCommand::LineTo(Point::new(x2, t_bottom)),
            PathCommand::CurveTo {
                c1: Point::new(mx, t_bottom),
                c2: Point::new(mx, s_bottom),
                to: Point::new(x1, s_bottom),
            },
            PathCommand::Close,
        ];

        Self { commands }
    }

    /// Source-side `(top, bottom)` band.
    pub fn source_band(&self) -> Option<(f64, f64)> {
        match (self.commands.first(), self.commands.get(3)) {
            (Some(PathCommand::MoveTo(top)), Some(PathCommand::CurveTo { to: bottom, .. })) => {
                Some((top.y, bottom.y))
            }
            _ => None,
        }
    }

    /// Target-side `(top, bottom)` band.
    pub fn target_band(&self) -> Option<(f64, f64)> {
        match (self.commands.get(1), self.commands.get(2)) {
            (Some(PathCommand::CurveTo { to: top, .. }), Some(PathCommand::LineTo(bottom))) => {
                Some((top.y, bottom.y))
            }
            _ => None,
        }
    }
}

/// Writes a coordinate with at most two decimals and no trailing zeros.
pub(crate) fn fmt_coord(f: &mut impl fmt::Write, value: f64) -> fmt::Result {
    let text = format!("{:.2}", value);
    let trimmed = if text.contains('.') {
        text.trim_end_matches('0').trim_end_matches('.')
    } else {
        text.as_str()
    };
    if trimmed == "-0" {
        write!(f, "0")
    } else {
        write!(f, "{}", trimmed)
    }
}

fn fmt_point(f: &mut fmt::Formatter<'_>, p: Point) -> fmt::Result {
    fmt_coord(f, p.x)?;
    write!(f, ",")?;
    fmt_coord(f, p.y)
}

/// SVG path data (`d` attribute syntax).
impl fmt::Display for RibbonPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, command) in self.commands.iter().enumerate() {
            if i > 0 {
                write!(f, " ")?;
            }
            match *command {
                PathCommand::MoveTo(p) => {
                    write!(f, "M")?;
                    fmt_point(f, p)?;
                }
                PathCommand::CurveTo { c1, c2, to } => {
                    write!(f, "C")?;
                    fmt_point(f, c1)?;
                    write!(f, " ")?;
                    fmt_point(f, c2)?;
                    write!(f, " ")?;
                    fmt_point(f, to)?;
                }
                PathCommand::LineTo(p) => {
                    write!(f, "L")?;
                    fmt_point(f, p)?;
                }
                PathCommand::Close => write!(f, "Z")?,
            }
        }
        Ok(())
    }
}

impl Serialize for RibbonPath {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
