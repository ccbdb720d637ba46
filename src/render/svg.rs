use super::scene::{Label, Scene};
use crate::error::RenderError;
use crate::layout::path::fmt_coord;
use std::fmt::{self, Write as FmtWrite};

/// Writes a `Scene` as a standalone SVG document.
///
/// Ribbons are painted first so node rectangles sit on top of them. Every
/// ribbon and node carries `data-*` attributes with its ids so a host page can
/// wire pointer events back to `Diagram::pointer_enter`.
#[derive(Debug, Clone)]
pub struct SvgRenderer {
    pub background: String,
    pub font_family: String,
    pub font_size: f64,
    pub text_color: String,
}

impl Default for SvgRenderer {
    fn default() -> Self {
        Self {
            background: "white".to_string(),
            font_family: "Inter, system-ui, sans-serif".to_string(),
            font_size: 12.0,
            text_color: "#1a202c".to_string(),
        }
    }
}

impl SvgRenderer {
    pub fn with_background(mut self, background: impl Into<String>) -> Self {
        self.background = background.into();
        self
    }

    pub fn render(&self, scene: &Scene) -> Result<String, RenderError> {
        let mut svg = String::new();
        let mut width = String::new();
        let mut height = String::new();
        fmt_coord(&mut width, scene.width)?;
        fmt_coord(&mut height, scene.height)?;

        write!(
            svg,
            r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" font-family="{font}" font-size="{size}">
  <rect width="100%" height="100%" fill="{bg}" />
"##,
            w = width,
            h = height,
            font = escape_xml(&self.font_family),
            size = self.font_size,
            bg = escape_xml(&self.background),
        )?;

        if let Some(title) = &scene.title {
            svg.push_str("  <title>");
            svg.push_str(&escape_xml(title));
            svg.push_str("</title>\n");
        }

        svg.push_str("  <g class=\"stage-titles\" font-weight=\"600\">\n");
        for label in &scene.stage_titles {
            self.write_label(&mut svg, label, "    ")?;
        }
        svg.push_str("  </g>\n");

        svg.push_str("  <g class=\"ribbons\">\n");
        for ribbon in &scene.ribbons {
            writeln!(
                svg,
                "    <path d=\"{}\" fill=\"{}\" fill-opacity=\"{}\" data-source=\"{}\" data-target=\"{}\" data-transition=\"{}\" data-index=\"{}\" />",
                ribbon.path,
                escape_xml(&ribbon.color),
                opacity(ribbon.weight * 0.6)?,
                escape_xml(&ribbon.source),
                escape_xml(&ribbon.target),
                ribbon.transition,
                ribbon.index
            )?;
        }
        svg.push_str("  </g>\n");

        svg.push_str("  <g class=\"nodes\">\n");
        for node in &scene.nodes {
            write!(svg, "    <rect x=\"")?;
            fmt_coord(&mut svg, node.x)?;
            write!(svg, "\" y=\"")?;
            fmt_coord(&mut svg, node.y)?;
            write!(svg, "\" width=\"")?;
            fmt_coord(&mut svg, node.width)?;
            write!(svg, "\" height=\"")?;
            fmt_coord(&mut svg, node.height)?;
            writeln!(
                svg,
                "\" fill=\"{}\" fill-opacity=\"{}\" data-stage=\"{}\" data-node=\"{}\" />",
                escape_xml(&node.color),
                opacity(node.weight)?,
                node.stage,
                escape_xml(&node.id)
            )?;
        }
        svg.push_str("  </g>\n");

        svg.push_str("  <g class=\"labels\">\n");
        for label in &scene.labels {
            self.write_label(&mut svg, label, "    ")?;
        }
        svg.push_str("  </g>\n");

        svg.push_str("</svg>\n");
        Ok(svg)
    }

    fn write_label(&self, svg: &mut String, label: &Label, indent: &str) -> Result<(), RenderError> {
        write!(svg, "{}<text x=\"", indent)?;
        fmt_coord(svg, label.x)?;
        write!(svg, "\" y=\"")?;
        fmt_coord(svg, label.y)?;
        writeln!(
            svg,
            "\" fill=\"{}\" fill-opacity=\"{}\" text-anchor=\"{}\" dominant-baseline=\"middle\">{}</text>",
            escape_xml(&self.text_color),
            opacity(label.weight)?,
            label.anchor.as_svg(),
            escape_xml(&label.text)
        )?;
        Ok(())
    }
}

fn opacity(weight: f64) -> Result<String, fmt::Error> {
    let mut out = String::new();
    fmt_coord(&mut out, weight.clamp(0.0, 1.0))?;
    Ok(out)
}

pub fn escape_xml(input: &str) -> String {
    let mut escaped = String::with_capacity(input.len());
    for ch in input.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            other => escaped.push(other),
        }
    }
    escaped
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_xml("<a & 'b'>"), "&lt;a &amp; &apos;b&apos;&gt;");
    }

    #[test]
    fn opacity_is_clamped_and_trimmed() {
        assert_eq!(opacity(1.5).unwrap(), "1");
        assert_eq!(opacity(0.06).unwrap(), "0.06");
        assert_eq!(opacity(-1.0).unwrap(), "0");
    }
}
