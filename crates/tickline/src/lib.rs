#![forbid(unsafe_code)]

//! `tickline` turns a small line-oriented text language into lifeline/timing diagrams.
//!
//! The parser and tick interpolation are re-exported from `tickline-core`.
//!
//! # Features
//!
//! - `render`: enable layout + SVG rendering (`tickline::render`)
//! - `raster`: enable PNG output via pure-Rust SVG rasterization

pub use tickline_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use tickline_render::draw::{DrawCall, draw_calls};
    pub use tickline_render::model::LayoutedDiagram;
    pub use tickline_render::svg::SvgRenderOptions;
    pub use tickline_render::text::{DeterministicTextMeasurer, TextMeasurer};
    pub use tickline_render::{LayoutOptions, layout_processed};

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Parse(#[from] tickline_core::Error),
        #[error(transparent)]
        Render(#[from] tickline_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Converts an arbitrary string into a conservative SVG `id` token, so several diagrams can
    /// be inlined into one page without their marker ids or stylesheets colliding.
    ///
    /// Unsupported characters become `-`, runs of `-` collapse, and the result always starts
    /// with an ASCII letter (`t-` is prepended when needed).
    pub fn sanitize_svg_id(raw: &str) -> String {
        let raw = raw.trim();
        let mut out = String::with_capacity(raw.len() + 2);
        for ch in raw.chars() {
            let ok = ch.is_ascii_alphanumeric() || ch == '-' || ch == '_';
            out.push(if ok { ch } else { '-' });
        }

        while out.contains("--") {
            out = out.replace("--", "-");
        }
        let mut out = out.trim_matches('-').to_string();
        if out.is_empty() {
            return "t-untitled".to_string();
        }
        if !out.starts_with(|c: char| c.is_ascii_alphabetic()) {
            out.insert_str(0, "t-");
        }
        out
    }

    /// Parses, interpolates and lays out `text`.
    pub fn layout_diagram_sync(
        engine: &tickline_core::Engine,
        text: &str,
        parse_options: tickline_core::ParseOptions,
        layout_options: &LayoutOptions,
    ) -> Result<LayoutedDiagram> {
        let out = engine.process_sync(text, parse_options)?;
        Ok(layout_processed(&out.processed, layout_options)?)
    }

    pub fn render_layouted_svg(diagram: &LayoutedDiagram, svg_options: &SvgRenderOptions) -> String {
        tickline_render::svg::render_svg(diagram, svg_options)
    }

    /// The whole pipeline: text in, SVG document out. Nothing is returned on a fatal error.
    pub fn render_svg_sync(
        engine: &tickline_core::Engine,
        text: &str,
        parse_options: tickline_core::ParseOptions,
        layout_options: &LayoutOptions,
        svg_options: &SvgRenderOptions,
    ) -> Result<String> {
        let diagram = layout_diagram_sync(engine, text, parse_options, layout_options)?;
        Ok(render_layouted_svg(&diagram, svg_options))
    }

    /// Bundles an [`Engine`](tickline_core::Engine) with the options used for every call.
    #[derive(Debug, Clone, Default)]
    pub struct HeadlessRenderer {
        pub engine: tickline_core::Engine,
        pub parse: tickline_core::ParseOptions,
        pub layout: LayoutOptions,
        pub svg: SvgRenderOptions,
    }

    impl HeadlessRenderer {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn with_site_config(mut self, site_config: tickline_core::DiagramConfig) -> Self {
            self.engine = self.engine.with_site_config(site_config);
            self
        }

        pub fn with_parse_options(mut self, parse: tickline_core::ParseOptions) -> Self {
            self.parse = parse;
            self
        }

        pub fn parse_diagram_sync(&self, text: &str) -> Result<tickline_core::ParsedDiagram> {
            Ok(self.engine.parse_diagram_sync(text, self.parse)?)
        }

        pub fn process_sync(&self, text: &str) -> Result<tickline_core::ProcessOutput> {
            Ok(self.engine.process_sync(text, self.parse)?)
        }

        pub fn layout_diagram_sync(&self, text: &str) -> Result<LayoutedDiagram> {
            layout_diagram_sync(&self.engine, text, self.parse, &self.layout)
        }

        pub fn render_svg_sync(&self, text: &str) -> Result<String> {
            render_svg_sync(&self.engine, text, self.parse, &self.layout, &self.svg)
        }

        pub fn render_svg_sync_with_diagram_id(&self, text: &str, diagram_id: &str) -> Result<String> {
            let svg = SvgRenderOptions {
                diagram_id: Some(sanitize_svg_id(diagram_id)),
            };
            render_svg_sync(&self.engine, text, self.parse, &self.layout, &svg)
        }

        #[cfg(feature = "raster")]
        pub fn render_png_sync(
            &self,
            text: &str,
            raster: &raster::RasterOptions,
        ) -> raster::Result<Vec<u8>> {
            let svg = self.render_svg_sync(text)?;
            raster::svg_to_png(&svg, raster)
        }
    }

}
