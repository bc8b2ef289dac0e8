use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;

use super::dom::{ElementNode, Node};
use super::error::Result;

static WHITESPACE_RUN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s+").expect("static whitespace pattern"));

const DEFAULT_INDENT_WIDTH: usize = 2;

/// A way of serializing a tree to text.
///
/// Text leaves render as their raw payload in every strategy; only the
/// treatment of elements differs.
pub trait RenderStrategy {
    fn kind(&self) -> StrategyKind;

    fn render_element(&self, element: &ElementNode) -> String;

    fn inner_html(&self, element: &ElementNode) -> String;

    fn outer_html(&self, node: &Node) -> String {
        match node {
            Node::Element(element) => self.render_element(element),
            Node::Text(text) => text.outer_html(),
        }
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    #[default]
    Normal,
    Minified,
    Pretty,
}

fn open_tag(element: &ElementNode) -> String {
    format!("<{}{}>", element.tag_name(), element.class_attribute())
}

fn close_tag(element: &ElementNode) -> String {
    format!("</{}>", element.tag_name())
}

fn self_closing_tag(element: &ElementNode) -> String {
    format!("<{}{}/>", element.tag_name(), element.class_attribute())
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NormalRender;

impl RenderStrategy for NormalRender {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Normal
    }

    fn render_element(&self, element: &ElementNode) -> String {
        if element.is_self_closing() {
            return self_closing_tag(element);
        }

        format!(
            "{}{}{}",
            open_tag(element),
            self.inner_html(element),
            close_tag(element)
        )
    }

    fn inner_html(&self, element: &ElementNode) -> String {
        element
            .children()
            .iter()
            .map(|child| self.outer_html(child))
            .collect()
    }
}

/// Normal output with every whitespace run inside element content collapsed
/// to a single space.
#[derive(Clone, Copy, Debug, Default)]
pub struct MinifiedRender;

impl MinifiedRender {
    pub fn collapse_whitespace(text: &str) -> String {
        WHITESPACE_RUN.replace_all(text, " ").into_owned()
    }
}

impl RenderStrategy for MinifiedRender {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Minified
    }

    fn render_element(&self, element: &ElementNode) -> String {
        if element.is_self_closing() {
            return self_closing_tag(element);
        }

        format!(
            "{}{}{}",
            open_tag(element),
            self.inner_html(element),
            close_tag(element)
        )
    }

    fn inner_html(&self, element: &ElementNode) -> String {
        let joined: String = element
            .children()
            .iter()
            .map(|child| self.outer_html(child))
            .collect();

        MinifiedRender::collapse_whitespace(&joined)
    }
}

/// One line per tag or text leaf, children indented one level deeper than
/// their parent. Every emitted line ends with `\n`.
///
/// A closing tag lines up with its own opening tag, one level shallower than
/// the element's children.
#[derive(Clone, Copy, Debug)]
pub struct PrettyRender {
    indent_width: usize,
}

impl PrettyRender {
    pub fn new(indent_width: usize) -> Self {
        PrettyRender { indent_width }
    }

    pub fn indent_width(&self) -> usize {
        self.indent_width
    }

    fn pad(&self, level: usize) -> String {
        " ".repeat(level * self.indent_width)
    }

    fn write_node(&self, node: &Node, level: usize, out: &mut String) {
        match node {
            Node::Element(element) => self.write_element(element, level, out),
            Node::Text(text) => {
                out.push_str(&self.pad(level));
                out.push_str(&text.outer_html());
                out.push('\n');
            }
        }
    }

    fn write_element(&self, element: &ElementNode, level: usize, out: &mut String) {
        let pad = self.pad(level);

        if element.is_self_closing() {
            out.push_str(&pad);
            out.push_str(&self_closing_tag(element));
            out.push('\n');
            return;
        }

        out.push_str(&pad);
        out.push_str(&open_tag(element));
        out.push('\n');

        for child in element.children() {
            self.write_node(child, level + 1, out);
        }

        out.push_str(&pad);
        out.push_str(&close_tag(element));
        out.push('\n');
    }
}

impl Default for PrettyRender {
    fn default() -> Self {
        PrettyRender::new(DEFAULT_INDENT_WIDTH)
    }
}

impl RenderStrategy for PrettyRender {
    fn kind(&self) -> StrategyKind {
        StrategyKind::Pretty
    }

    fn render_element(&self, element: &ElementNode) -> String {
        let mut out = String::new();
        self.write_element(element, 0, &mut out);
        out
    }

    fn inner_html(&self, element: &ElementNode) -> String {
        let mut out = String::new();
        for child in element.children() {
            self.write_node(child, 0, &mut out);
        }
        out
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct RenderOptions {
    pub strategy: StrategyKind,
    pub indent_width: usize,
}

impl Default for RenderOptions {
    fn default() -> Self {
        RenderOptions {
            strategy: StrategyKind::Normal,
            indent_width: DEFAULT_INDENT_WIDTH,
        }
    }
}

impl RenderOptions {
    pub fn from_toml_str(source: &str) -> Result<RenderOptions> {
        Ok(toml::from_str(source)?)
    }
}

/// Rendering context holding exactly one active strategy.
pub struct Renderer {
    strategy: Box<dyn RenderStrategy>,
}

impl Renderer {
    pub fn new(strategy: impl RenderStrategy + 'static) -> Self {
        Renderer {
            strategy: Box::new(strategy),
        }
    }

    pub fn from_options(options: &RenderOptions) -> Self {
        match options.strategy {
            StrategyKind::Normal => Renderer::new(NormalRender),
            StrategyKind::Minified => Renderer::new(MinifiedRender),
            StrategyKind::Pretty => Renderer::new(PrettyRender::new(options.indent_width)),
        }
    }

    /// Takes effect from the next render call on.
    pub fn set_strategy(&mut self, strategy: impl RenderStrategy + 'static) {
        tracing::debug!(from = ?self.strategy.kind(), to = ?strategy.kind(), "switching render strategy");
        self.strategy = Box::new(strategy);
    }

    pub fn kind(&self) -> StrategyKind {
        self.strategy.kind()
    }

    pub fn outer_html(&self, node: &Node) -> String {
        self.strategy.outer_html(node)
    }

    pub fn render_element(&self, element: &ElementNode) -> String {
        self.strategy.render_element(element)
    }

    pub fn inner_html(&self, element: &ElementNode) -> String {
        self.strategy.inner_html(element)
    }
}

impl Default for Renderer {
    fn default() -> Self {
        Renderer::new(NormalRender)
    }
}
