/*! # Lay out LaTeX math as a tree of boxes.

This crate takes a formula written in a subset of TeX syntax (e.g. `\cos\frac{\pi}{4}`) and computes where every glyph,
bar and radical goes. The result is a tree of boxes, independent of any graphical toolkit, that a [`Renderer`] can paint
onto any [`Backend`].

## Basic usage

To lay out a formula, you need a [`FontMetrics`](crate::font::FontMetrics) provider, i.e. something that knows the size of glyphs.
The crate ships an approximate provider, always available, and one reading font files with `ttf-parser`
(feature `ttfparser-fontparser`).

```
use texbox::font::backend::approx::ApproxMetrics;

let metrics = ApproxMetrics::new();
let node = texbox::render(r"e = \lim_{n \to \infty} \left(1 + \frac{1}{n}\right)^n", 16., &metrics)
    .expect("Error in layout");

// 'height' is dist from baseline to highest point and 'depth' is dist from baseline to lowest point
let total_height = node.height + node.depth;
assert!(total_height.to_unitless() > 0.);
```

Notes:

 - Font sizes are expressed in pixels per em; every length in the box tree is in pixels.
 - Syntax errors never make layout fail: the parser recovers and reports problems next to the tree, cf [`parser::parse`].
 - [`render`] caches nothing. For repeated rendering, use a [`MathRenderer`].

## Caching and threads

A [`MathRenderer`] wraps the pipeline with two bounded caches: one for parse trees, keyed by source, and one for box trees,
keyed by source and font size. A call whose arguments were seen recently skips the corresponding stages.

```
use texbox::MathRenderer;

let renderer : MathRenderer = MathRenderer::default();
let first  = renderer.render(r"x^2 + y^2 = z^2", 16.).expect("Error in layout");
let second = renderer.render(r"x^2 + y^2 = z^2", 16.).expect("Error in layout");
assert_eq!(first, second);
assert_eq!(renderer.cache_stats().layout.hits, 1);
```

Some metrics providers may only be used from the thread that created them. A [`MathRenderer`] therefore runs layout
through a [`MetricsExecutor`](crate::executor::MetricsExecutor): [`InlineExecutor`](crate::executor::InlineExecutor)
runs it on the calling thread, [`MetricsThread`](crate::executor::MetricsThread) on a dedicated thread owning the provider.
Parsing can happen anywhere beforehand, cf [`MathRenderer::parse`] and [`MathRenderer::render_staged`].

## More complex cases

The call to [`render`] is a wrapper around two operations, and a third one paints the result:

  1. Parsing the formula into a [`ParseNode`](crate::parser::ParseNode) tree, cf [`parse`](crate::parser::parse).
  2. Laying out the tree in space, yielding a [`LayoutNode`](crate::layout::LayoutNode), cf [`layout`](crate::layout::engine::layout).
     This step requires the metrics provider and a font size, cf [`LayoutSettings`](crate::layout::LayoutSettings).
  3. Drawing the boxes on a certain graphical backend. [`Renderer`] is used to that end, and especially the method [`Renderer::render`].

```
use texbox::font::backend::approx::ApproxMetrics;
use texbox::layout::{layout, LayoutSettings};
use texbox::render::bbox::BBoxBackend;
use texbox::Renderer;

// Step 1: parsing formula into nodes
let parsed = texbox::parser::parse(r"\sqrt[3]{x} + \begin{pmatrix}a & b\\c & d\end{pmatrix}");
assert!(parsed.is_clean());

// Step 2: lay out nodes in space
let metrics = ApproxMetrics::new();
let node = layout(&parsed.root, LayoutSettings::new(&metrics, 16.)).expect("Error in layout");

// Step 3: paint; this backend only records the area drawn to
let mut backend = BBoxBackend::new();
Renderer::new().render(&node, &mut backend);
let bbox = backend.finish().expect("Nothing was drawn");
assert!(bbox.width().to_unitless() > 0.);
```

## Implementing backends

The crate gives you freedom to measure glyphs the way you like, by implementing the [`FontMetrics`](crate::font::FontMetrics) trait,
and to draw with your favourite graphical toolkit, by implementing [`Backend`].
*/


#[macro_use]
extern crate serde_derive;

#[macro_use]
extern crate log;

#[deny(missing_docs)]
pub mod error;
#[deny(missing_docs)]
pub mod dimensions;
#[deny(missing_docs)]
pub mod geometry;
#[deny(missing_docs)]
pub mod layout;
pub mod parser;
#[deny(missing_docs)]
pub mod render;
#[deny(missing_docs)]
pub mod cache;
#[deny(missing_docs)]
pub mod executor;

pub mod font;

use std::sync::Arc;

pub use render::{Backend, Cursor, Renderer};

use crate::cache::{CacheStats, LayoutCache, ParseCache, DEFAULT_LAYOUT_CAPACITY, DEFAULT_PARSE_CAPACITY};
use crate::error::{Error, LayoutResult};
use crate::executor::{InlineExecutor, MetricsExecutor};
use crate::font::FontMetrics;
use crate::font::backend::approx::ApproxMetrics;
use crate::layout::{layout, LayoutNode, LayoutSettings};
use crate::parser::symbols::SymbolRegistry;
use crate::parser::{parse, Parsed};


/// Lays out a LaTeX formula at `font_size` (in pixels per em), measuring glyphs with `metrics`. Nothing is cached.
pub fn render<M : FontMetrics + ?Sized>(formula : &str, font_size : f64, metrics : &M) -> LayoutResult<LayoutNode> {
    let parsed = parse(formula);
    layout(&parsed.root, LayoutSettings::new(metrics, font_size))
}


/// Sizes of the caches of a [`MathRenderer`]. Missing fields take their default value when deserializing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Maximal number of parse trees kept
    pub parse_cache_capacity  : usize,
    /// Maximal number of box trees kept
    pub layout_cache_capacity : usize,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            parse_cache_capacity  : DEFAULT_PARSE_CAPACITY,
            layout_cache_capacity : DEFAULT_LAYOUT_CAPACITY,
        }
    }
}

/// Statistics of both caches of a [`MathRenderer`]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct RenderStats {
    /// Parse cache
    pub parse  : CacheStats,
    /// Layout cache
    pub layout : CacheStats,
}


/// The caching render pipeline: parse cache, then layout cache, with layout running on a [`MetricsExecutor`].
///
/// A `MathRenderer` is meant to be created once and shared, e.g. behind an [`Arc`]; it is `Send + Sync` and every
/// method takes `&self`.
pub struct MathRenderer<E = InlineExecutor<ApproxMetrics>> {
    executor     : Arc<E>,
    symbols      : Arc<SymbolRegistry>,
    parse_cache  : Arc<ParseCache>,
    layout_cache : LayoutCache,
}

impl Default for MathRenderer {
    fn default() -> Self {
        Self::new(InlineExecutor::new(ApproxMetrics::new()))
    }
}

impl<E : MetricsExecutor> MathRenderer<E> {
    /// Creates a renderer with caches of the default sizes
    pub fn new(executor : E) -> Self {
        Self::with_config(executor, RenderConfig::default())
    }

    /// Creates a renderer with caches of the given sizes
    pub fn with_config(executor : E, config : RenderConfig) -> Self {
        MathRenderer {
            executor     : Arc::new(executor),
            symbols      : Arc::new(SymbolRegistry::default()),
            parse_cache  : Arc::new(ParseCache::new(config.parse_cache_capacity)),
            layout_cache : LayoutCache::new(config.layout_cache_capacity),
        }
    }

    /// Resolves symbol commands through `symbols`. Empties the caches.
    pub fn with_symbols(mut self, symbols : SymbolRegistry) -> Self {
        self.symbols = Arc::new(symbols);
        self.clear_cache();
        self
    }

    /// The symbol registry in use
    pub fn symbols(&self) -> &SymbolRegistry {
        &self.symbols
    }

    /// The executor layout jobs run on
    pub fn executor(&self) -> &E {
        &self.executor
    }

    /// Parses `formula`, or returns the cached tree. May be called from any thread.
    pub fn parse(&self, formula : &str) -> Arc<Parsed> {
        self.parse_cache.get_or_parse(formula, &self.symbols)
    }

    /// Lays out `formula` at `font_size`, going through both caches
    pub fn render(&self, formula : &str, font_size : f64) -> Result<Arc<LayoutNode>, Error> {
        if let Some(node) = self.layout_cache.get(formula, font_size) {
            return Ok(node);
        }
        let parsed = self.parse(formula);
        self.layout_on_executor(formula, parsed, font_size)
    }

    /// Second half of the pipeline: lays out a tree obtained from [`MathRenderer::parse`], typically on another thread,
    /// and caches the result under `formula`.
    pub fn render_staged(&self, formula : &str, parsed : Arc<Parsed>, font_size : f64) -> Result<Arc<LayoutNode>, Error> {
        if let Some(node) = self.layout_cache.get(formula, font_size) {
            return Ok(node);
        }
        self.layout_on_executor(formula, parsed, font_size)
    }

    /// Empties both caches
    pub fn clear_cache(&self) {
        self.parse_cache.clear();
        self.layout_cache.clear();
    }

    /// Hits, misses and evictions of both caches
    pub fn cache_stats(&self) -> RenderStats {
        RenderStats {
            parse  : self.parse_cache.stats(),
            layout : self.layout_cache.stats(),
        }
    }

    fn layout_on_executor(&self, formula : &str, parsed : Arc<Parsed>, font_size : f64) -> Result<Arc<LayoutNode>, Error> {
        let job = layout_job(parsed, Arc::clone(&self.symbols), font_size);
        let node = Arc::new(self.executor.run(job)??);
        self.layout_cache.insert(formula, font_size, Arc::clone(&node));
        Ok(node)
    }
}

#[cfg(feature = "tokio")]
impl<E : MetricsExecutor + 'static> MathRenderer<E> {
    /// Parses `formula` on tokio's blocking pool, then runs the layout job on the executor, without blocking the
    /// async runtime. Must be called from within a tokio runtime.
    pub async fn render_async(&self, formula : &str, font_size : f64) -> Result<Arc<LayoutNode>, Error> {
        if let Some(node) = self.layout_cache.get(formula, font_size) {
            return Ok(node);
        }

        let source  = formula.to_string();
        let cache   = Arc::clone(&self.parse_cache);
        let symbols = Arc::clone(&self.symbols);
        let parsed = tokio::task::spawn_blocking(move || cache.get_or_parse(&source, &symbols))
            .await
            .map_err(|e| Error::Executor(format!("parse task failed: {}", e)))?;

        let executor = Arc::clone(&self.executor);
        let job = layout_job(parsed, Arc::clone(&self.symbols), font_size);
        let laid_out = tokio::task::spawn_blocking(move || executor.run(job))
            .await
            .map_err(|e| Error::Executor(format!("layout task failed: {}", e)))?;

        let node = Arc::new(laid_out??);
        self.layout_cache.insert(formula, font_size, Arc::clone(&node));
        Ok(node)
    }
}

fn layout_job(parsed : Arc<Parsed>, symbols : Arc<SymbolRegistry>, font_size : f64)
    -> impl FnOnce(&dyn FontMetrics) -> LayoutResult<LayoutNode> + Send + 'static
{
    move |metrics| layout(&parsed.root, LayoutSettings::new(metrics, font_size).with_symbols(&symbols))
}
