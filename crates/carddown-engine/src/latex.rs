//! LaTeX pre-rendering seam.
//!
//! The engine only knows the [`LatexRenderer`] trait. Whatever performs the
//! actual work (a remote service, a local binary) lives with the caller, and a
//! failure always degrades to showing the raw source.

use std::cell::RefCell;
use std::collections::HashMap;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum LatexError {
    #[error("LaTeX renderer failed: {0}")]
    Render(String),

    #[error("LaTeX renderer timed out")]
    Timeout,
}

/// Turns a LaTeX expression (without `$` delimiters) into inline SVG markup.
pub trait LatexRenderer {
    fn render_svg(&self, source: &str, display: bool) -> Result<String, LatexError>;
}

/// Memoizes successful renders of another renderer.
pub struct CachingRenderer<R> {
    inner: R,
    cache: RefCell<HashMap<(String, bool), String>>,
}

impl<R: LatexRenderer> CachingRenderer<R> {
    pub fn new(inner: R) -> Self {
        Self {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    pub fn cached(&self) -> usize {
        self.cache.borrow().len()
    }
}

impl<R: LatexRenderer> LatexRenderer for CachingRenderer<R> {
    fn render_svg(&self, source: &str, display: bool) -> Result<String, LatexError> {
        let key = (source.to_string(), display);
        if let Some(svg) = self.cache.borrow().get(&key) {
            return Ok(svg.clone());
        }
        let svg = self.inner.render_svg(source, display)?;
        self.cache.borrow_mut().insert(key, svg.clone());
        Ok(svg)
    }
}
