//! Post-processing of the rendered SVG.
//!
//! Flow arrows are drawn by the external renderer before the overlay gets
//! a say, carrying the fixed default classes `arrow-active` /
//! `arrow-reactive`. This pass rewrites those class attributes to the
//! overlay's per-feeder decisions and, when the diagram embeds its CSS
//! inline, appends the generated level stylesheet to the existing
//! `<style>` block.

use lol_html::html_content::ContentType;
use lol_html::{RewriteStrSettings, element, rewrite_str};
use rustc_hash::FxHashMap;

use griddiff_core::classify::{ARROW_ACTIVE_CLASS, ARROW_REACTIVE_CLASS};

use crate::overlay::StyleOverlay;
use crate::{Error, Result};

/// Renderer metadata mapping an SVG group id to the feeder node whose
/// arrows the group draws.
#[derive(Debug, Clone, Default)]
pub struct ArrowBindings {
    feeders: FxHashMap<String, String>,
}

impl ArrowBindings {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn bind(&mut self, group_id: impl Into<String>, feeder_id: impl Into<String>) {
        self.feeders.insert(group_id.into(), feeder_id.into());
    }

    pub fn feeder_for(&self, group_id: &str) -> Option<&str> {
        self.feeders.get(group_id).map(String::as_str)
    }
}

impl<G: Into<String>, F: Into<String>> FromIterator<(G, F)> for ArrowBindings {
    fn from_iter<T: IntoIterator<Item = (G, F)>>(iter: T) -> Self {
        ArrowBindings {
            feeders: iter
                .into_iter()
                .map(|(group, feeder)| (group.into(), feeder.into()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct PostProcessOptions {
    /// Append the generated level stylesheet to the diagram's first
    /// embedded `<style>` element.
    pub embed_css: bool,
}

impl Default for PostProcessOptions {
    fn default() -> Self {
        PostProcessOptions { embed_css: true }
    }
}

/// Rewrites arrow group classes to the overlay's decisions and optionally
/// splices the generated stylesheet into the embedded style block.
///
/// Only whole class tokens are replaced; every other class (and the token
/// order) is preserved. Groups without a binding, and diagrams without an
/// embedded `<style>` element, pass through unchanged.
pub fn rewrite_diagram(
    svg: &str,
    overlay: &StyleOverlay<'_>,
    bindings: &ArrowBindings,
    options: &PostProcessOptions,
) -> Result<String> {
    let css = options.embed_css.then(|| overlay.stylesheet());
    let mut patched = 0usize;
    let mut css_appended = false;

    let out = rewrite_str(
        svg,
        RewriteStrSettings {
            element_content_handlers: vec![
                element!("g[id]", |el| {
                    let Some(group_id) = el.get_attribute("id") else {
                        return Ok(());
                    };
                    let Some(feeder_id) = bindings.feeder_for(&group_id) else {
                        return Ok(());
                    };
                    let Some(class_attr) = el.get_attribute("class") else {
                        return Ok(());
                    };

                    let mut changed = false;
                    let classes: Vec<String> = class_attr
                        .split_whitespace()
                        .map(|class| match class {
                            ARROW_ACTIVE_CLASS => {
                                changed = true;
                                overlay.active_arrow_class(feeder_id)
                            }
                            ARROW_REACTIVE_CLASS => {
                                changed = true;
                                overlay.reactive_arrow_class(feeder_id)
                            }
                            other => other.to_string(),
                        })
                        .collect();
                    if changed {
                        patched += 1;
                        el.set_attribute("class", &classes.join(" "))?;
                    }
                    Ok(())
                }),
                element!("style", |el| {
                    if let Some(css) = &css {
                        if !css_appended {
                            css_appended = true;
                            el.append(&format!("\n{css}"), ContentType::Text);
                        }
                    }
                    Ok(())
                }),
            ],
            ..RewriteStrSettings::new()
        },
    )
    .map_err(|e| Error::SvgRewrite {
        message: e.to_string(),
    })?;

    tracing::debug!(patched, css_appended, "post-processed diff diagram");
    Ok(out)
}
