// Post Processor
//
// Applies vendor prefixes and syntax lowering for the browsers the project targets.
// Targets come from the browserslist configuration nearest to the stylesheet
// (`.browserslistrc`, `browserslist` or the `browserslist` key of `package.json`),
// falling back to the browserslist defaults.
//
// lightningcss prints its own serialization of a stylesheet (shortest colors, merged
// adjacent rules). That output is only used when the targets actually change the
// stylesheet; otherwise the input text is returned as is.

use std::path::Path;
use std::sync::{Arc, RwLock};

use anyhow::anyhow;
use lightningcss::error::{Error, ParserError, SelectorError};
use lightningcss::stylesheet::{MinifyOptions, ParserOptions, PrinterOptions, StyleSheet};
use lightningcss::targets::{Browsers, Targets};

use crate::error::{RenderStage, StylesheetRenderError};
use crate::logging::Logger;

/// Angular view-encapsulation selectors unknown to lightningcss.
const ANGULAR_PSEUDO_ELEMENTS: &[&str] = &["ng-deep"];
const ANGULAR_PSEUDO_CLASSES: &[&str] = &["host-context"];

type Warnings<'i> = Arc<RwLock<Vec<Error<ParserError<'i>>>>>;

/// Post-processed CSS plus the warnings raised on the way.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RenderedStylesheet {
    pub css: String,
    pub warnings: Vec<String>,
}

pub struct PostProcessor {
    logger: Arc<dyn Logger>,
}

impl PostProcessor {
    pub fn new(logger: Arc<dyn Logger>) -> Self {
        Self { logger }
    }

    /// Prefix `css` for the browsers configured around `source_path`.
    ///
    /// CSS that does not parse fails the stylesheet. Warnings (unknown selectors and
    /// the like) leave the output untouched and are forwarded to the logger.
    pub fn process(
        &self,
        css: &str,
        source_path: &Path,
    ) -> Result<RenderedStylesheet, StylesheetRenderError> {
        let fail = |err: anyhow::Error| {
            StylesheetRenderError::new(source_path, RenderStage::PostProcess, err)
        };
        let filename = source_path.display().to_string();

        let dir = source_path.parent().unwrap_or_else(|| Path::new("."));
        let browsers = resolve_browser_targets(dir).map_err(fail)?;

        let warnings: Warnings<'_> = Arc::new(RwLock::new(Vec::new()));
        let targets = Targets::from(browsers);
        let prefixed =
            transform(css, &filename, targets, Some(Arc::clone(&warnings))).map_err(fail)?;
        let unprefixed = match browsers {
            Some(_) => transform(css, &filename, Targets::default(), None).map_err(fail)?,
            None => prefixed.clone(),
        };
        let css = if prefixed != unprefixed {
            prefixed
        } else {
            css.to_string()
        };

        let warnings: Vec<String> = match warnings.read() {
            Ok(list) => list
                .iter()
                .filter(|w| !is_angular_selector(&w.kind))
                .map(|w| w.to_string())
                .collect(),
            Err(_) => Vec::new(),
        };
        for warning in &warnings {
            self.logger.warn(warning);
        }

        Ok(RenderedStylesheet { css, warnings })
    }
}

/// Parse, minify for `targets` and print.
fn transform<'i>(
    css: &'i str,
    filename: &str,
    targets: Targets,
    warnings: Option<Warnings<'i>>,
) -> anyhow::Result<String> {
    let options = ParserOptions {
        filename: filename.to_string(),
        error_recovery: false,
        warnings,
        ..ParserOptions::default()
    };

    let mut sheet = StyleSheet::parse(css, options).map_err(|e| anyhow!(e.to_string()))?;
    sheet
        .minify(MinifyOptions {
            targets,
            ..MinifyOptions::default()
        })
        .map_err(|e| anyhow!(e.to_string()))?;
    let output = sheet
        .to_css(PrinterOptions {
            targets,
            ..PrinterOptions::default()
        })
        .map_err(|e| anyhow!(e.to_string()))?;
    Ok(output.code)
}

fn is_angular_selector(kind: &ParserError<'_>) -> bool {
    match kind {
        ParserError::SelectorError(SelectorError::UnsupportedPseudoElement(name)) => {
            ANGULAR_PSEUDO_ELEMENTS.contains(&name.as_ref())
        }
        ParserError::SelectorError(SelectorError::UnsupportedPseudoClass(name)) => {
            ANGULAR_PSEUDO_CLASSES.contains(&name.as_ref())
        }
        _ => false,
    }
}

/// Resolve browser targets from the browserslist configuration found from `dir` upwards.
///
/// Returns `None` when the configuration names no browser that needs prefixing. The
/// distributions are converted here because lightningcss only looks configurations up
/// from the working directory.
pub fn resolve_browser_targets(dir: &Path) -> anyhow::Result<Option<Browsers>> {
    let opts = browserslist::Opts {
        path: Some(dir.display().to_string()),
        ..browserslist::Opts::default()
    };
    let distribs = browserslist::execute(&opts).map_err(|e| anyhow!("browserslist: {e}"))?;

    let mut browsers = Browsers::default();
    let mut any = false;
    for distrib in &distribs {
        let Some(version) = encode_version(distrib.version()) else {
            continue;
        };
        let slot = match distrib.name() {
            "android" => &mut browsers.android,
            "chrome" | "and_chr" => &mut browsers.chrome,
            "edge" => &mut browsers.edge,
            "firefox" | "and_ff" => &mut browsers.firefox,
            "ie" => &mut browsers.ie,
            "ios_saf" => &mut browsers.ios_saf,
            "opera" | "op_mob" => &mut browsers.opera,
            "safari" => &mut browsers.safari,
            "samsung" => &mut browsers.samsung,
            _ => continue,
        };
        // Keep the oldest version of each browser.
        if slot.map_or(true, |current| version < current) {
            *slot = Some(version);
            any = true;
        }
    }

    Ok(any.then_some(browsers))
}

/// `major.minor.patch` packed one byte per component. Ranges like `12.2-12.5` use
/// their lower bound.
fn encode_version(version: &str) -> Option<u32> {
    let lower = version.split('-').next()?;
    let mut parts = lower.split('.');
    let major = parts.next()?.parse::<u32>().ok()?;
    let minor = parts.next().and_then(|v| v.parse::<u32>().ok()).unwrap_or(0);
    let patch = parts.next().and_then(|v| v.parse::<u32>().ok()).unwrap_or(0);
    Some((major & 0xff) << 16 | (minor & 0xff) << 8 | (patch & 0xff))
}
