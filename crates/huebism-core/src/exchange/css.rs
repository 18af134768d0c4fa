//! CSS custom-property exchange.
//!
//! An intentionally lossy, human-editable dialect. Parsing scans
//! `--name: value;` declarations: a value with more than one hex color is a
//! gradient and becomes its own palette with one swatch per color stop; a
//! single hex color accumulates into a running palette that the next
//! gradient flushes. Formatting emits one declaration per swatch grouped
//! under a palette comment header, then a trailing block with one
//! `linear-gradient` per palette.

use super::ExchangeError;
use crate::model::{PaletteDoc, SwatchDoc};
use once_cell::sync::Lazy;
use regex::Regex;

/// Name given to palettes accumulated from loose single-color declarations.
const LOOSE_PALETTE_NAME: &str = "My CSS palette";

static DECLARATION: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"--([A-Za-z0-9_-]+)\s*:\s*([^;]*);").expect("valid regex"));

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"#[0-9A-Fa-f]{6}").expect("valid regex"));

static NON_IDENT: Lazy<Regex> = Lazy::new(|| Regex::new(r"[^a-z0-9_-]+").expect("valid regex"));

/// `"steel-blue"` → `"Steel Blue"`.
fn capitalize(property: &str) -> String {
    property
        .split('-')
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_uppercase().chain(chars).collect::<String>(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// `"Steel Blue"` → `"--steel_blue"`.
fn custom_property(name: &str) -> String {
    let lowercased = name.to_lowercase();
    let ident = NON_IDENT.replace_all(&lowercased, "_");
    if ident.starts_with("--") {
        ident.into_owned()
    } else {
        format!("--{ident}")
    }
}

/// Parse CSS text into palette documents. All-or-nothing: a declaration
/// without any hex color, or input without declarations, fails the file.
pub fn parse(text: &str) -> Result<Vec<PaletteDoc>, ExchangeError> {
    let mut palettes = Vec::new();
    let mut current = PaletteDoc::new(LOOSE_PALETTE_NAME);
    let mut seen_any = false;

    for capture in DECLARATION.captures_iter(text) {
        seen_any = true;
        let name = capitalize(&capture[1]);
        let value = &capture[2];
        let colors: Vec<&str> = HEX_COLOR.find_iter(value).map(|m| m.as_str()).collect();

        match colors.len() {
            0 => {
                return Err(ExchangeError::Css(format!(
                    "declaration --{} has no hex color",
                    &capture[1]
                )));
            }
            1 => {
                current.swatches.push(SwatchDoc {
                    name,
                    color: colors[0].to_string(),
                });
            }
            _ => {
                // A gradient becomes its own palette; whatever single-color
                // declarations were accumulating flush first.
                if !current.swatches.is_empty() {
                    palettes.push(std::mem::replace(
                        &mut current,
                        PaletteDoc::new(name.as_str()),
                    ));
                } else {
                    current.name = name.clone();
                }
                current.swatches = colors
                    .iter()
                    .enumerate()
                    .map(|(index, color)| SwatchDoc {
                        name: format!("{name}{}", index + 1),
                        color: (*color).to_string(),
                    })
                    .collect();
                palettes.push(std::mem::replace(
                    &mut current,
                    PaletteDoc::new(LOOSE_PALETTE_NAME),
                ));
            }
        }
    }

    if !seen_any {
        return Err(ExchangeError::Css(
            "no custom-property declarations found".into(),
        ));
    }
    if !current.swatches.is_empty() {
        palettes.push(current);
    }
    Ok(palettes)
}

/// Serialize palettes as CSS custom properties plus a gradients block.
pub fn format(palettes: &[PaletteDoc]) -> String {
    let mut colors = String::new();
    let mut gradients = String::from("/* Gradients */\n");

    for palette in palettes {
        colors.push_str(&format!("/* {} */\n", palette.name));

        let mut gradient_colors = Vec::with_capacity(palette.swatches.len());
        for swatch in &palette.swatches {
            gradient_colors.push(swatch.color.as_str());
            colors.push_str(&format!(
                "{}: {};\n",
                custom_property(&swatch.name),
                swatch.color
            ));
        }
        colors.push('\n');

        if !gradient_colors.is_empty() {
            gradients.push_str(&format!(
                "{}: linear-gradient({});\n",
                custom_property(&palette.name),
                gradient_colors.join(",")
            ));
        }
    }

    colors + &gradients
}
