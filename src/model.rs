//! Named layouts and the instruments built from them.

use crate::catalog::Catalog;
use crate::errors::{LayoutError, RenderError};
use crate::geometry::{Geometry, TickSize};
use crate::layout::{Layout, Placeable};
use crate::style::{FontFamily, Style, palette};
use crate::types::{Align, RulePart, Side};

/// Classic scale arrangements, as `(front, rear)` lines
pub mod layouts {
    pub const MANNHEIM_ORIGINAL: (&str, &str) = ("A/B C/D", "");
    pub const REGLE_DES_ECOLES: (&str, &str) = ("DF/CF C/D", "");
    pub const MANNHEIM: (&str, &str) = ("A/B CI C/D K", "[S L T]");
    pub const RIETZ: (&str, &str) = ("K A/B CI C/D L", "[S ST T]");
    pub const DARMSTADT: (&str, &str) = ("K A/B K CI C/D P", "[LL1 LL2 LL3]");
    pub const DARMSTADT_ADVANCED: (&str, &str) = ("T K A/B BI CI C/D P S", "[ L LL0 LL1 LL2 LL3 ]");
}

/// Names accepted by [`Model::named`], in presentation order
pub const MODEL_NAMES: [&str; 10] = [
    "Demo",
    "MannheimOriginal",
    "Ruler",
    "MannheimWithRuler",
    "Aristo868",
    "Aristo965",
    "PickettN515T",
    "FaberCastell283",
    "FaberCastell283N",
    "Graphoplex621",
];

/// A complete instrument: geometry, arrangement, colors and the maker's marks
#[derive(Debug, Clone)]
pub struct Model {
    pub brand: String,
    pub subtitle: String,
    pub name: String,
    pub geometry: Geometry,
    pub layout: Layout,
    pub style: Style,
    /// Registry the layout's keys were resolved against
    pub catalog: &'static Catalog,
}

impl Model {
    pub fn new(
        (brand, subtitle, name): (&str, &str, &str),
        geometry: Geometry,
        layout: Layout,
        style: Style,
    ) -> Self {
        Self {
            brand: brand.to_string(),
            subtitle: subtitle.to_string(),
            name: name.to_string(),
            geometry,
            layout,
            style,
            catalog: Catalog::standard(),
        }
    }

    fn with_catalog(mut self, catalog: &'static Catalog) -> Self {
        self.catalog = catalog;
        self
    }

    /// Look up one of the built-in models by name
    pub fn named(name: &str) -> Result<Model, miette::Report> {
        let model = match name {
            "Demo" => demo(),
            "MannheimOriginal" => mannheim_original(),
            "Ruler" => ruler(),
            "MannheimWithRuler" => mannheim_with_ruler(),
            "Aristo868" => aristo_868(),
            "Aristo965" => aristo_965(),
            "PickettN515T" => pickett_n515t(),
            "FaberCastell283" => faber_castell_283(),
            "FaberCastell283N" => faber_castell_283n(),
            "Graphoplex621" => graphoplex_621(),
            _ => {
                let suggestion = MODEL_NAMES
                    .iter()
                    .find(|m| m.eq_ignore_ascii_case(name))
                    .map(|m| format!("did you mean `{m}`?"))
                    .or_else(|| Some(format!("known models: {}", MODEL_NAMES.join(", "))));
                return Err(RenderError::UnknownModel {
                    name: name.to_string(),
                    suggestion,
                }
                .into());
            }
        };
        Ok(model?)
    }

    pub fn is_demo(&self) -> bool {
        self.name == "BOGELEX 1000"
    }

    /// Height taken by the scales of one part on one side, margins included
    pub fn scale_h_per(&self, side: Side, part: RulePart) -> f64 {
        self.layout
            .scales_at(side, part)
            .iter()
            .map(|sc| {
                let key = sc.key();
                self.geometry.scale_margin(key, Some(side)) + self.geometry.scale_h(key, Some(side))
            })
            .sum()
    }

    /// Stator height that would fit the fullest stator on either side
    pub fn auto_stock_h(&self) -> f64 {
        Side::ALL
            .iter()
            .flat_map(|&side| {
                [RulePart::StatorTop, RulePart::StatorBottom].map(|part| self.scale_h_per(side, part))
            })
            .fold(0.0, f64::max)
    }

    /// Slide height that would fit the fuller slide of the two sides
    pub fn auto_slide_h(&self) -> f64 {
        Side::ALL
            .iter()
            .map(|&side| self.scale_h_per(side, RulePart::Slide))
            .fold(0.0, f64::max)
    }
}

fn tick() -> TickSize {
    Geometry::default_tick()
}

fn mannheim_geometry() -> Geometry {
    Geometry::new((8000.0, 1000.0), (100.0, 100.0), (5600.0, 160.0), tick(), (160.0f64 * 2.5).round())
        .with_top_margin(109.0)
}

const MANNHEIM_MARKS: (&str, &str, &str) = ("Mannheim", "Demo", "Original");

fn demo() -> Result<Model, LayoutError> {
    let geometry = Geometry::new((8000.0, 1600.0), (100.0, 100.0), (5600.0, 160.0), tick(), 640.0)
        .with_top_margin(109.0)
        .with_margin(Side::Rear, "DI", 80.0);
    let layout = Layout::new(
        "|  L,  DF [ CF,CIF,CI,C ] D, R1, R2 |",
        "|  K,  A  [ B, T, ST, S ] D,  DI    |",
        Catalog::standard(),
    )?
    .with_aligns(Side::Front, &[("CIF", Align::Upper)])
    .with_aligns(Side::Rear, &[("D", Align::Upper), ("DI", Align::Upper)]);
    Ok(Model::new(
        ("KWENA & TOOR CO.", "LEFT HANDED LIMAÇON 2020", "BOGELEX 1000"),
        geometry,
        layout,
        Style::default(),
    ))
}

fn mannheim_original() -> Result<Model, LayoutError> {
    let (front, rear) = layouts::MANNHEIM_ORIGINAL;
    let layout = Layout::new(front, rear, Catalog::standard())?;
    Ok(Model::new(MANNHEIM_MARKS, mannheim_geometry(), layout, Style::default()))
}

fn ruler() -> Result<Model, LayoutError> {
    let layout = Layout::new("IN [] CM", "", Catalog::standard())?;
    Ok(Model::new(MANNHEIM_MARKS, mannheim_geometry(), layout, Style::default()))
}

fn mannheim_with_ruler() -> Result<Model, LayoutError> {
    let layout = Layout::new(layouts::MANNHEIM_ORIGINAL.0, "IN [] CM", Catalog::standard())?;
    Ok(Model::new(MANNHEIM_MARKS, mannheim_geometry(), layout, Style::default()))
}

fn aristo_868() -> Result<Model, LayoutError> {
    let geometry = Geometry::new((8000.0, 1860.0), (100.0, 100.0), (5600.0, 120.0), tick(), 590.0);
    let layout = Layout::new(
        "ST T1 T2 DF/CF CIF CI C/D P S",
        "LL01 LL02 LL03 A/B L K C/D LL3 LL2 LL1",
        Catalog::standard(),
    )?;
    Ok(Model::new(
        ("Aristo", "", "868"),
        geometry,
        layout,
        Style::default().with_family(FontFamily::Bright),
    ))
}

fn aristo_965() -> Result<Model, LayoutError> {
    let catalog = Catalog::aristo_commerz();
    let geometry = Geometry::new((8000.0, 1200.0), (100.0, 100.0), (6666.0, 80.0), tick(), 480.0);
    let layout = Layout::new("Pct KZ [T2 P2 P1 T1] Z", "", catalog)?.with_aligns(Side::Front, &[("P2", Align::Upper)]);
    let style = Style::default()
        .with_decreasing_color(palette::SYM_GREEN)
        .with_family(FontFamily::Bright)
        .with_color_override("T1", palette::RED)
        .with_color_override("T2", palette::RED);
    Ok(Model::new(("Aristo", "Commerz II", "965"), geometry, layout, style).with_catalog(catalog))
}

fn pickett_n515t() -> Result<Model, LayoutError> {
    let geometry = Geometry::new((8000.0, 2000.0), (100.0, 100.0), (5600.0, 160.0), tick(), 800.0);
    let layout = Layout::new("L_r f_x A/B S T CI C/D L Ln", "", Catalog::standard())?;
    Ok(Model::new(
        ("Pickett", "", "N-515-T"),
        geometry,
        layout,
        Style::pickett_eye_saver(),
    ))
}

fn faber_castell_283() -> Result<Model, LayoutError> {
    let geometry = Geometry::new((8800.0, 1280.0), (100.0, 100.0), (6666.0, 101.0), tick(), 400.0)
        .with_scale_h(Side::Front, &["K", "T1", "T2", "P"], 72.0)
        .with_scale_h(Side::Rear, &["LL03", "LL02", "LL01", "LL1", "LL2", "LL3"], 90.0);
    let layout = Layout::new(
        "K T1 T2 DF/CF CIF CI C/D S ST P",
        "LL03 LL02 LL01 W2/W2Prime L C W1Prime/W1 LL1 LL2 LL3",
        Catalog::standard(),
    )?
    .with_aligns(
        Side::Front,
        &[
            ("T2", Align::Upper),
            ("CI", Align::Upper),
            ("DF", Align::Lower),
            ("S", Align::Lower),
        ],
    )
    .with_aligns(Side::Rear, &[("C", Align::Upper)]);
    let style = Style::default()
        .with_family(FontFamily::Bright)
        .with_bg_color("C", palette::FC_LIGHT_GREEN_BG)
        .with_bg_color("CF", palette::FC_LIGHT_GREEN_BG);
    Ok(Model::new(("Faber-Castell", "", "2/83"), geometry, layout, style))
}

fn faber_castell_283n() -> Result<Model, LayoutError> {
    let geometry = Geometry::new(
        (9866.0, 1520.0),
        (0.0, 0.0),
        (6666.0, 101.0),
        TickSize {
            width: 3.0,
            height: 50.0,
        },
        510.0,
    )
    .with_scale_h(
        Side::Rear,
        &["LL0", "LL1", "LL2", "LL3", "LL00", "LL01", "LL02", "LL03"],
        74.0,
    );
    let layout = Layout::new(
        "T1 T2 K A DF [CF B CIF CI C] D DI S ST P",
        "LL03 LL02 LL01 LL00 W2 [W2Prime CI L C W1Prime] W1 D LL0 LL1 LL2 LL3",
        Catalog::standard(),
    )?
    .with_aligns(
        Side::Front,
        &[("T2", Align::Upper), ("CI", Align::Upper), ("S", Align::Lower)],
    )
    .with_aligns(
        Side::Rear,
        &[
            ("LL03", Align::Lower),
            ("LL02", Align::Upper),
            ("LL01", Align::Lower),
            ("LL00", Align::Upper),
            ("C", Align::Upper),
            ("LL0", Align::Lower),
            ("LL1", Align::Upper),
            ("LL2", Align::Lower),
            ("LL3", Align::Upper),
        ],
    );
    let style = Style::default()
        .with_family(FontFamily::Bright)
        .with_bg_color("C", palette::FC_LIGHT_GREEN_BG)
        .with_bg_color("CF", palette::FC_LIGHT_GREEN_BG)
        .with_bg_color("LL0", palette::FC_LIGHT_GREEN_BG)
        .with_bg_color("A", palette::FC_LIGHT_BLUE_BG)
        .with_bg_color("B", palette::FC_LIGHT_BLUE_BG);
    Ok(Model::new(("Faber-Castell", "", "2/83N"), geometry, layout, style))
}

fn graphoplex_621() -> Result<Model, LayoutError> {
    let geometry = Geometry::new((7740.0, 1070.0), (100.0, 100.0), (6666.0, 80.0), tick(), 480.0)
        .with_scale_h(Side::Front, &["P", "ST", "K", "L"], 70.0);
    let layout = Layout::new("P ST A [ B T1 S CI C ] D K L", "", Catalog::standard())?;
    Ok(Model::new(("Graphoplex", "", "621"), geometry, layout, Style::graphoplex()))
}
