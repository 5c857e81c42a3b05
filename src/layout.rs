//! Scale arrangement: which scales go where, and which edge each hangs from.

use std::collections::{BTreeMap, BTreeSet};

use enum_dispatch::enum_dispatch;
use miette::SourceSpan;
use pest::Parser;
use pest::iterators::Pair;

use crate::catalog::Catalog;
use crate::errors::{LayoutError, SourceContext};
use crate::log::debug;
use crate::ruler::Ruler;
use crate::scale::Scale;
use crate::types::{Align, PerSide, RulePart, Side};
use crate::{LayoutParser, Rule};

/// Anything that can occupy a row on a rule
#[enum_dispatch]
pub trait Placeable {
    fn key(&self) -> &str;

    /// Scale this one faces across a stator/slide edge
    fn opposite_key(&self) -> Option<&str>;

    fn is_ruler(&self) -> bool {
        false
    }

    fn is_increasing(&self) -> bool;
}

impl Placeable for Scale {
    fn key(&self) -> &str {
        &self.key
    }

    fn opposite_key(&self) -> Option<&str> {
        self.opp_key.as_deref()
    }

    fn is_increasing(&self) -> bool {
        self.is_increasing
    }
}

impl Placeable for Ruler {
    fn key(&self) -> &str {
        self.key
    }

    fn opposite_key(&self) -> Option<&str> {
        None
    }

    fn is_ruler(&self) -> bool {
        true
    }

    fn is_increasing(&self) -> bool {
        true
    }
}

#[enum_dispatch(Placeable)]
#[derive(Debug, Clone)]
pub enum Placed {
    Scale(Scale),
    Ruler(Ruler),
}

/// Scales of one face, top to bottom
#[derive(Debug, Clone, Default)]
pub struct SideLayout {
    pub stator_top: Vec<Placed>,
    pub slide: Vec<Placed>,
    pub stator_bottom: Vec<Placed>,
}

impl SideLayout {
    pub fn part(&self, part: RulePart) -> &[Placed] {
        match part {
            RulePart::StatorTop => &self.stator_top,
            RulePart::Slide => &self.slide,
            RulePart::StatorBottom => &self.stator_bottom,
        }
    }

    fn part_mut(&mut self, part: RulePart) -> &mut Vec<Placed> {
        match part {
            RulePart::StatorTop => &mut self.stator_top,
            RulePart::Slide => &mut self.slide,
            RulePart::StatorBottom => &mut self.stator_bottom,
        }
    }

    pub fn is_empty(&self) -> bool {
        RulePart::ALL.iter().all(|&p| self.part(p).is_empty())
    }
}

/// A parsed arrangement with every alignment resolved
#[derive(Debug, Clone)]
pub struct Layout {
    pub source: String,
    pub sides: PerSide<SideLayout>,
    overrides: PerSide<BTreeMap<String, Align>>,
    inferred: PerSide<BTreeMap<String, Align>>,
}

impl Layout {
    /// Front and rear lines, as written on a model sheet
    pub fn new(front: &str, rear: &str, catalog: &Catalog) -> Result<Self, LayoutError> {
        Self::parse(&format!("{front}\n{rear}"), catalog)
    }

    /// Parse a layout, resolving every key against `catalog`
    pub fn parse(source: &str, catalog: &Catalog) -> Result<Self, LayoutError> {
        let ctx = SourceContext::new("<layout>", source);
        let pairs = LayoutParser::parse(Rule::layout, source).map_err(|e| syntax_error(&ctx, e))?;

        let mut sides = PerSide::<SideLayout>::default();
        let mut side_iter = Side::ALL.iter();
        for pair in pairs.flatten().filter(|p| p.as_rule() == Rule::side) {
            let Some(&side) = side_iter.next() else {
                break;
            };
            *sides.get_mut(side) = parse_side(pair, catalog, &ctx)?;
        }

        let mut layout = Layout {
            source: source.to_string(),
            sides,
            overrides: PerSide::default(),
            inferred: PerSide::default(),
        };
        layout.infer_aligns();
        debug!(front = ?layout.keys_at(Side::Front), rear = ?layout.keys_at(Side::Rear), "parsed layout");
        Ok(layout)
    }

    /// Pin alignments the inference would get wrong for a particular rule
    pub fn with_aligns(mut self, side: Side, aligns: &[(&str, Align)]) -> Self {
        let overrides = self.overrides.get_mut(side);
        for &(key, al) in aligns {
            overrides.insert(key.to_string(), al);
        }
        self
    }

    pub fn side(&self, side: Side) -> &SideLayout {
        self.sides.get(side)
    }

    pub fn scales_at(&self, side: Side, part: RulePart) -> &[Placed] {
        self.sides.get(side).part(part)
    }

    fn keys_at(&self, side: Side) -> Vec<Vec<&str>> {
        RulePart::ALL
            .iter()
            .map(|&p| self.scales_at(side, p).iter().map(|s| s.key()).collect())
            .collect()
    }

    /// Every placed key, front before rear, top to bottom
    pub fn keys_in_order(&self) -> impl Iterator<Item = &str> {
        Side::ALL.into_iter().flat_map(move |side| {
            RulePart::ALL
                .into_iter()
                .flat_map(move |part| self.scales_at(side, part).iter().map(|s| s.key()))
        })
    }

    /// Edge a placed scale hangs from on `side` in `part`
    pub fn scale_al(&self, key: &str, side: Side, part: RulePart) -> Align {
        let default = if part == RulePart::StatorBottom {
            Align::Upper
        } else {
            Align::Lower
        };
        self.overrides
            .get(side)
            .get(key)
            .or_else(|| self.inferred.get(side).get(key))
            .copied()
            .unwrap_or(default)
    }

    /// One pass per side in layout order; the first occurrence of a key
    /// decides its alignment
    fn infer_aligns(&mut self) {
        for side in Side::ALL {
            let mut seen = BTreeSet::new();
            let inferred = self.inferred.get_mut(side);
            for part in RulePart::ALL {
                let placed = self.sides.get(side).part(part);
                let last = placed.len().saturating_sub(1);
                for (i, sc) in placed.iter().enumerate() {
                    let key = sc.key();
                    if !inferred.contains_key(key) {
                        let al = if sc.is_ruler() {
                            Some(if part == RulePart::StatorTop {
                                Align::Upper
                            } else {
                                Align::Lower
                            })
                        } else if i == 0 && part == RulePart::Slide {
                            Some(Align::Upper)
                        } else if i == last && part != RulePart::StatorBottom {
                            Some(Align::Lower)
                        } else {
                            sc.opposite_key().map(|opp| {
                                if seen.contains(opp) {
                                    Align::Upper
                                } else {
                                    Align::Lower
                                }
                            })
                        };
                        if let Some(al) = al {
                            inferred.insert(key.to_string(), al);
                        }
                    }
                    seen.insert(key.to_string());
                }
            }
        }
    }
}

fn parse_side(pair: Pair<'_, Rule>, catalog: &Catalog, ctx: &SourceContext) -> Result<SideLayout, LayoutError> {
    let mut out = SideLayout::default();
    let Some(body) = pair.into_inner().next() else {
        return Ok(out);
    };
    let parts: Vec<Pair<'_, Rule>> = body.clone().into_inner().collect();
    let assigned: &[RulePart] = match (body.as_rule(), parts.len()) {
        (Rule::plain, _) => &[RulePart::Slide],
        (_, 2) => &[RulePart::StatorTop, RulePart::Slide],
        _ => &RulePart::ALL,
    };
    for (keys, &part) in parts.into_iter().zip(assigned) {
        for key in keys.into_inner() {
            let placed = resolve(key, catalog, ctx)?;
            out.part_mut(part).push(placed);
        }
    }
    Ok(out)
}

fn resolve(key: Pair<'_, Rule>, catalog: &Catalog, ctx: &SourceContext) -> Result<Placed, LayoutError> {
    let name = key.as_str();
    if let Some(sc) = catalog.scale(name) {
        return Ok(Placed::Scale(sc.clone()));
    }
    if let Some(r) = catalog.ruler(name) {
        return Ok(Placed::Ruler(r.clone()));
    }
    let span = key.as_span();
    Err(LayoutError::UnknownScale {
        key: name.to_string(),
        catalog: catalog.name,
        src: ctx.named_source(),
        span: SourceSpan::from(span.start()..span.end()),
        suggestion: suggest(name, catalog),
    })
}

/// A catalog key differing only in case or a prime/subscript spelling
fn suggest(name: &str, catalog: &Catalog) -> Option<String> {
    let folded: String = name
        .chars()
        .map(|c| crate::label::script_digit(c).unwrap_or(c))
        .filter(|c| *c != '\'')
        .collect();
    catalog
        .keys()
        .find(|k| k.eq_ignore_ascii_case(&folded) || k.eq_ignore_ascii_case(&folded.replace("Prime", "")))
        .map(|k| format!("did you mean `{k}`?"))
}

fn syntax_error(ctx: &SourceContext, e: pest::error::Error<Rule>) -> LayoutError {
    let span = match e.location {
        pest::error::InputLocation::Pos(p) => SourceSpan::from(p..p),
        pest::error::InputLocation::Span((a, b)) => SourceSpan::from(a..b),
    };
    LayoutError::Syntax {
        message: e.variant.message().into_owned(),
        src: ctx.named_source(),
        span,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(src: &str) -> Layout {
        match Layout::parse(src, Catalog::standard()) {
            Ok(l) => l,
            Err(e) => panic!("{src:?}: {e}"),
        }
    }

    fn keys(l: &Layout, side: Side, part: RulePart) -> Vec<&str> {
        l.scales_at(side, part).iter().map(|s| s.key()).collect()
    }

    #[test]
    fn slashes_split_parts() {
        let l = layout("A/B C/D");
        assert_eq!(keys(&l, Side::Front, RulePart::StatorTop), ["A"]);
        assert_eq!(keys(&l, Side::Front, RulePart::Slide), ["B", "C"]);
        assert_eq!(keys(&l, Side::Front, RulePart::StatorBottom), ["D"]);
        assert!(l.side(Side::Rear).is_empty());
    }

    #[test]
    fn brackets_split_parts() {
        let l = Layout::new(
            "|  L,  DF [ CF,CIF,CI,C ] D, R1, R2 |",
            "|  K,  A  [ B, T, ST, S ] D,  DI    |",
            Catalog::standard(),
        );
        let Ok(l) = l else {
            panic!("demo layout failed");
        };
        assert_eq!(keys(&l, Side::Front, RulePart::StatorTop), ["L", "DF"]);
        assert_eq!(keys(&l, Side::Front, RulePart::Slide), ["CF", "CIF", "CI", "C"]);
        assert_eq!(keys(&l, Side::Front, RulePart::StatorBottom), ["D", "R1", "R2"]);
        assert_eq!(keys(&l, Side::Rear, RulePart::Slide), ["B", "T", "ST", "S"]);
        assert_eq!(l.keys_in_order().count(), 18);
    }

    #[test]
    fn undelimited_line_is_all_slide() {
        let l = layout("C CI\nIN [] CM");
        assert_eq!(keys(&l, Side::Front, RulePart::Slide), ["C", "CI"]);
        assert_eq!(keys(&l, Side::Rear, RulePart::StatorTop), ["IN"]);
        assert!(keys(&l, Side::Rear, RulePart::Slide).is_empty());
        assert_eq!(keys(&l, Side::Rear, RulePart::StatorBottom), ["CM"]);
    }

    #[test]
    fn two_slash_parts_leave_bottom_empty() {
        let l = layout("A/B");
        assert_eq!(keys(&l, Side::Front, RulePart::StatorTop), ["A"]);
        assert_eq!(keys(&l, Side::Front, RulePart::Slide), ["B"]);
        assert!(keys(&l, Side::Front, RulePart::StatorBottom).is_empty());
    }

    #[test]
    fn unknown_key_names_the_token() {
        let err = Layout::parse("A/B C/Q", Catalog::standard());
        let Err(LayoutError::UnknownScale { key, span, .. }) = err else {
            panic!("expected unknown scale, got {err:?}");
        };
        assert_eq!(key, "Q");
        assert_eq!(span, SourceSpan::from(6..7));
    }

    #[test]
    fn unknown_key_suggests_catalog_spelling() {
        let err = Layout::parse("ll3", Catalog::standard());
        let Err(LayoutError::UnknownScale { suggestion, .. }) = err else {
            panic!("expected unknown scale");
        };
        assert_eq!(suggestion.as_deref(), Some("did you mean `LL3`?"));
    }

    #[test]
    fn unbalanced_bracket_is_a_syntax_error() {
        let err = Layout::parse("A [B C", Catalog::standard());
        assert!(matches!(err, Err(LayoutError::Syntax { .. })), "{err:?}");
    }

    #[test]
    fn alignment_follows_order() {
        let l = layout("A/B C/D");
        let al = |key, part| l.scale_al(key, Side::Front, part);
        assert_eq!(al("A", RulePart::StatorTop), Align::Lower);
        assert_eq!(al("B", RulePart::Slide), Align::Upper);
        assert_eq!(al("C", RulePart::Slide), Align::Lower);
        assert_eq!(al("D", RulePart::StatorBottom), Align::Upper);
    }

    #[test]
    fn opposite_seen_earlier_aligns_upper() {
        let l = layout("[A B CI]");
        assert_eq!(l.scale_al("A", Side::Front, RulePart::Slide), Align::Upper);
        assert_eq!(l.scale_al("B", Side::Front, RulePart::Slide), Align::Upper);
        assert_eq!(l.scale_al("CI", Side::Front, RulePart::Slide), Align::Lower);
    }

    #[test]
    fn rulers_hug_the_edges() {
        let l = layout("A/B C/D\nIN [] CM");
        assert_eq!(l.scale_al("IN", Side::Rear, RulePart::StatorTop), Align::Upper);
        assert_eq!(l.scale_al("CM", Side::Rear, RulePart::StatorBottom), Align::Lower);
    }

    #[test]
    fn overrides_win_and_first_occurrence_decides() {
        let l = layout("K A/B K CI C/D P").with_aligns(Side::Front, &[("CI", Align::Upper)]);
        assert_eq!(l.scale_al("CI", Side::Front, RulePart::Slide), Align::Upper);
        // K is not last in the top stator, has no opposite: the part default
        assert_eq!(l.scale_al("K", Side::Front, RulePart::StatorTop), Align::Lower);
        assert_eq!(l.scale_al("P", Side::Front, RulePart::StatorBottom), Align::Upper);
    }
}
