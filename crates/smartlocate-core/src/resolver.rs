//! Maps a predicted box onto a live element.
//!
//! For each tag filter in priority order, every matching element is scored
//! by IoU against the prediction. Elements that do not contain the
//! prediction's center are discarded. The best filter wins if it clears
//! [`CONFIDENCE_THRESHOLD`]; otherwise a final pass over all elements gets
//! one more chance.

use std::sync::Arc;

use smartlocate_protocols::{BoundingBox, Driver, ElementRef, TagFilter, INTERACTIVE_TAGS};
use tracing::debug;

use crate::collector::{collect_elements, CollectedElement};
use crate::error::LocatorError;
use crate::geometry::{center_contained, iou};
use crate::scale::ScaleFactor;

/// Minimum score a resolved element must reach.
pub const CONFIDENCE_THRESHOLD: f64 = 0.5;

/// Wildcard scans prefer an input or button scoring at least this fraction
/// of the top score.
const INTERACTIVE_PREFERENCE_RATIO: f64 = 0.5;

/// A scored element that survived the center check.
#[derive(Debug, Clone)]
pub struct Candidate {
    pub element: ElementRef,
    pub bbox: BoundingBox,
    pub tag_name: String,
    pub score: f64,
}

/// The element chosen for a prediction.
#[derive(Debug, Clone)]
pub struct Resolution {
    pub element: ElementRef,
    pub score: f64,
    /// The filter whose scan produced the element.
    pub tag_filter: TagFilter,
}

impl Resolution {
    fn from_candidate(candidate: Candidate, tag_filter: &TagFilter) -> Self {
        Self {
            element: candidate.element,
            score: candidate.score,
            tag_filter: tag_filter.clone(),
        }
    }
}

/// Score elements against `target`, dropping non-overlapping ones and those
/// not containing its center. Sorted by descending score; ties keep
/// document order.
pub fn rank_candidates(target: &BoundingBox, elements: Vec<CollectedElement>) -> Vec<Candidate> {
    let mut ranked: Vec<Candidate> = elements
        .into_iter()
        .map(|c| Candidate {
            score: iou(target, &c.bbox),
            element: c.element,
            bbox: c.bbox,
            tag_name: c.tag_name,
        })
        .filter(|c| c.score > 0.0 && center_contained(target, &c.bbox))
        .collect();
    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    ranked
}

/// Pick from an already ranked list.
///
/// Normally the top candidate. For the wildcard filter, the first input or
/// button scoring at least half the top score is taken instead.
pub fn select_candidate<'a>(filter: &TagFilter, ranked: &'a [Candidate]) -> Option<&'a Candidate> {
    let top = ranked.first()?;
    if filter.is_wildcard() {
        let floor = top.score * INTERACTIVE_PREFERENCE_RATIO;
        let interactive = ranked
            .iter()
            .take_while(|c| c.score >= floor)
            .find(|c| is_interactive(&c.tag_name));
        if let Some(candidate) = interactive {
            return Some(candidate);
        }
    }
    Some(top)
}

fn is_interactive(tag_name: &str) -> bool {
    INTERACTIVE_TAGS
        .iter()
        .any(|t| t.eq_ignore_ascii_case(tag_name))
}

/// Resolves predicted boxes against one page.
pub struct BoxResolver {
    driver: Arc<dyn Driver>,
    filters: Vec<TagFilter>,
    scale: ScaleFactor,
}

impl BoxResolver {
    /// `filters` are scanned in order and should already include defaults.
    pub fn new(driver: Arc<dyn Driver>, filters: Vec<TagFilter>, scale: ScaleFactor) -> Self {
        Self {
            driver,
            filters,
            scale,
        }
    }

    pub fn filters(&self) -> &[TagFilter] {
        &self.filters
    }

    pub fn scale(&self) -> ScaleFactor {
        self.scale
    }

    /// Find the element best matching `predicted`, a box in screenshot pixels.
    ///
    /// Returns `None` when nothing scores high enough. Driver failures
    /// propagate.
    pub async fn resolve(
        &self,
        predicted: &BoundingBox,
    ) -> Result<Option<Resolution>, LocatorError> {
        let target = self.scale.to_viewport(predicted);
        debug!("Resolving prediction {:?} (viewport {:?})", predicted, target);

        let mut best: Option<Resolution> = None;
        for filter in &self.filters {
            let Some(candidate) = self.best_for_filter(&target, filter).await? else {
                continue;
            };
            debug!(
                "Filter '{}' best candidate <{}> scored {:.3}",
                filter, candidate.tag_name, candidate.score
            );
            let best_score = best.as_ref().map_or(0.0, |b| b.score);
            if candidate.score > best_score {
                best = Some(Resolution::from_candidate(candidate, filter));
            }
        }

        if let Some(best) = best.filter(|b| b.score >= CONFIDENCE_THRESHOLD) {
            return Ok(Some(best));
        }

        let wildcard = TagFilter::Any;
        let fallback = self.best_for_filter(&target, &wildcard).await?;
        Ok(fallback
            .filter(|c| c.score > CONFIDENCE_THRESHOLD)
            .map(|c| Resolution::from_candidate(c, &wildcard)))
    }

    async fn best_for_filter(
        &self,
        target: &BoundingBox,
        filter: &TagFilter,
    ) -> Result<Option<Candidate>, LocatorError> {
        let elements = collect_elements(self.driver.as_ref(), filter).await?;
        let ranked = rank_candidates(target, elements);
        Ok(select_candidate(filter, &ranked).cloned())
    }
}

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;
