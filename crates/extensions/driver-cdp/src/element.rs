//! Element handles backed by CDP backend node IDs.

use std::fmt;
use std::sync::Arc;

use async_trait::async_trait;
use smartlocate_protocols::{BoundingBox, DriverError, ElementHandle, Point, Size};
use tokio::sync::OnceCell;

use crate::cdp::PageSession;

/// Axis-aligned bounds of a CDP quad.
///
/// Quads from transformed elements need not be rectangles, so the bounds
/// span all four corners.
pub fn quad_bounds(quad: &[f64]) -> BoundingBox {
    if quad.len() < 8 {
        return BoundingBox::default();
    }
    let xs = [quad[0], quad[2], quad[4], quad[6]];
    let ys = [quad[1], quad[3], quad[5], quad[7]];
    let min_x = xs.iter().copied().fold(f64::INFINITY, f64::min);
    let max_x = xs.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    let min_y = ys.iter().copied().fold(f64::INFINITY, f64::min);
    let max_y = ys.iter().copied().fold(f64::NEG_INFINITY, f64::max);
    BoundingBox::new(min_x, min_y, max_x - min_x, max_y - min_y)
}

/// A live DOM element on an attached page.
///
/// Backend node IDs stay valid across `DOM.getDocument` calls, unlike
/// document-scoped node IDs. The box is measured once per handle.
pub struct CdpElement {
    session: Arc<PageSession>,
    backend_node_id: i64,
    tag_name: String,
    bounds: OnceCell<BoundingBox>,
}

impl CdpElement {
    pub fn new(session: Arc<PageSession>, backend_node_id: i64, tag_name: String) -> Self {
        Self {
            session,
            backend_node_id,
            tag_name,
            bounds: OnceCell::new(),
        }
    }

    pub fn backend_node_id(&self) -> i64 {
        self.backend_node_id
    }

    /// Border box in viewport coordinates, zero-sized at the origin for
    /// elements without layout.
    pub async fn bounding_box(&self) -> Result<BoundingBox, DriverError> {
        let bounds = self
            .bounds
            .get_or_try_init(|| async {
                let model = self.session.get_box_model(self.backend_node_id).await?;
                Ok::<_, DriverError>(model.map(|m| quad_bounds(&m.border)).unwrap_or_default())
            })
            .await?;
        Ok(*bounds)
    }
}

impl fmt::Debug for CdpElement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CdpElement")
            .field("backend_node_id", &self.backend_node_id)
            .field("tag_name", &self.tag_name)
            .finish()
    }
}

#[async_trait]
impl ElementHandle for CdpElement {
    async fn location(&self) -> Result<Point, DriverError> {
        let bbox = self.bounding_box().await?;
        Ok(Point::new(bbox.x, bbox.y))
    }

    async fn size(&self) -> Result<Size, DriverError> {
        let bbox = self.bounding_box().await?;
        Ok(Size::new(bbox.width, bbox.height))
    }

    async fn tag_name(&self) -> Result<String, DriverError> {
        Ok(self.tag_name.clone())
    }
}
