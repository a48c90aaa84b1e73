//! Concurrent element geometry collection.

use futures::future::try_join_all;
use smartlocate_protocols::{
    BoundingBox, DriverError, ElementHandle, ElementQuery, ElementRef, TagFilter,
};

/// An element with its box and tag name read from the driver.
#[derive(Debug, Clone)]
pub struct CollectedElement {
    pub element: ElementRef,
    pub bbox: BoundingBox,
    pub tag_name: String,
}

/// Query every element matching `filter` and read its geometry.
///
/// Lookups for all elements run concurrently. The result keeps document
/// order. Any single driver failure fails the whole collection.
pub async fn collect_elements<Q>(
    query: &Q,
    filter: &TagFilter,
) -> Result<Vec<CollectedElement>, DriverError>
where
    Q: ElementQuery + ?Sized,
{
    let elements = query.query_all(filter.selector()).await?;

    let lookups = elements.into_iter().map(|element| async move {
        let (location, size, tag_name) =
            futures::try_join!(element.location(), element.size(), element.tag_name())?;
        Ok::<_, DriverError>(CollectedElement {
            bbox: BoundingBox::from_parts(location, size),
            tag_name: tag_name.to_ascii_lowercase(),
            element,
        })
    });

    try_join_all(lookups).await
}
