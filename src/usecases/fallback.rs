//! Degradation rules for repository reads.
//!
//! List reads degrade to an empty list, single-item reads degrade to "not
//! found". Nothing is retried; the revalidation window is the only retry.

use crate::domain::DomainError;
use tracing::{error, warn};

pub(crate) fn list_or_empty<T>(what: &str, result: Result<Vec<T>, DomainError>) -> Vec<T> {
    match result {
        Ok(items) => items,
        Err(e) => {
            error!(what, error = %e, "repository read failed; rendering empty list");
            Vec::new()
        }
    }
}

pub(crate) fn item_or_none<T>(
    what: &str,
    slug: &str,
    result: Result<Option<T>, DomainError>,
) -> Option<T> {
    match result {
        Ok(Some(item)) => Some(item),
        Ok(None) => {
            warn!(what, slug, "no row for slug; rendering not found");
            None
        }
        Err(e) => {
            error!(what, slug, error = %e, "repository read failed; rendering not found");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_list_is_empty() {
        let failed: Result<Vec<u8>, _> = Err(DomainError::Repo("timeout".into()));
        assert!(list_or_empty("posts", failed).is_empty());
        assert_eq!(list_or_empty("posts", Ok(vec![1, 2])), vec![1, 2]);
    }

    #[test]
    fn test_failed_item_is_none() {
        let failed: Result<Option<u8>, _> = Err(DomainError::Repo("timeout".into()));
        assert_eq!(item_or_none("post", "x", failed), None);
        assert_eq!(item_or_none::<u8>("post", "x", Ok(None)), None);
        assert_eq!(item_or_none("post", "x", Ok(Some(3))), Some(3));
    }
}
