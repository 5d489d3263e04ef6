//! The parsing boundary: raw vendor payloads in, clean signal lists out.
//!
//! Scoring never touches vendor JSON. Everything it consumes passes
//! through these functions first, which drop unusable entries and trim
//! the rest.

use pf_scoring::DetectedTechnology;

use crate::types::{RawJobPosting, RawTechnology};

/// Converts raw technology detections into the clean list the scoring
/// detectors consume. Entries without a usable name are dropped; names and
/// categories are trimmed; a missing source becomes the empty string.
#[must_use]
pub fn normalize_technologies(raw: Vec<RawTechnology>) -> Vec<DetectedTechnology> {
    raw.into_iter()
        .filter_map(|t| {
            let name = t.name?.trim().to_string();
            if name.is_empty() {
                return None;
            }
            Some(DetectedTechnology {
                name,
                category: t
                    .category
                    .map(|c| c.trim().to_string())
                    .filter(|c| !c.is_empty()),
                source: t.source.unwrap_or_default(),
            })
        })
        .collect()
}

/// Extracts usable job titles from raw postings, dropping blanks.
#[must_use]
pub fn normalize_job_titles(raw: Vec<RawJobPosting>) -> Vec<String> {
    raw.into_iter()
        .filter_map(|j| {
            let title = j.title?.trim().to_string();
            if title.is_empty() {
                None
            } else {
                Some(title)
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_tech(name: Option<&str>, category: Option<&str>) -> RawTechnology {
        RawTechnology {
            name: name.map(ToString::to_string),
            category: category.map(ToString::to_string),
            source: Some("builtwith".to_string()),
            first_detected: None,
        }
    }

    #[test]
    fn drops_nameless_and_blank_entries() {
        let raw = vec![
            raw_tech(Some("Algolia"), Some("Site Search")),
            raw_tech(None, Some("CDN")),
            raw_tech(Some("   "), None),
        ];
        let clean = normalize_technologies(raw);
        assert_eq!(clean.len(), 1);
        assert_eq!(clean[0].name, "Algolia");
        assert_eq!(clean[0].category.as_deref(), Some("Site Search"));
    }

    #[test]
    fn trims_names_and_empty_categories_become_none() {
        let raw = vec![raw_tech(Some("  Coveo  "), Some("  "))];
        let clean = normalize_technologies(raw);
        assert_eq!(clean[0].name, "Coveo");
        assert!(clean[0].category.is_none());
    }

    #[test]
    fn empty_input_yields_empty_output() {
        assert!(normalize_technologies(Vec::new()).is_empty());
        assert!(normalize_job_titles(Vec::new()).is_empty());
    }

    #[test]
    fn job_titles_drop_blanks() {
        let raw = vec![
            RawJobPosting {
                title: Some("VP of Search".to_string()),
                location: None,
                department: None,
            },
            RawJobPosting {
                title: Some("   ".to_string()),
                location: None,
                department: None,
            },
            RawJobPosting {
                title: None,
                location: Some("Remote".to_string()),
                department: None,
            },
        ];
        assert_eq!(normalize_job_titles(raw), vec!["VP of Search".to_string()]);
    }
}
