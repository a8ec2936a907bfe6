use std::fmt;

use serde::Serialize;

/// One pagination affordance, in render order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PageLink {
    Previous { target: u32 },
    Ellipsis,
    /// `index` is zero-based, `label` is what the user sees
    Page { index: u32, label: u32, active: bool },
    Next { target: u32 },
}

impl PageLink {
    /// Page index this affordance navigates to, if any
    pub const fn target(&self) -> Option<u32> {
        match self {
            Self::Previous { target } | Self::Next { target } => Some(*target),
            Self::Page { index, .. } => Some(*index),
            Self::Ellipsis => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageWindow {
    pub current_page: u32,
    pub total_pages: u32,
    pub links: Vec<PageLink>,
}

/// Builds the pagination controls around `current_page`.
///
/// Returns `None` when there is nothing to paginate (`total_pages <= 1`).
/// A current page past the end is clamped to the last page first.
pub fn compute_page_window(current_page: u32, total_pages: u32) -> Option<PageWindow> {
    if total_pages <= 1 {
        return None;
    }

    let current = current_page.min(total_pages - 1);
    let mut links = Vec::with_capacity(7);

    if current > 0 {
        links.push(PageLink::Previous {
            target: current - 1,
        });
    }
    if current > 1 {
        links.push(PageLink::Ellipsis);
    }
    if current > 0 {
        links.push(page_link(current - 1, false));
    }

    links.push(page_link(current, true));

    if current + 1 < total_pages {
        links.push(page_link(current + 1, false));
    }
    if current + 1 < total_pages - 1 {
        links.push(PageLink::Ellipsis);
    }
    if current + 1 < total_pages {
        links.push(PageLink::Next {
            target: current + 1,
        });
    }

    Some(PageWindow {
        current_page: current,
        total_pages,
        links,
    })
}

const fn page_link(index: u32, active: bool) -> PageLink {
    PageLink::Page {
        index,
        label: index + 1,
        active,
    }
}

impl fmt::Display for PageWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, link) in self.links.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            match link {
                PageLink::Previous { .. } => f.write_str("<")?,
                PageLink::Ellipsis => f.write_str("...")?,
                PageLink::Page {
                    label,
                    active: true,
                    ..
                } => write!(f, "[{label}]")?,
                PageLink::Page { label, .. } => write!(f, "{label}")?,
                PageLink::Next { .. } => f.write_str(">")?,
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_middle_page() {
        let window = compute_page_window(3, 10).unwrap();

        assert_eq!(
            window.links,
            vec![
                PageLink::Previous { target: 2 },
                PageLink::Ellipsis,
                PageLink::Page {
                    index: 2,
                    label: 3,
                    active: false
                },
                PageLink::Page {
                    index: 3,
                    label: 4,
                    active: true
                },
                PageLink::Page {
                    index: 4,
                    label: 5,
                    active: false
                },
                PageLink::Ellipsis,
                PageLink::Next { target: 4 },
            ]
        );
        assert_eq!(window.to_string(), "< ... 3 [4] 5 ... >");
    }

    #[test]
    fn test_first_page() {
        let window = compute_page_window(0, 5).unwrap();
        assert_eq!(window.to_string(), "[1] 2 ... >");
    }

    #[test]
    fn test_second_page_has_no_leading_ellipsis() {
        let window = compute_page_window(1, 5).unwrap();
        assert_eq!(window.to_string(), "< 1 [2] 3 ... >");
    }

    #[test]
    fn test_last_pages() {
        assert_eq!(compute_page_window(4, 5).unwrap().to_string(), "< ... 4 [5]");
        assert_eq!(compute_page_window(3, 5).unwrap().to_string(), "< ... 3 [4] 5 >");
    }

    #[test]
    fn test_two_pages() {
        assert_eq!(compute_page_window(0, 2).unwrap().to_string(), "[1] 2 >");
        assert_eq!(compute_page_window(1, 2).unwrap().to_string(), "< 1 [2]");
    }

    #[test]
    fn test_single_page_renders_nothing() {
        assert_eq!(compute_page_window(0, 1), None);
        assert_eq!(compute_page_window(0, 0), None);
        assert_eq!(compute_page_window(5, 1), None);
    }

    #[test]
    fn test_out_of_range_current_is_clamped() {
        let window = compute_page_window(42, 5).unwrap();
        assert_eq!(window.current_page, 4);
        assert_eq!(window, compute_page_window(4, 5).unwrap());
    }

    #[test]
    fn test_every_target_is_in_bounds() {
        for total in 2..12 {
            for current in 0..total + 3 {
                let window = compute_page_window(current, total).unwrap();
                let active: Vec<_> = window
                    .links
                    .iter()
                    .filter(|link| matches!(link, PageLink::Page { active: true, .. }))
                    .collect();
                assert_eq!(active.len(), 1);

                for link in &window.links {
                    if let Some(target) = link.target() {
                        assert!(target < total, "{target} out of range for {total}");
                    }
                }
            }
        }
    }
}
